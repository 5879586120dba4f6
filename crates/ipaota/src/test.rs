use std::fs;
use std::io::prelude::*;
use std::path::Path;
use std::path::PathBuf;

use plist::Dictionary;
use plist::Value;

use crate::bundle;

/// Returns an Info.plist dictionary with the given keys set.
/// Keys that are None are left out of the dictionary.
pub fn info(name: Option<&str>, version: Option<&str>, identifier: Option<&str>) -> Value {
	let mut dict = Dictionary::new();

	for (key, value) in [
		(bundle::NAME_KEY, name),
		(bundle::VERSION_KEY, version),
		(bundle::IDENTIFIER_KEY, identifier),
	] {
		if let Some(value) = value {
			dict.insert(key.to_owned(), value.into());
		}
	}

	// Unrelated keys should be ignored.
	dict.insert("CFBundleExecutable".to_owned(), "App".into());
	dict.insert(
		"UIDeviceFamily".to_owned(),
		Value::Array(vec![Value::Boolean(true)]),
	);

	Value::Dictionary(dict)
}

/// Serializes a value as an XML property list.
pub fn xml(value: &Value) -> Vec<u8> {
	let mut buf = Vec::new();
	value.to_writer_xml(&mut buf).unwrap();

	buf
}

/// Serializes a value as a binary property list.
pub fn binary(value: &Value) -> Vec<u8> {
	let mut buf = Vec::new();
	value.to_writer_binary(&mut buf).unwrap();

	buf
}

/// Writes a zip archive named `name` into `dir` with the given (path, content) entries, in order.
pub fn package<P>(dir: P, name: &str, entries: &[(&str, &[u8])]) -> PathBuf
where
	P: AsRef<Path>,
{
	let path = dir.as_ref().join(name);
	let file = fs::File::create(&path).unwrap();

	let mut writer = zip::ZipWriter::new(file);
	let options = zip::write::SimpleFileOptions::default()
		.compression_method(zip::CompressionMethod::Deflated);

	for (entry, content) in entries {
		writer.start_file(*entry, options).unwrap();
		writer.write_all(content).unwrap();
	}

	writer.finish().unwrap();

	path
}

/// Writes a package with a single XML Info.plist under `Payload/<name>.app/`.
pub fn simple_package<P>(dir: P, file_name: &str, name: &str) -> PathBuf
where
	P: AsRef<Path>,
{
	let plist = xml(&info(Some(name), Some("1.2.3"), Some("com.example.test")));
	let entry = format!("Payload/{name}.app/Info.plist");

	package(dir, file_name, &[(entry.as_str(), plist.as_slice())])
}
