use std::fs;
use std::io;
use std::path::Path;

use serde::de;

/// A JSON deserialization error, annotated with the path to the offending value.
pub type Error = serde_path_to_error::Error<serde_json::Error>;

/// Deserialize a type `T` from a reader as JSON.
/// The reader is wrapped in a buffered reader.
///
/// # Arguments
///
/// * `reader` - The reader to deserialize from.
///
/// # Errors
///
/// Errors from `serde_path_to_error` are returned verbatim.
pub fn from_reader<R, T>(reader: R) -> Result<T, Error>
where
	R: io::Read,
	T: de::DeserializeOwned,
{
	let reader = io::BufReader::new(reader);
	let de = &mut serde_json::Deserializer::from_reader(reader);

	serde_path_to_error::deserialize(de)
}

/// Deserialize a type `T` from a JSON file.
///
/// # Arguments
///
/// * `path` - The path to the file.
///
/// # Errors
///
/// If the file cannot be opened, the IO error is returned in the outer result.
/// Deserialization errors are returned in the inner result.
pub fn from_file<P, T>(path: P) -> io::Result<Result<T, Error>>
where
	P: AsRef<Path>,
	T: de::DeserializeOwned,
{
	let file = fs::File::open(path)?;

	Ok(from_reader(file))
}
