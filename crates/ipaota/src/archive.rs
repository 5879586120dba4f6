use std::fs;
use std::io;
use std::io::prelude::*;
use std::path::Path;

use plist::Dictionary;
use plist::Value;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::bundle::BundleMetadata;

/// The file name of a bundle's metadata document.
pub const INFO_PLIST: &str = "Info.plist";

/// The directory inside a package holding the app bundle.
pub const PAYLOAD_DIR: &str = "Payload/";

/// A package error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The package could not be opened or read.
	#[error("Failed to read package: {0}")]
	Io(#[from] io::Error),

	/// The package is not a valid zip archive.
	#[error("Invalid package archive: {0}")]
	Archive(#[from] ZipError),

	/// The package does not contain an Info.plist.
	#[error("Info.plist not found in package")]
	NotFound,

	/// The Info.plist could be parsed neither as XML nor as binary.
	#[error("Info.plist is not a valid property list (as XML: {xml}; as binary: {binary})")]
	Parse {
		/// The error from parsing as XML.
		xml: plist::Error,

		/// The error from parsing as binary.
		binary: plist::Error,
	},

	/// The Info.plist was parsed, but its root is not a dictionary.
	#[error("Info.plist root is not a dictionary")]
	NotADictionary,
}

/// A package result.
pub type Result<T> = std::result::Result<T, Error>;

/// Checks if an entry path in a package names an Info.plist.
///
/// This also matches the Info.plist of nested bundles such as frameworks and app extensions.
#[must_use]
pub fn is_info_plist(name: &str) -> bool {
	name.ends_with(INFO_PLIST) && name.contains(PAYLOAD_DIR)
}

/// Parses the contents of an Info.plist into its top-level dictionary.
///
/// The contents are parsed as XML first, and if that fails, parsed again from the start as binary.
///
/// # Arguments
///
/// * `bytes` - The contents of the Info.plist.
///
/// # Errors
///
/// If both attempts fail, [`Error::Parse`] is returned with both underlying errors.
///
/// If the root of the property list is not a dictionary, [`Error::NotADictionary`] is returned.
pub fn parse_info_plist(bytes: &[u8]) -> Result<Dictionary> {
	let mut reader = io::Cursor::new(bytes);

	let value = match Value::from_reader_xml(&mut reader) {
		Ok(value) => value,
		Err(xml) => {
			tracing::debug!("Info.plist is not XML, retrying as binary: {xml}");

			reader.set_position(0);

			Value::from_reader(&mut reader).map_err(|binary| Error::Parse { xml, binary })?
		}
	};

	value.into_dictionary().ok_or(Error::NotADictionary)
}

/// Metadata read from a package, along with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
	/// The path of the Info.plist entry inside the package.
	pub entry: String,

	/// The bundle metadata.
	pub metadata: BundleMetadata,
}

/// An opened package archive (`.ipa`).
pub struct Package {
	archive: ZipArchive<fs::File>,
}

impl Package {
	/// Opens a package.
	///
	/// # Arguments
	///
	/// * `path` - The path to the package.
	///
	/// # Errors
	///
	/// If the file cannot be opened, [`Error::Io`] is returned.
	///
	/// If the file is not a zip archive, [`Error::Archive`] is returned.
	pub fn open<P>(path: P) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let file = fs::File::open(path)?;
		let archive = ZipArchive::new(file)?;

		Ok(Self { archive })
	}

	/// Returns the index of the first Info.plist entry, in archive order.
	///
	/// When nested bundles are present, the first entry is not necessarily the main bundle's.
	///
	/// # Errors
	///
	/// If an entry cannot be read, [`Error::Archive`] is returned.
	pub fn find_info_plist(&mut self) -> Result<Option<usize>> {
		for index in 0..self.archive.len() {
			let file = self.archive.by_index_raw(index)?;

			if is_info_plist(file.name()) {
				tracing::debug!("Found Info.plist at {}", file.name());

				return Ok(Some(index));
			}
		}

		Ok(None)
	}

	/// Reads the bundle metadata from the package's Info.plist.
	///
	/// # Errors
	///
	/// If there is no Info.plist, [`Error::NotFound`] is returned.
	///
	/// If the Info.plist cannot be read, [`Error::Io`] or [`Error::Archive`] is returned.
	///
	/// If the Info.plist cannot be parsed, see [`parse_info_plist`].
	pub fn info(&mut self) -> Result<Info> {
		let index = self.find_info_plist()?.ok_or(Error::NotFound)?;

		let mut file = self.archive.by_index(index)?;
		let entry = file.name().to_owned();

		let mut bytes = Vec::new();
		file.read_to_end(&mut bytes)?;

		let dict = parse_info_plist(&bytes)?;

		Ok(Info {
			entry,
			metadata: BundleMetadata::from_dictionary(&dict),
		})
	}
}

/// Extracts the bundle metadata from a package.
/// The package is closed before returning.
///
/// # Arguments
///
/// * `path` - The path to the package.
///
/// # Errors
///
/// See [`Package::open`] and [`Package::info`].
pub fn extract<P>(path: P) -> Result<BundleMetadata>
where
	P: AsRef<Path>,
{
	let info = Package::open(path)?.info()?;

	Ok(info.metadata)
}
