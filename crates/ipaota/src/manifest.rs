use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::bundle::BundleMetadata;

/// The asset kind for an app package.
pub const ASSET_KIND: &str = "software-package";

/// The metadata kind for an app.
pub const METADATA_KIND: &str = "software";

/// A manifest error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The manifest could not be serialized.
	#[error("Failed to serialize manifest: {0}")]
	Plist(#[from] plist::Error),

	/// The manifest could not be written.
	#[error("Failed to write manifest: {0}")]
	Io(#[from] io::Error),
}

/// A manifest result.
pub type Result<T> = std::result::Result<T, Error>;

/// An asset to download during installation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Asset {
	/// The kind of asset.
	pub kind: String,

	/// The URL to download the asset from.
	pub url: String,
}

/// Metadata shown by the installer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Metadata {
	pub bundle_identifier: String,
	pub bundle_version: String,
	pub kind: String,
	pub title: String,
}

/// An installable item.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Item {
	pub assets: Vec<Asset>,
	pub metadata: Metadata,
}

/// An over-the-air installation manifest, as consumed by the iOS installer
/// (i.e., through an `itms-services://?action=download-manifest&url=...` link).
///
/// Fields are declared in sorted key order so serialization is stable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
	pub items: Vec<Item>,
}

impl Manifest {
	/// Creates a manifest for a single package.
	///
	/// # Arguments
	///
	/// * `url` - The URL the package will be downloaded from. It is used verbatim.
	/// * `metadata` - The package's bundle metadata.
	#[must_use]
	pub fn new(url: &str, metadata: &BundleMetadata) -> Self {
		let item = Item {
			assets: vec![Asset {
				kind: ASSET_KIND.to_owned(),
				url: url.to_owned(),
			}],
			metadata: Metadata {
				bundle_identifier: metadata.bundle_identifier.clone(),
				bundle_version: metadata.version.clone(),
				kind: METADATA_KIND.to_owned(),
				title: metadata.name.clone(),
			},
		};

		Self { items: vec![item] }
	}

	/// Parses a manifest from a property list in any encoding.
	///
	/// # Errors
	///
	/// If the bytes are not a valid manifest, [`Error::Plist`] is returned.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		let manifest = plist::from_bytes(bytes)?;

		Ok(manifest)
	}

	/// Serializes the manifest as a binary property list.
	///
	/// # Errors
	///
	/// If serialization fails, [`Error::Plist`] is returned.
	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		let mut buf = Vec::new();
		plist::to_writer_binary(&mut buf, self)?;

		Ok(buf)
	}

	/// Writes the manifest to a file as a binary property list.
	/// If the file exists, it is overwritten.
	///
	/// # Errors
	///
	/// If serialization fails, [`Error::Plist`] is returned.
	///
	/// If the file cannot be written, [`Error::Io`] is returned.
	pub fn write<P>(&self, path: P) -> Result<()>
	where
		P: AsRef<Path>,
	{
		let bytes = self.to_bytes()?;

		fs::write(path, bytes)?;

		Ok(())
	}
}

/// Builds a manifest for a package and serializes it as a binary property list.
///
/// # Errors
///
/// See [`Manifest::to_bytes`].
pub fn build(url: &str, metadata: &BundleMetadata) -> Result<Vec<u8>> {
	Manifest::new(url, metadata).to_bytes()
}
