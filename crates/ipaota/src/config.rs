use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::json;

/// The file name of the config file in the user's home directory.
pub const FILE_NAME: &str = ".ipaota.json";

/// A config error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The config file could not be read.
	#[error("Failed to read config file {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The config file is not valid.
	#[error("Failed to parse config file {}: {source}", .path.display())]
	Json {
		path: PathBuf,
		#[source]
		source: json::Error,
	},
}

/// A config result.
pub type Result<T> = std::result::Result<T, Error>;

/// A set of configuration options, stored as JSON.
/// Use `Default::default` for the defaults.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// The URL packages are hosted at, without the package file name.
	pub base_url: Option<String>,

	/// The directory to write manifests into. Defaults to the current directory.
	pub output_dir: Option<String>,
}

impl Config {
	/// Returns the path to the user's config file at `~/.ipaota.json`.
	/// If the home directory cannot be found, None is returned.
	#[must_use]
	pub fn user_path() -> Option<PathBuf> {
		home::home_dir().map(|home| home.join(FILE_NAME))
	}

	/// Reads a config file.
	///
	/// # Errors
	///
	/// If the file cannot be read, [`Error::Io`] is returned.
	///
	/// If the file is not a valid config, [`Error::Json`] is returned.
	pub fn from_file<P>(path: P) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();

		json::from_file(path)
			.map_err(|source| Error::Io {
				path: path.to_owned(),
				source,
			})?
			.map_err(|source| Error::Json {
				path: path.to_owned(),
				source,
			})
	}

	/// Loads the config.
	///
	/// If `path` is given, that file must exist.
	/// Otherwise, the user's config file is read if it exists, falling back to the defaults.
	///
	/// # Errors
	///
	/// See [`from_file`].
	///
	/// [`from_file`]: crate::config::Config::from_file
	pub fn load(path: Option<&Path>) -> Result<Self> {
		if let Some(path) = path {
			return Self::from_file(path);
		}

		match Self::user_path() {
			Some(path) if path.is_file() => {
				tracing::debug!("Loading config from {}", path.display());

				Self::from_file(path)
			}
			_ => Ok(Self::default()),
		}
	}

	/// Returns the output directory as a path.
	#[must_use]
	pub fn output_dir(&self) -> PathBuf {
		self.output_dir
			.as_deref()
			.map_or_else(|| PathBuf::from("."), PathBuf::from)
	}
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;

	#[test]
	fn from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.json");
		fs::write(&path, r#"{"base_url": "https://x.com/app"}"#).unwrap();

		let config = Config::from_file(&path).unwrap();

		assert_eq!(config.base_url.as_deref(), Some("https://x.com/app"));
		assert_eq!(config.output_dir(), PathBuf::from("."));
	}

	#[test]
	fn invalid() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.json");
		fs::write(&path, r#"{"base_url": 42}"#).unwrap();

		let err = Config::from_file(&path).unwrap_err();
		assert!(matches!(err, Error::Json { .. }));
		assert!(err.to_string().contains("base_url"));

		fs::write(&path, r#"{"baseurl": "https://x.com"}"#).unwrap();
		assert!(matches!(
			Config::from_file(&path),
			Err(Error::Json { .. })
		));

		assert!(matches!(
			Config::load(Some(dir.path().join("missing.json").as_path())),
			Err(Error::Io { .. })
		));
	}
}
