use std::io;

use crate::archive;
use crate::batch;
use crate::config;
use crate::manifest;

/// A catch-all error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	// A package error.
	#[error(transparent)]
	Archive(#[from] archive::Error),

	// A batch validation error.
	#[error(transparent)]
	Batch(#[from] batch::Error),

	// A config error.
	#[error(transparent)]
	Config(#[from] config::Error),

	// A manifest error.
	#[error(transparent)]
	Manifest(#[from] manifest::Error),

	// An IO error.
	#[error(transparent)]
	Io(#[from] io::Error),
}

/// A catch-all result.
pub type Result<T> = std::result::Result<T, Error>;
