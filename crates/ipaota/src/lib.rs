//! Over-the-air installation manifests for iOS packages, as a library.
//!
//! A package (`.ipa`) is a zip archive containing an app bundle under `Payload/`.
//! Its Info.plist is read with [`archive::extract`], and a manifest pointing at the URL
//! the package will be hosted at is written with [`Manifest`].
//! [`BatchJob`] does both for up to ten packages at once.

pub mod archive;
pub mod batch;
pub mod bundle;
pub mod config;
pub mod error;
pub mod json;
pub mod manifest;

#[cfg(test)]
mod test;

pub use archive::Package;
pub use batch::BatchJob;
pub use batch::Report;
pub use bundle::BundleMetadata;
pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use manifest::Manifest;
