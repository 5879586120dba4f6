use plist::Dictionary;
use plist::Value;

/// The Info.plist key holding the bundle's display name.
pub const NAME_KEY: &str = "CFBundleName";

/// The Info.plist key holding the bundle's user-facing version.
pub const VERSION_KEY: &str = "CFBundleShortVersionString";

/// The Info.plist key holding the bundle's reverse-DNS identifier.
pub const IDENTIFIER_KEY: &str = "CFBundleIdentifier";

const DEFAULT_NAME: &str = "Unknown";
const DEFAULT_VERSION: &str = "1.0";
const DEFAULT_IDENTIFIER: &str = "com.example.unknown";

/// Metadata describing an app bundle, as read from its Info.plist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleMetadata {
	/// The bundle's display name.
	pub name: String,

	/// The bundle's version.
	pub version: String,

	/// The bundle's identifier, i.e., `com.example.app`.
	pub bundle_identifier: String,
}

impl BundleMetadata {
	/// Reads bundle metadata from the top-level dictionary of an Info.plist.
	///
	/// Keys that are missing, or whose values are not strings, fall back to their defaults.
	///
	/// # Arguments
	///
	/// * `dict` - The Info.plist dictionary.
	#[must_use]
	pub fn from_dictionary(dict: &Dictionary) -> Self {
		let get = |key: &str, default: &str| {
			dict.get(key)
				.and_then(Value::as_string)
				.unwrap_or(default)
				.to_owned()
		};

		Self {
			name: get(NAME_KEY, DEFAULT_NAME),
			version: get(VERSION_KEY, DEFAULT_VERSION),
			bundle_identifier: get(IDENTIFIER_KEY, DEFAULT_IDENTIFIER),
		}
	}
}

impl Default for BundleMetadata {
	fn default() -> Self {
		Self {
			name: DEFAULT_NAME.to_owned(),
			version: DEFAULT_VERSION.to_owned(),
			bundle_identifier: DEFAULT_IDENTIFIER.to_owned(),
		}
	}
}
