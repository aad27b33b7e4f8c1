//! Loaders building a configuration from different sources

use appsettings_tree::{Configuration, ConfigurationBuilder, Result};
use std::path::Path;

/// Loads settings from key/value pairs.
///
/// Array items are passed by appending a zero-based index to the key. A
/// `None` value is an explicit null. Duplicate keys: the last one wins.
/// In-memory sources cannot fail to load, so this only errors if that
/// changes.
///
/// ```
/// use appsettings::{get_array_value, load};
///
/// let config = load::from_dictionary([
///     ("ValueSettingA", Some("Value1")),
///     ("SectionB:ValueSettingX", Some("ValueX")),
///     ("SectionC:ArraySetting1:0", Some("Value0")),
///     ("SectionC:ArraySetting1:1", Some("Value1")),
/// ])
/// .unwrap();
///
/// let array = get_array_value::<String>(&config, "SectionC:ArraySetting1").unwrap();
/// assert_eq!(array.as_deref(), Some(&["Value0".to_string(), "Value1".to_string()][..]));
/// ```
pub fn from_dictionary<I, K, V>(entries: I) -> Result<Configuration>
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: Into<String>,
{
    ConfigurationBuilder::new().add_in_memory(entries).build()
}

/// Loads settings from a JSON document.
///
/// Fails with [`Error::Parse`](appsettings_tree::Error::Parse) if `json` is
/// malformed or its top-level element is not an object.
pub fn from_json_string(json: &str) -> Result<Configuration> {
    ConfigurationBuilder::new().add_json_str(json).build()
}

/// Loads settings from a JSON file.
///
/// The file's directory is used as the base path. Fails with
/// [`Error::NotFound`](appsettings_tree::Error::NotFound) if the file does
/// not exist.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Configuration> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Loading settings from JSON file");
    ConfigurationBuilder::new().add_json_file(path).build()
}
