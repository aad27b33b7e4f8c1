//! Environment variable provider

use crate::Result;
use crate::path::{KEY_DELIMITER, keys_equal};
use crate::provider::{Entries, Provider, Setting};

/// Separator used in variable names in place of `:`.
const ENV_DELIMITER: &str = "__";

/// Provider reading process environment variables.
///
/// Variables are filtered by an optional case-insensitive prefix which is
/// stripped from the key; `__` in the remaining name maps to `:`, so
/// `APP_Database__Port` with prefix `APP_` becomes `Database:Port`.
///
/// The environment is read again on every reload.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentProvider {
    prefix: String,
}

impl EnvironmentProvider {
    /// Read every environment variable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read only variables starting with `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn strip_prefix<'a>(&self, name: &'a str) -> Option<&'a str> {
        let head = name.get(..self.prefix.len())?;
        if !keys_equal(head, &self.prefix) {
            return None;
        }
        name.get(self.prefix.len()..).filter(|rest| !rest.is_empty())
    }
}

impl Provider for EnvironmentProvider {
    fn name(&self) -> &str {
        "environment"
    }

    fn load(&self) -> Result<Entries> {
        let entries: Entries = std::env::vars_os()
            .filter_map(|(name, value)| {
                let name = name.to_str()?;
                let value = value.to_str()?;
                let key = self.strip_prefix(name)?.replace(ENV_DELIMITER, KEY_DELIMITER);
                Some((key, Setting::Value(value.to_string())))
            })
            .collect();

        tracing::debug!(prefix = %self.prefix, count = entries.len(), "Read environment variables");
        Ok(entries)
    }

    fn is_dynamic(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_prefix_is_case_insensitive() {
        let provider = EnvironmentProvider::with_prefix("App_");
        assert_eq!(provider.strip_prefix("APP_Key"), Some("Key"));
        assert_eq!(provider.strip_prefix("app_key"), Some("key"));
        assert_eq!(provider.strip_prefix("OTHER_Key"), None);
        assert_eq!(provider.strip_prefix("APP_"), None);
        assert_eq!(provider.strip_prefix("AP"), None);
    }

    #[test]
    fn test_load_maps_double_underscore() {
        temp_env::with_var("ENVPROVTEST_Database__Port", Some("5432"), || {
            let provider = EnvironmentProvider::with_prefix("ENVPROVTEST_");
            let entries = provider.load().unwrap();
            assert_eq!(
                entries,
                vec![(
                    "Database:Port".to_string(),
                    Setting::Value("5432".to_string())
                )]
            );
        });
    }

    #[test]
    fn test_is_dynamic() {
        assert!(EnvironmentProvider::new().is_dynamic());
    }
}
