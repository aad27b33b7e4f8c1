//! Builder assembling providers into a configuration

use crate::configuration::{Configuration, Layer};
use crate::provider::Provider;
use crate::providers::{EnvironmentProvider, JsonFileProvider, JsonProvider, MemoryProvider};
use crate::Result;
use std::path::Path;
use std::sync::Arc;

/// Collects providers in override order and builds a [`Configuration`].
///
/// ```
/// use appsettings_tree::ConfigurationBuilder;
///
/// let config = ConfigurationBuilder::new()
///     .add_json_str(r#"{"Logging": {"Level": "info"}}"#)
///     .add_in_memory([("Logging:Level", Some("debug"))])
///     .build()
///     .unwrap();
///
/// assert_eq!(config.get("logging:level"), Some("debug"));
/// ```
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    providers: Vec<Arc<dyn Provider>>,
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider; it overrides every provider added before it.
    pub fn add(mut self, provider: impl Provider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    pub fn add_in_memory<I, K, V>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.add(MemoryProvider::new(entries))
    }

    pub fn add_json_str(self, json: impl Into<String>) -> Self {
        self.add(JsonProvider::new(json))
    }

    /// Add a required JSON file.
    pub fn add_json_file(self, path: impl AsRef<Path>) -> Self {
        self.add(JsonFileProvider::new(path))
    }

    /// Add environment variables starting with `prefix` (empty for all).
    pub fn add_environment(self, prefix: impl Into<String>) -> Self {
        self.add(EnvironmentProvider::with_prefix(prefix))
    }

    /// Load every provider once, in order, and materialize the tree.
    pub fn build(self) -> Result<Configuration> {
        let layers = self
            .providers
            .into_iter()
            .map(|provider| -> Result<Layer> {
                let entries = provider.load()?;
                tracing::debug!(provider = provider.name(), count = entries.len(), "Loaded provider");
                Ok(Layer { provider, entries })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Configuration::from_layers(layers))
    }
}
