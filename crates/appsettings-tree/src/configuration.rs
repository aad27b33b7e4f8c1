//! Materialized configuration tree and reload

use crate::node::Node;
use crate::provider::{Entries, Provider};
use crate::Result;
use std::sync::Arc;

/// One provider together with the entries it produced on its last load.
#[derive(Debug, Clone)]
pub(crate) struct Layer {
    pub(crate) provider: Arc<dyn Provider>,
    pub(crate) entries: Entries,
}

/// A configuration tree built from an ordered list of providers.
///
/// Later providers override earlier ones key by key. Cloning is cheap for
/// providers (shared through `Arc`) and copies the materialized tree.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    root: Node,
    layers: Vec<Layer>,
}

impl Configuration {
    pub(crate) fn from_layers(layers: Vec<Layer>) -> Self {
        let root = materialize(&layers);
        Self { root, layers }
    }

    /// The root node of the tree.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The node at `key`, if present.
    pub fn node(&self, key: &str) -> Option<&Node> {
        self.root.get(key)
    }

    /// The raw leaf value at `key`.
    ///
    /// Returns `None` for missing keys, nulls and sections without a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.node(key)?.value()
    }

    /// Names of the providers in override order.
    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|l| l.provider.name())
    }

    /// Whether any provider can change on reload.
    pub fn has_dynamic_providers(&self) -> bool {
        self.layers.iter().any(|l| l.provider.is_dynamic())
    }

    /// Re-fetch every dynamic provider and rebuild the tree in place.
    ///
    /// Static providers keep the entries loaded at build time. If any dynamic
    /// provider fails the tree is left untouched and the error is returned;
    /// there are no retries. With no dynamic providers this is a no-op.
    ///
    /// Callers sharing the configuration across threads must synchronize
    /// around this call themselves.
    pub fn reload(&mut self) -> Result<()> {
        let mut refreshed = Vec::new();
        for (index, layer) in self.layers.iter().enumerate() {
            if !layer.provider.is_dynamic() {
                continue;
            }
            let entries = layer.provider.load().inspect_err(|e| {
                tracing::warn!(provider = layer.provider.name(), error = %e, "Reload failed");
            })?;
            tracing::debug!(
                provider = layer.provider.name(),
                count = entries.len(),
                "Reloaded provider"
            );
            refreshed.push((index, entries));
        }

        if refreshed.is_empty() {
            tracing::debug!("No dynamic providers, nothing to reload");
            return Ok(());
        }

        for (index, entries) in refreshed {
            self.layers[index].entries = entries;
        }
        self.root = materialize(&self.layers);
        Ok(())
    }
}

fn materialize(layers: &[Layer]) -> Node {
    let mut root = Node::root();
    for layer in layers {
        for (path, setting) in &layer.entries {
            root.apply(path, setting);
        }
    }
    tracing::debug!(layers = layers.len(), "Materialized configuration tree");
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigurationBuilder;

    #[test]
    fn test_get_raw_value() {
        let config = ConfigurationBuilder::new()
            .add_in_memory([("a:b", Some("x")), ("n", None)])
            .build()
            .unwrap();

        assert_eq!(config.get("A:B"), Some("x"));
        assert_eq!(config.get("a"), None);
        assert_eq!(config.get("n"), None);
        assert_eq!(config.get("missing"), None);
    }

    #[test]
    fn test_reload_without_dynamic_providers_is_noop() {
        let mut config = ConfigurationBuilder::new()
            .add_json_str(r#"{"a": "b"}"#)
            .build()
            .unwrap();
        let before = config.root().clone();

        config.reload().unwrap();

        assert!(!config.has_dynamic_providers());
        assert_eq!(config.root(), &before);
    }

    #[test]
    fn test_default_is_empty() {
        let config = Configuration::default();
        assert!(config.root().children().is_empty());
        assert_eq!(config.providers().count(), 0);
    }
}
