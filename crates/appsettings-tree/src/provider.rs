//! Provider abstraction for configuration sources

use crate::Result;
use std::fmt::Debug;

/// A flattened configuration entry as produced by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    /// A leaf string value.
    Value(String),
    /// An explicit null.
    Null,
    /// A section that exists but has no children (`{}` or `[]` in JSON).
    EmptySection,
}

impl From<Option<String>> for Setting {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Null,
        }
    }
}

/// Flattened provider output: colon-delimited key paths with their settings.
pub type Entries = Vec<(String, Setting)>;

/// A source of configuration entries.
///
/// Static providers are loaded once when the configuration is built. Dynamic
/// providers (remote secret stores, the process environment) are loaded
/// again on every reload.
pub trait Provider: Send + Sync + Debug {
    /// Human-readable name used in logs and errors.
    fn name(&self) -> &str;

    /// Fetch the current entries from the backing source.
    fn load(&self) -> Result<Entries>;

    /// Whether [`load`](Provider::load) can return different data over time.
    fn is_dynamic(&self) -> bool {
        false
    }
}
