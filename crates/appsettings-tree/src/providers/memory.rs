//! In-memory provider

use crate::Result;
use crate::provider::{Entries, Provider, Setting};

/// Provider backed by a fixed list of key/value pairs.
///
/// Array items are passed by appending a zero-based index to the key,
/// e.g. `ServiceA:Hosts:0`, `ServiceA:Hosts:1`. A `None` value is an
/// explicit null.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    entries: Entries,
}

impl MemoryProvider {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), Setting::from(v.map(Into::into))))
                .collect(),
        }
    }
}

impl Provider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self) -> Result<Entries> {
        Ok(self.entries.clone())
    }
}
