//! [`SecretStore`]: a dynamic provider whose values tests can change.

use appsettings_tree::{Entries, Error, Provider, Result, Setting};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct State {
    secrets: BTreeMap<String, String>,
    unavailable: bool,
    loads: usize,
}

/// In-memory stand-in for a remote secret store.
///
/// Clones share state, so a test keeps one handle and passes a clone to the
/// configuration builder.
#[derive(Debug, Clone, Default)]
pub struct SecretStore {
    state: Arc<RwLock<State>>,
}

impl SecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert for initial secrets.
    pub fn with_secret(self, key: &str, value: &str) -> Self {
        self.put(key, value);
        self
    }

    /// Insert or replace a secret.
    pub fn put(&self, key: &str, value: &str) {
        self.state
            .write()
            .unwrap()
            .secrets
            .insert(key.to_string(), value.to_string());
    }

    /// Remove a secret.
    pub fn remove(&self, key: &str) {
        self.state.write().unwrap().secrets.remove(key);
    }

    /// Make subsequent loads fail, as if the store were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.write().unwrap().unavailable = unavailable;
    }

    /// Number of times the store has been loaded.
    pub fn loads(&self) -> usize {
        self.state.read().unwrap().loads
    }
}

impl Provider for SecretStore {
    fn name(&self) -> &str {
        "secret-store"
    }

    fn load(&self) -> Result<Entries> {
        let mut state = self
            .state
            .write()
            .map_err(|e| Error::provider("secret-store", e))?;
        if state.unavailable {
            return Err(Error::provider("secret-store", "store unavailable"));
        }
        state.loads += 1;

        Ok(state
            .secrets
            .iter()
            .map(|(k, v)| (k.clone(), Setting::Value(v.clone())))
            .collect())
    }

    fn is_dynamic(&self) -> bool {
        true
    }
}
