//! Process-wide settings holder
//!
//! Call [`set`] once during startup, then read the settings from anywhere
//! with [`get`]:
//!
//! ```
//! use appsettings::{global, load};
//!
//! let config = load::from_json_string(r#"{"Name": "svc"}"#).unwrap();
//! global::set(config);
//!
//! let name = global::get().and_then(|c| c.get("name").map(str::to_owned));
//! assert_eq!(name.as_deref(), Some("svc"));
//! # global::clear();
//! ```
//!
//! The slot is a single atomically swapped reference: readers observe either
//! the previous or the new configuration, never a partially built one.
//! Concurrent [`set`] calls are not ordered; the last swap wins. There is no
//! lock around the configuration itself, so a stored configuration is only
//! ever replaced, never mutated in place.

use appsettings_tree::{Configuration, Result};
use arc_swap::ArcSwapOption;
use std::sync::{Arc, LazyLock};

static GLOBAL: LazyLock<ArcSwapOption<Configuration>> = LazyLock::new(ArcSwapOption::empty);

/// Returns the settings stored by [`set`], or `None` if it was never called.
pub fn get() -> Option<Arc<Configuration>> {
    GLOBAL.load_full()
}

/// Stores `config` as the process-wide settings, replacing any previous one.
pub fn set(config: impl Into<Arc<Configuration>>) {
    GLOBAL.store(Some(config.into()));
    tracing::info!("Global settings set");
}

/// Empties the slot, e.g. on shutdown or between tests.
pub fn clear() {
    if GLOBAL.swap(None).is_some() {
        tracing::info!("Global settings cleared");
    }
}

/// Reloads the stored settings from their dynamic providers.
///
/// A copy of the current configuration is reloaded and swapped in, so
/// readers holding the previous `Arc` keep a consistent view. On failure the
/// stored settings are left unchanged. The swap only happens if the slot
/// still holds the configuration that was reloaded; a [`set`] racing with
/// the reload wins.
///
/// Returns `Ok(true)` if the refreshed settings were stored, and `Ok(false)`
/// if nothing was stored or a concurrent [`set`] replaced them.
pub fn reload() -> Result<bool> {
    let current = GLOBAL.load_full();
    let Some(config) = &current else {
        return Ok(false);
    };

    let mut refreshed = Configuration::clone(config);
    refreshed.reload()?;

    let previous = GLOBAL.compare_and_swap(&current, Some(Arc::new(refreshed)));
    let swapped = (*previous)
        .as_ref()
        .is_some_and(|previous| Arc::ptr_eq(previous, config));
    if swapped {
        tracing::debug!("Global settings reloaded");
    } else {
        tracing::debug!("Global settings replaced during reload, keeping the newer ones");
    }
    Ok(swapped)
}
