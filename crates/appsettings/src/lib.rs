//! Application settings helpers
//!
//! Thin helpers over the [`appsettings_tree`] configuration tree:
//!
//! - typed accessors: [`get_value`], [`get_array_value`], [`get_list_value`],
//!   [`get_hash_set_value`], [`to_dictionary`] and [`bind`];
//! - loaders in [`load`] for in-memory pairs, JSON text and JSON files;
//! - a process-wide holder in [`global`];
//! - [`reload`] for configurations backed by dynamic providers.
//!
//! Keys are colon-delimited and case-insensitive: `Section:Array:0`.

pub mod access;
pub mod global;
pub mod load;

pub use access::{
    bind, get_array_value, get_hash_set_value, get_list_value, get_value, to_dictionary,
};
pub use appsettings_tree::{
    Configuration, ConfigurationBuilder, Entries, EnvironmentProvider, Error, JsonFileProvider,
    JsonProvider, MemoryProvider, Provider, Result, Setting,
};

/// Forces every dynamic provider of `config` (secret stores, environment
/// variables) to fetch its values again and rebuilds the tree in place.
///
/// Succeeds without changes when no provider is dynamic. Provider failures
/// are returned as-is and leave `config` untouched; nothing is retried.
pub fn reload(config: &mut Configuration) -> Result<()> {
    tracing::debug!(providers = ?config.providers().collect::<Vec<_>>(), "Reloading settings");
    config.reload()
}
