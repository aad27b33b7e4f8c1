//! Hierarchical configuration tree for appsettings
//!
//! Builds a case-insensitive tree of string values addressed by
//! colon-delimited key paths (`Section:Subsection:Key`, `Section:Array:0`)
//! from an ordered list of providers, and binds sections into Rust types.

pub mod builder;
pub mod configuration;
pub mod de;
pub mod error;
pub mod node;
pub mod path;
pub mod provider;
pub mod providers;

pub use builder::ConfigurationBuilder;
pub use configuration::Configuration;
pub use error::{Error, Result};
pub use node::{Node, Slot};
pub use provider::{Entries, Provider, Setting};
pub use providers::{EnvironmentProvider, JsonFileProvider, JsonProvider, MemoryProvider};
