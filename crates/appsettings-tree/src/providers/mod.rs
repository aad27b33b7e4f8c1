//! Built-in configuration providers

pub mod env;
pub mod json;
pub mod memory;

pub use env::EnvironmentProvider;
pub use json::{JsonFileProvider, JsonProvider};
pub use memory::MemoryProvider;
