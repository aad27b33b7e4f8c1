//! Shared test utilities for the appsettings workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`fixture`]: [`SettingsDir`] temporary directory for JSON settings files
//! - [`store`]: [`SecretStore`] in-memory dynamic provider standing in for a
//!   remote secret store

pub mod fixture;
pub mod store;

pub use fixture::SettingsDir;
pub use store::SecretStore;
