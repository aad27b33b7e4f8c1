//! Error types for appsettings-tree

use std::fmt::Display;
use std::path::PathBuf;

/// Result type for appsettings-tree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, reloading or binding a configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot convert value at '{key}': {message}")]
    Coercion { key: String, message: String },

    #[error("Value at '{key}' is empty")]
    EmptyValue { key: String },

    #[error("Cannot convert value at '{key}': expected a value, found a section")]
    UnexpectedSection { key: String },

    #[error("Provider '{name}' failed: {message}")]
    Provider { name: String, message: String },
}

impl Error {
    pub fn parse(source_name: impl Into<String>, message: impl Display) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn coercion(key: impl Into<String>, message: impl Display) -> Self {
        Self::Coercion {
            key: key.into(),
            message: message.to_string(),
        }
    }

    pub fn provider(name: impl Into<String>, message: impl Display) -> Self {
        Self::Provider {
            name: name.into(),
            message: message.to_string(),
        }
    }

    /// Whether this is the marker raised for an empty leaf bound to a
    /// non-string scalar.
    pub fn is_empty_value(&self) -> bool {
        matches!(self, Self::EmptyValue { .. })
    }

    /// Fill in the key of a coercion error raised without path context.
    pub(crate) fn at(self, key: &str) -> Self {
        match self {
            Self::Coercion { key: k, message } if k.is_empty() => Self::Coercion {
                key: key.to_string(),
                message,
            },
            Self::EmptyValue { key: k } if k.is_empty() => Self::EmptyValue {
                key: key.to_string(),
            },
            Self::UnexpectedSection { key: k } if k.is_empty() => Self::UnexpectedSection {
                key: key.to_string(),
            },
            other => other,
        }
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Self::coercion(String::new(), msg)
    }
}
