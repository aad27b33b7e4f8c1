//! JSON providers
//!
//! A JSON document is flattened into colon-delimited key paths:
//!
//! ```text
//! {"Servers": [{"Host": "a"}], "Debug": true}
//!
//! Servers:0:Host = "a"
//! Debug          = "true"
//! ```
//!
//! Empty objects and arrays are kept as empty sections so they can be told
//! apart from `null`.

use crate::path::{combine, keys_equal};
use crate::provider::{Entries, Provider, Setting};
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Parse JSON text and flatten it into provider entries.
///
/// The top-level element must be an object.
pub fn flatten(source_name: &str, json: &str) -> Result<Entries> {
    let json = json.strip_prefix('\u{feff}').unwrap_or(json);
    let value: Value = serde_json::from_str(json).map_err(|e| Error::parse(source_name, e))?;

    let Value::Object(map) = value else {
        return Err(Error::parse(
            source_name,
            "top-level JSON element must be an object",
        ));
    };

    let mut entries = Vec::new();
    flatten_object(source_name, "", &map, &mut entries)?;
    Ok(entries)
}

fn flatten_object(
    source_name: &str,
    path: &str,
    map: &Map<String, Value>,
    entries: &mut Entries,
) -> Result<()> {
    let mut seen: Vec<&str> = Vec::with_capacity(map.len());

    for (key, value) in map {
        let child_path = combine(path, key);
        if seen.iter().any(|k| keys_equal(k, key)) {
            return Err(Error::parse(
                source_name,
                format!("duplicate key '{child_path}'"),
            ));
        }
        seen.push(key);
        flatten_value(source_name, child_path, value, entries)?;
    }

    Ok(())
}

fn flatten_value(
    source_name: &str,
    path: String,
    value: &Value,
    entries: &mut Entries,
) -> Result<()> {
    match value {
        Value::Object(map) if map.is_empty() => entries.push((path, Setting::EmptySection)),
        Value::Object(map) => flatten_object(source_name, &path, map, entries)?,
        Value::Array(items) if items.is_empty() => entries.push((path, Setting::EmptySection)),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_value(source_name, combine(&path, &index.to_string()), item, entries)?;
            }
        }
        Value::Null => entries.push((path, Setting::Null)),
        Value::Bool(b) => entries.push((path, Setting::Value(b.to_string()))),
        Value::Number(n) => entries.push((path, Setting::Value(n.to_string()))),
        Value::String(s) => entries.push((path, Setting::Value(s.clone()))),
    }
    Ok(())
}

/// Provider backed by a JSON document held in memory.
#[derive(Debug, Clone)]
pub struct JsonProvider {
    json: String,
}

impl JsonProvider {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl Provider for JsonProvider {
    fn name(&self) -> &str {
        "JSON string"
    }

    fn load(&self) -> Result<Entries> {
        flatten(self.name(), &self.json)
    }
}

/// Provider backed by a JSON file on disk.
///
/// The containing directory becomes the base path; the file is read once
/// when the configuration is built.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    name: String,
    base_path: PathBuf,
    file_name: PathBuf,
    optional: bool,
}

impl JsonFileProvider {
    /// Create a provider for the file at `path`.
    ///
    /// A path without a directory component resolves against the current
    /// directory.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let base_path = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let base_path = dunce::canonicalize(&base_path).unwrap_or(base_path);
        let file_name = path.file_name().map(PathBuf::from).unwrap_or_default();

        Self {
            name: path.display().to_string(),
            base_path,
            file_name,
            optional: false,
        }
    }

    /// Treat a missing file as an empty source instead of an error.
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Directory the file is resolved against.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Full path of the file.
    pub fn path(&self) -> PathBuf {
        self.base_path.join(&self.file_name)
    }
}

impl Provider for JsonFileProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Entries> {
        let path = self.path();
        match fs::read(&path) {
            Ok(bytes) => {
                let content =
                    String::from_utf8(bytes).map_err(|e| Error::parse(&self.name, e))?;
                flatten(&self.name, &content)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if self.optional {
                    tracing::warn!(path = %path.display(), "Optional JSON file not found, skipping");
                    Ok(Vec::new())
                } else {
                    Err(Error::NotFound { path })
                }
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }
}
