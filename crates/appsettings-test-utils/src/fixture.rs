//! [`SettingsDir`] for tests that load settings from disk.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding JSON settings files.
///
/// # Example
///
/// ```rust,no_run
/// use appsettings_test_utils::SettingsDir;
///
/// let dir = SettingsDir::new();
/// let path = dir.write("appsettings.json", r#"{"Name": "svc"}"#);
/// assert!(path.exists());
/// ```
pub struct SettingsDir {
    temp_dir: TempDir,
}

impl Default for SettingsDir {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `name` (relative to root), creating parent
    /// directories, and return the full path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", path.display()));
        path
    }

    /// Copy a file from the workspace `test-fixtures/` directory into this
    /// directory and return its new path.
    pub fn copy_fixture(&self, name: &str) -> PathBuf {
        let source = fixtures_root().join(name);
        let content = fs::read_to_string(&source)
            .unwrap_or_else(|_| panic!("Could not read fixture: {}", source.display()));
        self.write(name, &content)
    }

    /// Full path of `name` inside this directory, whether or not it exists.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }
}

/// The workspace `test-fixtures/` directory.
pub fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("test-fixtures")
}
