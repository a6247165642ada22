//! [`TestProfileDir`] for tests that load profile documents from disk.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory of profile documents.
///
/// # Example
///
/// ```rust,no_run
/// use profile_test_utils::dir::TestProfileDir;
///
/// let dir = TestProfileDir::new();
/// dir.write("global.toml", "[[profiles]]\nscope = { type = \"global\" }\n");
/// dir.assert_file_exists("global.toml");
/// ```
pub struct TestProfileDir {
    temp_dir: TempDir,
}

impl Default for TestProfileDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProfileDir {
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

    /// Write `content` to `name` (relative to the root), creating parent
    /// directories as needed. Returns the full path.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("TestProfileDir::write: failed to create {}: {e}", parent.display()));
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestProfileDir::write: failed to write {}: {e}", path.display()));
        path
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
