#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the cover-guard binary.
#[macro_export]
macro_rules! cover_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("cover-guard"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates a basic cover-guard config file.
    pub fn create_config(&self, content: &str) {
        self.create_file(".cover-guard.toml", content);
    }

    /// Creates a one-function source file whose body block is
    /// `f.rs:1.19,3.2` in profile terms.
    pub fn create_simple_source(&self, relative_path: &str, fn_name: &str) {
        self.create_file(
            relative_path,
            &format!("pub fn {fn_name}() -> u32 {{\n    1\n}}\n"),
        );
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A profile that fully covers the two statements of a simple source.
pub const COVERED_PROFILE: &str = "mode: set\nf.rs:1.19,3.2 2 1\n";

/// The same block, never executed.
pub const UNCOVERED_PROFILE: &str = "mode: set\nf.rs:1.19,3.2 2 0\n";
