//! Test harness for whole-project extraction tests.
//!
//! Copies a fixture project into a temp dir so config files and outputs can be
//! written freely, then runs discovery + extraction against it.

#![allow(dead_code)]

pub mod fixtures;

use std::path::Path;
use tempfile::TempDir;
use umlscope_core::types::{ScanConfig, TypeRegistry};
use umlscope_core::{extract_project, load_umlscope_config};

pub struct TestProject {
    _temp_dir: TempDir,
}

impl TestProject {
    /// Create a project from a named fixture directory under `tests/fixtures`.
    pub fn from_fixture(name: &str) -> Self {
        let fixture_src =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
        assert!(fixture_src.exists(), "Fixture '{name}' not found at {}", fixture_src.display());

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fixtures::copy_dir_recursive(&fixture_src, temp_dir.path());
        TestProject { _temp_dir: temp_dir }
    }

    /// Create an empty project.
    pub fn empty() -> Self {
        TestProject { _temp_dir: TempDir::new().expect("Failed to create temp dir") }
    }

    pub fn root(&self) -> &Path {
        self._temp_dir.path()
    }

    pub fn write(&self, rel: &str, content: &str) {
        fixtures::write_file(self.root(), rel, content);
    }

    pub fn config(&self) -> ScanConfig {
        load_umlscope_config(self.root())
    }

    pub fn extract(&self) -> TypeRegistry {
        extract_project(&self.config())
    }
}
