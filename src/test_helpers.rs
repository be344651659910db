//! Shared test utilities for the apidoc test suite.
//!
//! Provides fixture setup, a small description-tree builder, and lookups
//! that panic with the list of available names on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let api = scan(tmp.path(), &BuildConfig::default()).unwrap();
//!
//! let graphics = find_module(&api, "lovr.graphics");
//! let buffer = find_object(graphics, "Buffer");
//! assert_eq!(function_names(&buffer.methods), vec!["getSize", "setData"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::types::{Api, Function, Module, Object};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/api/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/api");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Builds a throwaway description tree file by file.
///
/// ```rust
/// let tree = TreeBuilder::new()
///     .file("lovr/init.toml", "")
///     .file("lovr/getVersion.toml", "summary = \"Version.\"");
/// let api = scan(tree.path(), &BuildConfig::default()).unwrap();
/// ```
pub struct TreeBuilder {
    dir: TempDir,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write `contents` to `rel`, creating parent directories.
    pub fn file(self, rel: &str, contents: &str) -> Self {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a module by key. Panics if not found.
pub fn find_module<'a>(api: &'a Api, key: &str) -> &'a Module {
    api.modules.iter().find(|m| m.key == key).unwrap_or_else(|| {
        let keys = module_keys(api);
        panic!("module '{key}' not found. Available: {keys:?}")
    })
}

/// Find an object by name within a module. Panics if not found.
pub fn find_object<'a>(module: &'a Module, name: &str) -> &'a Object {
    module
        .objects
        .iter()
        .find(|o| o.name == name)
        .unwrap_or_else(|| {
            let names: Vec<&str> = module.objects.iter().map(|o| o.name.as_str()).collect();
            panic!(
                "object '{name}' not found in module '{}'. Available: {names:?}",
                module.key
            )
        })
}

/// Find a function by name in a list. Panics if not found.
pub fn find_function<'a>(functions: &'a [Function], name: &str) -> &'a Function {
    functions.iter().find(|f| f.name == name).unwrap_or_else(|| {
        let names = function_names(functions);
        panic!("function '{name}' not found. Available: {names:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All module keys in aggregate order.
pub fn module_keys(api: &Api) -> Vec<&str> {
    api.modules.iter().map(|m| m.key.as_str()).collect()
}

/// Function names in list order.
pub fn function_names(functions: &[Function]) -> Vec<&str> {
    functions.iter().map(|f| f.name.as_str()).collect()
}
