//! Resolves record paths to description files and parses them.
//!
//! A record path is slash-separated and relative to the source directory.
//! Directories carry their own record in a descriptor file:
//!
//! ```text
//! api/                          # source directory
//! └── lovr/
//!     ├── init.toml             # "lovr"
//!     ├── getVersion.toml       # "lovr/getVersion"
//!     └── graphics/
//!         ├── init.toml         # "lovr/graphics"
//!         └── Buffer/
//!             ├── init.toml     # "lovr/graphics/Buffer"
//!             └── getSize.toml  # "lovr/graphics/Buffer/getSize"
//! ```
//!
//! The caller picks the record shape; the loader only finds and parses.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Extension of every description record.
pub const RECORD_EXTENSION: &str = "toml";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("No description record for '{0}'")]
    Missing(String),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Loader {
    root: PathBuf,
    descriptor: String,
}

impl Loader {
    pub fn new(root: &Path, descriptor: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            descriptor: descriptor.to_string(),
        }
    }

    /// Filesystem location of a record path (file or directory).
    pub fn location(&self, path: &str) -> PathBuf {
        path.split('/')
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }

    /// The file holding the record for `path`, if there is one.
    ///
    /// Directories resolve to their descriptor file; anything else resolves
    /// to `<path>.toml`.
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        let location = self.location(path);
        let file = if location.is_dir() {
            location.join(format!("{}.{RECORD_EXTENSION}", self.descriptor))
        } else {
            let mut name = location.into_os_string();
            name.push(".");
            name.push(RECORD_EXTENSION);
            PathBuf::from(name)
        };
        file.is_file().then_some(file)
    }

    /// Load and parse the record at `path` as `T`.
    pub fn load<T: DeserializeOwned>(&self, path: &str) -> Result<T, LoadError> {
        let file = self
            .resolve(path)
            .ok_or_else(|| LoadError::Missing(path.to_string()))?;
        debug!(record = path, file = %file.display(), "loading record");
        let content = fs::read_to_string(&file).map_err(|source| LoadError::Io {
            path: file.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| LoadError::Parse { path: file, source })
    }
}
