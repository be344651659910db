//! Description tree walking and aggregation.
//!
//! Walks the source directory, classifies every entry, loads each record,
//! and builds the normalized [`Api`] bottom-up.
//!
//! ## Directory Structure
//!
//! ```text
//! api/                             # Source directory
//! └── lovr/                        # Root module
//!     ├── init.toml                # Root module record
//!     ├── getVersion.toml          # Function (lowercase file)
//!     ├── callbacks/               # Callbacks (reserved directory)
//!     │   ├── draw.toml            # → lovr.draw
//!     │   └── load.toml
//!     ├── graphics/                # Module (lowercase directory)
//!     │   ├── init.toml
//!     │   ├── newBuffer.toml       # Function
//!     │   ├── DrawStyle.toml       # Enum (Uppercase file)
//!     │   └── Buffer/              # Object (Uppercase directory)
//!     │       ├── init.toml
//!     │       └── getSize.toml     # Method (any file but init.toml)
//!     └── enet/                    # External module (external = true)
//!         ├── init.toml
//!         └── host_create.toml
//! ```
//!
//! ## Output
//!
//! Produces an [`Api`] containing:
//! - `modules`: the root module, then every lowercase subdirectory of the
//!   root module except the callbacks directory, in listing order
//! - `callbacks`: every record in the callbacks directory, keyed as if it
//!   were a function of the root module
//!
//! Listing order is file name order, so output is stable across platforms.
//!
//! ## Failure
//!
//! The walk stops at the first problem: a missing or malformed record, a
//! variant that references an undeclared argument, or (with
//! `strict_naming`) an entry that fits no naming convention. No partial
//! result is returned.

use crate::config::BuildConfig;
use crate::loader::{LoadError, Loader, RECORD_EXTENSION};
use crate::naming::{self, EntryKind};
use crate::normalize::{self, ModuleChildren, NormalizeError, Parent};
use crate::record::{RawEnum, RawFunction, RawModule, RawObject};
use crate::types::{Api, Enum, Function, Module, Object};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error("Failed to list {path}: {source}")]
    List {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("Root module directory not found: {0}")]
    MissingRoot(PathBuf),
    #[error("Entry fits no naming convention: {0}")]
    Unclassified(PathBuf),
}

/// One classified child of a module or object directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// File stem or directory name.
    pub name: String,
    /// Record path of the entry, e.g. `lovr/graphics/Buffer`.
    pub path: String,
    pub kind: EntryKind,
}

/// Walk the description tree under `source` and build the aggregate.
pub fn scan(source: &Path, config: &BuildConfig) -> Result<Api, ScanError> {
    let walker = Walker {
        loader: Loader::new(source, &config.descriptor),
        config,
    };
    let root_path = config.root_module.as_str();
    let root_dir = walker.loader.location(root_path);
    if !root_dir.is_dir() {
        return Err(ScanError::MissingRoot(root_dir));
    }

    let (root, submodules) = walker.module(root_path)?;
    let root_key = root.key.clone();
    let mut modules = vec![root];

    for entry in submodules {
        if entry.name == config.callbacks_dir {
            continue;
        }
        let (module, nested) = walker.module(&entry.path)?;
        for skipped in nested {
            debug!(path = %skipped.path, "not descending into module directory");
        }
        modules.push(module);
    }

    let callbacks = walker.callbacks(&root_key)?;

    info!(
        modules = modules.len(),
        callbacks = callbacks.len(),
        "scanned {}",
        root_dir.display()
    );
    Ok(Api { modules, callbacks })
}

struct Walker<'a> {
    loader: Loader,
    config: &'a BuildConfig,
}

impl Walker<'_> {
    /// Load and normalize a module. Lowercase subdirectories are not walked;
    /// they are returned for the caller to decide on.
    fn module(&self, path: &str) -> Result<(Module, Vec<Entry>), ScanError> {
        let raw: RawModule = self.loader.load(path)?;
        let name = naming::last_segment(path);
        let dotted = naming::dotted_key(path, &self.config.callbacks_dir);
        let key = if raw.external {
            name.to_string()
        } else {
            dotted.clone()
        };
        let parent = Parent::Module {
            path: &dotted,
            module: &key,
        };

        let mut children = ModuleChildren::default();
        let mut submodules = Vec::new();
        for entry in self.entries(path)? {
            match entry.kind {
                EntryKind::Function => children.functions.push(self.function(&entry.path, parent)?),
                EntryKind::Object => children.objects.push(self.object(&entry.path, &key)?),
                EntryKind::Enum => children.enums.push(self.enumeration(&entry.path, &key)?),
                EntryKind::Module => submodules.push(entry),
            }
        }

        debug!(
            module = %key,
            functions = children.functions.len(),
            objects = children.objects.len(),
            enums = children.enums.len(),
            "module"
        );
        Ok((normalize::module(raw, name, key, children), submodules))
    }

    fn object(&self, path: &str, module: &str) -> Result<Object, ScanError> {
        let raw: RawObject = self.loader.load(path)?;
        let name = naming::last_segment(path);
        let parent = Parent::Object { key: name, module };

        let mut methods = Vec::new();
        for (entry_name, is_dir) in self.list(path)? {
            if is_dir {
                self.unclassified(path, &entry_name)?;
                continue;
            }
            methods.push(self.function(&format!("{path}/{entry_name}"), parent)?);
        }

        Ok(normalize::object(raw, name, module, methods))
    }

    fn enumeration(&self, path: &str, module: &str) -> Result<Enum, ScanError> {
        let raw: RawEnum = self.loader.load(path)?;
        Ok(normalize::enumeration(raw, naming::last_segment(path), module))
    }

    fn function(&self, path: &str, parent: Parent<'_>) -> Result<Function, ScanError> {
        let raw: RawFunction = self.loader.load(path)?;
        Ok(normalize::function(raw, naming::last_segment(path), parent)?)
    }

    /// Every record in the callbacks directory, parented to the root module.
    fn callbacks(&self, root_key: &str) -> Result<Vec<Function>, ScanError> {
        let path = format!("{}/{}", self.config.root_module, self.config.callbacks_dir);
        if !self.loader.location(&path).is_dir() {
            debug!(path = %path, "no callbacks directory");
            return Ok(Vec::new());
        }
        let dotted = naming::dotted_key(&path, &self.config.callbacks_dir);
        let parent = Parent::Module {
            path: &dotted,
            module: root_key,
        };
        let mut callbacks = Vec::new();
        for (name, is_dir) in self.list(&path)? {
            if is_dir {
                self.unclassified(&path, &name)?;
                continue;
            }
            callbacks.push(self.function(&format!("{path}/{name}"), parent)?);
        }
        Ok(callbacks)
    }

    /// Classified children of a module directory, in listing order.
    fn entries(&self, path: &str) -> Result<Vec<Entry>, ScanError> {
        let mut entries = Vec::new();
        for (name, is_dir) in self.list(path)? {
            match naming::classify(&name, is_dir) {
                Some(kind) => {
                    debug!(entry = %name, %kind, "classified");
                    entries.push(Entry {
                        path: format!("{path}/{name}"),
                        name,
                        kind,
                    });
                }
                None => self.unclassified(path, &name)?,
            }
        }
        Ok(entries)
    }

    /// Record-bearing entries of a directory as `(name, is_dir)`, sorted by
    /// file name. Files are reported by stem. Hidden entries, files that are
    /// not records, and the directory's own descriptor are skipped.
    fn list(&self, path: &str) -> Result<Vec<(String, bool)>, ScanError> {
        let dir = self.loader.location(path);
        let mut listed = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| ScanError::List {
                path: dir.clone(),
                source,
            })?;
            let file_name = entry.file_name().to_string_lossy();
            if file_name.starts_with('.') {
                continue;
            }
            if entry.file_type().is_dir() {
                listed.push((file_name.into_owned(), true));
                continue;
            }
            let entry_path = entry.path();
            if entry_path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                debug!(file = %entry_path.display(), "skipping non-record file");
                continue;
            }
            let stem = entry_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            if stem != self.config.descriptor {
                listed.push((stem, false));
            }
        }
        Ok(listed)
    }

    fn unclassified(&self, path: &str, name: &str) -> Result<(), ScanError> {
        let location = self.loader.location(path).join(name);
        if self.config.strict_naming {
            return Err(ScanError::Unclassified(location));
        }
        warn!(entry = %location.display(), "skipping entry that fits no naming convention");
        Ok(())
    }
}
