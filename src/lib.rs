//! # apidoc
//!
//! Builds the data file behind a game engine's API reference. The API is
//! described by a tree of small TOML records, one per module, object, enum,
//! function, and callback. apidoc walks that tree, normalizes every record
//! into one uniform shape, and writes the whole reference as a single JSON
//! (or Lua) file for a site generator or editor plugin to render.
//!
//! # Pipeline
//!
//! ```text
//! 1. Walk       api/lovr/**.toml  →  classified entries   (scan, naming)
//! 2. Load       entry path        →  raw record           (loader, record)
//! 3. Normalize  raw record        →  uniform record       (normalize, text)
//! 4. Aggregate  modules+callbacks →  Api                  (scan)
//! 5. Serialize  Api               →  api/init.json        (serialize)
//! ```
//!
//! The walk is depth-first and bottom-up: a module is normalized only after
//! all its functions, objects, and enums are. The first missing or malformed
//! record aborts the run before anything is written.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the description tree and aggregates modules and callbacks |
//! | [`naming`] | Classifies directory entries by name case and file type |
//! | [`loader`] | Resolves record paths to files and parses them |
//! | [`record`] | Raw record types, mirroring the TOML files |
//! | [`normalize`] | Pure transforms from raw records to uniform records |
//! | [`text`] | Unindenting and soft-wrap joining of free text |
//! | [`types`] | Normalized record types written to the data file |
//! | [`serialize`] | Key-ordered JSON/Lua rendering and atomic writing |
//! | [`config`] | `apidoc.toml` loading, merging, and validation |
//! | [`output`] | CLI inventory formatting |
//!
//! # Design Decisions
//!
//! ## Convention Over Declaration
//!
//! What a record describes is encoded in its place in the tree: lowercase
//! files are functions, Uppercase directories are objects, Uppercase files
//! are enums. Authors add a function by adding a file; there is no index to
//! keep in sync. [`naming::classify`] turns that convention into an explicit
//! [`naming::EntryKind`] once per entry.
//!
//! ## Templates, Not Shared References
//!
//! Arguments and returns are declared once per function and referenced by
//! name from each variant. Every variant gets its own copy, so later
//! processing of one variant can never leak into another.
//!
//! ## Stable Output
//!
//! The data file is checked in next to the records and reviewed in diffs.
//! Keys are written in a fixed order (`name`, `tag`, `summary`, ...), so an
//! unchanged tree always produces a byte-identical file.

pub mod config;
pub mod loader;
pub mod naming;
pub mod normalize;
pub mod output;
pub mod record;
pub mod scan;
pub mod serialize;
pub mod text;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
