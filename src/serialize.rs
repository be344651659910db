//! Rendering and writing the API data file.
//!
//! The aggregate is converted to a generic value tree once, then rendered
//! with a fixed key order so the file diffs cleanly between builds:
//!
//! ```text
//! name, tag, summary, type, description, key, module, arguments, returns,
//! then every other key alphabetically
//! ```
//!
//! Two renderings are supported:
//!
//! - **JSON**: pretty-printed, two-space indent.
//! - **Lua**: a chunk that returns one table, loadable with `dofile`.
//!
//! The whole file is rendered in memory before anything touches the disk.
//! It is then written to a temporary file next to the destination and
//! renamed into place, so a failed build never leaves a truncated file.

use crate::config::OutputFormat;
use crate::types::Api;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

/// Keys that lead every record, in this order.
const KEY_PRIORITY: &[&str] = &[
    "name",
    "tag",
    "summary",
    "type",
    "description",
    "key",
    "module",
    "arguments",
    "returns",
];

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Cannot open {path} for writing: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Compare two keys by priority, falling back to alphabetical order.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    let rank = |key: &str| {
        KEY_PRIORITY
            .iter()
            .position(|k| *k == key)
            .unwrap_or(KEY_PRIORITY.len())
    };
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}

/// Map entries in output order.
fn ordered_entries(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
    entries
}

/// Serializes a value tree with every map's keys in output order.
struct Ordered<'a>(&'a Value);

impl Serialize for Ordered<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in ordered_entries(map) {
                    out.serialize_entry(key, &Ordered(value))?;
                }
                out.end()
            }
            Value::Array(items) => {
                let mut out = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    out.serialize_element(&Ordered(item))?;
                }
                out.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}

/// Render any serializable value as ordered JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, WriteError> {
    let tree = serde_json::to_value(value)?;
    let mut json = serde_json::to_string_pretty(&Ordered(&tree))?;
    json.push('\n');
    Ok(json)
}

/// Render any serializable value as a Lua chunk returning one table.
pub fn to_lua<T: Serialize>(value: &T) -> Result<String, WriteError> {
    let tree = serde_json::to_value(value)?;
    let mut lua = String::from("return ");
    write_lua(&mut lua, &tree, 0);
    lua.push('\n');
    Ok(lua)
}

fn write_lua(out: &mut String, value: &Value, depth: usize) {
    let pad = "  ".repeat(depth + 1);
    match value {
        Value::Null => out.push_str("nil"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => {
            let _ = write!(out, "{n}");
        }
        Value::String(s) => out.push_str(&lua_string(s)),
        Value::Array(items) if items.is_empty() => out.push_str("{}"),
        Value::Array(items) => {
            out.push_str("{\n");
            for item in items {
                out.push_str(&pad);
                write_lua(out, item, depth + 1);
                out.push_str(",\n");
            }
            out.push_str(&"  ".repeat(depth));
            out.push('}');
        }
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            for (key, item) in ordered_entries(map) {
                out.push_str(&pad);
                out.push_str(&lua_key(key));
                out.push_str(" = ");
                write_lua(out, item, depth + 1);
                out.push_str(",\n");
            }
            out.push_str(&"  ".repeat(depth));
            out.push('}');
        }
    }
}

const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Bare identifier when possible, `["..."]` otherwise.
fn lua_key(key: &str) -> String {
    let identifier = key.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !LUA_KEYWORDS.contains(&key);
    if identifier {
        key.to_string()
    } else {
        format!("[{}]", lua_string(key))
    }
}

/// Double-quoted Lua string literal.
fn lua_string(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_ascii_control() => {
                let _ = write!(quoted, "\\{:03}", c as u32);
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Render the aggregate in the requested format.
pub fn render(api: &Api, format: OutputFormat) -> Result<String, WriteError> {
    match format {
        OutputFormat::Json => to_json(api),
        OutputFormat::Lua => to_lua(api),
    }
}

/// Render the aggregate and atomically replace `dest` with it.
pub fn write(api: &Api, format: OutputFormat, dest: &Path) -> Result<(), WriteError> {
    let rendered = render(api, format)?;

    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let open_error = |source| WriteError::Open {
        path: dest.to_path_buf(),
        source,
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(open_error)?;
    tmp.write_all(rendered.as_bytes())
        .and_then(|()| tmp.flush())
        .map_err(|source| WriteError::Write {
            path: dest.to_path_buf(),
            source,
        })?;
    tmp.persist(dest).map_err(|e| open_error(e.error))?;

    info!(path = %dest.display(), bytes = rendered.len(), "wrote API data");
    Ok(())
}
