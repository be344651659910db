//! Entry classification for the description tree.
//!
//! The tree encodes what an entry describes in its name and its type on
//! disk. Each directory entry is classified exactly once into an
//! [`EntryKind`]; the walker then dispatches on the kind instead of sniffing
//! names at every call site.
//!
//! | on disk    | first letter | kind                 |
//! |------------|--------------|----------------------|
//! | file       | lowercase    | [`EntryKind::Function`] |
//! | directory  | uppercase    | [`EntryKind::Object`]   |
//! | file       | uppercase    | [`EntryKind::Enum`]     |
//! | directory  | lowercase    | [`EntryKind::Module`]   |
//!
//! Names that start with anything else (`_private.toml`, `2d/`) have no
//! kind; the walker decides whether that is an error.

use std::fmt;

/// What a directory entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Function,
    Object,
    Enum,
    Module,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::Function => "function",
            EntryKind::Object => "object",
            EntryKind::Enum => "enum",
            EntryKind::Module => "module",
        };
        f.write_str(label)
    }
}

/// Classify an entry by the case of its first letter and whether it is a
/// directory. `name` is the file stem or directory name.
pub fn classify(name: &str, is_dir: bool) -> Option<EntryKind> {
    let first = name.chars().next()?;
    match (first.is_uppercase(), first.is_lowercase(), is_dir) {
        (true, _, true) => Some(EntryKind::Object),
        (true, _, false) => Some(EntryKind::Enum),
        (_, true, true) => Some(EntryKind::Module),
        (_, true, false) => Some(EntryKind::Function),
        _ => None,
    }
}

/// Last `/`-separated segment of a record path.
///
/// `"lovr/graphics/Buffer"` → `"Buffer"`
pub fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Dotted key for a record path, with the callbacks segment dropped.
///
/// - `"lovr/graphics"` → `"lovr.graphics"`
/// - `"lovr/callbacks/draw"` → `"lovr.draw"`
pub fn dotted_key(path: &str, callbacks_dir: &str) -> String {
    path.split('/')
        .filter(|segment| *segment != callbacks_dir)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_file_is_function() {
        assert_eq!(classify("newBuffer", false), Some(EntryKind::Function));
    }

    #[test]
    fn uppercase_directory_is_object() {
        assert_eq!(classify("Buffer", true), Some(EntryKind::Object));
    }

    #[test]
    fn uppercase_file_is_enum() {
        assert_eq!(classify("DrawMode", false), Some(EntryKind::Enum));
    }

    #[test]
    fn lowercase_directory_is_module() {
        assert_eq!(classify("graphics", true), Some(EntryKind::Module));
    }

    #[test]
    fn underscore_and_digit_have_no_kind() {
        assert_eq!(classify("_private", false), None);
        assert_eq!(classify("2d", true), None);
        assert_eq!(classify("", false), None);
    }

    #[test]
    fn last_segment_of_nested_path() {
        assert_eq!(last_segment("lovr/graphics/Buffer"), "Buffer");
        assert_eq!(last_segment("lovr"), "lovr");
    }

    #[test]
    fn dotted_key_for_module_path() {
        assert_eq!(dotted_key("lovr/graphics", "callbacks"), "lovr.graphics");
    }

    #[test]
    fn dotted_key_drops_callbacks_segment() {
        assert_eq!(dotted_key("lovr/callbacks/draw", "callbacks"), "lovr.draw");
    }

    #[test]
    fn kind_display() {
        assert_eq!(EntryKind::Enum.to_string(), "enum");
    }
}
