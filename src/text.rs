//! Free-text cleanup for description records.
//!
//! Description records are hand-written with TOML multi-line strings, so
//! their text arrives indented to match the surrounding file and hard-wrapped
//! at whatever column the author liked:
//!
//! ```toml
//! description = """
//!     Creates a new Buffer.  The Buffer is
//!     initialized with zeroes.
//!
//!     - Use `Buffer:setData` to fill it.
//! """
//! ```
//!
//! Normalization turns that into
//! `"Creates a new Buffer.  The Buffer is initialized with zeroes.\n\n- Use `Buffer:setData` to fill it."`:
//!
//! 1. [`unindent`] removes the first line's indentation from every line.
//! 2. [`unwrap`] joins soft-wrapped lines with a space. A line break is kept
//!    when it ends a paragraph, when the next line is indented, or when the
//!    next line starts with a list (`-`) or arrow (`>`) marker.
//!
//! Code blocks only go through [`unindent`]; their line breaks are always
//! significant.

/// Characters that start a line which must stay on its own line.
const LINE_MARKERS: &[char] = &['-', '>'];

/// Normalize an optional description field. `None` passes through.
pub fn normalize(text: Option<&str>) -> Option<String> {
    text.map(normalize_str)
}

/// Normalize a description string: unindent, join soft wraps, trim.
pub fn normalize_str(text: &str) -> String {
    unwrap(&unindent(text)).trim().to_string()
}

/// Strip the first line's indentation from every line that starts with it.
///
/// Leading blank lines, including ones holding only spaces or tabs, are
/// dropped. Trailing whitespace is trimmed from every line and from the text
/// as a whole.
pub fn unindent(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .skip_while(|line| line.trim().is_empty())
        .collect();
    let first = lines.first().copied().unwrap_or("");
    let indent = &first[..first.len() - first.trim_start_matches([' ', '\t']).len()];

    let mut out = String::with_capacity(text.len());
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.strip_prefix(indent).unwrap_or(line).trim_end());
    }
    out.trim_end().to_string()
}

/// Join soft-wrapped lines into paragraphs.
pub fn unwrap(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\n' {
            out.push(c);
            continue;
        }
        let after_text = out.chars().next_back().is_some_and(|p| p != '\n');
        let joins = chars
            .peek()
            .is_some_and(|&next| !next.is_whitespace() && !LINE_MARKERS.contains(&next));
        out.push(if after_text && joins { ' ' } else { '\n' });
    }
    out
}
