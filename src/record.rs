//! Raw description records, as written by hand in the description tree.
//!
//! These types mirror the TOML files one-to-one and are deliberately loose:
//! every field is optional, singular and plural spellings are both accepted,
//! and keys the model does not name are collected into `extra` and passed
//! through untouched. [`crate::normalize`] consumes them and builds the
//! uniform records in [`crate::types`].
//!
//! A function record with two variants sharing one argument:
//!
//! ```toml
//! summary = "Create a Buffer."
//! description = "Creates a new Buffer."
//!
//! [arguments.size]
//! type = "number"
//! description = "The size of the Buffer, in bytes."
//!
//! [arguments.data]
//! type = "table"
//! description = "Initial contents."
//!
//! [returns.buffer]
//! type = "Buffer"
//! description = "The new Buffer."
//!
//! [[variants]]
//! arguments = ["size"]
//! returns = ["buffer"]
//!
//! [[variants]]
//! arguments = ["size", "data"]
//! returns = ["buffer"]
//! ```

use serde::Deserialize;

/// A value that may be written either once or as a list.
///
/// `Many` is tried first so a list of strings is never mistaken for a
/// struct written in sequence form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// Fold an optional plural field and an optional singular field into one
/// list, plural entries first.
pub fn fold_plural<T>(plural: Option<OneOrMany<T>>, singular: Option<OneOrMany<T>>) -> Vec<T> {
    plural
        .into_iter()
        .chain(singular)
        .flat_map(OneOrMany::into_vec)
        .collect()
}

/// An example: either a bare code string or a described code block.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawExample {
    Code(String),
    Described {
        #[serde(default)]
        description: Option<String>,
        code: String,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSection {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// `init.toml` of a module directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawModule {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Externally named modules are keyed by their bare name.
    #[serde(default)]
    pub external: bool,
    #[serde(default)]
    pub example: Option<OneOrMany<RawExample>>,
    #[serde(default)]
    pub examples: Option<OneOrMany<RawExample>>,
    #[serde(default)]
    pub sections: Vec<RawSection>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// `init.toml` of an object directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawObject {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub constructor: Option<OneOrMany<String>>,
    #[serde(default)]
    pub constructors: Option<OneOrMany<String>>,
    #[serde(default)]
    pub example: Option<OneOrMany<RawExample>>,
    #[serde(default)]
    pub examples: Option<OneOrMany<RawExample>>,
    #[serde(default)]
    pub sections: Vec<RawSection>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEnumValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEnum {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub values: Vec<RawEnumValue>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// An argument, return value, or nested table field.
///
/// Top-level arguments and returns are keyed by name in a map and carry no
/// `name` of their own; nested `table` fields are a list and do.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawField {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub table: Option<Vec<RawField>>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// One signature of a function, referencing arguments and returns by name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVariant {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub arguments: Vec<String>,
    #[serde(default)]
    pub returns: Vec<String>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// A function, method, or callback record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFunction {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub example: Option<OneOrMany<RawExample>>,
    #[serde(default)]
    pub examples: Option<OneOrMany<RawExample>>,
    /// Argument definitions keyed by name, in declaration order.
    #[serde(default)]
    pub arguments: Option<toml::Table>,
    /// Return definitions keyed by name, in declaration order.
    #[serde(default)]
    pub returns: Option<toml::Table>,
    #[serde(default)]
    pub variants: Option<Vec<RawVariant>>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_example_string() {
        let raw: RawFunction = toml::from_str(r#"example = "print(1)""#).unwrap();
        let examples = fold_plural(raw.examples, raw.example);
        assert!(matches!(&examples[..], [RawExample::Code(code)] if code == "print(1)"));
    }

    #[test]
    fn described_examples_list() {
        let raw: RawFunction = toml::from_str(
            r#"
[[examples]]
description = "Draw a cube."
code = "pass:cube()"

[[examples]]
code = "pass:sphere()"
"#,
        )
        .unwrap();
        let examples = fold_plural(raw.examples, raw.example);
        assert_eq!(examples.len(), 2);
        assert!(matches!(
            &examples[0],
            RawExample::Described { description: Some(d), .. } if d == "Draw a cube."
        ));
    }

    #[test]
    fn plural_entries_come_before_singular() {
        let folded = fold_plural(
            Some(OneOrMany::Many(vec!["a", "b"])),
            Some(OneOrMany::One("c")),
        );
        assert_eq!(folded, vec!["a", "b", "c"]);
    }

    #[test]
    fn unknown_keys_land_in_extra() {
        let raw: RawObject = toml::from_str(
            r#"
description = "A block of memory."
extends = "Object"
tag = "graphics-objects"
"#,
        )
        .unwrap();
        assert_eq!(raw.extra.get("extends").and_then(|v| v.as_str()), Some("Object"));
        assert_eq!(raw.extra.get("tag").and_then(|v| v.as_str()), Some("graphics-objects"));
        assert!(!raw.extra.contains_key("description"));
    }

    #[test]
    fn argument_map_keeps_declaration_order() {
        let raw: RawFunction = toml::from_str(
            r#"
[arguments.zeta]
type = "number"

[arguments.alpha]
type = "string"

[arguments.mid]
type = "boolean"
"#,
        )
        .unwrap();
        let names: Vec<&str> = raw
            .arguments
            .as_ref()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn external_module_flag() {
        let raw: RawModule = toml::from_str("external = true\nsummary = \"ENet.\"").unwrap();
        assert!(raw.external);
    }
}
