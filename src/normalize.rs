//! Shape normalization: raw records in, uniform records out.
//!
//! Each function here consumes a raw record from [`crate::record`] and
//! builds a new record from [`crate::types`]. Nothing is patched in place;
//! children discovered by the walker are passed in already normalized.
//!
//! ## Variants
//!
//! A function record declares its arguments and returns once, keyed by
//! name, and each variant lists the names it uses:
//!
//! ```toml
//! [arguments.size]
//! type = "number"
//!
//! [[variants]]
//! arguments = ["size"]
//! ```
//!
//! The declared fields are templates. Every variant materializes its own
//! [`Field`] from the template, so two variants that share an argument never
//! share state. A record with no `variants` gets exactly one, built from all
//! declared arguments and returns in declaration order.

use crate::record::{
    RawEnum, RawExample, RawField, RawFunction, RawModule, RawObject, RawSection, RawVariant,
    fold_plural,
};
use crate::text;
use crate::types::{Enum, EnumValue, Example, Field, Function, Module, Object, Section, Variant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("{function}: variant references undeclared {what} '{name}'")]
    UndeclaredField {
        function: String,
        what: &'static str,
        name: String,
    },
    #[error("{function}: table field under '{parent}' has no name")]
    UnnamedField { function: String, parent: String },
    #[error("{function}: invalid {what} '{name}': {source}")]
    InvalidField {
        function: String,
        what: &'static str,
        name: String,
        source: toml::de::Error,
    },
}

/// Who owns a function, which decides its key.
#[derive(Debug, Clone, Copy)]
pub enum Parent<'a> {
    /// Module-level function or callback: `<dotted path>.<name>`, where the
    /// dotted path is the directory's path without the callbacks segment.
    /// `module` is the owning module's key, which differs from the dotted
    /// path for external modules.
    Module { path: &'a str, module: &'a str },
    /// Object method: `<object key>:<name>`.
    Object { key: &'a str, module: &'a str },
}

impl Parent<'_> {
    fn function_key(&self, name: &str) -> String {
        match self {
            Parent::Module { path, .. } => format!("{path}.{name}"),
            Parent::Object { key, .. } => format!("{key}:{name}"),
        }
    }

    fn module(&self) -> &str {
        match self {
            Parent::Module { module, .. } | Parent::Object { module, .. } => module,
        }
    }
}

/// Children of a module, discovered and normalized by the walker.
#[derive(Debug, Clone, Default)]
pub struct ModuleChildren {
    pub functions: Vec<Function>,
    pub objects: Vec<Object>,
    pub enums: Vec<Enum>,
}

pub fn module(raw: RawModule, name: &str, key: String, children: ModuleChildren) -> Module {
    Module {
        name: name.to_string(),
        key,
        summary: text::normalize(raw.summary.as_deref()),
        description: text::normalize(raw.description.as_deref()),
        notes: text::normalize(raw.notes.as_deref()),
        external: raw.external,
        functions: children.functions,
        objects: children.objects,
        enums: children.enums,
        examples: examples(fold_plural(raw.examples, raw.example)),
        sections: sections(raw.sections),
        extra: raw.extra,
    }
}

pub fn object(raw: RawObject, name: &str, module: &str, methods: Vec<Function>) -> Object {
    let description = text::normalize(raw.description.as_deref());
    let summary = text::normalize(raw.summary.as_deref()).or_else(|| description.clone());
    Object {
        name: name.to_string(),
        key: name.to_string(),
        module: module.to_string(),
        summary,
        description,
        notes: text::normalize(raw.notes.as_deref()),
        constructors: fold_plural(raw.constructors, raw.constructor),
        methods,
        examples: examples(fold_plural(raw.examples, raw.example)),
        sections: sections(raw.sections),
        extra: raw.extra,
    }
}

pub fn enumeration(raw: RawEnum, name: &str, module: &str) -> Enum {
    Enum {
        name: name.to_string(),
        key: name.to_string(),
        module: module.to_string(),
        summary: text::normalize(raw.summary.as_deref()),
        description: text::normalize(raw.description.as_deref()),
        notes: text::normalize(raw.notes.as_deref()),
        values: raw
            .values
            .into_iter()
            .map(|value| EnumValue {
                name: value.name,
                description: text::normalize(value.description.as_deref()),
                extra: value.extra,
            })
            .collect(),
        extra: raw.extra,
    }
}

pub fn function(raw: RawFunction, name: &str, parent: Parent<'_>) -> Result<Function, NormalizeError> {
    let key = parent.function_key(name);
    let arguments = templates(&key, "argument", raw.arguments)?;
    let returns = templates(&key, "return", raw.returns)?;

    let variants = match raw.variants {
        None => vec![Variant {
            description: None,
            arguments: arguments
                .iter()
                .map(|(n, t)| field(&key, t, n))
                .collect::<Result<_, _>>()?,
            returns: returns
                .iter()
                .map(|(n, t)| field(&key, t, n))
                .collect::<Result<_, _>>()?,
            extra: toml::Table::new(),
        }],
        Some(raw_variants) => raw_variants
            .into_iter()
            .map(|v| variant(&key, v, &arguments, &returns))
            .collect::<Result<_, _>>()?,
    };

    Ok(Function {
        name: name.to_string(),
        module: parent.module().to_string(),
        key,
        summary: text::normalize(raw.summary.as_deref()),
        description: text::normalize(raw.description.as_deref()),
        notes: text::normalize(raw.notes.as_deref()),
        examples: examples(fold_plural(raw.examples, raw.example)),
        variants,
        extra: raw.extra,
    })
}

/// Parse a named argument/return map into `(name, template)` pairs,
/// keeping declaration order.
fn templates(
    function: &str,
    what: &'static str,
    table: Option<toml::Table>,
) -> Result<Vec<(String, RawField)>, NormalizeError> {
    table
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| match value.try_into::<RawField>() {
            Ok(template) => Ok((name, template)),
            Err(source) => Err(NormalizeError::InvalidField {
                function: function.to_string(),
                what,
                name,
                source,
            }),
        })
        .collect()
}

fn variant(
    function: &str,
    raw: RawVariant,
    arguments: &[(String, RawField)],
    returns: &[(String, RawField)],
) -> Result<Variant, NormalizeError> {
    Ok(Variant {
        description: text::normalize(raw.description.as_deref()),
        arguments: materialize(function, "argument", &raw.arguments, arguments)?,
        returns: materialize(function, "return", &raw.returns, returns)?,
        extra: raw.extra,
    })
}

/// Build an owned field for every name a variant references, in the
/// variant's order.
fn materialize(
    function: &str,
    what: &'static str,
    names: &[String],
    templates: &[(String, RawField)],
) -> Result<Vec<Field>, NormalizeError> {
    names
        .iter()
        .map(|name| {
            let (declared, template) = templates
                .iter()
                .find(|(declared, _)| declared == name)
                .ok_or_else(|| NormalizeError::UndeclaredField {
                    function: function.to_string(),
                    what,
                    name: name.clone(),
                })?;
            field(function, template, declared)
        })
        .collect()
}

/// Build a normalized field from a template. Nested table fields are
/// normalized to any depth and must carry their own names.
fn field(function: &str, template: &RawField, name: &str) -> Result<Field, NormalizeError> {
    let table = match &template.table {
        None => None,
        Some(fields) => Some(
            fields
                .iter()
                .map(|nested| match nested.name.as_deref() {
                    Some(nested_name) => field(function, nested, nested_name),
                    None => Err(NormalizeError::UnnamedField {
                        function: function.to_string(),
                        parent: name.to_string(),
                    }),
                })
                .collect::<Result<_, _>>()?,
        ),
    };
    Ok(Field {
        name: name.to_string(),
        kind: template.kind.clone(),
        description: text::normalize(template.description.as_deref()),
        table,
        extra: template.extra.clone(),
    })
}

pub fn examples(raw: Vec<RawExample>) -> Vec<Example> {
    raw.into_iter().map(example).collect()
}

/// Bare strings become `{code}`. Code is only unindented, never re-wrapped.
pub fn example(raw: RawExample) -> Example {
    match raw {
        RawExample::Code(code) => Example {
            description: None,
            code: text::unindent(&code),
        },
        RawExample::Described { description, code } => Example {
            description: text::normalize(description.as_deref()),
            code: text::unindent(&code),
        },
    }
}

fn sections(raw: Vec<RawSection>) -> Vec<Section> {
    raw.into_iter()
        .map(|section| Section {
            description: text::normalize(section.description.as_deref()),
            extra: section.extra,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_function(source: &str) -> RawFunction {
        toml::from_str(source).unwrap()
    }

    const ROOT: Parent<'static> = Parent::Module {
        path: "lovr",
        module: "lovr",
    };

    #[test]
    fn module_function_key_is_dotted() {
        let f = function(RawFunction::default(), "getVersion", ROOT).unwrap();
        assert_eq!(f.key, "lovr.getVersion");
        assert_eq!(f.module, "lovr");
    }

    #[test]
    fn external_module_function_key_follows_path() {
        let parent = Parent::Module {
            path: "lovr.enet",
            module: "enet",
        };
        let f = function(RawFunction::default(), "host_create", parent).unwrap();
        assert_eq!(f.key, "lovr.enet.host_create");
        assert_eq!(f.module, "enet");
    }

    #[test]
    fn method_key_uses_colon() {
        let parent = Parent::Object {
            key: "Buffer",
            module: "lovr.graphics",
        };
        let f = function(RawFunction::default(), "getSize", parent).unwrap();
        assert_eq!(f.key, "Buffer:getSize");
        assert_eq!(f.module, "lovr.graphics");
    }

    #[test]
    fn singular_example_becomes_examples_list() {
        let f = function(raw_function(r#"example = "x""#), "f", ROOT).unwrap();
        assert_eq!(
            f.examples,
            vec![Example {
                description: None,
                code: "x".to_string()
            }]
        );
        let value = serde_json::to_value(&f).unwrap();
        assert!(value.get("example").is_none());
        assert_eq!(value["examples"][0]["code"], "x");
    }

    #[test]
    fn example_code_keeps_line_breaks() {
        let ex = example(RawExample::Described {
            description: Some("Spin a\n  cube.".to_string()),
            code: "    function lovr.draw(pass)\n      pass:cube()\n    end\n".to_string(),
        });
        assert_eq!(ex.code, "function lovr.draw(pass)\n  pass:cube()\nend");
        assert_eq!(ex.description.as_deref(), Some("Spin a\n  cube."));
    }

    #[test]
    fn variant_synthesized_from_flat_maps() {
        let f = function(
            raw_function(
                r#"
[arguments.x]
type = "number"
description = "The x\ncoordinate."

[arguments.y]
type = "number"

[returns.ok]
type = "boolean"
"#,
            ),
            "move",
            ROOT,
        )
        .unwrap();
        assert_eq!(f.variants.len(), 1);
        let v = &f.variants[0];
        let names: Vec<&str> = v.arguments.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y"]);
        assert_eq!(v.arguments[0].description.as_deref(), Some("The x coordinate."));
        assert_eq!(v.returns[0].name, "ok");
        assert_eq!(v.returns[0].kind.as_deref(), Some("boolean"));
    }

    #[test]
    fn variants_follow_declared_name_order() {
        let f = function(
            raw_function(
                r#"
[arguments.a]
type = "number"

[arguments.b]
type = "string"

[[variants]]
arguments = ["b", "a"]
returns = []
"#,
            ),
            "f",
            ROOT,
        )
        .unwrap();
        let names: Vec<&str> = f.variants[0]
            .arguments
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn variants_own_their_fields() {
        let mut f = function(
            raw_function(
                r#"
[arguments.size]
type = "number"
description = "Size."

[[variants]]
arguments = ["size"]

[[variants]]
arguments = ["size"]
"#,
            ),
            "newBuffer",
            ROOT,
        )
        .unwrap();
        f.variants[0].arguments[0].description = Some("Changed.".to_string());
        assert_eq!(f.variants[1].arguments[0].description.as_deref(), Some("Size."));
    }

    #[test]
    fn flat_maps_do_not_reach_output() {
        let f = function(
            raw_function(
                r#"
[arguments.size]
type = "number"

[[variants]]
arguments = ["size"]
"#,
            ),
            "f",
            ROOT,
        )
        .unwrap();
        let value = serde_json::to_value(&f).unwrap();
        assert!(value.get("arguments").is_none());
        assert!(value.get("returns").is_none());
        assert_eq!(value["variants"][0]["arguments"][0]["name"], "size");
    }

    #[test]
    fn undeclared_reference_is_an_error() {
        let result = function(
            raw_function(
                r#"
[[variants]]
arguments = ["ghost"]
"#,
            ),
            "haunt",
            ROOT,
        );
        assert!(matches!(
            result,
            Err(NormalizeError::UndeclaredField { ref name, what: "argument", .. }) if name == "ghost"
        ));
    }

    #[test]
    fn nested_tables_are_normalized_recursively() {
        let f = function(
            raw_function(
                r#"
[arguments.options]
type = "table"
description = "Options."

[[arguments.options.table]]
name = "format"
type = "table"
description = "Vertex\nformat."

[[arguments.options.table.table]]
name = "type"
type = "string"
description = "  Attribute\n  type."
"#,
            ),
            "newMesh",
            ROOT,
        )
        .unwrap();
        let options = &f.variants[0].arguments[0];
        let format = &options.table.as_ref().unwrap()[0];
        assert_eq!(format.name, "format");
        assert_eq!(format.description.as_deref(), Some("Vertex format."));
        let kind = &format.table.as_ref().unwrap()[0];
        assert_eq!(kind.name, "type");
        assert_eq!(kind.description.as_deref(), Some("Attribute type."));
    }

    #[test]
    fn nested_table_field_without_name_is_an_error() {
        let result = function(
            raw_function(
                r#"
[arguments.options]
type = "table"

[[arguments.options.table]]
type = "number"
description = "Missing its name."
"#,
            ),
            "newMesh",
            ROOT,
        );
        assert!(matches!(
            result,
            Err(NormalizeError::UnnamedField { ref function, ref parent })
                if function == "lovr.newMesh" && parent == "options"
        ));
    }

    #[test]
    fn variant_description_is_normalized() {
        let f = function(
            raw_function(
                r#"
[[variants]]
description = "First\nform."
"#,
            ),
            "f",
            ROOT,
        )
        .unwrap();
        assert_eq!(f.variants[0].description.as_deref(), Some("First form."));
    }

    #[test]
    fn object_summary_defaults_to_description() {
        let raw: RawObject = toml::from_str(
            r#"
description = "A block\nof memory."
constructor = "lovr.graphics.newBuffer"
"#,
        )
        .unwrap();
        let o = object(raw, "Buffer", "lovr.graphics", Vec::new());
        assert_eq!(o.summary.as_deref(), Some("A block of memory."));
        assert_eq!(o.constructors, vec!["lovr.graphics.newBuffer"]);
        let value = serde_json::to_value(&o).unwrap();
        assert!(value.get("constructor").is_none());
    }

    #[test]
    fn enum_values_are_normalized() {
        let raw: RawEnum = toml::from_str(
            r#"
description = "How to\ndraw."

[[values]]
name = "fill"
description = "Filled\nshapes."

[[values]]
name = "line"
"#,
        )
        .unwrap();
        let e = enumeration(raw, "DrawStyle", "lovr.graphics");
        assert_eq!(e.key, "DrawStyle");
        assert_eq!(e.module, "lovr.graphics");
        assert_eq!(e.description.as_deref(), Some("How to draw."));
        assert_eq!(e.values[0].description.as_deref(), Some("Filled shapes."));
        assert_eq!(e.values[1].description, None);
    }

    #[test]
    fn module_sections_are_normalized() {
        let raw: RawModule = toml::from_str(
            r#"
[[sections]]
name = "Objects"
description = "Things\nyou make."
"#,
        )
        .unwrap();
        let m = module(raw, "graphics", "lovr.graphics".to_string(), ModuleChildren::default());
        assert_eq!(m.sections[0].description.as_deref(), Some("Things you make."));
        assert_eq!(
            m.sections[0].extra.get("name").and_then(|v| v.as_str()),
            Some("Objects")
        );
    }
}
