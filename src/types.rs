//! Normalized records: the shape of the generated API data file.
//!
//! Every record here is built fresh by [`crate::normalize`] from a raw
//! record. Text fields are already normalized, singular/plural spellings are
//! folded, and every variant owns its arguments and returns outright.
//!
//! Keys a raw record carried that the model does not name (`tag`,
//! `related`, `extends`, ...) ride along in `extra` and are flattened back
//! into the record on output.

use serde::Serialize;

/// The aggregate written to the data file.
#[derive(Debug, Clone, Serialize)]
pub struct Api {
    /// Root module first, then every top-level module in listing order.
    pub modules: Vec<Module>,
    pub callbacks: Vec<Function>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Module {
    pub name: String,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
    pub functions: Vec<Function>,
    pub objects: Vec<Object>,
    pub enums: Vec<Enum>,
    pub examples: Vec<Example>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

#[derive(Debug, Clone, Serialize)]
pub struct Object {
    pub name: String,
    pub key: String,
    pub module: String,
    /// Falls back to `description` when the record has no summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Keys of the functions that create this object.
    pub constructors: Vec<String>,
    pub methods: Vec<Function>,
    pub examples: Vec<Example>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

#[derive(Debug, Clone, Serialize)]
pub struct Enum {
    pub name: String,
    pub key: String,
    pub module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub values: Vec<EnumValue>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumValue {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// A module function, object method, or callback.
#[derive(Debug, Clone, Serialize)]
pub struct Function {
    pub name: String,
    /// `lovr.graphics.newBuffer`, `Buffer:getSize`, or `lovr.draw`.
    pub key: String,
    pub module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub examples: Vec<Example>,
    pub variants: Vec<Variant>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

#[derive(Debug, Clone, Serialize)]
pub struct Variant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub arguments: Vec<Field>,
    pub returns: Vec<Field>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// An argument, return value, or one field of a table-typed value.
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<Field>>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Example {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl Api {
    /// All functions in the tree: module functions, methods, and callbacks.
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.modules
            .iter()
            .flat_map(|m| {
                m.functions
                    .iter()
                    .chain(m.objects.iter().flat_map(|o| o.methods.iter()))
            })
            .chain(self.callbacks.iter())
    }
}
