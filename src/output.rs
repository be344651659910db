//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every entity is shown by its key, the name documentation links use,
//! with a positional index among its siblings. Counts are appended to
//! container headers so a glance shows whether a module picked up the files
//! you expected.
//!
//! ```text
//! Modules
//! 001 lovr (1 function)
//!     001 lovr.getVersion
//! 002 enet (1 function)
//!     001 lovr.enet.host_create
//! 003 lovr.graphics (1 function, 1 object, 1 enum)
//!     001 lovr.graphics.newBuffer (2 variants)
//!     Buffer (2 methods)
//!         001 Buffer:getSize
//!         002 Buffer:setData
//!     DrawStyle (2 values)
//!
//! Callbacks
//! 001 lovr.draw
//! 002 lovr.load
//!
//! Documented 3 modules, 5 functions, 1 object, 1 enum, 2 callbacks
//! ```
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` and do no I/O; `print_*`
//! wrappers write them to stdout.

use crate::types::{Api, Function, Module};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 function`, `2 functions`.
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Join non-zero counts as `(a, b)`; empty when all are zero.
fn counts(parts: &[(usize, &str)]) -> String {
    let shown: Vec<String> = parts
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, noun)| count(*n, noun))
        .collect();
    if shown.is_empty() {
        String::new()
    } else {
        format!(" ({})", shown.join(", "))
    }
}

/// A function line: index, key, and variant count when there are several.
fn function_line(index: usize, function: &Function) -> String {
    let variants = function.variants.len();
    let suffix = if variants > 1 {
        format!(" ({})", count(variants, "variant"))
    } else {
        String::new()
    };
    format!("{} {}{}", format_index(index), function.key, suffix)
}

fn module_lines(index: usize, module: &Module) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}{}",
        format_index(index),
        module.key,
        counts(&[
            (module.functions.len(), "function"),
            (module.objects.len(), "object"),
            (module.enums.len(), "enum"),
        ])
    )];

    for (i, function) in module.functions.iter().enumerate() {
        lines.push(format!("{}{}", indent(1), function_line(i + 1, function)));
    }
    for object in &module.objects {
        lines.push(format!(
            "{}{}{}",
            indent(1),
            object.key,
            counts(&[(object.methods.len(), "method")])
        ));
        for (i, method) in object.methods.iter().enumerate() {
            lines.push(format!("{}{}", indent(2), function_line(i + 1, method)));
        }
    }
    for e in &module.enums {
        lines.push(format!(
            "{}{}{}",
            indent(1),
            e.key,
            counts(&[(e.values.len(), "value")])
        ));
    }
    lines
}

/// Format the discovered tree: modules with their children, then callbacks.
pub fn format_scan_output(api: &Api) -> Vec<String> {
    let mut lines = vec!["Modules".to_string()];
    for (i, module) in api.modules.iter().enumerate() {
        lines.extend(module_lines(i + 1, module));
    }

    if !api.callbacks.is_empty() {
        lines.push(String::new());
        lines.push("Callbacks".to_string());
        for (i, callback) in api.callbacks.iter().enumerate() {
            lines.push(function_line(i + 1, callback));
        }
    }

    lines.push(String::new());
    lines.push(format_summary(api));
    lines
}

/// One-line totals for the whole tree.
pub fn format_summary(api: &Api) -> String {
    let functions = api.functions().count() - api.callbacks.len();
    let objects: usize = api.modules.iter().map(|m| m.objects.len()).sum();
    let enums: usize = api.modules.iter().map(|m| m.enums.len()).sum();
    format!(
        "Documented {}, {}, {}, {}, {}",
        count(api.modules.len(), "module"),
        count(functions, "function"),
        count(objects, "object"),
        count(enums, "enum"),
        count(api.callbacks.len(), "callback"),
    )
}

/// Print the discovered tree to stdout.
pub fn print_scan_output(api: &Api) {
    for line in format_scan_output(api) {
        println!("{}", line);
    }
}

/// Print where the data file went.
pub fn print_build_output(dest: &Path) {
    println!("==> Wrote {}", dest.display());
}
