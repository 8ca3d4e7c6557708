//! Rust code generation from the analysed schema.
//!
//! Each submodule produces one generated file as a `proc_macro2::TokenStream`:
//!
//! - [`types`] - One struct per object type
//! - [`inputs`] - One struct per input type, with `to_variables()`
//! - [`enums`] - One enum per schema enum
//! - [`operations`] - One struct per query or mutation implementing `graphgen::Operation`
//! - [`module`] - The `mod.rs` tying the files together
//!
//! [`rust_type`] and [`values`] hold the type mapping and the variable
//! conversion shared by the generators.
//!
//! Generated files refer to each other through `super::<module>::Name` and
//! to the standard library by absolute path, so the output can be dropped into
//! any module of a crate that depends on `graphgen`, `serde` and `serde_json`.
//!
//! See [`crate::output`] for validation, formatting and writing.

pub mod enums;
pub mod inputs;
pub mod module;
pub mod operations;
pub mod rust_type;
pub mod types;
pub mod values;

use std::collections::HashSet;

pub use enums::{generate_enum, generate_enums_module};
pub use inputs::{generate_input_struct, generate_inputs_module};
pub use module::generate_module_root;
pub use operations::{generate_operation, generate_operations_module};
pub use types::{generate_object_struct, generate_types_module};

/// Keeps the first occurrence of every key, preserving order.
///
/// Schemas may repeat a definition, a field or an enum value; generated code
/// declares each once.
pub(crate) fn distinct_by<'a, T>(items: &'a [T], key: impl Fn(&T) -> &str) -> Vec<&'a T> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(key(item).to_string()))
        .collect()
}

/// Splits text into `#[doc]` lines, each with the leading space rustdoc expects.
pub(crate) fn doc_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!(" {line}")
            }
        })
        .collect()
}
