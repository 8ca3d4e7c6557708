//! Graphgen code generator library.
//!
//! This crate turns a GraphQL SDL schema into a strongly-typed Rust client
//! for the `graphgen` runtime. Generation runs in stages:
//!
//! 1. [`source`] loads the schema file, whatever its text encoding
//! 2. [`parser`] strips descriptions, directives and comments and cuts out
//!    definition bodies
//! 3. [`analyzer`] builds the [`graphgen_define::SchemaModel`]
//! 4. [`selection`] synthesizes depth- and cycle-bounded selection sets
//! 5. [`operation`] compiles each `Query`/`Mutation` field into a request
//!    document and a variables plan
//! 6. [`codegen`] emits Rust modules and [`output`] validates, formats and
//!    writes them
//!
//! ## Modules
//!
//! - [`naming`] - Turning schema names into Rust identifiers
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use graphgen_gen::analyzer::analyze_file;
//! use graphgen_gen::output::{GenerateOptions, generate_and_write};
//!
//! let model = analyze_file(Path::new("schema.graphql")).unwrap();
//! let report = generate_and_write(&model, Path::new("src/graphql"), &GenerateOptions::default()).unwrap();
//! println!("{} files written", report.written.len());
//! ```
//!
//! ## Generated Code Structure
//!
//! For `type Query { user(id: ID!): User }`:
//!
//! ```text
//! // types.rs
//! pub struct User { pub id: String, ... }
//!
//! // queries.rs
//! pub struct UserQuery { pub id: String, selection: Option<String> }
//!
//! impl graphgen::Operation for UserQuery {
//!     type Response = super::types::User;
//!     const DOCUMENT: &'static str = "query User(id: ID!) { user(id: $id) { id ... } }";
//!     ...
//! }
//! ```

pub mod analyzer;
pub mod codegen;
pub mod errors;
pub mod naming;
pub mod operation;
pub mod output;
pub mod parser;
pub mod selection;
pub mod source;

#[cfg(test)]
mod test_utils;
