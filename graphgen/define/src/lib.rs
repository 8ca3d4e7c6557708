//! Graphgen Definition Library
//!
//! This crate provides the data model produced by analysing a GraphQL-style
//! schema document, plus the small type algebra used to classify type
//! references. The model is consumed by the `graphgen-gen` binary to generate
//! a strongly-typed Rust client.
//!
//! ## Core Types
//!
//! ### Type Algebra
//!
//! - [`TypeReference`] - A raw SDL type (`[User!]!`) decomposed into base name,
//!   nullability and list wrapping
//! - [`Scalar`] - The fixed table of recognised scalar names
//! - [`ScalarKind`] - The primitive kind a scalar maps to (text, integer, ...)
//!
//! ### Schema Model
//!
//! - [`FieldDef`] - A named, typed field (object fields, input fields, arguments)
//! - [`Definition`] - An object type, input type or enum
//! - [`OperationFieldDef`] - A field of the `Query` or `Mutation` root type
//! - [`SchemaModel`] - The immutable aggregate with its derived indices
//! - [`TypeMapping`] - A type reference resolved against the model
//!
//! ## Examples
//!
//! ```
//! use graphgen_define::{Definition, DefinitionKind, EnumType, FieldDef, ObjectType, SchemaModel};
//!
//! let model = SchemaModel::from_definitions(
//!     vec![
//!         Definition::Object(ObjectType::new(
//!             "User",
//!             vec![FieldDef::new("id", "ID!"), FieldDef::new("role", "Role")],
//!         )),
//!         Definition::Enum(EnumType::new("Role", vec!["ADMIN".into(), "DEFAULT".into()])),
//!     ],
//!     vec![],
//!     vec![],
//! );
//!
//! assert_eq!(model.kind_of("Role"), Some(DefinitionKind::Enum));
//! assert_eq!(model.fields_of("User").map(|f| f.len()), Some(2));
//! ```

pub mod mapping;
pub mod model;
pub mod prelude;
pub mod scalar;
pub mod types;

// Re-export main types at crate root
pub use mapping::{TypeClass, TypeMapping};
pub use model::{Definition, DefinitionKind, EnumType, InputType, ObjectType, SchemaModel};
pub use scalar::{Scalar, ScalarKind, scalar_kind};
pub use types::{FieldDef, OperationFieldDef, OperationKind, TypeReference};
