//! Core types for schema definitions.
//!
//! This module provides the fundamental building blocks of the schema model:
//!
//! - [`TypeReference`] - A raw SDL type reference and its decomposition
//! - [`FieldDef`] - A named, typed field or argument
//! - [`OperationFieldDef`] - A root `Query`/`Mutation` field with arguments
//! - [`OperationKind`] - Whether an operation is a query or a mutation

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A textual type reference such as `[User!]!`, decomposed into its parts.
///
/// Decomposition never fails: any string yields *some* base name, and a base
/// that resolves to nothing is later treated as an opaque type.
///
/// - `nullable` is `false` iff the raw text ends with `!` at the outermost level.
/// - `is_list` is `true` iff, after stripping the outer `!`, the text is
///   bracket-wrapped.
/// - A `!` inside the brackets is stripped and discarded: element nullability
///   of lists is not modelled.
///
/// ## Examples
///
/// ```
/// use graphgen_define::TypeReference;
///
/// let user = TypeReference::parse("User!");
/// assert_eq!((user.base.as_str(), user.nullable, user.is_list), ("User", false, false));
///
/// let users = TypeReference::parse("[User!]");
/// assert_eq!((users.base.as_str(), users.nullable, users.is_list), ("User", true, true));
///
/// // The raw text is kept verbatim for request documents
/// assert_eq!(users.raw, "[User!]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeReference {
    /// The literal SDL type text.
    pub raw: String,
    /// The innermost named type.
    pub base: String,
    /// Whether the outermost type accepts `null`.
    pub nullable: bool,
    /// Whether the type is wrapped in a list.
    pub is_list: bool,
}

impl TypeReference {
    /// Decomposes a raw type reference.
    pub fn parse(raw: &str) -> Self {
        let nullable = !raw.ends_with('!');
        let mut clean = raw.trim_end_matches('!');
        let mut is_list = false;

        if clean.starts_with('[') {
            is_list = true;
            clean = clean.trim_matches(|c| c == '[' || c == ']');
            clean = clean.trim_end_matches('!');
        }

        Self {
            raw: raw.to_string(),
            base: clean.to_string(),
            nullable,
            is_list,
        }
    }
}

impl From<&str> for TypeReference {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A named, typed field.
///
/// Used for object type fields, input type fields and operation arguments.
///
/// ## Examples
///
/// ```
/// use graphgen_define::FieldDef;
///
/// let field = FieldDef::new("friends", "[User!]");
/// assert_eq!(field.name, "friends");
/// assert_eq!(field.ty.base, "User");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeReference,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, raw_type: &str) -> Self {
        Self {
            name: name.into(),
            ty: TypeReference::parse(raw_type),
        }
    }
}

/// A field of the `Query` or `Mutation` root type.
///
/// ## Examples
///
/// ```
/// use graphgen_define::{FieldDef, OperationFieldDef};
///
/// let op = OperationFieldDef::new(
///     "createUser",
///     vec![FieldDef::new("input", "CreateUserInput!")],
///     "User",
/// );
/// assert_eq!(op.args.len(), 1);
/// assert!(op.return_type.nullable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationFieldDef {
    pub name: String,
    pub args: Vec<FieldDef>,
    pub return_type: TypeReference,
}

impl OperationFieldDef {
    pub fn new(name: impl Into<String>, args: Vec<FieldDef>, return_type: &str) -> Self {
        Self {
            name: name.into(),
            args,
            return_type: TypeReference::parse(return_type),
        }
    }
}

/// The kind of a generated operation.
///
/// `Display` yields the keyword used in request documents.
///
/// ## Examples
///
/// ```
/// use graphgen_define::OperationKind;
///
/// assert_eq!(OperationKind::Mutation.to_string(), "mutation");
/// assert_eq!(OperationKind::Mutation.root_type(), "Mutation");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// The name of the root object type that holds operations of this kind.
    ///
    /// Also used as the suffix of generated operation struct names.
    pub fn root_type(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
        }
    }
}
