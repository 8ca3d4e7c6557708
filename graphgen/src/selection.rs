//! Building custom selection sets for `with_selection()`.
//!
//! Generated object types expose their schema field names as constants, so a
//! selection can be assembled without hand-formatting GraphQL:
//!
//! ```
//! use graphgen::selection::{Field, fields};
//!
//! let selection = fields([
//!     Field::from("id"),
//!     Field::nested("manager", ["id", "name"]),
//!     Field::nested("reports", Vec::<Field>::new()),
//! ]);
//! assert_eq!(selection, "id manager { id name } reports {}");
//! ```

use std::fmt;

/// One entry of a selection set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// A scalar or enum field.
    Leaf(String),
    /// An object field with its own selection.
    Nested { name: String, fields: Vec<Field> },
}

impl Field {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::Leaf(name.into())
    }

    /// An object field selecting `fields`. No fields renders as `name {}`.
    pub fn nested<I, F>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        Self::Nested {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Leaf(name) | Self::Nested { name, .. } => name,
        }
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Self::Leaf(name.to_string())
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Self::Leaf(name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(name) => f.write_str(name),
            Self::Nested { name, fields: children } if children.is_empty() => write!(f, "{name} {{}}"),
            Self::Nested { name, fields: children } => {
                write!(f, "{name} {{ {} }}", join(children))
            }
        }
    }
}

fn join(fields: &[Field]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the text that goes between an operation's braces.
///
/// An empty list renders as an empty string, which generated operations
/// send as `{}`.
pub fn fields<I, F>(fields: I) -> String
where
    I: IntoIterator<Item = F>,
    F: Into<Field>,
{
    let fields: Vec<Field> = fields.into_iter().map(Into::into).collect();
    join(&fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_fields_are_space_separated() {
        assert_eq!(fields(["id", "name", "email"]), "id name email");
    }

    #[test]
    fn nested_fields_render_blocks() {
        let selection = fields([
            Field::leaf("id"),
            Field::nested(
                "manager",
                [Field::from("id"), Field::nested("team", ["name"])],
            ),
        ]);
        assert_eq!(selection, "id manager { id team { name } }");
    }

    #[test]
    fn empty_nested_field_renders_empty_block() {
        let field = Field::nested("avatar", Vec::<Field>::new());
        assert_eq!(field.to_string(), "avatar {}");
        assert_eq!(field.name(), "avatar");
    }

    #[test]
    fn empty_selection_is_empty_text() {
        assert_eq!(fields(Vec::<Field>::new()), "");
    }

    #[test]
    fn owned_names_are_accepted() {
        let names = vec!["id".to_string(), "name".to_string()];
        assert_eq!(fields(names), "id name");
    }
}
