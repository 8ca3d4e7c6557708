//! Type references resolved against a schema model.

use serde::{Deserialize, Serialize};

use crate::scalar::ScalarKind;

/// What a base type name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "class", content = "scalar", rename_all = "lowercase")]
pub enum TypeClass {
    /// A scalar from the fixed table.
    Scalar(ScalarKind),
    /// An enum defined in the schema.
    Enum,
    /// An object type defined in the schema.
    Object,
    /// An input type defined in the schema.
    Input,
    /// A name that is neither a known scalar nor a definition.
    Unknown,
}

/// A resolved view of a [`TypeReference`](crate::TypeReference).
///
/// Produced by [`SchemaModel::resolve`](crate::SchemaModel::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeMapping {
    pub base: String,
    pub nullable: bool,
    pub is_list: bool,
    /// The scalar target kind, when the base is a known scalar.
    pub scalar: Option<ScalarKind>,
    pub class: TypeClass,
}

impl TypeMapping {
    /// Returns `true` if the base type needs no nested selection set.
    pub fn is_leaf(&self) -> bool {
        matches!(self.class, TypeClass::Scalar(_) | TypeClass::Enum)
    }

    /// Returns `true` if the base type is a known scalar.
    pub fn is_scalar(&self) -> bool {
        self.scalar.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(class: TypeClass) -> TypeMapping {
        TypeMapping {
            base: "X".to_string(),
            nullable: true,
            is_list: false,
            scalar: match class {
                TypeClass::Scalar(kind) => Some(kind),
                _ => None,
            },
            class,
        }
    }

    #[test]
    fn leaf_classes() {
        assert!(mapping(TypeClass::Scalar(ScalarKind::Integer)).is_leaf());
        assert!(mapping(TypeClass::Enum).is_leaf());
        assert!(!mapping(TypeClass::Object).is_leaf());
        assert!(!mapping(TypeClass::Input).is_leaf());
        assert!(!mapping(TypeClass::Unknown).is_leaf());
    }

    #[test]
    fn class_serializes_adjacently_tagged() {
        let json = serde_json::to_value(TypeClass::Scalar(ScalarKind::Float)).unwrap();
        assert_eq!(json["class"], "scalar");
        assert_eq!(json["scalar"], "float");

        let json = serde_json::to_value(TypeClass::Enum).unwrap();
        assert_eq!(json["class"], "enum");
    }
}
