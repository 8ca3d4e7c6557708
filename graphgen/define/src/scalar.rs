//! The fixed scalar table.
//!
//! Every base type name is first looked up here. Names that are not in the
//! table must be resolved against the schema model's kind index instead.
//!
//! | Scalar names                                   | Kind                 |
//! |------------------------------------------------|----------------------|
//! | `ID`, `String`, `UUID`, `Time`, `Cursor`, `Upload` | [`ScalarKind::Text`]    |
//! | `Int`                                          | [`ScalarKind::Integer`] |
//! | `Float`                                        | [`ScalarKind::Float`]   |
//! | `Boolean`                                      | [`ScalarKind::Boolean`] |
//! | `Any`                                          | [`ScalarKind::Dynamic`] |

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A scalar name recognised by the generator.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use graphgen_define::{Scalar, ScalarKind};
///
/// let scalar = Scalar::from_str("UUID").unwrap();
/// assert_eq!(scalar, Scalar::Uuid);
/// assert_eq!(scalar.kind(), ScalarKind::Text);
/// assert_eq!(Scalar::Id.to_string(), "ID");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
)]
pub enum Scalar {
    #[strum(serialize = "ID")]
    #[serde(rename = "ID")]
    Id,
    String,
    #[strum(serialize = "UUID")]
    #[serde(rename = "UUID")]
    Uuid,
    Time,
    Cursor,
    Upload,
    Int,
    Float,
    Boolean,
    Any,
}

impl Scalar {
    /// Looks up a base type name in the scalar table.
    ///
    /// The lookup is case-sensitive: `string` is not a scalar.
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Returns the primitive kind this scalar maps to.
    pub fn kind(self) -> ScalarKind {
        match self {
            Self::Id | Self::String | Self::Uuid | Self::Time | Self::Cursor | Self::Upload => {
                ScalarKind::Text
            }
            Self::Int => ScalarKind::Integer,
            Self::Float => ScalarKind::Float,
            Self::Boolean => ScalarKind::Boolean,
            Self::Any => ScalarKind::Dynamic,
        }
    }
}

/// The target primitive kind of a scalar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScalarKind {
    /// String-like values.
    Text,
    /// Whole numbers.
    Integer,
    /// Floating-point numbers.
    Float,
    /// `true` / `false`.
    Boolean,
    /// Untyped values passed through as-is.
    Dynamic,
}

/// Maps a base type name to its scalar kind, if it is a known scalar.
///
/// ## Examples
///
/// ```
/// use graphgen_define::{ScalarKind, scalar_kind};
///
/// assert_eq!(scalar_kind("Int"), Some(ScalarKind::Integer));
/// assert_eq!(scalar_kind("Any"), Some(ScalarKind::Dynamic));
/// assert_eq!(scalar_kind("User"), None);
/// ```
pub fn scalar_kind(base: &str) -> Option<ScalarKind> {
    Scalar::from_name(base).map(Scalar::kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn text_scalars() {
        for name in ["ID", "String", "UUID", "Time", "Cursor", "Upload"] {
            assert_eq!(scalar_kind(name), Some(ScalarKind::Text), "{name}");
        }
    }

    #[test]
    fn numeric_and_boolean_scalars() {
        assert_eq!(scalar_kind("Int"), Some(ScalarKind::Integer));
        assert_eq!(scalar_kind("Float"), Some(ScalarKind::Float));
        assert_eq!(scalar_kind("Boolean"), Some(ScalarKind::Boolean));
    }

    #[test]
    fn unknown_names_are_not_scalars() {
        assert_eq!(scalar_kind("DateTime"), None);
        assert_eq!(scalar_kind("string"), None);
        assert_eq!(scalar_kind("Id"), None);
        assert_eq!(scalar_kind(""), None);
    }

    #[test]
    fn table_has_ten_entries() {
        assert_eq!(Scalar::iter().count(), 10);
    }

    #[test]
    fn display_uses_sdl_names() {
        for scalar in Scalar::iter() {
            assert_eq!(Scalar::from_name(&scalar.to_string()), Some(scalar));
        }
    }

    #[test]
    fn scalar_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ScalarKind::Integer).unwrap();
        assert_eq!(json, "\"integer\"");
    }
}
