//! Convenient re-exports for working with graphgen schema models.
//!
//! ## Examples
//!
//! ```
//! use graphgen_define::prelude::*;
//!
//! let reference = TypeReference::parse("[User!]!");
//! assert_eq!(reference.base, "User");
//! assert!(reference.is_list);
//! assert!(!reference.nullable);
//! ```

pub use crate::mapping::{TypeClass, TypeMapping};
pub use crate::model::{Definition, DefinitionKind, EnumType, InputType, ObjectType, SchemaModel};
pub use crate::scalar::{Scalar, ScalarKind, scalar_kind};
pub use crate::types::{FieldDef, OperationFieldDef, OperationKind, TypeReference};
