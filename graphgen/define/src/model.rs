//! The schema model.
//!
//! A [`SchemaModel`] is built once per generation run from the definitions
//! found in a schema document and is read-only afterwards. Besides the
//! collections themselves it carries two derived indices:
//!
//! - `kind_index`: every definition name mapped to its [`DefinitionKind`]
//! - `fields_by_type`: every object type name mapped to its fields

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::mapping::{TypeClass, TypeMapping};
use crate::scalar::scalar_kind;
use crate::types::{FieldDef, OperationFieldDef, TypeReference};

/// Root type names that are never collected as object types.
pub const RESERVED_TYPE_NAMES: &[&str] = &["Query", "Mutation", "Subscription"];

/// The kind space a definition name lives in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DefinitionKind {
    /// An output object type (`type X { ... }`).
    Type,
    /// An input object type (`input X { ... }`).
    Input,
    /// An enumeration (`enum X { ... }`).
    Enum,
}

/// An output object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// An input object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputType {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl InputType {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// An enumeration with its values in declaration order.
///
/// Duplicate values are kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumType {
    pub name: String,
    pub values: Vec<String>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// A single schema definition, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Definition {
    #[serde(rename = "type")]
    Object(ObjectType),
    Input(InputType),
    Enum(EnumType),
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Self::Object(t) => &t.name,
            Self::Input(t) => &t.name,
            Self::Enum(t) => &t.name,
        }
    }

    pub fn kind(&self) -> DefinitionKind {
        match self {
            Self::Object(_) => DefinitionKind::Type,
            Self::Input(_) => DefinitionKind::Input,
            Self::Enum(_) => DefinitionKind::Enum,
        }
    }
}

/// The analysed schema.
///
/// Construct it with [`SchemaModel::new`] or [`SchemaModel::from_definitions`];
/// both derive the indices so the model is always consistent.
///
/// ## Examples
///
/// ```
/// use graphgen_define::{
///     DefinitionKind, EnumType, FieldDef, InputType, ObjectType, OperationFieldDef, SchemaModel,
/// };
///
/// let model = SchemaModel::new(
///     vec![ObjectType::new("User", vec![FieldDef::new("id", "ID!")])],
///     vec![InputType::new("UserFilter", vec![FieldDef::new("name", "String")])],
///     vec![EnumType::new("Role", vec!["ADMIN".into()])],
///     vec![OperationFieldDef::new("users", vec![], "[User!]")],
///     vec![],
/// );
///
/// assert_eq!(model.kind_of("UserFilter"), Some(DefinitionKind::Input));
/// assert_eq!(model.query_fields.len(), 1);
/// assert!(model.fields_of("UserFilter").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaModel {
    pub object_types: Vec<ObjectType>,
    pub input_types: Vec<InputType>,
    pub enums: Vec<EnumType>,
    pub query_fields: Vec<OperationFieldDef>,
    pub mutation_fields: Vec<OperationFieldDef>,
    pub kind_index: BTreeMap<String, DefinitionKind>,
    pub fields_by_type: BTreeMap<String, Vec<FieldDef>>,
}

impl SchemaModel {
    /// Builds a model and derives its indices.
    ///
    /// Names are inserted into the kind index in the order object types,
    /// input types, enums; when a name appears in more than one kind space
    /// the last insertion wins.
    pub fn new(
        object_types: Vec<ObjectType>,
        input_types: Vec<InputType>,
        enums: Vec<EnumType>,
        query_fields: Vec<OperationFieldDef>,
        mutation_fields: Vec<OperationFieldDef>,
    ) -> Self {
        let mut kind_index = BTreeMap::new();
        for t in &object_types {
            kind_index.insert(t.name.clone(), DefinitionKind::Type);
        }
        for t in &input_types {
            kind_index.insert(t.name.clone(), DefinitionKind::Input);
        }
        for t in &enums {
            kind_index.insert(t.name.clone(), DefinitionKind::Enum);
        }

        let fields_by_type = object_types
            .iter()
            .map(|t| (t.name.clone(), t.fields.clone()))
            .collect();

        Self {
            object_types,
            input_types,
            enums,
            query_fields,
            mutation_fields,
            kind_index,
            fields_by_type,
        }
    }

    /// Builds a model from a mixed list of definitions.
    ///
    /// Definitions keep their relative order within each kind.
    pub fn from_definitions(
        definitions: Vec<Definition>,
        query_fields: Vec<OperationFieldDef>,
        mutation_fields: Vec<OperationFieldDef>,
    ) -> Self {
        let mut objects = Vec::new();
        let mut inputs = Vec::new();
        let mut enums = Vec::new();

        for definition in definitions {
            match definition {
                Definition::Object(t) => objects.push(t),
                Definition::Input(t) => inputs.push(t),
                Definition::Enum(t) => enums.push(t),
            }
        }

        Self::new(objects, inputs, enums, query_fields, mutation_fields)
    }

    /// Returns the kind a name resolves to, if it is defined.
    pub fn kind_of(&self, name: &str) -> Option<DefinitionKind> {
        self.kind_index.get(name).copied()
    }

    /// Returns the fields of an object type.
    pub fn fields_of(&self, type_name: &str) -> Option<&[FieldDef]> {
        self.fields_by_type.get(type_name).map(Vec::as_slice)
    }

    /// Looks up an input type by name.
    ///
    /// When a name is defined more than once the last definition is returned,
    /// matching `fields_by_type`.
    pub fn input_type(&self, name: &str) -> Option<&InputType> {
        self.input_types.iter().rev().find(|t| t.name == name)
    }

    /// Looks up an enum by name, preferring the last definition.
    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        self.enums.iter().rev().find(|t| t.name == name)
    }

    /// Returns every definition name that appears in more than one kind space.
    pub fn kind_collisions(&self) -> Vec<String> {
        let mut kinds: BTreeMap<&str, Vec<DefinitionKind>> = BTreeMap::new();
        let names = self
            .object_types
            .iter()
            .map(|t| (t.name.as_str(), DefinitionKind::Type))
            .chain(self.input_types.iter().map(|t| (t.name.as_str(), DefinitionKind::Input)))
            .chain(self.enums.iter().map(|t| (t.name.as_str(), DefinitionKind::Enum)));
        for (name, kind) in names {
            let seen = kinds.entry(name).or_default();
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
        kinds
            .into_iter()
            .filter(|(_, seen)| seen.len() > 1)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Resolves a type reference against the model.
    ///
    /// The scalar table is consulted first, then the kind index. Names found
    /// in neither are classified as [`TypeClass::Unknown`].
    pub fn resolve(&self, reference: &TypeReference) -> TypeMapping {
        let scalar = scalar_kind(&reference.base);
        let class = match scalar {
            Some(kind) => TypeClass::Scalar(kind),
            None => match self.kind_of(&reference.base) {
                Some(DefinitionKind::Type) => TypeClass::Object,
                Some(DefinitionKind::Input) => TypeClass::Input,
                Some(DefinitionKind::Enum) => TypeClass::Enum,
                None => TypeClass::Unknown,
            },
        };

        TypeMapping {
            base: reference.base.clone(),
            nullable: reference.nullable,
            is_list: reference.is_list,
            scalar,
            class,
        }
    }

    /// Returns `true` if a base type needs no nested selection.
    ///
    /// Scalars and enums are leaves.
    pub fn is_leaf(&self, base: &str) -> bool {
        scalar_kind(base).is_some() || self.kind_of(base) == Some(DefinitionKind::Enum)
    }

    /// Returns `true` if the model defines no types, inputs, enums or operations.
    pub fn is_empty(&self) -> bool {
        self.object_types.is_empty()
            && self.input_types.is_empty()
            && self.enums.is_empty()
            && self.query_fields.is_empty()
            && self.mutation_fields.is_empty()
    }
}
