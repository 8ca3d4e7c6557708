//! Schema analysis.
//!
//! Turns raw schema text into a [`SchemaModel`]. Analysis is a single pass
//! over the normalised text and is deterministic: the same input always
//! yields an equal model.

use std::path::Path;

use graphgen_define::model::RESERVED_TYPE_NAMES;
use graphgen_define::{
    EnumType, InputType, ObjectType, OperationFieldDef, OperationKind, SchemaModel,
};
use tracing::{debug, info};

use crate::errors::GeneratorError;
use crate::parser::{
    Keyword, extract_definitions, extract_enum_values, extract_fields, extract_operation_fields,
    find_definition_body, preprocess,
};
use crate::source::load_schema;

/// Analyses schema text into a model.
///
/// ## Errors
///
/// Returns `GeneratorError::EmptySchema` if the text holds nothing but
/// comments, descriptions, directives and whitespace. Every other anomaly
/// (a malformed field, an enum without values, an unknown type) is absorbed
/// into a smaller model.
///
/// ## Examples
///
/// ```
/// use graphgen_define::DefinitionKind;
/// use graphgen_gen::analyzer::analyze;
///
/// let model = analyze(
///     "type User { id: ID! name: String role: Role } enum Role { ADMIN DEFAULT }",
/// ).unwrap();
///
/// assert_eq!(model.object_types[0].fields.len(), 3);
/// assert_eq!(model.enums[0].values, vec!["ADMIN", "DEFAULT"]);
/// assert_eq!(model.kind_of("Role"), Some(DefinitionKind::Enum));
/// ```
pub fn analyze(text: &str) -> Result<SchemaModel, GeneratorError> {
    let text = preprocess(text)?;

    let object_types: Vec<ObjectType> = extract_definitions(&text, Keyword::Type)
        .into_iter()
        .filter(|definition| !RESERVED_TYPE_NAMES.contains(&definition.name))
        .map(|definition| ObjectType::new(definition.name, extract_fields(definition.body)))
        .collect();

    let input_types: Vec<InputType> = extract_definitions(&text, Keyword::Input)
        .into_iter()
        .map(|definition| InputType::new(definition.name, extract_fields(definition.body)))
        .collect();

    let enums: Vec<EnumType> = extract_definitions(&text, Keyword::Enum)
        .into_iter()
        .filter_map(|definition| {
            let values = extract_enum_values(definition.body);
            if values.is_empty() {
                debug!(name = definition.name, "Skipping enum without values");
                return None;
            }
            Some(EnumType::new(definition.name, values))
        })
        .collect();

    let query_fields = operation_fields(&text, OperationKind::Query);
    let mutation_fields = operation_fields(&text, OperationKind::Mutation);

    let model = SchemaModel::new(object_types, input_types, enums, query_fields, mutation_fields);

    for name in model.kind_collisions() {
        debug!(
            name = name.as_str(),
            kind = ?model.kind_of(&name),
            "Name defined in more than one kind space, last definition wins"
        );
    }

    info!(
        types = model.object_types.len(),
        inputs = model.input_types.len(),
        enums = model.enums.len(),
        queries = model.query_fields.len(),
        mutations = model.mutation_fields.len(),
        "Analysed schema"
    );

    Ok(model)
}

fn operation_fields(text: &str, kind: OperationKind) -> Vec<OperationFieldDef> {
    match find_definition_body(text, Keyword::Type, kind.root_type()) {
        Some(body) => extract_operation_fields(body),
        None => {
            debug!(root = kind.root_type(), "No root type in schema");
            Vec::new()
        }
    }
}

/// Loads a schema file and analyses it.
///
/// ## Errors
///
/// Returns the loading errors of [`load_schema`] and the analysis errors of
/// [`analyze`].
pub fn analyze_file(path: &Path) -> Result<SchemaModel, GeneratorError> {
    let text = load_schema(path)?;
    analyze(&text)
}
