//! Operation compilation.
//!
//! Turns one `Query`/`Mutation` field into an [`OperationDescriptor`]: the
//! argument signature and binding, the per-argument variable plan, the
//! resolved return kind and the complete request document. The descriptor is
//! purely semantic; naming and emission happen in [`crate::codegen`].

use graphgen_define::{
    FieldDef, OperationFieldDef, OperationKind, ScalarKind, SchemaModel, TypeClass, TypeReference,
};
use serde::Serialize;
use tracing::debug;

use crate::naming::upper_first;
use crate::selection::{SelectionSet, SelectionStyle};

/// What an operation's return type resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum ResolvedKind {
    /// A scalar from the fixed table.
    Scalar(ScalarKind),
    /// A list of the inner kind. Never nested.
    List(Box<ResolvedKind>),
    /// An enum defined in the schema.
    EnumRef(String),
    /// An object type defined in the schema.
    TypeRef(String),
    /// Anything else, passed through untyped.
    Opaque,
}

impl ResolvedKind {
    /// Resolves a return type against the model.
    pub fn resolve(reference: &TypeReference, model: &SchemaModel) -> Self {
        let element = match model.resolve(reference).class {
            TypeClass::Scalar(kind) => Self::Scalar(kind),
            TypeClass::Enum => Self::EnumRef(reference.base.clone()),
            TypeClass::Object => Self::TypeRef(reference.base.clone()),
            TypeClass::Input | TypeClass::Unknown => Self::Opaque,
        };

        if reference.is_list {
            Self::List(Box::new(element))
        } else {
            element
        }
    }

    /// The non-list kind, looking through a list wrapper.
    pub fn element(&self) -> &ResolvedKind {
        match self {
            Self::List(inner) => inner.as_ref(),
            other => other,
        }
    }
}

/// How one argument is turned into a request variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum VariableStrategy {
    /// Scalars and untyped values are sent as they are.
    PassThrough,
    /// Enums are sent as their raw schema value.
    EnumValue,
    /// Input objects are flattened to a map of their own fields.
    FlattenInput { fields: Vec<FieldDef> },
}

/// The serialization plan for one argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariablePlan {
    pub name: String,
    pub ty: TypeReference,
    pub strategy: VariableStrategy,
}

impl VariablePlan {
    /// Returns `true` if an absent value must become `null` before the
    /// unwrap or flatten step runs.
    pub fn null_guarded(&self) -> bool {
        self.ty.nullable && self.strategy != VariableStrategy::PassThrough
    }
}

/// Everything the emitter needs to know about one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationDescriptor {
    pub kind: OperationKind,
    /// The schema field name, e.g. `createUser`.
    pub name: String,
    /// The document operation name, e.g. `CreateUser`.
    pub operation_name: String,
    pub args: Vec<FieldDef>,
    pub return_type: TypeReference,
    pub resolved: ResolvedKind,
    /// `(name: Type, ...)` with raw type text, or empty.
    pub args_signature: String,
    /// `(name: $name, ...)`, or empty.
    pub args_pass: String,
    /// `None` when the return type needs no selection block.
    pub selection: Option<SelectionSet>,
    pub style: SelectionStyle,
    pub document: String,
    pub variables: Vec<VariablePlan>,
}

impl OperationDescriptor {
    /// The document up to and including the field invocation.
    ///
    /// `{document_head}{selection block}{document_tail}` rebuilds the full
    /// document with any selection set.
    pub fn document_head(&self) -> String {
        match self.style {
            SelectionStyle::Inline => format!(
                "{} {}{} {{ {}{}",
                self.kind, self.operation_name, self.args_signature, self.name, self.args_pass
            ),
            SelectionStyle::Indented => format!(
                "{} {}{} {{\n    {}{}",
                self.kind, self.operation_name, self.args_signature, self.name, self.args_pass
            ),
        }
    }

    /// The text that closes the document after the selection block.
    pub fn document_tail(&self) -> &'static str {
        match self.style {
            SelectionStyle::Inline => " }",
            SelectionStyle::Indented => "\n}",
        }
    }
}

/// Builds `(name: Type, ...)` from the arguments' raw type text.
///
/// ## Examples
///
/// ```
/// use graphgen_define::FieldDef;
/// use graphgen_gen::operation::args_signature;
///
/// let args = vec![FieldDef::new("id", "ID!"), FieldDef::new("tags", "[String!]")];
/// assert_eq!(args_signature(&args), "(id: ID!, tags: [String!])");
/// assert_eq!(args_signature(&[]), "");
/// ```
pub fn args_signature(args: &[FieldDef]) -> String {
    if args.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = args
        .iter()
        .map(|arg| format!("{}: {}", arg.name, arg.ty.raw))
        .collect();
    format!("({})", parts.join(", "))
}

/// Builds the field invocation binding `(name: $name, ...)`.
pub fn args_pass(args: &[FieldDef]) -> String {
    if args.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = args
        .iter()
        .map(|arg| format!("{0}: ${0}", arg.name))
        .collect();
    format!("({})", parts.join(", "))
}

/// Decides how each argument is serialized.
pub fn variables_plan(args: &[FieldDef], model: &SchemaModel) -> Vec<VariablePlan> {
    args.iter()
        .map(|arg| {
            let strategy = match model.resolve(&arg.ty).class {
                TypeClass::Enum => VariableStrategy::EnumValue,
                TypeClass::Input => VariableStrategy::FlattenInput {
                    fields: model
                        .input_type(&arg.ty.base)
                        .map(|input| input.fields.clone())
                        .unwrap_or_default(),
                },
                TypeClass::Scalar(_) | TypeClass::Object | TypeClass::Unknown => {
                    VariableStrategy::PassThrough
                }
            };
            VariablePlan {
                name: arg.name.clone(),
                ty: arg.ty.clone(),
                strategy,
            }
        })
        .collect()
}

/// Compiles one operation field.
///
/// Only object-typed returns get a selection block; it renders as `{}` when
/// the synthesized selection is empty. Scalar, enum and unresolvable returns
/// carry no block.
///
/// ## Examples
///
/// ```
/// use graphgen_define::OperationKind;
/// use graphgen_gen::analyzer::analyze;
/// use graphgen_gen::operation::compile_operation;
/// use graphgen_gen::selection::SelectionStyle;
///
/// let model = analyze(
///     "type User { id: ID! name: String } \
///      input CreateUserInput { name: String! } \
///      type Mutation { createUser(input: CreateUserInput!): User }",
/// ).unwrap();
///
/// let op = compile_operation(&model.mutation_fields[0], OperationKind::Mutation, &model, SelectionStyle::Inline);
/// assert_eq!(op.args_signature, "(input: CreateUserInput!)");
/// assert_eq!(op.args_pass, "(input: $input)");
/// assert_eq!(
///     op.document,
///     "mutation CreateUser(input: CreateUserInput!) { createUser(input: $input) { id name } }"
/// );
/// ```
pub fn compile_operation(
    field: &OperationFieldDef,
    kind: OperationKind,
    model: &SchemaModel,
    style: SelectionStyle,
) -> OperationDescriptor {
    let resolved = ResolvedKind::resolve(&field.return_type, model);

    let selection = match resolved.element() {
        ResolvedKind::TypeRef(base) => Some(SelectionSet::build(base, model)),
        ResolvedKind::Opaque => {
            debug!(
                operation = field.name.as_str(),
                return_type = field.return_type.raw.as_str(),
                "Unresolvable return type, omitting selection"
            );
            None
        }
        _ => None,
    };

    let mut descriptor = OperationDescriptor {
        kind,
        name: field.name.clone(),
        operation_name: upper_first(&field.name),
        args: field.args.clone(),
        return_type: field.return_type.clone(),
        resolved,
        args_signature: args_signature(&field.args),
        args_pass: args_pass(&field.args),
        selection,
        style,
        document: String::new(),
        variables: variables_plan(&field.args, model),
    };

    let block = descriptor
        .selection
        .as_ref()
        .map(|selection| selection.render_block(style, 1))
        .unwrap_or_default();
    descriptor.document = format!(
        "{}{}{}",
        descriptor.document_head(),
        block,
        descriptor.document_tail()
    );

    descriptor
}

/// Compiles every query and mutation in the model, queries first.
pub fn compile_all(model: &SchemaModel, style: SelectionStyle) -> Vec<OperationDescriptor> {
    let queries = model
        .query_fields
        .iter()
        .map(|field| compile_operation(field, OperationKind::Query, model, style));
    let mutations = model
        .mutation_fields
        .iter()
        .map(|field| compile_operation(field, OperationKind::Mutation, model, style));
    queries.chain(mutations).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::test_utils::SAMPLE_SCHEMA;

    fn compile(schema: &str, kind: OperationKind, name: &str) -> OperationDescriptor {
        compile_styled(schema, kind, name, SelectionStyle::Inline)
    }

    fn compile_styled(
        schema: &str,
        kind: OperationKind,
        name: &str,
        style: SelectionStyle,
    ) -> OperationDescriptor {
        let model = analyze(schema).unwrap();
        let fields = match kind {
            OperationKind::Query => &model.query_fields,
            OperationKind::Mutation => &model.mutation_fields,
        };
        let field = fields.iter().find(|f| f.name == name).unwrap();
        compile_operation(field, kind, &model, style)
    }

    #[test]
    fn create_user_mutation() {
        let op = compile(SAMPLE_SCHEMA, OperationKind::Mutation, "createUser");
        assert_eq!(op.operation_name, "CreateUser");
        assert_eq!(op.args_signature, "(input: CreateUserInput!)");
        assert_eq!(op.args_pass, "(input: $input)");
        assert!(op.document.starts_with(
            "mutation CreateUser(input: CreateUserInput!) { createUser(input: $input) { "
        ));
        assert!(op.document.ends_with(" } }"));
        assert_eq!(op.resolved, ResolvedKind::TypeRef("User".to_string()));

        let plan = &op.variables[0];
        assert_eq!(plan.name, "input");
        match &plan.strategy {
            VariableStrategy::FlattenInput { fields } => {
                let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
                assert_eq!(names, vec!["name", "email", "role"]);
            }
            other => panic!("expected flatten, got {other:?}"),
        }
        assert!(!plan.null_guarded());
    }

    #[test]
    fn query_without_arguments() {
        let op = compile(SAMPLE_SCHEMA, OperationKind::Query, "me");
        assert_eq!(op.args_signature, "");
        assert_eq!(op.args_pass, "");
        assert!(op.document.starts_with("query Me { me { "));
        assert!(op.variables.is_empty());
    }

    #[test]
    fn scalar_return_has_no_selection() {
        let op = compile(SAMPLE_SCHEMA, OperationKind::Mutation, "deleteUser");
        assert_eq!(op.selection, None);
        assert_eq!(
            op.document,
            "mutation DeleteUser(id: ID!) { deleteUser(id: $id) }"
        );
        assert_eq!(op.resolved, ResolvedKind::Scalar(ScalarKind::Boolean));
    }

    #[test]
    fn list_return_is_resolved() {
        let op = compile(SAMPLE_SCHEMA, OperationKind::Query, "users");
        assert_eq!(
            op.resolved,
            ResolvedKind::List(Box::new(ResolvedKind::TypeRef("User".to_string())))
        );
        assert_eq!(op.args_signature, "(first: Int, perPage: Int)");
        assert!(op.document.contains("users(first: $first, perPage: $perPage) { "));
    }

    #[test]
    fn enum_return_and_enum_argument() {
        let op = compile(SAMPLE_SCHEMA, OperationKind::Query, "defaultRole");
        assert_eq!(op.resolved, ResolvedKind::EnumRef("Role".to_string()));
        assert_eq!(op.selection, None);
        assert_eq!(
            op.document,
            "query DefaultRole(scope: Role) { defaultRole(scope: $scope) }"
        );
        assert_eq!(op.variables[0].strategy, VariableStrategy::EnumValue);
        assert!(op.variables[0].null_guarded());
    }

    #[test]
    fn unknown_return_is_opaque() {
        let op = compile(
            "type Query { now(zone: String): DateTime }",
            OperationKind::Query,
            "now",
        );
        assert_eq!(op.resolved, ResolvedKind::Opaque);
        assert_eq!(op.selection, None);
        assert_eq!(op.document, "query Now(zone: String) { now(zone: $zone) }");
        assert_eq!(op.variables[0].strategy, VariableStrategy::PassThrough);
        assert!(!op.variables[0].null_guarded());
    }

    #[test]
    fn empty_object_return_keeps_braces() {
        let op = compile(
            "type Marker { } type Query { marker: Marker }",
            OperationKind::Query,
            "marker",
        );
        assert_eq!(op.document, "query Marker { marker {} }");
    }

    #[test]
    fn indented_document() {
        let op = compile_styled(
            "type User { id: ID name: String } type Query { user(id: ID!): User }",
            OperationKind::Query,
            "user",
            SelectionStyle::Indented,
        );
        assert_eq!(
            op.document,
            "query User(id: ID!) {\n    user(id: $id) {\n        id\n        name\n    }\n}"
        );
    }

    #[test]
    fn head_and_tail_rebuild_document() {
        let op = compile(SAMPLE_SCHEMA, OperationKind::Query, "user");
        let selection = op.selection.as_ref().unwrap().render_block(op.style, 1);
        assert_eq!(
            format!("{}{}{}", op.document_head(), selection, op.document_tail()),
            op.document
        );
    }

    #[test]
    fn nullable_input_is_null_guarded() {
        let op = compile(
            "input Filter { q: String } type Query { search(filter: Filter): [String] }",
            OperationKind::Query,
            "search",
        );
        assert!(op.variables[0].null_guarded());
        assert_eq!(
            op.resolved,
            ResolvedKind::List(Box::new(ResolvedKind::Scalar(ScalarKind::Text)))
        );
    }

    #[test]
    fn compile_all_orders_queries_first() {
        let model = analyze(SAMPLE_SCHEMA).unwrap();
        let ops = compile_all(&model, SelectionStyle::Inline);
        assert_eq!(ops.len(), model.query_fields.len() + model.mutation_fields.len());
        assert_eq!(ops[0].kind, OperationKind::Query);
        assert_eq!(ops.last().unwrap().kind, OperationKind::Mutation);
    }
}
