//! Operation struct generation.
//!
//! Every compiled query or mutation becomes a struct holding its arguments
//! and implementing `graphgen::Operation`, so the runtime client can execute
//! it and decode the response into the mapped Rust type.

use std::collections::HashSet;

use graphgen_define::{OperationKind, SchemaModel};
use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::doc_lines;
use crate::codegen::rust_type::{TypePosition, response_type, rust_type};
use crate::codegen::values::{Conversion, value_expr};
use crate::naming::{UniqueNames, field_name, ident, type_name};
use crate::operation::OperationDescriptor;
use crate::selection::SelectionStyle;

/// Generates `queries.rs` or `mutations.rs` from the descriptors of `kind`.
pub fn generate_operations_module(
    operations: &[OperationDescriptor],
    kind: OperationKind,
    model: &SchemaModel,
) -> TokenStream {
    let module_doc = match kind {
        OperationKind::Query => " Query operations.",
        OperationKind::Mutation => " Mutation operations.",
    };

    let mut struct_names = UniqueNames::default();
    let structs: Vec<TokenStream> = operations
        .iter()
        .filter(|op| op.kind == kind)
        .map(|op| {
            let name = struct_names.claim(type_name(&format!(
                "{}{}",
                op.operation_name,
                kind.root_type()
            )));
            generate_operation(op, &name, model)
        })
        .collect();

    quote! {
        #![doc = #module_doc]
        #![allow(non_camel_case_types, clippy::new_without_default, clippy::too_many_arguments)]

        #(#structs)*
    }
}

struct Argument {
    sdl_name: String,
    rust_name: String,
    member: proc_macro2::Ident,
    ty: TokenStream,
    /// The type without its outer `Option`, taken by setters.
    required_ty: TokenStream,
    nullable: bool,
    value: TokenStream,
}

/// Generates the struct and `Operation` impl for one operation.
///
/// Required arguments are taken by `new()`, optional ones are set with
/// `with_<name>()`. Operations returning an object type also accept a
/// replacement selection set through `with_selection()`.
///
/// ## Examples
///
/// For `user(id: ID!, locale: String): User` in `Query`:
///
/// ```ignore
/// pub struct UserQuery {
///     pub id: String,
///     pub locale: Option<String>,
///     selection: Option<String>,
/// }
///
/// let op = UserQuery::new("42".into()).with_locale("en".into()).with_selection("id");
/// assert_eq!(op.document(), "query User(id: ID!, locale: String) { user(id: $id, locale: $locale) { id } }");
/// ```
pub fn generate_operation(
    op: &OperationDescriptor,
    struct_name: &str,
    model: &SchemaModel,
) -> TokenStream {
    let struct_ident = ident(struct_name);
    let arguments = collect_arguments(op, model);
    let has_selection = op.selection.is_some();

    let mut doc = vec![
        format!(" The `{}` {}.", op.name, op.kind),
        String::new(),
        " ```graphql".to_string(),
    ];
    doc.extend(doc_lines(&op.document));
    doc.push(" ```".to_string());

    let fields = arguments.iter().map(|arg| {
        let (member, ty) = (&arg.member, &arg.ty);
        quote! { pub #member: #ty, }
    });
    let selection_field = has_selection.then(|| {
        quote! { selection: ::std::option::Option<::std::string::String>, }
    });

    let required: Vec<&Argument> = arguments.iter().filter(|arg| !arg.nullable).collect();
    let params = required.iter().map(|arg| {
        let (member, ty) = (&arg.member, &arg.ty);
        quote! { #member: #ty }
    });
    let inits = arguments.iter().map(|arg| {
        let member = &arg.member;
        if arg.nullable {
            quote! { #member: ::std::option::Option::None, }
        } else {
            quote! { #member, }
        }
    });
    let selection_init = has_selection.then(|| quote! { selection: ::std::option::Option::None, });

    let setters = arguments.iter().filter(|arg| arg.nullable).map(|arg| {
        let member = &arg.member;
        let setter = ident(&format!("with_{}", arg.rust_name));
        let inner = &arg.required_ty;
        quote! {
            pub fn #setter(mut self, value: #inner) -> Self {
                self.#member = ::std::option::Option::Some(value);
                self
            }
        }
    });

    let selection_api = has_selection.then(|| selection_api(op));
    let document_fn = has_selection.then(|| {
        let custom = match op.style {
            SelectionStyle::Inline => "{} {{ {} }}{}",
            SelectionStyle::Indented => "{} {{\n{}\n    }}{}",
        };
        quote! {
            fn document(&self) -> ::std::string::String {
                match &self.selection {
                    ::std::option::Option::Some(selection) if selection.trim().is_empty() => {
                        ::std::format!("{} {{}}{}", Self::DOCUMENT_HEAD, Self::DOCUMENT_TAIL)
                    }
                    ::std::option::Option::Some(selection) => ::std::format!(
                        #custom,
                        Self::DOCUMENT_HEAD,
                        selection,
                        Self::DOCUMENT_TAIL
                    ),
                    ::std::option::Option::None => ::std::string::String::from(
                        <Self as ::graphgen::Operation>::DOCUMENT,
                    ),
                }
            }
        }
    });

    let variables_body = if arguments.is_empty() {
        quote! { ::serde_json::Map::new() }
    } else {
        let inserts = arguments.iter().map(|arg| {
            let (name, value) = (&arg.sdl_name, &arg.value);
            quote! {
                variables.insert(::std::string::String::from(#name), #value);
            }
        });
        quote! {
            let mut variables = ::serde_json::Map::new();
            #(#inserts)*
            variables
        }
    };

    let response = response_type(&op.resolved);
    let kind = match op.kind {
        OperationKind::Query => quote! { ::graphgen::OperationKind::Query },
        OperationKind::Mutation => quote! { ::graphgen::OperationKind::Mutation },
    };
    let field = &op.name;
    let graphql_type = &op.return_type.raw;
    let document = &op.document;

    quote! {
        #(#[doc = #doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct #struct_ident {
            #(#fields)*
            #selection_field
        }

        impl #struct_ident {
            pub fn new(#(#params),*) -> Self {
                Self {
                    #(#inits)*
                    #selection_init
                }
            }

            #(#setters)*

            #selection_api
        }

        impl ::graphgen::Operation for #struct_ident {
            type Response = #response;

            const KIND: ::graphgen::OperationKind = #kind;
            const FIELD: &'static str = #field;
            const GRAPHQL_TYPE: &'static str = #graphql_type;
            const DOCUMENT: &'static str = #document;

            #document_fn

            fn variables(&self) -> ::serde_json::Map<::std::string::String, ::serde_json::Value> {
                #variables_body
            }
        }
    }
}

/// Arguments in declaration order, one per distinct schema name.
fn collect_arguments(op: &OperationDescriptor, model: &SchemaModel) -> Vec<Argument> {
    let mut names = UniqueNames::with_reserved(&["selection"]);
    let mut seen = HashSet::new();

    op.variables
        .iter()
        .filter(|plan| seen.insert(plan.name.clone()))
        .map(|plan| {
            let rust_name = names.claim(field_name(&plan.name));
            let member = ident(&rust_name);
            let conversion = Conversion::from(&plan.strategy);
            let value = if plan.null_guarded() {
                let converted = value_expr(conversion, &plan.ty, quote! { value });
                quote! {
                    match &self.#member {
                        ::std::option::Option::Some(value) => #converted,
                        ::std::option::Option::None => ::serde_json::Value::Null,
                    }
                }
            } else {
                value_expr(conversion, &plan.ty, quote! { self.#member })
            };

            let mut required = plan.ty.clone();
            required.nullable = false;

            Argument {
                sdl_name: plan.name.clone(),
                rust_name,
                member,
                ty: rust_type(&plan.ty, model, TypePosition::Argument),
                required_ty: rust_type(&required, model, TypePosition::Argument),
                nullable: plan.ty.nullable,
                value,
            }
        })
        .collect()
}

fn selection_api(op: &OperationDescriptor) -> TokenStream {
    let head = op.document_head();
    let tail = op.document_tail();
    quote! {
        const DOCUMENT_HEAD: &'static str = #head;
        const DOCUMENT_TAIL: &'static str = #tail;

        /// Replaces the synthesized selection set.
        ///
        /// `selection` is the text that goes between the braces, e.g. `"id name"`,
        /// usually built with `graphgen::selection::fields`. Empty text selects `{}`.
        pub fn with_selection(mut self, selection: impl ::std::convert::Into<::std::string::String>) -> Self {
            self.selection = ::std::option::Option::Some(selection.into());
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::operation::compile_all;
    use crate::output::{format_code, validate_code};
    use crate::test_utils::sample_model;

    fn render(schema: &str, kind: OperationKind, style: SelectionStyle) -> String {
        let model = analyze(schema).unwrap();
        let ops = compile_all(&model, style);
        format_code(&validate_code(&generate_operations_module(&ops, kind, &model)).unwrap())
    }

    fn sample(kind: OperationKind) -> String {
        let model = sample_model();
        let ops = compile_all(&model, SelectionStyle::Inline);
        format_code(&validate_code(&generate_operations_module(&ops, kind, &model)).unwrap())
    }

    #[test]
    fn sample_queries_are_valid_rust() {
        let code = sample(OperationKind::Query);

        assert!(code.contains("pub struct MeQuery {"));
        assert!(code.contains("pub struct UserQuery {"));
        assert!(code.contains("impl ::graphgen::Operation for UsersQuery {"));
        assert!(code.contains("type Response = super::types::User;"));
        assert!(code.contains("type Response = ::std::vec::Vec<super::types::User>;"));
        assert!(code.contains("type Response = super::enums::Role;"));
        assert!(code.contains(
            "\"query Me { me { id name email role manager {} posts { id title score published author {} tags } createdAt } }\""
        ));
        assert_eq!(code.matches("pub fn with_selection(").count(), 3);
        assert!(!code.contains("Mutation"));
    }

    #[test]
    fn required_arguments_go_through_new() {
        let code = sample(OperationKind::Query);
        assert!(code.contains("pub fn new(id: ::std::string::String) -> Self {"));
        assert!(code.contains("pub per_page: ::std::option::Option<i64>,"));
        assert!(code.contains("pub fn with_per_page(mut self, value: i64) -> Self {"));
        assert!(code.contains("::std::string::String::from(\"perPage\")"));
    }

    #[test]
    fn enum_arguments_are_null_guarded() {
        let code = sample(OperationKind::Query);
        assert!(code.contains("pub fn with_scope(mut self, value: super::enums::Role) -> Self {"));
        assert!(code.contains("::serde_json::Value::from(value.as_str())"));
        assert!(code.contains("::std::option::Option::None => ::serde_json::Value::Null,"));
    }

    #[test]
    fn input_arguments_are_flattened() {
        let code = sample(OperationKind::Mutation);
        assert!(code.contains("pub struct CreateUserMutation {"));
        assert!(code.contains("pub fn new(input: super::inputs::CreateUserInput) -> Self {"));
        assert!(code.contains("::serde_json::Value::Object(self.input.to_variables())"));
        assert!(code.contains("const KIND: ::graphgen::OperationKind = ::graphgen::OperationKind::Mutation;"));
        assert!(code.contains("type Response = bool;"));
    }

    #[test]
    fn scalar_operations_have_no_selection() {
        let code = render(
            "type Query { ping: Boolean }",
            OperationKind::Query,
            SelectionStyle::Inline,
        );
        assert!(code.contains("pub struct PingQuery {}"));
        assert!(code.contains("pub fn new() -> Self {"));
        assert!(!code.contains("with_selection"));
        assert!(!code.contains("DOCUMENT_HEAD"));
        assert!(code.contains("::serde_json::Map::new()"));
    }

    #[test]
    fn empty_custom_selection_selects_empty_block() {
        let code = render(
            "type User { id: ID } type Query { me: User }",
            OperationKind::Query,
            SelectionStyle::Inline,
        );
        assert!(code.contains("selection.trim().is_empty()"));
        assert!(code.contains(r#""{} {{}}{}""#));
        assert!(code.contains("graphgen::selection::fields"));
    }

    #[test]
    fn selection_argument_does_not_clash() {
        let code = render(
            "type Item { id: ID } type Query { search(selection: String): [Item] }",
            OperationKind::Query,
            SelectionStyle::Inline,
        );
        assert!(code.contains("pub selection_2: ::std::option::Option<::std::string::String>,"));
        assert!(code.contains("pub fn with_selection_2(mut self, value: ::std::string::String) -> Self {"));
        assert!(code.contains("pub fn with_selection("));
        assert!(code.contains("::std::string::String::from(\"selection\")"));
    }

    #[test]
    fn indented_documents_keep_newlines() {
        let code = render(
            "type User { id: ID } type Query { me: User }",
            OperationKind::Query,
            SelectionStyle::Indented,
        );
        assert!(code.contains(r#""query Me {\n    me {\n        id\n    }\n}""#));
        assert!(code.contains(r#""{} {{\n{}\n    }}{}""#));
    }

    #[test]
    fn colliding_struct_names_get_suffixes() {
        let code = render(
            "type Query { user_: Int User_: Int }",
            OperationKind::Query,
            SelectionStyle::Inline,
        );
        assert!(code.contains("pub struct User_Query {"));
        assert!(code.contains("pub struct User_Query_2 {"));
    }
}
