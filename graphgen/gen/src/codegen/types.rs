//! Object type struct generation.
//!
//! Every object type becomes a plain data struct that deserializes leniently:
//! `#[serde(default)]` fills in whatever the response left out, which is what
//! a partial or truncated selection produces.

use graphgen_define::{FieldDef, SchemaModel};
use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::distinct_by;
use crate::codegen::rust_type::{TypePosition, rust_type};
use crate::naming::{UniqueNames, constant_name, field_name, ident, type_name};

/// Generates the `types.rs` module.
///
/// A type defined more than once is emitted once, with the fields of its
/// last definition.
pub fn generate_types_module(model: &SchemaModel) -> TokenStream {
    let structs: Vec<TokenStream> = distinct_by(&model.object_types, |t| t.name.as_str())
        .into_iter()
        .map(|object| {
            let fields = model.fields_of(&object.name).unwrap_or_default();
            generate_object_struct(&object.name, fields, model)
        })
        .collect();

    quote! {
        //! Object types returned by queries and mutations.
        #![allow(non_camel_case_types)]

        #(#structs)*
    }
}

/// Generates the struct for one object type.
///
/// ## Examples
///
/// For `type User { id: ID! fullName: String manager: User }`:
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Default, ::serde::Serialize, ::serde::Deserialize)]
/// #[serde(default)]
/// pub struct User {
///     pub id: String,
///     #[serde(rename = "fullName")]
///     pub full_name: Option<String>,
///     pub manager: Option<Box<super::types::User>>,
/// }
///
/// impl User {
///     pub const ID: &'static str = "id";
///     pub const FULL_NAME: &'static str = "fullName";
///     pub const MANAGER: &'static str = "manager";
/// }
/// ```
pub fn generate_object_struct(name: &str, fields: &[FieldDef], model: &SchemaModel) -> TokenStream {
    let struct_name = ident(&type_name(name));
    let doc = format!(" The `{name}` object type.");

    let mut field_names = UniqueNames::default();
    let mut constant_names = UniqueNames::default();
    let mut members = Vec::new();
    let mut constants = Vec::new();

    for field in distinct_by(fields, |f| f.name.as_str()) {
        let rust_name = field_names.claim(field_name(&field.name));
        let member = ident(&rust_name);
        let ty = rust_type(&field.ty, model, TypePosition::ObjectField);
        let sdl_name = &field.name;
        let field_doc = format!(" `{}: {}`", field.name, field.ty.raw);
        let rename = (rust_name != field.name).then(|| quote! { #[serde(rename = #sdl_name)] });

        members.push(quote! {
            #[doc = #field_doc]
            #rename
            pub #member: #ty,
        });

        let constant = ident(&constant_names.claim(constant_name(&field.name)));
        constants.push(quote! {
            pub const #constant: &'static str = #sdl_name;
        });
    }

    let field_constants = if constants.is_empty() {
        quote! {}
    } else {
        quote! {
            impl #struct_name {
                #(#constants)*
            }
        }
    };

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, PartialEq, Default, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(default)]
        pub struct #struct_name {
            #(#members)*
        }

        #field_constants
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::output::{format_code, validate_code};
    use crate::test_utils::sample_model;

    fn render(schema: &str) -> String {
        let model = analyze(schema).unwrap();
        format_code(&validate_code(&generate_types_module(&model)).unwrap())
    }

    #[test]
    fn sample_types_are_valid_rust() {
        let tokens = generate_types_module(&sample_model());
        let file = validate_code(&tokens).unwrap();
        let code = format_code(&file);

        assert!(code.contains("pub struct User {"));
        assert!(code.contains("pub struct Post {"));
        assert!(code.contains("#[serde(rename = \"createdAt\")]"));
        assert!(code.contains("pub created_at: ::std::option::Option<::serde_json::Value>,"));
        assert!(code.contains("pub posts: ::std::vec::Vec<super::types::Post>,"));
        assert!(code.contains("pub const CREATED_AT: &'static str = \"createdAt\";"));
    }

    #[test]
    fn self_reference_is_boxed() {
        let code = render("type User { id: ID! manager: User! }");
        assert!(code.contains(
            "pub manager: ::std::option::Option<::std::boxed::Box<super::types::User>>,"
        ));
    }

    #[test]
    fn keyword_fields_use_raw_identifiers() {
        let code = render("type Item { type: String self: Int }");
        assert!(code.contains("pub r#type: ::std::option::Option<::std::string::String>,"));
        assert!(code.contains("#[serde(rename = \"self\")]"));
        assert!(code.contains("pub self_: ::std::option::Option<i64>,"));
        assert!(code.contains("pub const TYPE: &'static str = \"type\";"));
    }

    #[test]
    fn colliding_field_names_get_suffixes() {
        let code = render("type Item { userId: ID user_id: ID }");
        assert!(code.contains("pub user_id: ::std::option::Option<::std::string::String>,"));
        assert!(code.contains("pub user_id_2: ::std::option::Option<::std::string::String>,"));
        assert!(code.contains("pub const USER_ID_2: &'static str = \"user_id\";"));
    }

    #[test]
    fn empty_type_has_no_constants() {
        let code = render("type Marker { } type Holder { marker: Marker }");
        assert!(code.contains("pub struct Marker {}"));
        assert!(!code.contains("impl Marker"));
    }

    #[test]
    fn repeated_type_is_emitted_once_with_last_fields() {
        let code = render("type User { id: ID } type User { age: Int }");
        assert_eq!(code.matches("pub struct User").count(), 1);
        assert!(code.contains("pub age: ::std::option::Option<i64>,"));
        assert!(!code.contains("pub id:"));
    }
}
