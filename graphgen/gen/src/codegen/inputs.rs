//! Input type struct generation.

use graphgen_define::{FieldDef, SchemaModel, TypeClass};
use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::distinct_by;
use crate::codegen::rust_type::{TypePosition, rust_type};
use crate::codegen::values::{Conversion, value_expr};
use crate::naming::{UniqueNames, field_name, ident, type_name};

/// Generates the `inputs.rs` module.
pub fn generate_inputs_module(model: &SchemaModel) -> TokenStream {
    let structs: Vec<TokenStream> = distinct_by(&model.input_types, |t| t.name.as_str())
        .into_iter()
        .filter_map(|input| model.input_type(&input.name))
        .map(|input| generate_input_struct(&input.name, &input.fields, model))
        .collect();

    quote! {
        //! Input types accepted as operation arguments.
        #![allow(non_camel_case_types)]

        #(#structs)*
    }
}

/// Generates the struct and `to_variables()` for one input type.
///
/// Nullable fields are skipped when serializing and left out of the
/// variables map when unset, so absent optionals never reach the server as
/// explicit `null`s.
///
/// ## Examples
///
/// For `input CreateUserInput { name: String! role: Role }`:
///
/// ```ignore
/// pub struct CreateUserInput {
///     pub name: String,
///     #[serde(skip_serializing_if = "::std::option::Option::is_none")]
///     pub role: Option<super::enums::Role>,
/// }
///
/// impl CreateUserInput {
///     pub fn to_variables(&self) -> Map<String, Value> {
///         let mut variables = Map::new();
///         variables.insert(String::from("name"), to_value(&self.name).unwrap_or_default());
///         if let Some(value) = &self.role {
///             variables.insert(String::from("role"), Value::from(value.as_str()));
///         }
///         variables
///     }
/// }
/// ```
pub fn generate_input_struct(name: &str, fields: &[FieldDef], model: &SchemaModel) -> TokenStream {
    let struct_name = ident(&type_name(name));
    let doc = format!(" The `{name}` input type.");

    let mut names = UniqueNames::default();
    let mut members = Vec::new();
    let mut inserts = Vec::new();

    for field in distinct_by(fields, |f| f.name.as_str()) {
        let rust_name = names.claim(field_name(&field.name));
        let member = ident(&rust_name);
        let ty = rust_type(&field.ty, model, TypePosition::InputField);
        let sdl_name = &field.name;
        let conversion = Conversion::for_class(model.resolve(&field.ty).class);

        let rename = (rust_name != field.name).then(|| quote! { #[serde(rename = #sdl_name)] });
        let skip = field
            .ty
            .nullable
            .then(|| quote! { #[serde(skip_serializing_if = "::std::option::Option::is_none")] });

        members.push(quote! {
            #rename
            #skip
            pub #member: #ty,
        });

        inserts.push(if field.ty.nullable {
            let value = value_expr(conversion, &field.ty, quote! { value });
            quote! {
                if let ::std::option::Option::Some(value) = &self.#member {
                    variables.insert(::std::string::String::from(#sdl_name), #value);
                }
            }
        } else {
            let value = value_expr(conversion, &field.ty, quote! { self.#member });
            quote! {
                variables.insert(::std::string::String::from(#sdl_name), #value);
            }
        });
    }

    let body = if inserts.is_empty() {
        quote! { ::serde_json::Map::new() }
    } else {
        quote! {
            let mut variables = ::serde_json::Map::new();
            #(#inserts)*
            variables
        }
    };

    let default = has_finite_default(name, model).then(|| quote! { Default, });

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, PartialEq, #default ::serde::Serialize, ::serde::Deserialize)]
        pub struct #struct_name {
            #(#members)*
        }

        impl #struct_name {
            /// Flattens the input into a variables map keyed by schema field name.
            ///
            /// Enum fields become their raw schema value, nested inputs are
            /// flattened recursively and unset optional fields are omitted.
            pub fn to_variables(&self) -> ::serde_json::Map<::std::string::String, ::serde_json::Value> {
                #body
            }
        }
    }
}

/// Returns `true` if following required, non-list input fields from `name`
/// never loops back, so a default value exists.
///
/// `input A { a: A! }` has no finite default: `A::default()` would recurse.
fn has_finite_default(name: &str, model: &SchemaModel) -> bool {
    fn visit<'a>(name: &'a str, model: &'a SchemaModel, path: &mut Vec<&'a str>) -> bool {
        if path.contains(&name) {
            return false;
        }
        let Some(input) = model.input_type(name) else {
            return true;
        };

        path.push(name);
        let finite = input
            .fields
            .iter()
            .filter(|f| !f.ty.nullable && !f.ty.is_list)
            .filter(|f| model.resolve(&f.ty).class == TypeClass::Input)
            .all(|f| visit(&f.ty.base, model, path));
        path.pop();
        finite
    }

    visit(name, model, &mut Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::output::{format_code, validate_code};
    use crate::test_utils::sample_model;

    fn render(schema: &str) -> String {
        let model = analyze(schema).unwrap();
        format_code(&validate_code(&generate_inputs_module(&model)).unwrap())
    }

    #[test]
    fn sample_input_is_valid_rust() {
        let code = format_code(&validate_code(&generate_inputs_module(&sample_model())).unwrap());

        assert!(code.contains("pub struct CreateUserInput {"));
        assert!(code.contains("pub name: ::std::string::String,"));
        assert!(code.contains("pub role: ::std::option::Option<super::enums::Role>,"));
        assert!(code.contains("#[serde(skip_serializing_if = \"::std::option::Option::is_none\")]"));
        assert!(code.contains("::serde_json::Value::from(value.as_str())"));
    }

    #[test]
    fn nested_inputs_flatten_recursively() {
        let code = render("input Range { from: Int to: Int } input Filter { range: Range! ranges: [Range] }");
        assert!(code.contains("pub range: ::std::boxed::Box<super::inputs::Range>,"));
        assert!(code.contains("::serde_json::Value::Object(self.range.to_variables())"));
        assert!(code.contains("::serde_json::Value::Object(item.to_variables())"));
    }

    #[test]
    fn renamed_fields_keep_schema_keys() {
        let code = render("input Page { perPage: Int }");
        assert!(code.contains("#[serde(rename = \"perPage\")]"));
        assert!(code.contains("pub per_page: ::std::option::Option<i64>,"));
        assert!(code.contains("::std::string::String::from(\"perPage\")"));
    }

    #[test]
    fn required_self_reference_does_not_derive_default() {
        let code = render("input Node { next: Node! label: String }");
        assert!(code.contains("pub next: ::std::boxed::Box<super::inputs::Node>,"));
        assert!(code.contains("PartialEq"));
        assert!(!code.contains("Default"));
    }

    #[test]
    fn required_cycles_through_other_inputs_do_not_derive_default() {
        let model = analyze("input A { b: B! } input B { a: A! } input C { a: A! } input D { d: D }").unwrap();
        assert!(!has_finite_default("A", &model));
        assert!(!has_finite_default("B", &model));
        assert!(!has_finite_default("C", &model));
        assert!(has_finite_default("D", &model));
    }

    #[test]
    fn optional_and_list_recursion_keeps_default() {
        let code = render("input Tree { parent: Tree children: [Tree!]! }");
        assert!(code.contains("PartialEq, Default"));
    }

    #[test]
    fn empty_input_returns_empty_map() {
        let code = render("input Nothing { }");
        assert!(code.contains("pub struct Nothing {}"));
        assert!(!code.contains("let mut variables"));
    }
}
