//! Mapping schema types to Rust types.
//!
//! Generated modules sit side by side (`types`, `inputs`, `enums`, ...) so
//! references to schema-defined types go through `super::<module>::Name`.
//! Standard library types are written fully qualified: a schema is free to
//! define a type called `String` or `Option`.

use graphgen_define::{ScalarKind, SchemaModel, TypeClass, TypeMapping, TypeReference};
use proc_macro2::TokenStream;
use quote::quote;

use crate::naming::{ident, type_name};
use crate::operation::ResolvedKind;

/// Where a type reference appears, which decides boxing and optionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePosition {
    /// A field of an output object type.
    ObjectField,
    /// A field of an input object type.
    InputField,
    /// An operation argument.
    Argument,
}

/// The Rust type for a scalar.
pub fn scalar_type(kind: ScalarKind) -> TokenStream {
    match kind {
        ScalarKind::Text => quote! { ::std::string::String },
        ScalarKind::Integer => quote! { i64 },
        ScalarKind::Float => quote! { f64 },
        ScalarKind::Boolean => quote! { bool },
        ScalarKind::Dynamic => quote! { ::serde_json::Value },
    }
}

/// The Rust type for a single, non-list value of `base`.
pub fn element_type(class: TypeClass, base: &str) -> TokenStream {
    let name = || ident(&type_name(base));
    match class {
        TypeClass::Scalar(kind) => scalar_type(kind),
        TypeClass::Enum => {
            let name = name();
            quote! { super::enums::#name }
        }
        TypeClass::Object => {
            let name = name();
            quote! { super::types::#name }
        }
        TypeClass::Input => {
            let name = name();
            quote! { super::inputs::#name }
        }
        TypeClass::Unknown => quote! { ::serde_json::Value },
    }
}

/// The full Rust type for a reference in the given position.
///
/// - Lists become `Vec<T>`; the element's own nullability is not tracked.
/// - Nullable references become `Option<T>`.
/// - Non-list object fields are always `Option<Box<T>>`: object types may be
///   recursive and a truncated selection leaves them out of the response.
/// - Non-list nested inputs are boxed.
///
/// ## Examples
///
/// ```
/// use graphgen_define::{SchemaModel, TypeReference};
/// use graphgen_gen::codegen::rust_type::{TypePosition, rust_type};
///
/// let model = SchemaModel::default();
/// let ty = rust_type(&TypeReference::parse("[Int!]!"), &model, TypePosition::Argument);
/// assert_eq!(ty.to_string().replace(' ', ""), "::std::vec::Vec<i64>");
/// ```
pub fn rust_type(reference: &TypeReference, model: &SchemaModel, position: TypePosition) -> TokenStream {
    let mapping = model.resolve(reference);
    wrap(&mapping, element_type(mapping.class, &mapping.base), position)
}

fn wrap(mapping: &TypeMapping, element: TokenStream, position: TypePosition) -> TokenStream {
    if mapping.is_list {
        let list = quote! { ::std::vec::Vec<#element> };
        return optional(list, mapping.nullable);
    }

    match (position, mapping.class) {
        (TypePosition::ObjectField, TypeClass::Object) => {
            quote! { ::std::option::Option<::std::boxed::Box<#element>> }
        }
        (TypePosition::InputField, TypeClass::Input) => {
            optional(quote! { ::std::boxed::Box<#element> }, mapping.nullable)
        }
        _ => optional(element, mapping.nullable),
    }
}

fn optional(ty: TokenStream, nullable: bool) -> TokenStream {
    if nullable {
        quote! { ::std::option::Option<#ty> }
    } else {
        ty
    }
}

/// Returns `true` if the field is stored in an `Option`.
pub fn is_optional(reference: &TypeReference, model: &SchemaModel, position: TypePosition) -> bool {
    if reference.nullable {
        return true;
    }
    position == TypePosition::ObjectField
        && !reference.is_list
        && model.resolve(reference).class == TypeClass::Object
}

/// The Rust type an operation's response decodes into.
pub fn response_type(resolved: &ResolvedKind) -> TokenStream {
    match resolved {
        ResolvedKind::Scalar(kind) => scalar_type(*kind),
        ResolvedKind::List(inner) => {
            let inner = response_type(inner);
            quote! { ::std::vec::Vec<#inner> }
        }
        ResolvedKind::EnumRef(name) => {
            let name = ident(&type_name(name));
            quote! { super::enums::#name }
        }
        ResolvedKind::TypeRef(name) => {
            let name = ident(&type_name(name));
            quote! { super::types::#name }
        }
        ResolvedKind::Opaque => quote! { ::serde_json::Value },
    }
}
