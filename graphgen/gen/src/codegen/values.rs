//! Conversion of generated fields into request variable values.
//!
//! Both input types (`to_variables`) and operations (`variables`) turn their
//! fields into `serde_json::Value`s. Enums are sent as their raw schema value,
//! input objects as the map of their own fields, everything else through
//! `serde_json::to_value`.

use graphgen_define::{TypeClass, TypeReference};
use proc_macro2::TokenStream;
use quote::quote;

use crate::operation::VariableStrategy;

/// How one value is turned into JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Serialize,
    EnumValue,
    Flatten,
}

impl Conversion {
    /// The conversion for an input field of the given class.
    pub fn for_class(class: TypeClass) -> Self {
        match class {
            TypeClass::Enum => Self::EnumValue,
            TypeClass::Input => Self::Flatten,
            TypeClass::Scalar(_) | TypeClass::Object | TypeClass::Unknown => Self::Serialize,
        }
    }
}

impl From<&VariableStrategy> for Conversion {
    fn from(strategy: &VariableStrategy) -> Self {
        match strategy {
            VariableStrategy::PassThrough => Self::Serialize,
            VariableStrategy::EnumValue => Self::EnumValue,
            VariableStrategy::FlattenInput { .. } => Self::Flatten,
        }
    }
}

/// An expression converting `value` into a `serde_json::Value`.
///
/// `value` must be a place expression (`self.role`) or a reference binding
/// (`value`); it is used both as a method receiver and behind `&`.
pub fn value_expr(conversion: Conversion, reference: &TypeReference, value: TokenStream) -> TokenStream {
    match (conversion, reference.is_list) {
        (Conversion::Serialize, _) => quote! {
            ::serde_json::to_value(&#value).unwrap_or_default()
        },
        (Conversion::EnumValue, false) => quote! {
            ::serde_json::Value::from(#value.as_str())
        },
        (Conversion::EnumValue, true) => quote! {
            ::serde_json::Value::Array(
                #value.iter().map(|item| ::serde_json::Value::from(item.as_str())).collect(),
            )
        },
        (Conversion::Flatten, false) => quote! {
            ::serde_json::Value::Object(#value.to_variables())
        },
        (Conversion::Flatten, true) => quote! {
            ::serde_json::Value::Array(
                #value
                    .iter()
                    .map(|item| ::serde_json::Value::Object(item.to_variables()))
                    .collect(),
            )
        },
    }
}
