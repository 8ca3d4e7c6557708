//! Enum generation.

use graphgen_define::{EnumType, SchemaModel};
use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::distinct_by;
use crate::naming::{UniqueNames, ident, type_name, variant_name};

/// Generates the `enums.rs` module.
///
/// An enum defined more than once is emitted once, with the values of its
/// last definition.
pub fn generate_enums_module(model: &SchemaModel) -> TokenStream {
    let enums: Vec<TokenStream> = distinct_by(&model.enums, |e| e.name.as_str())
        .into_iter()
        .filter_map(|e| model.enum_type(&e.name))
        .map(generate_enum)
        .collect();

    quote! {
        //! Enumerations defined by the schema.
        #![allow(non_camel_case_types)]

        #(#enums)*
    }
}

/// Generates one enum with its string conversions.
///
/// Variants serialize as the raw schema value, the first value is the
/// default, and parsing an unknown value fails instead of guessing.
///
/// ## Examples
///
/// For `enum Role { ADMIN IN_REVIEW }`:
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
/// pub enum Role {
///     #[default]
///     #[serde(rename = "ADMIN")]
///     Admin,
///     #[serde(rename = "IN_REVIEW")]
///     InReview,
/// }
///
/// assert_eq!(Role::InReview.as_str(), "IN_REVIEW");
/// assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
/// ```
pub fn generate_enum(enum_type: &EnumType) -> TokenStream {
    let enum_name = ident(&type_name(&enum_type.name));
    let doc = format!(" The `{}` enum.", enum_type.name);
    let unknown = format!("unknown {} value: {{}}", enum_type.name);

    let mut names = UniqueNames::default();
    let values: Vec<(&String, proc_macro2::Ident)> = distinct_by(&enum_type.values, |v| v.as_str())
        .into_iter()
        .map(|value| (value, ident(&names.claim(variant_name(value)))))
        .collect();

    let variants = values.iter().enumerate().map(|(index, (raw, variant))| {
        let default = (index == 0).then(|| quote! { #[default] });
        quote! {
            #default
            #[serde(rename = #raw)]
            #variant,
        }
    });
    let all = values.iter().map(|(_, variant)| quote! { Self::#variant });
    let as_str_arms = values.iter().map(|(raw, variant)| quote! { Self::#variant => #raw, });
    let parse_arms = values
        .iter()
        .map(|(raw, variant)| quote! { #raw => ::std::result::Result::Ok(Self::#variant), });

    quote! {
        #[doc = #doc]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Default,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        pub enum #enum_name {
            #(#variants)*
        }

        impl #enum_name {
            /// Every value, in schema order.
            pub const ALL: &'static [Self] = &[#(#all),*];

            /// The raw schema value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    #(#as_str_arms)*
                }
            }
        }

        impl ::std::fmt::Display for #enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for #enum_name {
            type Err = ::std::string::String;

            fn from_str(value: &str) -> ::std::result::Result<Self, Self::Err> {
                match value {
                    #(#parse_arms)*
                    other => ::std::result::Result::Err(::std::format!(#unknown, other)),
                }
            }
        }
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
        format_code(&validate_code(&generate_enums_module(&model)).unwrap())
    }

    #[test]
    fn sample_enum_is_valid_rust() {
        let code = format_code(&validate_code(&generate_enums_module(&sample_model())).unwrap());

        assert!(code.contains("pub enum Role {"));
        assert!(code.contains("#[default]"));
        assert!(code.contains("#[serde(rename = \"EDITOR\")]"));
        assert!(code.contains("Self::Viewer => \"VIEWER\","));
        assert!(code.contains("\"ADMIN\" => ::std::result::Result::Ok(Self::Admin),"));
        assert!(code.contains("unknown Role value: {}"));
    }

    #[test]
    fn first_value_is_default() {
        let code = render("enum Status { PENDING DONE }");
        let default_at = code.find("#[default]").unwrap();
        assert!(default_at < code.find("Pending,").unwrap());
        assert!(code.find("Pending,").unwrap() < code.find("Done,").unwrap());
    }

    #[test]
    fn duplicate_values_are_emitted_once() {
        let code = render("enum E { B A B }");
        assert_eq!(code.matches("#[serde(rename = \"B\")]").count(), 1);
        assert!(code.contains("pub const ALL: &'static [Self] = &[Self::B, Self::A];"));
    }

    #[test]
    fn awkward_values_become_valid_variants() {
        let code = render("enum Resolution { 1080P SELF in_progress IN_PROGRESS }");
        assert!(code.contains("_1080P,"));
        assert!(code.contains("Self_,"));
        assert!(code.contains("InProgress,"));
        assert!(code.contains("InProgress_2,"));
    }
}
