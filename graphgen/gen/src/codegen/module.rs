//! Generation of the `mod.rs` that ties the generated files together.

use proc_macro2::TokenStream;
use quote::quote;

/// The generated file names, without extension, in declaration order.
pub const MODULE_FILES: &[&str] = &["enums", "inputs", "mutations", "queries", "types"];

/// Generates `mod.rs`.
pub fn generate_module_root() -> TokenStream {
    quote! {
        //! GraphQL client generated from a schema.
        //!
        //! ## Modules
        //!
        //! - `types` - Object types returned by operations
        //! - `inputs` - Input types accepted as arguments
        //! - `enums` - Schema enumerations
        //! - `queries` / `mutations` - One struct per operation
        //!
        //! ## Examples
        //!
        //! ```ignore
        //! let client = GraphQLClient::builder("https://api.example.com/graphql").build()?;
        //! let user = client.execute(&queries::UserQuery::new("42".into())).await?;
        //! ```

        pub mod enums;
        pub mod inputs;
        pub mod mutations;
        pub mod queries;
        pub mod types;

        pub use graphgen::{GraphQLClient, Operation};
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{format_code, validate_code};

    #[test]
    fn declares_every_module() {
        let code = format_code(&validate_code(&generate_module_root()).unwrap());
        for module in MODULE_FILES {
            assert!(code.contains(&format!("pub mod {module};")));
        }
        assert!(code.contains("pub use graphgen::{GraphQLClient, Operation};"));
    }
}
