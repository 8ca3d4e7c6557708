//! The contract between generated operations and the client.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub use graphgen_define::OperationKind;

/// A GraphQL query or mutation ready to be sent.
///
/// Implemented by the structs in generated `queries.rs` and `mutations.rs`.
///
/// Generated documents declare arguments as `(id: ID!)`, without the `$`
/// sigil that conforming servers require in variable definitions. Operations
/// with arguments therefore only work against servers that accept this form;
/// operations without arguments are standard GraphQL.
///
/// ## Examples
///
/// ```
/// use graphgen::{Operation, OperationKind};
/// use serde_json::{Map, Value};
///
/// struct Ping;
///
/// impl Operation for Ping {
///     type Response = bool;
///     const KIND: OperationKind = OperationKind::Query;
///     const FIELD: &'static str = "ping";
///     const GRAPHQL_TYPE: &'static str = "Boolean!";
///     const DOCUMENT: &'static str = "query Ping { ping }";
///
///     fn variables(&self) -> Map<String, Value> {
///         Map::new()
///     }
/// }
///
/// assert_eq!(Ping.document(), "query Ping { ping }");
/// ```
pub trait Operation {
    /// What `data.<FIELD>` decodes into.
    type Response: DeserializeOwned;

    const KIND: OperationKind;
    /// The root field this operation selects, e.g. `createUser`.
    const FIELD: &'static str;
    /// The return type as written in the schema, e.g. `[User!]!`.
    const GRAPHQL_TYPE: &'static str;
    /// The compiled request document. See the trait docs on argument
    /// declarations.
    const DOCUMENT: &'static str;

    /// The document to send. Generated operations override this when a
    /// custom selection set was supplied.
    fn document(&self) -> String {
        Self::DOCUMENT.to_string()
    }

    /// The request variables, keyed by argument name.
    fn variables(&self) -> Map<String, Value>;
}
