//! Runtime support for generated GraphQL clients.
//!
//! Code produced by `graphgen-gen` implements [`Operation`] for every query
//! and mutation in a schema. This crate executes those operations:
//!
//! - [`GraphQLClient`] - Async HTTP client posting operations as JSON
//! - [`UploadFile`] - A file sent with the GraphQL multipart request protocol
//! - [`ClientError`] - Transport, HTTP, GraphQL and decoding failures
//! - [`selection`] - Custom selection sets for `with_selection()`
//!
//! ## Examples
//!
//! ```rust,ignore
//! use graphgen::GraphQLClient;
//! use my_app::graphql::queries::UserQuery;
//!
//! let client = GraphQLClient::builder("https://api.example.com/graphql")
//!     .bearer_token("secret")
//!     .build()?;
//!
//! if let Some(user) = client.execute(&UserQuery::new("42".into())).await? {
//!     println!("{}", user.email);
//! }
//! ```

pub mod client;
pub mod error;
pub mod multipart;
pub mod operation;
pub mod response;
pub mod selection;
pub mod upload;

pub use client::{GraphQLClient, GraphQLClientBuilder};
pub use error::{ClientError, GraphQLError, GraphQLErrors};
pub use operation::{Operation, OperationKind};
pub use response::GraphQLResponse;
pub use selection::Field;
pub use upload::UploadFile;
