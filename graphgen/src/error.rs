//! Error types for executing operations.
//!
//! - [`ClientError`] - Everything that can go wrong with a request
//! - [`GraphQLErrors`] - The `errors` list of a GraphQL response

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One entry of a GraphQL response's `errors` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<ErrorLocation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

/// A position in the request document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
    pub line: u32,
    pub column: u32,
}

/// The errors reported by a GraphQL server for one request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphQLErrors {
    pub errors: Vec<GraphQLError>,
    /// The response's top-level `extensions`, if any.
    pub extensions: Option<Value>,
}

impl GraphQLErrors {
    /// The message of the first error.
    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }
}

impl fmt::Display for GraphQLErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first_message(), self.errors.len()) {
            (None, _) => f.write_str("unknown GraphQL error"),
            (Some(message), 1) => f.write_str(message),
            (Some(message), n) => write!(f, "{message} (and {} more)", n - 1),
        }
    }
}

/// Errors from executing an operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP request could not be built or sent.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response carried GraphQL errors.
    #[error("GraphQL error: {0}")]
    GraphQL(GraphQLErrors),

    /// The response body or its data could not be decoded.
    #[error("Invalid response JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An upload file could not be read.
    #[error("Upload file '{path}' could not be read: {source}")]
    Upload {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A configured header name or value is invalid.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl ClientError {
    /// The HTTP status code behind this error, if there was a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if sending the same request again may succeed.
    ///
    /// Timeouts, connection failures, `429 Too Many Requests` and server
    /// errors are retryable; GraphQL and decoding errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::HttpStatus { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(message: &str) -> GraphQLError {
        GraphQLError {
            message: message.to_string(),
            locations: vec![],
            path: vec![],
            extensions: None,
        }
    }

    #[test]
    fn graphql_errors_display() {
        let one = GraphQLErrors {
            errors: vec![error("Not found")],
            extensions: None,
        };
        assert_eq!(one.to_string(), "Not found");

        let many = GraphQLErrors {
            errors: vec![error("Not found"), error("Denied"), error("Oops")],
            extensions: None,
        };
        assert_eq!(many.first_message(), Some("Not found"));
        assert_eq!(many.to_string(), "Not found (and 2 more)");
        assert_eq!(GraphQLErrors::default().to_string(), "unknown GraphQL error");
    }

    #[test]
    fn graphql_error_deserializes_locations_and_path() {
        let parsed: GraphQLError = serde_json::from_value(serde_json::json!({
            "message": "Name for character with ID 1002 could not be fetched.",
            "locations": [{ "line": 6, "column": 7 }],
            "path": ["hero", "heroFriends", 1, "name"]
        }))
        .unwrap();
        assert_eq!(parsed.locations, vec![ErrorLocation { line: 6, column: 7 }]);
        assert_eq!(parsed.path.len(), 4);
        assert!(parsed.extensions.is_none());
    }

    #[test]
    fn status_errors_classify() {
        let unavailable = ClientError::HttpStatus {
            status: 503,
            body: String::new(),
        };
        assert_eq!(unavailable.status_code(), Some(503));
        assert!(unavailable.is_retryable());

        let limited = ClientError::HttpStatus {
            status: 429,
            body: String::new(),
        };
        assert!(limited.is_retryable());

        let bad = ClientError::HttpStatus {
            status: 400,
            body: "bad request".to_string(),
        };
        assert!(!bad.is_retryable());
        assert_eq!(bad.to_string(), "HTTP 400: bad request");
    }

    #[test]
    fn graphql_errors_are_not_retryable() {
        let err = ClientError::GraphQL(GraphQLErrors {
            errors: vec![error("Denied")],
            extensions: None,
        });
        assert!(!err.is_retryable());
        assert_eq!(err.status_code(), None);
        assert_eq!(err.to_string(), "GraphQL error: Denied");
    }
}
