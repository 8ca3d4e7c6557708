//! Decoding GraphQL response bodies.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, GraphQLError, GraphQLErrors};

/// A GraphQL response body: `{"data": ..., "errors": [...], "extensions": ...}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
    #[serde(default)]
    pub extensions: Option<Value>,
}

impl GraphQLResponse {
    /// Extracts and decodes `data.<field>`.
    ///
    /// A non-empty `errors` list wins over any data. A missing or `null`
    /// field yields `Ok(None)`.
    ///
    /// ## Errors
    ///
    /// - `ClientError::GraphQL` if the response reports errors
    /// - `ClientError::Json` if the field does not decode into `T`
    ///
    /// ## Examples
    ///
    /// ```
    /// use graphgen::GraphQLResponse;
    ///
    /// let response: GraphQLResponse =
    ///     serde_json::from_str(r#"{"data": {"ping": true, "me": null}}"#).unwrap();
    /// assert_eq!(response.clone().into_field::<bool>("ping").unwrap(), Some(true));
    /// assert_eq!(response.into_field::<bool>("me").unwrap(), None);
    /// ```
    pub fn into_field<T: DeserializeOwned>(self, field: &str) -> Result<Option<T>, ClientError> {
        if let Some(errors) = self.errors
            && !errors.is_empty()
        {
            return Err(ClientError::GraphQL(GraphQLErrors {
                errors,
                extensions: self.extensions,
            }));
        }

        let value = match self.data {
            Some(Value::Object(mut data)) => data.remove(field),
            _ => None,
        };

        match value {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }
}
