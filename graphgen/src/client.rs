//! Async HTTP client for generated operations.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use tracing::{Span, debug, instrument, warn};

use crate::error::ClientError;
use crate::multipart::{build_form, request_body};
use crate::operation::Operation;
use crate::response::GraphQLResponse;
use crate::upload::UploadFile;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const JSON: &str = "application/json";

/// Builder for [`GraphQLClient`].
#[derive(Debug, Clone)]
pub struct GraphQLClientBuilder {
    endpoint: String,
    timeout: Duration,
    headers: HeaderMap,
    bearer_token: Option<String>,
}

impl GraphQLClientBuilder {
    fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            headers: HeaderMap::new(),
            bearer_token: None,
        }
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header sent with every request.
    ///
    /// ## Errors
    ///
    /// Returns `ClientError::InvalidHeader` if the name or value is not a
    /// valid HTTP header.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, ClientError> {
        let header_name = HeaderName::try_from(name)
            .map_err(|e| ClientError::InvalidHeader(format!("{name}: {e}")))?;
        let header_value = HeaderValue::try_from(value)
            .map_err(|e| ClientError::InvalidHeader(format!("{name}: {e}")))?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Authenticates every request with `Authorization: Bearer <token>`.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Builds the client.
    ///
    /// ## Errors
    ///
    /// - `ClientError::InvalidHeader` if the bearer token is not a valid header value
    /// - `ClientError::Request` if the HTTP client cannot be initialized
    pub fn build(mut self) -> Result<GraphQLClient, ClientError> {
        if let Some(token) = &self.bearer_token {
            let mut value = HeaderValue::try_from(format!("Bearer {token}"))
                .map_err(|e| ClientError::InvalidHeader(format!("authorization: {e}")))?;
            value.set_sensitive(true);
            self.headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.headers)
            .build()?;

        Ok(GraphQLClient {
            client,
            endpoint: self.endpoint,
        })
    }
}

/// Sends generated operations to a GraphQL endpoint.
///
/// ## Examples
///
/// ```rust,ignore
/// use std::time::Duration;
/// use graphgen::GraphQLClient;
///
/// let client = GraphQLClient::builder("https://api.example.com/graphql")
///     .timeout(Duration::from_secs(10))
///     .header("x-tenant", "acme")?
///     .build()?;
/// let me = client.execute(&MeQuery::new()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct GraphQLClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GraphQLClient {
    /// Creates a client with default settings.
    ///
    /// ## Errors
    ///
    /// Returns `ClientError::Request` if the HTTP client cannot be initialized.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder(endpoint).build()
    }

    pub fn builder(endpoint: impl Into<String>) -> GraphQLClientBuilder {
        GraphQLClientBuilder::new(endpoint)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Executes an operation and decodes `data.<FIELD>`.
    ///
    /// Returns `Ok(None)` when the server answers with a `null` or missing
    /// field.
    ///
    /// ## Errors
    ///
    /// - `ClientError::Request` on transport failures
    /// - `ClientError::HttpStatus` on non-2xx responses
    /// - `ClientError::GraphQL` if the response carries errors
    /// - `ClientError::Json` if the response cannot be decoded
    #[instrument(
        name = "graphql_request",
        skip(self, operation),
        fields(
            graphql.operation = O::FIELD,
            graphql.kind = %O::KIND,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn execute<O: Operation>(
        &self,
        operation: &O,
    ) -> Result<Option<O::Response>, ClientError> {
        let body = request_body(&operation.document(), operation.variables());
        debug!(endpoint = %self.endpoint, "Sending GraphQL request");

        let response = self
            .client
            .post(self.endpoint.as_str())
            .header(ACCEPT, JSON)
            .json(&body)
            .send()
            .await?;

        decode::<O>(response).await
    }

    /// Executes an operation whose variables include files, using the
    /// GraphQL multipart request protocol.
    ///
    /// Each upload is paired with the dotted variable path it fills, e.g.
    /// `"file"` or `"input.attachments.0"`.
    ///
    /// ## Errors
    ///
    /// As [`execute`](Self::execute), plus `ClientError::Upload` if a file
    /// cannot be read.
    #[instrument(
        name = "graphql_upload",
        skip(self, operation, uploads),
        fields(
            graphql.operation = O::FIELD,
            graphql.kind = %O::KIND,
            graphql.uploads = uploads.len(),
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn execute_with_uploads<O: Operation>(
        &self,
        operation: &O,
        uploads: Vec<(String, UploadFile)>,
    ) -> Result<Option<O::Response>, ClientError> {
        let form = build_form(&operation.document(), operation.variables(), uploads).await?;
        debug!(endpoint = %self.endpoint, "Sending GraphQL multipart request");

        let response = self
            .client
            .post(self.endpoint.as_str())
            .header(ACCEPT, JSON)
            .multipart(form)
            .send()
            .await?;

        decode::<O>(response).await
    }
}

async fn decode<O: Operation>(
    response: reqwest::Response,
) -> Result<Option<O::Response>, ClientError> {
    let status = response.status();
    let span = Span::current();
    span.record("http.status_code", status.as_u16());

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let otel_status = if status.is_server_error() { "ERROR" } else { "UNSET" };
        span.record("otel.status_code", otel_status);
        warn!(status = status.as_u16(), "GraphQL request failed");
        return Err(ClientError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    let payload: GraphQLResponse = serde_json::from_slice(&bytes)?;

    match payload.into_field::<O::Response>(O::FIELD) {
        Ok(data) => {
            span.record("otel.status_code", "OK");
            Ok(data)
        }
        Err(e) => {
            span.record("otel.status_code", "ERROR");
            Err(e)
        }
    }
}
