//! Error types for the graphgen generator.

use thiserror::Error;

/// Errors that can occur during schema analysis and code generation.
///
/// Only the schema-level failures abort a run. Malformed fields, arguments
/// and definitions never surface here; they are dropped during analysis.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The schema path does not exist or is not a regular file
    #[error("Schema file not found: {0}")]
    SchemaNotFound(String),

    /// The schema file exists but could not be read
    #[error("Failed to read schema file '{path}': {source}")]
    SchemaRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Nothing remained after stripping comments, directives and whitespace
    #[error("Schema file is empty or contains no valid GraphQL definitions")]
    EmptySchema,

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl GeneratorError {
    /// Returns `true` for failures caused by the schema input itself.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::SchemaNotFound(_) | Self::SchemaRead { .. } | Self::EmptySchema
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_schema_message() {
        assert_eq!(
            GeneratorError::EmptySchema.to_string(),
            "Schema file is empty or contains no valid GraphQL definitions"
        );
    }

    #[test]
    fn write_error_names_path() {
        let err = GeneratorError::WriteError {
            path: "out/types.rs".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("out/types.rs"));
        assert!(msg.contains("denied"));
        assert!(!err.is_schema_error());
    }

    #[test]
    fn schema_errors_are_classified() {
        assert!(GeneratorError::SchemaNotFound("x.graphql".into()).is_schema_error());
        assert!(GeneratorError::EmptySchema.is_schema_error());
        assert!(!GeneratorError::ConfigError("bad".into()).is_schema_error());
    }
}
