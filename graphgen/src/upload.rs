//! Files attached to a multipart GraphQL request.

use std::path::{Path, PathBuf};

use reqwest::multipart::Part;

use crate::error::ClientError;

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// A local file sent as an `Upload` variable.
///
/// The filename defaults to the path's last component and the MIME type is
/// guessed from its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    path: PathBuf,
    filename: String,
    mime_type: String,
}

impl UploadFile {
    /// Creates an upload for the file at `path`.
    ///
    /// ## Errors
    ///
    /// Returns `ClientError::Upload` if the path is not an existing file.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let path = path.into();
        if !path.is_file() {
            return Err(ClientError::Upload {
                path: path.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            });
        }

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(&path)
            .first()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

        Ok(Self {
            path,
            filename,
            mime_type,
        })
    }

    /// Overrides the filename sent to the server.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Overrides the guessed MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Reads the file into a multipart part.
    pub(crate) async fn into_part(self) -> Result<Part, ClientError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| ClientError::Upload {
                path: self.path.display().to_string(),
                source,
            })?;

        Ok(Part::bytes(bytes)
            .file_name(self.filename)
            .mime_str(&self.mime_type)?)
    }
}
