use std::path::Path;

use crate::SubmitError;

/// File content ready to be sent as the `audio_file` multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Reads the whole file. Size and type are left to the server to validate.
    pub async fn load(path: &Path, file_name: &str) -> Result<Self, SubmitError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| SubmitError::File {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;
        Ok(Self::new(file_name, bytes))
    }
}
