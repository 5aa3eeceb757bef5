//! Order-creation payload assembled from a finished draft.

use std::path::Path;

use serde::Serialize;

use crate::error::{MarketError, Result};

/// A design file selected on the design screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl DesignFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk, guessing its content type from the extension.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| MarketError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "design".to_string());
        let content_type = guess_content_type(&file_name);
        Ok(Self::new(file_name, content_type, bytes))
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Multipart body for the order-creation endpoint.
///
/// Text fields keep their declared order. At most one file is attached as
/// `image_path`; `dropped_files` counts the design files left behind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPayload {
    pub fields: Vec<(String, String)>,
    #[serde(skip)]
    pub image: Option<DesignFile>,
    pub dropped_files: usize,
}

impl SubmissionPayload {
    /// Multipart field name of the attachment.
    pub const IMAGE_FIELD: &'static str = "image_path";

    /// Value of a text field, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
