use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::AnalysisError;

/// What the user asked to have analyzed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnalysisRequest {
    /// A food photo as base64-encoded bytes (no `data:` prefix)
    Image { payload: String },
    /// A free-text description of a dish
    Text { prompt: String },
}

impl AnalysisRequest {
    /// Build a text request from user input, trimming surrounding whitespace
    pub fn text(prompt: &str) -> Result<Self, AnalysisError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "Dish description cannot be empty".to_string(),
            ));
        }
        Ok(AnalysisRequest::Text {
            prompt: prompt.to_string(),
        })
    }

    /// Build an image request from an already encoded payload
    pub fn image(payload: impl Into<String>) -> Result<Self, AnalysisError> {
        let request = AnalysisRequest::Image {
            payload: payload.into(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Short tag used in logs and wire payloads
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisRequest::Image { .. } => "image",
            AnalysisRequest::Text { .. } => "text",
        }
    }

    /// MIME type of an image payload, read from the decoded bytes' signature.
    ///
    /// Returns `None` for text requests and for payloads that are not a
    /// recognised image format.
    pub fn image_mime(&self) -> Option<&'static str> {
        let AnalysisRequest::Image { payload } = self else {
            return None;
        };
        let bytes = STANDARD.decode(payload.trim()).ok()?;
        sniff_image_mime(&bytes)
    }

    /// Re-check the request constraints, e.g. for a value deserialized from elsewhere
    pub fn validate(&self) -> Result<(), AnalysisError> {
        match self {
            AnalysisRequest::Text { prompt } => {
                if prompt.trim().is_empty() {
                    return Err(AnalysisError::InvalidInput(
                        "Dish description cannot be empty".to_string(),
                    ));
                }
            }
            AnalysisRequest::Image { payload } => {
                let bytes = STANDARD.decode(payload.trim()).map_err(|e| {
                    AnalysisError::InvalidInput(format!("Image payload is not valid base64: {}", e))
                })?;
                if bytes.is_empty() {
                    return Err(AnalysisError::InvalidInput(
                        "Image payload is empty".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// An image the user picked or dropped onto the upload area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        ImageFile {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, inferring its MIME type from the extension
    pub async fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = mime_from_extension(path).to_string();
        debug!("Loaded {} ({}, {} bytes)", name, mime, bytes.len());

        Ok(ImageFile { name, mime, bytes })
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Displayable data URL for the upload preview
    pub fn preview(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.to_base64())
    }
}

/// Identify common image formats by their leading magic bytes
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => Some("image/png"),
        [0xff, 0xd8, 0xff, ..] => Some("image/jpeg"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        [b'B', b'M', ..] => Some("image/bmp"),
        _ => None,
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
