use crate::prelude::{ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Image bytes submitted to the analysis service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_for(&file_name);
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    pub async fn load(path: impl AsRef<Path>) -> ServiceResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| ServiceError::ImageRead {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Body of a feedback message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub to: String,
    pub name: String,
    pub message: String,
}

/// Successful body returned by the analysis endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResponse {
    Json(serde_json::Value),
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn mime_from_extension() {
        assert_eq!(ImagePayload::new("cat.PNG", vec![]).mime, "image/png");
        assert_eq!(ImagePayload::new("a.b.jpeg", vec![]).mime, "image/jpeg");
        assert_eq!(ImagePayload::new("scan.webp", vec![]).mime, "image/webp");
        assert_eq!(ImagePayload::new("noext", vec![]).mime, "application/octet-stream");
    }

    #[tokio::test]
    async fn load_reads_file_and_name() {
        let mut temp = Builder::new().suffix(".bmp").tempfile().unwrap();
        temp.write_all(b"BM\x00\x01").unwrap();
        let payload = ImagePayload::load(temp.path()).await.unwrap();
        assert_eq!(payload.bytes, b"BM\x00\x01");
        assert_eq!(payload.mime, "image/bmp");
        assert!(payload.file_name.ends_with(".bmp"));
    }

    #[tokio::test]
    async fn load_missing_file_is_image_error() {
        let err = ImagePayload::load("/definitely/not/here.png").await.unwrap_err();
        assert!(matches!(err, ServiceError::ImageRead { .. }));
        assert!(err.to_string().contains("/definitely/not/here.png"));
    }
}
