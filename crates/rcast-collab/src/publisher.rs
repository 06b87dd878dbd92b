//! Platform publisher: multipart upload of the approved artifacts.

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use rcast_models::{PublishReceipt, Script};
use rcast_pipeline::{CollaboratorError, CollaboratorResult, Publisher};

use crate::error::{CollabError, CollabResult};

/// Uploads video, thumbnail, and metadata to the platform's upload endpoint.
pub struct PlatformPublisher {
    client: Client,
    upload_url: String,
    api_token: String,
}

/// Upload endpoint response.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    video_id: String,
    url: String,
}

impl PlatformPublisher {
    pub fn new(upload_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            upload_url: upload_url.into(),
            api_token: api_token.into(),
        }
    }

    /// Create from `PLATFORM_UPLOAD_URL` and `PLATFORM_API_TOKEN`.
    pub fn from_env() -> CollabResult<Self> {
        let upload_url = std::env::var("PLATFORM_UPLOAD_URL")
            .map_err(|_| CollabError::MissingConfig("PLATFORM_UPLOAD_URL"))?;
        let api_token = std::env::var("PLATFORM_API_TOKEN")
            .map_err(|_| CollabError::MissingConfig("PLATFORM_API_TOKEN"))?;
        Ok(Self::new(upload_url, api_token))
    }

    async fn upload(
        &self,
        video_path: &Path,
        thumbnail_path: &Path,
        script: &Script,
    ) -> CollabResult<PublishReceipt> {
        let video_bytes = tokio::fs::read(video_path).await?;
        let thumbnail_bytes = tokio::fs::read(thumbnail_path).await?;

        let metadata = serde_json::json!({
            "title": script.title,
            "description": script.description,
            "tags": script.tags,
        });

        let form = Form::new()
            .part(
                "video",
                Part::bytes(video_bytes)
                    .file_name(file_name_of(video_path))
                    .mime_str("video/mp4")?,
            )
            .part(
                "thumbnail",
                Part::bytes(thumbnail_bytes)
                    .file_name(file_name_of(thumbnail_path))
                    .mime_str("image/png")?,
            )
            .text("metadata", metadata.to_string());

        let response: UploadResponse = self
            .client
            .post(&self.upload_url)
            .bearer_auth(&self.api_token)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        info!(
            "Published '{}' as {} at {}",
            script.title, response.video_id, response.url
        );

        Ok(PublishReceipt {
            video_id: response.video_id,
            video_url: response.url,
        })
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string())
}

#[async_trait]
impl Publisher for PlatformPublisher {
    async fn publish(
        &self,
        video_path: &Path,
        thumbnail_path: &Path,
        script: &Script,
    ) -> CollaboratorResult<PublishReceipt> {
        self.upload(video_path, thumbnail_path, script)
            .await
            .map_err(CollaboratorError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn script() -> Script {
        Script {
            title: "Why Ethereum Staking Matters".to_string(),
            description: "desc".to_string(),
            tags: vec!["eth".to_string()],
            body: "body".to_string(),
        }
    }

    #[tokio::test]
    async fn test_publish_uploads_and_parses_receipt() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "video_id": "abc123",
            "url": "https://platform.example/watch?v=abc123"
        });
        Mock::given(method("POST"))
            .and(path("/upload"))
            .and(header("authorization", "Bearer token-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("v1.mp4");
        let thumbnail = dir.path().join("t1.png");
        std::fs::File::create(&video)
            .unwrap()
            .write_all(b"mp4")
            .unwrap();
        std::fs::File::create(&thumbnail)
            .unwrap()
            .write_all(b"png")
            .unwrap();

        let publisher = PlatformPublisher::new(format!("{}/upload", server.uri()), "token-1");
        let receipt = publisher
            .publish(&video, &thumbnail, &script())
            .await
            .unwrap();

        assert_eq!(receipt.video_id, "abc123");
        assert_eq!(receipt.video_url, "https://platform.example/watch?v=abc123");
    }

    #[tokio::test]
    async fn test_publish_missing_file_fails() {
        let publisher = PlatformPublisher::new("http://localhost:9/upload", "token-1");
        let err = publisher
            .publish(
                Path::new("/nonexistent/v.mp4"),
                Path::new("/nonexistent/t.png"),
                &script(),
            )
            .await
            .unwrap_err();
        assert!(!err.message().is_empty());
    }
}
