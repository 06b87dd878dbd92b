//! Collaborator error types.

use thiserror::Error;

use rcast_pipeline::CollaboratorError;

pub type CollabResult<T> = Result<T, CollabError>;

#[derive(Debug, Error)]
pub enum CollabError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("FFmpeg failed: {0}")]
    Ffmpeg(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
}

impl CollabError {
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::UnexpectedResponse(msg.into())
    }
}

impl From<CollabError> for CollaboratorError {
    fn from(err: CollabError) -> Self {
        CollaboratorError::new(err.to_string())
    }
}
