//! Production collaborator implementations for the Reelcast pipeline.
//!
//! This crate provides:
//! - An HTTP news feed scraper
//! - A Gemini client for topic distillation and script writing
//! - An FFmpeg renderer for videos and thumbnails
//! - A multipart HTTP publisher for the video platform
//!
//! Each implementation maps its own error type into the pipeline's
//! `CollaboratorError` at the trait boundary.

pub mod error;
pub mod gemini;
pub mod news;
pub mod publisher;
pub mod renderer;

pub use error::{CollabError, CollabResult};
pub use gemini::GeminiClient;
pub use news::HttpNewsSource;
pub use publisher::PlatformPublisher;
pub use renderer::FfmpegRenderer;

use std::sync::Arc;

use rcast_pipeline::Collaborators;

/// Build the full production collaborator bundle from the environment.
pub fn collaborators_from_env() -> CollabResult<Collaborators> {
    let gemini = Arc::new(GeminiClient::from_env()?);
    Ok(Collaborators {
        news: Arc::new(HttpNewsSource::from_env()?),
        distiller: gemini.clone(),
        writer: gemini,
        renderer: Arc::new(FfmpegRenderer::from_env()?),
        publisher: Arc::new(PlatformPublisher::from_env()?),
    })
}
