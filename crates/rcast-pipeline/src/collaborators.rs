//! Collaborator contracts consumed by the pipeline.
//!
//! Each trait wraps one opaque external operation. The core awaits them,
//! never retries them, and collapses their failures into the job record.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use rcast_models::{Article, PublishReceipt, Script, Topic};

use crate::error::CollaboratorResult;

/// Scrapes source articles from the configured news feeds.
#[automock]
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn scrape(&self) -> CollaboratorResult<Vec<Article>>;
}

/// Distills video-worthy topics from scraped articles.
#[automock]
#[async_trait]
pub trait TopicDistiller: Send + Sync {
    async fn distill(&self, articles: &[Article]) -> CollaboratorResult<Vec<Topic>>;
}

/// Writes a short-form video script for the distilled topics.
#[automock]
#[async_trait]
pub trait ScriptWriter: Send + Sync {
    async fn write_script(&self, topics: &[Topic]) -> CollaboratorResult<Script>;
}

/// Renders the video and thumbnail for a script, returning filesystem paths.
#[automock]
#[async_trait]
pub trait VideoRenderer: Send + Sync {
    async fn render_video(&self, script: &Script) -> CollaboratorResult<PathBuf>;
    async fn render_thumbnail(&self, script: &Script) -> CollaboratorResult<PathBuf>;
}

/// Uploads the approved artifacts to the video platform.
#[automock]
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(
        &self,
        video_path: &Path,
        thumbnail_path: &Path,
        script: &Script,
    ) -> CollaboratorResult<PublishReceipt>;
}

/// Bundle of collaborator implementations handed to the orchestration core.
#[derive(Clone)]
pub struct Collaborators {
    pub news: Arc<dyn NewsSource>,
    pub distiller: Arc<dyn TopicDistiller>,
    pub writer: Arc<dyn ScriptWriter>,
    pub renderer: Arc<dyn VideoRenderer>,
    pub publisher: Arc<dyn Publisher>,
}
