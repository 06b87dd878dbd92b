//! Scraped articles and distilled topics.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A source article scraped from a news feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Article {
    /// Article headline
    pub title: String,
    /// Canonical URL
    pub url: String,
    /// Publishing outlet
    pub source: String,
    /// Publication timestamp
    pub published_at: DateTime<Utc>,
    /// Article body, when the feed carries it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// A video-worthy topic distilled from one or more articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Topic {
    /// Short topic headline
    pub headline: String,
    /// The angle the video should take on the topic
    pub angle: String,
    /// Articles backing the topic
    #[serde(default)]
    pub source_urls: Vec<String>,
}
