//! HTTP news feed scraper.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use rcast_models::Article;
use rcast_pipeline::{CollaboratorError, CollaboratorResult, NewsSource};

use crate::error::{CollabError, CollabResult};

/// Scrapes a JSON news feed over HTTP.
pub struct HttpNewsSource {
    client: Client,
    feed_url: String,
}

/// One item of the upstream feed.
#[derive(Debug, Deserialize)]
struct FeedItem {
    title: String,
    url: String,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    body: Option<String>,
}

impl HttpNewsSource {
    /// Create a source for the given feed URL.
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            feed_url: feed_url.into(),
        }
    }

    /// Create from the `NEWS_FEED_URL` environment variable.
    pub fn from_env() -> CollabResult<Self> {
        let feed_url =
            std::env::var("NEWS_FEED_URL").map_err(|_| CollabError::MissingConfig("NEWS_FEED_URL"))?;
        Ok(Self::new(feed_url))
    }

    async fn fetch(&self) -> CollabResult<Vec<Article>> {
        let items: Vec<FeedItem> = self
            .client
            .get(&self.feed_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        info!("Fetched {} feed items from {}", items.len(), self.feed_url);

        let articles = items
            .into_iter()
            .map(|item| Article {
                title: item.title,
                url: item.url,
                source: item.source.unwrap_or_else(|| "unknown".to_string()),
                published_at: item.published_at.unwrap_or_else(Utc::now),
                body: item.body,
            })
            .collect();

        Ok(articles)
    }
}

#[async_trait]
impl NewsSource for HttpNewsSource {
    async fn scrape(&self) -> CollaboratorResult<Vec<Article>> {
        self.fetch().await.map_err(CollaboratorError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_scrape_parses_feed_items() {
        let server = MockServer::start().await;
        let feed = serde_json::json!([
            {
                "title": "ETH staking yields rise",
                "url": "https://news.example/eth",
                "source": "Example Wire",
                "published_at": "2024-01-15T12:00:00Z"
            },
            {
                "title": "Untagged item",
                "url": "https://news.example/other"
            }
        ]);
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(feed))
            .mount(&server)
            .await;

        let source = HttpNewsSource::new(format!("{}/feed", server.uri()));
        let articles = source.scrape().await.unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "ETH staking yields rise");
        assert_eq!(articles[0].source, "Example Wire");
        assert_eq!(articles[1].source, "unknown");
    }

    #[tokio::test]
    async fn test_scrape_maps_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let source = HttpNewsSource::new(format!("{}/feed", server.uri()));
        let err = source.scrape().await.unwrap_err();
        assert!(!err.message().is_empty());
    }
}
