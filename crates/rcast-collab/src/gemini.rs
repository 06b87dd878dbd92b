//! Gemini client for topic distillation and script writing.
//!
//! Both LLM stages share one client: the model is asked for JSON output and
//! the reply is deserialized straight into the pipeline's model types. On a
//! model failure the client falls back through cheaper variants before
//! giving up.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use rcast_models::{Article, Script, Topic};
use rcast_pipeline::{CollaboratorError, CollaboratorResult, ScriptWriter, TopicDistiller};

use crate::error::{CollabError, CollabResult};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Models tried in order until one answers.
const MODELS: [&str; 3] = ["gemini-2.5-flash", "gemini-2.5-flash-lite", "gemini-2.5-pro"];

/// Gemini API client.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    client: Client,
}

/// Gemini API request.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

/// Gemini API response.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

impl GeminiClient {
    /// Create a client from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> CollabResult<Self> {
        let api_key =
            std::env::var("GEMINI_API_KEY").map_err(|_| CollabError::MissingConfig("GEMINI_API_KEY"))?;
        Ok(Self::new(api_key))
    }

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Point the client at a different API root. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Distill video-worthy topics from scraped articles.
    pub async fn distill_topics(&self, articles: &[Article]) -> CollabResult<Vec<Topic>> {
        let prompt = distill_prompt(articles);
        let text = self.generate(&prompt).await?;
        parse_topics(&text)
    }

    /// Write a short-form video script for the distilled topics.
    pub async fn write_script(&self, topics: &[Topic]) -> CollabResult<Script> {
        let prompt = script_prompt(topics);
        let text = self.generate(&prompt).await?;
        parse_script(&text)
    }

    /// Call the API, falling back through the model list on failure.
    async fn generate(&self, prompt: &str) -> CollabResult<String> {
        let mut last_error = None;

        for model in &MODELS {
            match self.call_model(model, prompt).await {
                Ok(text) => {
                    info!("Gemini model {} answered", model);
                    return Ok(text);
                }
                Err(e) => {
                    warn!("Gemini model {} failed: {}", model, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CollabError::unexpected("no Gemini model configured")))
    }

    async fn call_model(&self, model: &str, prompt: &str) -> CollabResult<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let response: GeminiResponse = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| CollabError::unexpected("Gemini response carried no candidates"))
    }
}

fn distill_prompt(articles: &[Article]) -> String {
    let mut prompt = String::from(
        "You are a crypto news editor for a short-form video channel. \
         From the articles below, pick the most video-worthy topics. \
         Respond with a JSON array of objects with fields \
         \"headline\", \"angle\", and \"source_urls\".\n\nArticles:\n",
    );
    for article in articles {
        prompt.push_str(&format!("- {} ({})\n", article.title, article.url));
    }
    prompt
}

fn script_prompt(topics: &[Topic]) -> String {
    let mut prompt = String::from(
        "Write a 60 second short-form video script covering the topics below. \
         Respond with a single JSON object with fields \"title\", \
         \"description\", \"tags\" (array of strings), and \"body\" \
         (the narration).\n\nTopics:\n",
    );
    for topic in topics {
        prompt.push_str(&format!("- {}: {}\n", topic.headline, topic.angle));
    }
    prompt
}

fn parse_topics(text: &str) -> CollabResult<Vec<Topic>> {
    serde_json::from_str(text)
        .map_err(|e| CollabError::unexpected(format!("bad topics payload: {}", e)))
}

fn parse_script(text: &str) -> CollabResult<Script> {
    serde_json::from_str(text)
        .map_err(|e| CollabError::unexpected(format!("bad script payload: {}", e)))
}

#[async_trait]
impl TopicDistiller for GeminiClient {
    async fn distill(&self, articles: &[Article]) -> CollaboratorResult<Vec<Topic>> {
        self.distill_topics(articles)
            .await
            .map_err(CollaboratorError::from)
    }
}

#[async_trait]
impl ScriptWriter for GeminiClient {
    async fn write_script(&self, topics: &[Topic]) -> CollaboratorResult<Script> {
        GeminiClient::write_script(self, topics)
            .await
            .map_err(CollaboratorError::from)
    }
}
