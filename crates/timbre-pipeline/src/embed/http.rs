//! Embedding over HTTP.
//!
//! Speaks the OpenAI-compatible `/v1/embeddings` protocol served by most
//! self-hosted embedding servers. Single-vector `{"embedding": [...]}`
//! responses are accepted too.

use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::embed::Embedder;
use crate::error::{EmbedError, EmbedResult};

/// Retries after the first attempt for transient failures.
const MAX_RETRIES: usize = 3;

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmbeddingResponse {
    Batch { data: Vec<EmbeddingData> },
    Single { embedding: Vec<f32> },
}

/// Extract the query vector from a response body.
fn parse_response(body: &str) -> EmbedResult<Vec<f32>> {
    let response: EmbeddingResponse =
        serde_json::from_str(body).map_err(|e| EmbedError::Parse {
            message: e.to_string(),
        })?;

    let embedding = match response {
        EmbeddingResponse::Batch { data } => data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .unwrap_or_default(),
        EmbeddingResponse::Single { embedding } => embedding,
    };

    if embedding.is_empty() {
        return Err(EmbedError::Parse {
            message: "response contained no embedding".to_string(),
        });
    }
    Ok(embedding)
}

/// Client for an HTTP embedding service.
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    http: Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl HttpEmbedder {
    /// Create a client for the endpoint at `url` serving `model`.
    pub fn new(
        url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> EmbedResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("timbre/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            url: url.into(),
            model: model.into(),
            api_key: None,
        })
    }

    /// Create a client from the `embedder_*` configuration keys.
    pub fn from_config(config: &Config) -> EmbedResult<Self> {
        let embedder = Self::new(
            config.embedder_url.clone(),
            config.embedder_model.clone(),
            Duration::from_secs(config.embedder_timeout_secs),
        )?;
        Ok(match &config.embedder_api_key {
            Some(key) => embedder.with_api_key(key.clone()),
            None => embedder,
        })
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn request(&self, text: &str) -> EmbedResult<Vec<f32>> {
        let mut request = self.http.post(&self.url).json(&EmbeddingRequest {
            model: &self.model,
            input: text,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(EmbedError::RateLimited);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbedError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> EmbedResult<Vec<f32>> {
        let embedding = (|| self.request(text))
            .retry(ExponentialBuilder::default().with_max_times(MAX_RETRIES))
            .when(EmbedError::is_transient)
            .notify(|err: &EmbedError, delay: Duration| {
                log::warn!("Embedding request failed, retrying in {:?}: {}", delay, err);
            })
            .await?;

        log::debug!(
            "Embedded {} chars with {} into {} dimensions",
            text.chars().count(),
            self.model,
            embedding.len()
        );
        Ok(embedding)
    }
}
