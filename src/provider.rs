//! Text-generation backend seam.
//!
//! The pipeline never talks to an inference server directly; it goes through
//! the [`TextGenerator`] trait so the backend is swappable without touching
//! chunking or aggregation logic. The default implementation,
//! [`OllamaGenerator`], speaks the Ollama `/api/generate` endpoint — a
//! single synchronous request/response per chunk, no streaming.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors a generation backend can produce for one call.
///
/// These are converted to [`crate::error::ChunkError`] at the pipeline
/// boundary; the distinction that matters here is timeout vs everything
/// else, because the two read very differently in a run report.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The backend could not be reached at all.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The backend answered with a non-2xx status.
    #[error("backend returned HTTP {status}: {detail}")]
    ApiStatus { status: u16, detail: String },

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The call exceeded the configured timeout.
    #[error("timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// A text-generation backend: one prompt in, one completion out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;

    /// The model identifier this backend drives, for logging.
    fn model_name(&self) -> &str;
}

/// Ollama-backed [`TextGenerator`].
///
/// Talks to `{base_url}/api/generate` with `stream: false`, so the entire
/// completion arrives in a single JSON object. The per-call timeout must
/// accommodate CPU inference — minutes, not seconds — and is therefore set
/// per request rather than on the shared client.
pub struct OllamaGenerator {
    base_url: String,
    model: String,
    temperature: f32,
    timeout_secs: u64,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaGenerator {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        timeout_secs: u64,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            temperature,
            timeout_secs,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        debug!(model = %self.model, prompt_len = prompt.len(), "Calling Ollama");

        let body = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: OllamaOptions {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerateError::Timeout {
                        secs: self.timeout_secs,
                    }
                } else {
                    GenerateError::ConnectionFailed(format!(
                        "cannot reach Ollama at {}: {}",
                        self.base_url, e
                    ))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerateError::ApiStatus {
                status: status.as_u16(),
                detail: truncate_detail(&detail),
            });
        }

        let parsed: OllamaResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::InvalidResponse(e.to_string()))?;

        Ok(parsed.response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Keep error bodies short enough for a log line or a placeholder string.
fn truncate_detail(detail: &str) -> String {
    const MAX: usize = 200;
    let trimmed = detail.trim();
    if trimmed.chars().count() <= MAX {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(MAX).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_detail_leaves_short_bodies_alone() {
        assert_eq!(truncate_detail("  model not found  "), "model not found");
    }

    #[test]
    fn truncate_detail_caps_long_bodies() {
        let long = "x".repeat(500);
        let cut = truncate_detail(&long);
        assert!(cut.chars().count() <= 201);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn request_serialises_with_stream_disabled() {
        let req = OllamaRequest {
            model: "llama3:instruct",
            prompt: "hello",
            stream: false,
            options: OllamaOptions { temperature: 0.2 },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["stream"], serde_json::Value::Bool(false));
        assert_eq!(json["model"], "llama3:instruct");
        assert!((json["options"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }
}
