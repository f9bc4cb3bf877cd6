//! Configuration types for web-page summarization.
//!
//! All pipeline behaviour is controlled through [`SummarizeConfig`], built via
//! its [`SummarizeConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs between the CLI and the web front end and to log
//! the exact settings a run used.
//!
//! # Design choice: builder over constructor
//! A ten-field constructor is unreadable and breaks on every new field. The
//! builder lets callers set only what they care about and rely on documented
//! defaults for the rest.

use crate::error::WebsumError;
use crate::provider::TextGenerator;
use std::fmt;
use std::sync::Arc;

/// Default browser-like User-Agent for page fetches.
///
/// Some sites answer automated clients with 403 or an interstitial page.
/// Presenting a mainstream browser identity keeps the fetch honest about
/// being an HTTP GET while avoiding the crudest anti-automation filters.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36";

/// Configuration for one summarization run.
///
/// Built via [`SummarizeConfig::builder()`] or using
/// [`SummarizeConfig::default()`].
///
/// # Example
/// ```rust
/// use websum::SummarizeConfig;
///
/// let config = SummarizeConfig::builder()
///     .max_chunk_words(300)
///     .model("llama3:instruct")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct SummarizeConfig {
    /// Maximum words per chunk. Default: 500.
    ///
    /// Small local models have limited context; 500 words plus the prompt
    /// template stays comfortably inside an 8k-token window while keeping
    /// the number of backend round-trips low.
    pub max_chunk_words: usize,

    /// Page-fetch timeout in seconds. Default: 10.
    ///
    /// The fetch is the only stage waiting on an arbitrary remote server, so
    /// it gets a short leash; a page that takes longer than 10 s to answer
    /// is almost always down or blocking us.
    pub fetch_timeout_secs: u64,

    /// User-Agent header sent with the page fetch. Default: [`DEFAULT_USER_AGENT`].
    pub user_agent: String,

    /// Base URL of the Ollama server. Default: `http://localhost:11434`.
    pub ollama_base_url: String,

    /// Model identifier passed to the generation backend. Default: `llama3:instruct`.
    pub model: String,

    /// Sampling temperature for the generation call. Default: 0.2.
    ///
    /// Low temperature keeps the model close to the source text, which is
    /// what a faithful summary wants. Higher values introduce invention.
    pub temperature: f32,

    /// Per-generation-call timeout in seconds. Default: 120.
    ///
    /// Local models on CPU can take a minute or more per 500-word chunk;
    /// this is deliberately much longer than the fetch timeout.
    pub api_timeout_secs: u64,

    /// Custom prompt template with a `{text}` placeholder.
    /// If None, uses [`crate::prompts::SUMMARY_PROMPT_TEMPLATE`].
    pub prompt_template: Option<String>,

    /// Pre-constructed generation backend. Takes precedence over
    /// `ollama_base_url` / `model`. Useful in tests and for callers that
    /// wrap the backend in middleware.
    pub generator: Option<Arc<dyn TextGenerator>>,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            max_chunk_words: 500,
            fetch_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            model: "llama3:instruct".to_string(),
            temperature: 0.2,
            api_timeout_secs: 120,
            prompt_template: None,
            generator: None,
        }
    }
}

impl fmt::Debug for SummarizeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummarizeConfig")
            .field("max_chunk_words", &self.max_chunk_words)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("ollama_base_url", &self.ollama_base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("prompt_template", &self.prompt_template.as_ref().map(|_| "<custom>"))
            .field("generator", &self.generator.as_ref().map(|_| "<dyn TextGenerator>"))
            .finish()
    }
}

impl SummarizeConfig {
    /// Create a new builder for `SummarizeConfig`.
    pub fn builder() -> SummarizeConfigBuilder {
        SummarizeConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`SummarizeConfig`].
#[derive(Debug)]
pub struct SummarizeConfigBuilder {
    config: SummarizeConfig,
}

impl SummarizeConfigBuilder {
    pub fn max_chunk_words(mut self, n: usize) -> Self {
        self.config.max_chunk_words = n;
        self
    }

    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = secs;
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    pub fn ollama_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.ollama_base_url = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn prompt_template(mut self, template: impl Into<String>) -> Self {
        self.config.prompt_template = Some(template.into());
        self
    }

    pub fn generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.config.generator = Some(generator);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SummarizeConfig, WebsumError> {
        let c = &self.config;
        if c.max_chunk_words == 0 {
            return Err(WebsumError::InvalidConfig(
                "max_chunk_words must be ≥ 1".into(),
            ));
        }
        if c.fetch_timeout_secs == 0 {
            return Err(WebsumError::InvalidConfig(
                "fetch_timeout_secs must be ≥ 1".into(),
            ));
        }
        if let Some(ref template) = c.prompt_template {
            if !template.contains("{text}") {
                return Err(WebsumError::InvalidConfig(
                    "prompt_template must contain a {text} placeholder".into(),
                ));
            }
        }
        Ok(self.config)
    }
}
