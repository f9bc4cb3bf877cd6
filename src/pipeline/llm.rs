//! Generation stage: drive one backend call per chunk.
//!
//! This module is intentionally thin — prompt wording lives in
//! [`crate::prompts`] so it can change without touching error handling here.
//!
//! ## Failure containment
//!
//! A chunk that fails to summarize must not abort the run or lose the
//! summaries already produced for other chunks. `summarize_chunk` therefore
//! always returns a [`ChunkResult`] — the error is logged and stored inside
//! the result, never propagated. There are no retries: a failed chunk
//! surfaces as a placeholder in the aggregate and the run moves on.

use crate::config::SummarizeConfig;
use crate::error::ChunkError;
use crate::output::ChunkResult;
use crate::prompts::{render_prompt, SUMMARY_PROMPT_TEMPLATE};
use crate::provider::{GenerateError, TextGenerator};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Summarize a single chunk.
///
/// `index` is the chunk's 1-indexed position, `total` the chunk count of the
/// run; both appear in logs so interleaved runs stay readable.
///
/// Always returns a `ChunkResult` — callers check `result.error` to decide
/// whether the chunk contributed text or a placeholder.
pub async fn summarize_chunk(
    generator: &Arc<dyn TextGenerator>,
    index: usize,
    total: usize,
    chunk: &str,
    config: &SummarizeConfig,
) -> ChunkResult {
    let start = Instant::now();
    let source_words = chunk.split_whitespace().count();

    let template = config
        .prompt_template
        .as_deref()
        .unwrap_or(SUMMARY_PROMPT_TEMPLATE);
    let prompt = render_prompt(template, chunk);

    debug!(
        "Chunk {}/{}: {} words, model {}",
        index,
        total,
        source_words,
        generator.model_name()
    );

    match generator.generate(&prompt).await {
        Ok(text) => {
            let duration = start.elapsed();
            debug!(
                "Chunk {}/{}: {} chars generated in {:?}",
                index,
                total,
                text.len(),
                duration
            );
            ChunkResult {
                index,
                source_words,
                summary: text.trim().to_string(),
                duration_ms: duration.as_millis() as u64,
                error: None,
            }
        }
        Err(e) => {
            warn!("Chunk {}/{}: summarization failed — {}", index, total, e);
            let error = match e {
                GenerateError::Timeout { secs } => ChunkError::Timeout { chunk: index, secs },
                other => ChunkError::GenerationFailed {
                    chunk: index,
                    detail: other.to_string(),
                },
            };
            ChunkResult {
                index,
                source_words,
                summary: String::new(),
                duration_ms: start.elapsed().as_millis() as u64,
                error: Some(error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct CannedGenerator {
        reply: Result<String, ()>,
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(GenerateError::ConnectionFailed("refused".into())),
            }
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    #[tokio::test]
    async fn success_trims_and_records_word_count() {
        let generator: Arc<dyn TextGenerator> = Arc::new(CannedGenerator {
            reply: Ok("  a summary \n".into()),
        });
        let config = SummarizeConfig::default();
        let result = summarize_chunk(&generator, 1, 1, "five words of source text", &config).await;
        assert!(result.error.is_none());
        assert_eq!(result.summary, "a summary");
        assert_eq!(result.source_words, 5);
        assert_eq!(result.index, 1);
    }

    #[tokio::test]
    async fn failure_is_contained_in_the_result() {
        let generator: Arc<dyn TextGenerator> = Arc::new(CannedGenerator { reply: Err(()) });
        let config = SummarizeConfig::default();
        let result = summarize_chunk(&generator, 2, 3, "some text", &config).await;
        assert!(result.summary.is_empty());
        match result.error {
            Some(ChunkError::GenerationFailed { chunk, ref detail }) => {
                assert_eq!(chunk, 2);
                assert!(detail.contains("refused"));
            }
            other => panic!("expected GenerationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn custom_template_is_used_when_set() {
        struct EchoPrompt;

        #[async_trait]
        impl TextGenerator for EchoPrompt {
            async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
                Ok(prompt.to_string())
            }
            fn model_name(&self) -> &str {
                "echo"
            }
        }

        let generator: Arc<dyn TextGenerator> = Arc::new(EchoPrompt);
        let config = SummarizeConfig::builder()
            .prompt_template("TLDR: {text}")
            .build()
            .unwrap();
        let result = summarize_chunk(&generator, 1, 1, "body", &config).await;
        assert_eq!(result.summary, "TLDR: body");
    }
}
