//! Top-level summarization entry points.
//!
//! One run is strictly linear and strictly sequential: the page is fetched,
//! stripped to text, chunked, each chunk summarized one after another in
//! document order, and the per-chunk results joined. There is no concurrent
//! chunk dispatch and no cancellation: once the generation stage starts,
//! every chunk is driven to completion (success or contained failure)
//! before the function returns.

use crate::config::SummarizeConfig;
use crate::error::WebsumError;
use crate::output::{aggregate_summaries, ChunkResult, SummaryOutput, SummaryStats};
use crate::pipeline::{chunk, extract, fetch, llm};
use crate::provider::{OllamaGenerator, TextGenerator};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Summarize the document at `url`.
///
/// This is the primary entry point for the library.
///
/// # Returns
/// `Ok(SummaryOutput)` on success, even if some chunks failed
/// (check `output.stats.failed_chunks`).
///
/// # Errors
/// Returns `Err(WebsumError)` only for fatal conditions:
/// - fetch failure, timeout, or non-2xx status (nothing downstream runs)
/// - no extractable text on the page
/// - every chunk failed and no summary text exists
pub async fn summarize(
    url: impl AsRef<str>,
    config: &SummarizeConfig,
) -> Result<SummaryOutput, WebsumError> {
    let total_start = Instant::now();
    let url = url.as_ref();
    info!("Starting summarization: {}", url);

    // ── Step 1: Fetch ────────────────────────────────────────────────────
    let fetch_start = Instant::now();
    let html = fetch::fetch_document(url, config).await?;
    let fetch_duration_ms = fetch_start.elapsed().as_millis() as u64;

    // ── Step 2: Extract ──────────────────────────────────────────────────
    let text = extract::extract_text(&html);
    if text.is_empty() {
        return Err(WebsumError::NoContent);
    }
    debug!("Extracted {} chars of visible text", text.len());

    run_pipeline(&text, config, fetch_duration_ms, total_start).await
}

/// Summarize already-extracted plain text, skipping fetch and extraction.
///
/// Useful when the caller has the document body from elsewhere, and in
/// tests that exercise chunking and aggregation without a web server.
pub async fn summarize_text(
    text: impl AsRef<str>,
    config: &SummarizeConfig,
) -> Result<SummaryOutput, WebsumError> {
    let total_start = Instant::now();
    let text = text.as_ref().trim();
    if text.is_empty() {
        return Err(WebsumError::NoContent);
    }
    run_pipeline(text, config, 0, total_start).await
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Chunk, summarize sequentially, aggregate, and compute stats.
async fn run_pipeline(
    text: &str,
    config: &SummarizeConfig,
    fetch_duration_ms: u64,
    total_start: Instant,
) -> Result<SummaryOutput, WebsumError> {
    let generator = resolve_generator(config);
    let source_words = text.split_whitespace().count();

    // ── Step 3: Chunk ────────────────────────────────────────────────────
    let chunks = chunk::chunk_words(text, config.max_chunk_words);
    let total = chunks.len();
    info!(
        "Document has {} words → {} chunk(s) of ≤ {} words",
        source_words, total, config.max_chunk_words
    );

    // ── Step 4: Summarize, strictly in document order ────────────────────
    let llm_start = Instant::now();
    let mut results: Vec<ChunkResult> = Vec::with_capacity(total);
    for (i, chunk_text) in chunks.iter().enumerate() {
        let result = llm::summarize_chunk(&generator, i + 1, total, chunk_text, config).await;
        results.push(result);
    }
    let llm_duration_ms = llm_start.elapsed().as_millis() as u64;

    // ── Step 5: Aggregate ────────────────────────────────────────────────
    let summarized = results.iter().filter(|r| r.error.is_none()).count();
    let failed = results.len() - summarized;

    if summarized == 0 {
        let first_error = results
            .iter()
            .find_map(|r| r.error.as_ref())
            .map(|e| e.to_string())
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(WebsumError::AllChunksFailed {
            total: results.len(),
            first_error,
        });
    }

    let summary = aggregate_summaries(&results);

    let stats = SummaryStats {
        total_chunks: total,
        summarized_chunks: summarized,
        failed_chunks: failed,
        source_words,
        fetch_duration_ms,
        llm_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Summarization complete: {}/{} chunks, {}ms total",
        summarized, total, stats.total_duration_ms
    );

    Ok(SummaryOutput {
        summary,
        chunks: results,
        stats,
    })
}

/// Resolve the generation backend: a pre-built generator from the config if
/// present (tests, middleware), otherwise an [`OllamaGenerator`] built from
/// the config's base URL and model.
fn resolve_generator(config: &SummarizeConfig) -> Arc<dyn TextGenerator> {
    if let Some(ref generator) = config.generator {
        return Arc::clone(generator);
    }
    Arc::new(OllamaGenerator::new(
        config.ollama_base_url.clone(),
        config.model.clone(),
        config.temperature,
        config.api_timeout_secs,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::GenerateError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and replies with a fixed summary.
    struct CountingGenerator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for CountingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("summary {n}"))
        }
        fn model_name(&self) -> &str {
            "counting"
        }
    }

    fn config_with(generator: Arc<dyn TextGenerator>) -> SummarizeConfig {
        SummarizeConfig::builder()
            .max_chunk_words(5)
            .generator(generator)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn empty_text_is_a_no_content_error() {
        let config = SummarizeConfig::default();
        let err = summarize_text("   ", &config).await.unwrap_err();
        assert!(matches!(err, WebsumError::NoContent));
    }

    #[tokio::test]
    async fn chunks_are_summarized_in_document_order() {
        let generator = Arc::new(CountingGenerator {
            calls: AtomicUsize::new(0),
        });
        let config = config_with(generator.clone());

        // 12 words, 5-word chunks → 3 chunks of 5/5/2
        let text = "a b c d e f g h i j k l";
        let output = summarize_text(text, &config).await.unwrap();

        assert_eq!(output.chunks.len(), 3);
        assert_eq!(output.summary, "summary 1\n\nsummary 2\n\nsummary 3");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 3);
        assert_eq!(output.stats.summarized_chunks, 3);
        assert_eq!(output.stats.failed_chunks, 0);
        assert_eq!(output.stats.source_words, 12);
    }

    /// Fails on one specific call, succeeds on the rest.
    struct FailNth {
        calls: AtomicUsize,
        fail_on: usize,
    }

    #[async_trait]
    impl TextGenerator for FailNth {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n == self.fail_on {
                Err(GenerateError::ConnectionFailed("boom".into()))
            } else {
                Ok(format!("summary {n}"))
            }
        }
        fn model_name(&self) -> &str {
            "fail-nth"
        }
    }

    #[tokio::test]
    async fn middle_chunk_failure_is_contained() {
        let config = config_with(Arc::new(FailNth {
            calls: AtomicUsize::new(0),
            fail_on: 2,
        }));

        let text = "a b c d e f g h i j k l";
        let output = summarize_text(text, &config).await.unwrap();

        assert_eq!(output.stats.failed_chunks, 1);
        assert_eq!(output.stats.summarized_chunks, 2);

        let parts: Vec<&str> = output.summary.split("\n\n").collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "summary 1");
        assert!(parts[1].starts_with("[Chunk 2"), "got: {}", parts[1]);
        assert_eq!(parts[2], "summary 3");
    }

    /// Always fails.
    struct AlwaysFails;

    #[async_trait]
    impl TextGenerator for AlwaysFails {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            Err(GenerateError::ConnectionFailed("refused".into()))
        }
        fn model_name(&self) -> &str {
            "always-fails"
        }
    }

    #[tokio::test]
    async fn all_chunks_failing_is_fatal() {
        let config = config_with(Arc::new(AlwaysFails));
        let err = summarize_text("a b c d e f g", &config).await.unwrap_err();
        match err {
            WebsumError::AllChunksFailed { total, first_error } => {
                assert_eq!(total, 2);
                assert!(first_error.contains("refused"));
            }
            other => panic!("expected AllChunksFailed, got {other:?}"),
        }
    }
}
