//! Output types for a summarization run.
//!
//! A run always produces a [`SummaryOutput`] unless a fatal error occurred.
//! Per-chunk detail is kept in [`ChunkResult`] — including failed chunks —
//! so callers can inspect partial success, re-drive individual chunks, or
//! report exactly which part of the document is missing from the aggregate.

use crate::error::ChunkError;
use serde::{Deserialize, Serialize};

/// The result of summarizing one chunk.
///
/// `error.is_none()` means `summary` holds generated text; otherwise
/// `summary` is empty and `error` describes what went wrong. Either way the
/// chunk keeps its position so the aggregate stays in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkResult {
    /// 1-indexed chunk position in document order.
    pub index: usize,

    /// Number of whitespace-delimited words in the source chunk.
    pub source_words: usize,

    /// Generated summary text (empty when `error` is set).
    pub summary: String,

    /// Wall-clock duration of the generation call in milliseconds.
    pub duration_ms: u64,

    /// Set when this chunk failed; the run as a whole still succeeded.
    pub error: Option<ChunkError>,
}

/// Aggregate statistics for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Total chunks the document was split into.
    pub total_chunks: usize,
    /// Chunks that produced a summary.
    pub summarized_chunks: usize,
    /// Chunks that failed and appear as placeholders in the aggregate.
    pub failed_chunks: usize,
    /// Whitespace-delimited words in the extracted document text.
    pub source_words: usize,
    /// Time spent fetching the page (0 for `summarize_text`).
    pub fetch_duration_ms: u64,
    /// Time spent in generation calls, summed over chunks.
    pub llm_duration_ms: u64,
    /// End-to-end wall-clock time of the run.
    pub total_duration_ms: u64,
}

/// Complete output of a summarization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOutput {
    /// The aggregate summary: per-chunk summaries (and failure placeholders)
    /// joined in document order with a blank line between entries.
    pub summary: String,

    /// Per-chunk results in document order, failures included.
    pub chunks: Vec<ChunkResult>,

    /// Run statistics.
    pub stats: SummaryStats,
}

/// Join per-chunk results into the aggregate summary.
///
/// Order is the chunks' document order; nothing is deduplicated or
/// re-summarized. A failed chunk contributes a bracketed placeholder carrying
/// the failure description, in its original position, so the reader can see
/// exactly where text is missing.
pub fn aggregate_summaries(chunks: &[ChunkResult]) -> String {
    chunks
        .iter()
        .map(|c| match &c.error {
            None => c.summary.clone(),
            Some(e) => format!("[{}]", e),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_chunk(index: usize, summary: &str) -> ChunkResult {
        ChunkResult {
            index,
            source_words: 10,
            summary: summary.to_string(),
            duration_ms: 1,
            error: None,
        }
    }

    fn failed_chunk(index: usize) -> ChunkResult {
        ChunkResult {
            index,
            source_words: 10,
            summary: String::new(),
            duration_ms: 1,
            error: Some(ChunkError::GenerationFailed {
                chunk: index,
                detail: "backend unreachable".into(),
            }),
        }
    }

    #[test]
    fn aggregate_preserves_order_with_blank_line_separator() {
        let chunks = vec![ok_chunk(1, "s1"), ok_chunk(2, "s2"), ok_chunk(3, "s3")];
        assert_eq!(aggregate_summaries(&chunks), "s1\n\ns2\n\ns3");
    }

    #[test]
    fn failed_chunk_becomes_placeholder_in_position() {
        let chunks = vec![ok_chunk(1, "s1"), failed_chunk(2), ok_chunk(3, "s3")];
        let agg = aggregate_summaries(&chunks);
        let parts: Vec<&str> = agg.split("\n\n").collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "s1");
        assert!(parts[1].starts_with("[Chunk 2"));
        assert!(parts[1].contains("backend unreachable"));
        assert_eq!(parts[2], "s3");
    }

    #[test]
    fn empty_chunk_list_aggregates_to_empty_string() {
        assert_eq!(aggregate_summaries(&[]), "");
    }

    #[test]
    fn output_is_json_serialisable() {
        let output = SummaryOutput {
            summary: "s1\n\ns2".into(),
            chunks: vec![ok_chunk(1, "s1"), failed_chunk(2)],
            stats: SummaryStats {
                total_chunks: 2,
                summarized_chunks: 1,
                failed_chunks: 1,
                source_words: 20,
                fetch_duration_ms: 3,
                llm_duration_ms: 2,
                total_duration_ms: 6,
            },
        };
        let json = serde_json::to_string(&output).unwrap();
        let back: SummaryOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back.chunks.len(), 2);
        assert!(back.chunks[1].error.is_some());
    }
}
