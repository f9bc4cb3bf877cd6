//! Chunking: split extracted text into word-count-bounded windows.
//!
//! Small local models cannot take a whole article in one prompt, so the
//! document is split into contiguous, non-overlapping windows of at most
//! `max_words` whitespace-delimited words. Order is preserved end to end:
//! chunks are produced, summarized, and aggregated in document order.
//!
//! The operation is deliberately dumb — no sentence detection, no overlap,
//! no token counting. Word windows are deterministic, trivially testable,
//! and close enough to token budgets for summarization purposes.

/// Split `text` into windows of at most `max_words` words.
///
/// Words are whitespace-delimited; each window is re-joined with single
/// spaces. Every window except possibly the last contains exactly
/// `max_words` words. Empty (or whitespace-only) input yields no chunks.
///
/// # Panics
/// Panics if `max_words` is 0. [`crate::config::SummarizeConfigBuilder`]
/// validates this before a config reaches the pipeline.
pub fn chunk_words(text: &str, max_words: usize) -> Vec<String> {
    assert!(max_words > 0, "max_words must be ≥ 1");

    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(max_words)
        .map(|window| window.join(" "))
        .collect()
}
