//! Error types for the websum library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`WebsumError`] — **Fatal**: the run cannot proceed at all (page could
//!   not be fetched, nothing extractable on the page, every chunk failed).
//!   Returned as `Err(WebsumError)` from the top-level `summarize*` functions.
//!
//! * [`ChunkError`] — **Non-fatal**: a single chunk failed to summarize
//!   (backend unreachable, model error, timeout) but the other chunks are
//!   fine. Stored inside [`crate::output::ChunkResult`] so callers keep the
//!   partial result instead of losing the whole document to one bad chunk.
//!
//! The separation replaces the sentinel-string convention some summarizer
//! scripts use ("Error loading document: …" returned as if it were text):
//! callers branch on a typed discriminant, never on a string prefix.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the websum library.
///
/// Chunk-level failures use [`ChunkError`] and are stored in
/// [`crate::output::ChunkResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum WebsumError {
    // ── Fetch errors ──────────────────────────────────────────────────────
    /// The HTTP GET failed before a response arrived (DNS, TLS, refused).
    #[error("Failed to fetch '{url}': {reason}\nCheck the URL and your network connection.")]
    FetchFailed { url: String, reason: String },

    /// The fetch exceeded the configured timeout.
    #[error("Fetch timed out after {secs}s for '{url}'")]
    FetchTimeout { url: String, secs: u64 },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from '{url}'")]
    HttpStatus { url: String, status: u16 },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The page parsed but contained no visible text to summarize.
    #[error("No content extracted. Try a different URL.")]
    NoContent,

    // ── Summarization errors ──────────────────────────────────────────────
    /// Every chunk failed; there is no summary to return.
    #[error("All {total} chunks failed to summarize.\nFirst error: {first_error}")]
    AllChunksFailed { total: usize, first_error: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// PDF layout or serialization failed.
    #[error("Failed to render PDF: {detail}")]
    RenderFailed { detail: String },

    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single chunk.
///
/// Stored alongside [`crate::output::ChunkResult`] when a chunk fails.
/// The overall run continues unless ALL chunks fail.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum ChunkError {
    /// The generation backend returned an error for this chunk.
    #[error("Chunk {chunk}: summarization failed: {detail}")]
    GenerationFailed { chunk: usize, detail: String },

    /// The generation call timed out.
    #[error("Chunk {chunk}: summarization timed out after {secs}s")]
    Timeout { chunk: usize, secs: u64 },
}
