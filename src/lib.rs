//! # websum
//!
//! Summarize web pages with a locally hosted LLM.
//!
//! ## Pipeline Overview
//!
//! ```text
//! URL
//!  │
//!  ├─ 1. Fetch    GET with browser-like User-Agent, 10 s timeout
//!  ├─ 2. Extract  best-effort visible text via scraper
//!  ├─ 3. Chunk    contiguous windows of ≤ 500 words, document order
//!  ├─ 4. LLM      one Ollama call per chunk, sequential, failures contained
//!  ├─ 5. Join     per-chunk summaries joined with blank lines
//!  └─ 6. Output   aggregate summary + optional paged PDF
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use websum::{summarize, SummarizeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Talks to Ollama at http://localhost:11434 with llama3:instruct
//!     let config = SummarizeConfig::default();
//!     let output = summarize("https://example.com/article", &config).await?;
//!     println!("{}", output.summary);
//!     eprintln!(
//!         "chunks: {} ok / {} failed",
//!         output.stats.summarized_chunks, output.stats.failed_chunks
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Failure model
//!
//! Fatal conditions (unreachable page, non-2xx status, nothing extractable,
//! every chunk failed) are [`WebsumError`] values. A single chunk failing is
//! *not* fatal: the error is recorded in that chunk's [`ChunkResult`] and a
//! placeholder appears in the aggregate at the chunk's position, so partial
//! results are never thrown away.
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `cli`    | on      | Enables the `websum` binary (clap + anyhow + tracing-subscriber); implies `server` |
//! | `server` | on (via `cli`) | Enables the actix-web front end ([`server`]) |
//!
//! Disable both when using only the library:
//! ```toml
//! websum = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod provider;
#[cfg(feature = "server")]
pub mod server;
pub mod summarize;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{SummarizeConfig, SummarizeConfigBuilder, DEFAULT_USER_AGENT};
pub use error::{ChunkError, WebsumError};
pub use output::{ChunkResult, SummaryOutput, SummaryStats};
pub use pipeline::chunk::chunk_words;
pub use pipeline::extract::extract_text;
pub use pipeline::render::{render_pdf_bytes, render_pdf_file, render_pdf_to_path};
pub use provider::{GenerateError, OllamaGenerator, TextGenerator};
#[cfg(feature = "server")]
pub use server::run_server;
pub use summarize::{summarize, summarize_text};
