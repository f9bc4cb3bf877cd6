//! Pipeline stages for web-page summarization.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets us swap an
//! implementation (e.g. a different extraction backend) without touching the
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! fetch ──▶ extract ──▶ chunk ──▶ llm ──▶ render
//! (HTTP)    (scraper)   (words)  (Ollama)  (PDF)
//! ```
//!
//! 1. [`fetch`]   — GET the page body; the only stage with a fatal network
//!    error path
//! 2. [`extract`] — best-effort visible-text extraction; never fails
//! 3. [`chunk`]   — deterministic word windows, document order
//! 4. [`llm`]     — one backend call per chunk with per-chunk failure
//!    containment
//! 5. [`render`]  — wrap and paginate the aggregate into a PDF

pub mod chunk;
pub mod extract;
pub mod fetch;
pub mod llm;
pub mod render;
