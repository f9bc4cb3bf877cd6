//! Document loading: fetch the raw page body over HTTP.
//!
//! The fetch is the one stage waiting on an arbitrary remote server, so all
//! three of its failure modes — transport error, timeout, non-2xx status —
//! are distinct [`WebsumError`] variants and terminal for the run. Nothing
//! downstream (chunker, generator) runs when the fetch fails.
//!
//! The request carries a browser-like User-Agent because a noticeable
//! fraction of sites answer default HTTP-client identities with 403 or an
//! interstitial instead of the article body.

use crate::config::SummarizeConfig;
use crate::error::WebsumError;
use std::time::Duration;
use tracing::{debug, info};

/// Fetch `url` and return the raw response body as text.
///
/// Returns the body exactly as received — extraction is the next stage's
/// concern. The body is decoded with `reqwest`'s charset handling, so the
/// result is always valid UTF-8.
pub async fn fetch_document(url: &str, config: &SummarizeConfig) -> Result<String, WebsumError> {
    info!("Fetching document: {}", url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| WebsumError::FetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            WebsumError::FetchTimeout {
                url: url.to_string(),
                secs: config.fetch_timeout_secs,
            }
        } else {
            WebsumError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(WebsumError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| WebsumError::FetchFailed {
        url: url.to_string(),
        reason: format!("failed to read body: {e}"),
    })?;

    debug!("Fetched {} bytes from {}", body.len(), url);
    Ok(body)
}
