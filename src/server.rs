//! Interactive web front end: one page, one form, one download.
//!
//! The UI is a single HTML page served by actix-web. A run walks the states
//! *idle → fetching → (fetch-failed | summarizing → done)*; each state maps
//! onto one request/response:
//!
//! * `GET /` — idle; shows the form and, when present, the session's
//!   current summary.
//! * `POST /summarize` — one full run. An empty URL short-circuits to an
//!   idle-with-warning page without fetching; a fetch failure renders the
//!   error and runs nothing further; success overwrites the session slot
//!   and renders the new summary.
//! * `GET /summary.pdf` — renders the session summary to a temporary PDF
//!   and returns it as a download.
//!
//! There is no cancellation and no partial display: the POST handler blocks
//! until the whole run finishes. The session slot is the only shared mutable
//! state — a caller-owned `Mutex<SessionState>` handed to actix as app data,
//! written once per successful run.

use crate::config::SummarizeConfig;
use crate::pipeline::render;
use crate::summarize::summarize;
use actix_web::{web, App, HttpResponse, HttpServer};
use serde::Deserialize;
use std::sync::Mutex;
use tracing::{error, info};

/// Per-session state: the most recent aggregate summary.
///
/// Overwritten on each successful run, left untouched otherwise, discarded
/// when the server stops.
#[derive(Default)]
pub struct SessionState {
    pub summary: Option<String>,
}

#[derive(Deserialize)]
struct SummarizeForm {
    url: String,
}

/// Run the front end until the process is stopped.
pub async fn run_server(
    host: &str,
    port: u16,
    config: SummarizeConfig,
) -> std::io::Result<()> {
    let state = web::Data::new(Mutex::new(SessionState::default()));
    let config = web::Data::new(config);

    info!("WEBSUM front end listening on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .route("/", web::get().to(index))
            .route("/summarize", web::post().to(submit))
            .route("/summary.pdf", web::get().to(download))
    })
    .bind((host, port))?
    .run()
    .await
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn index(state: web::Data<Mutex<SessionState>>) -> HttpResponse {
    match state.lock() {
        Ok(session) => html_response(render_page(None, session.summary.as_deref())),
        Err(_) => HttpResponse::InternalServerError().body("Session lock poisoned"),
    }
}

async fn submit(
    state: web::Data<Mutex<SessionState>>,
    config: web::Data<SummarizeConfig>,
    form: web::Form<SummarizeForm>,
) -> HttpResponse {
    let url = form.url.trim();

    // Empty submission: back to idle with a warning, nothing fetched.
    if url.is_empty() {
        let summary = match current_summary(&state) {
            Ok(summary) => summary,
            Err(response) => return response,
        };
        return html_response(render_page(
            Some(Notice::Warning("Please enter a valid URL.")),
            summary.as_deref(),
        ));
    }

    match summarize(url, config.get_ref()).await {
        Ok(output) => {
            match state.lock() {
                Ok(mut session) => session.summary = Some(output.summary.clone()),
                Err(_) => return HttpResponse::InternalServerError().body("Session lock poisoned"),
            }
            info!(
                "Run finished: {}/{} chunks summarized",
                output.stats.summarized_chunks, output.stats.total_chunks
            );
            html_response(render_page(
                Some(Notice::Success("Summary generated successfully.")),
                Some(&output.summary),
            ))
        }
        Err(e) => {
            // Terminal for this run; prior session state stays untouched.
            error!("Run failed: {}", e);
            let message = e.to_string();
            let summary = match current_summary(&state) {
                Ok(summary) => summary,
                Err(response) => return response,
            };
            html_response(render_page(
                Some(Notice::Error(&message)),
                summary.as_deref(),
            ))
        }
    }
}

async fn download(state: web::Data<Mutex<SessionState>>) -> HttpResponse {
    let summary = match current_summary(&state) {
        Ok(summary) => summary,
        Err(response) => return response,
    };

    let Some(summary) = summary else {
        return HttpResponse::NotFound().body("No summary available yet. Summarize a page first.");
    };

    // Render to a uniquely named temp file and stream its contents; the
    // handle drop at the end of this scope disposes of the file.
    let file = match render::render_pdf_file(&summary) {
        Ok(file) => file,
        Err(e) => {
            error!("PDF rendering failed: {}", e);
            return HttpResponse::InternalServerError().body(format!("Failed to render PDF: {e}"));
        }
    };

    match std::fs::read(file.path()) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(("Content-Disposition", "attachment; filename=\"summary.pdf\""))
            .body(bytes),
        Err(e) => {
            error!("Failed to read rendered PDF: {}", e);
            HttpResponse::InternalServerError().body("Failed to read rendered PDF")
        }
    }
}

// ── Page rendering ───────────────────────────────────────────────────────

enum Notice<'a> {
    Warning(&'a str),
    Error(&'a str),
    Success(&'a str),
}

/// Read the session's summary, surfacing a poisoned lock as the same 500
/// response the handlers use. Poisoning never silently reads as "no summary".
fn current_summary(state: &web::Data<Mutex<SessionState>>) -> Result<Option<String>, HttpResponse> {
    match state.lock() {
        Ok(session) => Ok(session.summary.clone()),
        Err(_) => Err(HttpResponse::InternalServerError().body("Session lock poisoned")),
    }
}

fn html_response(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Render the single page: form, optional notice, optional summary block.
fn render_page(notice: Option<Notice<'_>>, summary: Option<&str>) -> String {
    let notice_html = match notice {
        Some(Notice::Warning(text)) => {
            format!(r#"<p class="notice warning">{}</p>"#, escape_html(text))
        }
        Some(Notice::Error(text)) => {
            format!(r#"<p class="notice error">{}</p>"#, escape_html(text))
        }
        Some(Notice::Success(text)) => {
            format!(r#"<p class="notice success">{}</p>"#, escape_html(text))
        }
        None => String::new(),
    };

    let summary_html = match summary {
        Some(text) => format!(
            r#"<section>
  <h2>Summary</h2>
  {}
  <p><a class="download" href="/summary.pdf">Download Summary as PDF</a></p>
</section>"#,
            summary_paragraphs(text)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>WEBSUM: Web Page Summarizer</title>
<style>
  body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }}
  input[type=url] {{ width: 70%; padding: 0.4rem; }}
  button {{ padding: 0.4rem 1rem; }}
  .notice {{ padding: 0.5rem; border-radius: 4px; }}
  .warning {{ background: #fff3cd; }}
  .error {{ background: #f8d7da; }}
  .success {{ background: #d4edda; }}
</style>
</head>
<body>
<h1>WEBSUM: Web Page Summarizer</h1>
<form method="post" action="/summarize">
  <input type="url" name="url" placeholder="Enter URL to summarize">
  <button type="submit">Summarize</button>
</form>
{notice_html}
{summary_html}
</body>
</html>
"#
    )
}

/// Render the aggregate summary as paragraphs, preserving blank-line breaks.
fn summary_paragraphs(summary: &str) -> String {
    summary
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .map(|p| format!("<p>{}</p>", escape_html(p).replace('\n', "<br>")))
        .collect::<Vec<_>>()
        .join("\n  ")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_covers_special_chars() {
        assert_eq!(
            escape_html(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn page_without_summary_has_no_download_link() {
        let page = render_page(None, None);
        assert!(page.contains("Summarize"));
        assert!(!page.contains("/summary.pdf"));
    }

    #[test]
    fn page_with_summary_shows_paragraphs_and_download_link() {
        let page = render_page(None, Some("part one\n\npart two"));
        assert!(page.contains("<p>part one</p>"));
        assert!(page.contains("<p>part two</p>"));
        assert!(page.contains("/summary.pdf"));
    }

    #[test]
    fn notices_are_escaped() {
        let page = render_page(Some(Notice::Error("<script>boom</script>")), None);
        assert!(!page.contains("<script>boom"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn poisoned_session_lock_is_a_server_error_not_an_empty_summary() {
        let state = web::Data::new(Mutex::new(SessionState {
            summary: Some("kept".to_string()),
        }));

        let holder = state.clone();
        std::thread::spawn(move || {
            let _guard = holder.lock().unwrap();
            panic!("poison the session lock");
        })
        .join()
        .unwrap_err();

        assert!(current_summary(&state).is_err());
    }

    #[actix_web::test]
    async fn download_streams_the_session_summary_as_pdf() {
        let state = web::Data::new(Mutex::new(SessionState {
            summary: Some("first part\n\nsecond part".to_string()),
        }));
        let app = actix_web::test::init_service(
            App::new()
                .app_data(state)
                .route("/summary.pdf", web::get().to(download)),
        )
        .await;

        let req = actix_web::test::TestRequest::get()
            .uri("/summary.pdf")
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/pdf"
        );
        let disposition = resp
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(disposition.contains("summary.pdf"));

        let body = actix_web::test::read_body(resp).await;
        assert!(body.starts_with(b"%PDF"));
    }

    #[actix_web::test]
    async fn download_without_a_summary_is_not_found() {
        let state = web::Data::new(Mutex::new(SessionState::default()));
        let app = actix_web::test::init_service(
            App::new()
                .app_data(state)
                .route("/summary.pdf", web::get().to(download)),
        )
        .await;

        let req = actix_web::test::TestRequest::get()
            .uri("/summary.pdf")
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
