//! Text extraction: best-effort conversion of markup to visible text.
//!
//! `scraper` (html5ever underneath) never fails on malformed input — it
//! error-corrects the way a browser does — so this stage has no error path.
//! An empty result is a valid output here; the caller promotes it to
//! [`crate::error::WebsumError::NoContent`] rather than feeding an empty
//! document to the summarizer.
//!
//! The walk skips subtrees that carry no prose (`script`, `style`, and
//! friends), visits the remaining text nodes in document order, and joins
//! them with single spaces. A final regex pass collapses whitespace runs so
//! that source formatting (indentation, hard wraps) does not leak into word
//! counting downstream.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Subtrees that never contain visible prose.
const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "svg", "template", "head"];

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Extract the visible text of an HTML document.
///
/// Returns the concatenation of all visible text nodes in document order,
/// separated by single spaces, with leading/trailing whitespace trimmed.
/// Never fails; malformed markup is parsed best-effort and an empty string
/// is a legitimate result.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut parts: Vec<&str> = Vec::new();
    collect_text(document.root_element(), &mut parts);

    let joined = parts.join(" ");
    RE_WHITESPACE.replace_all(&joined, " ").trim().to_string()
}

/// Depth-first walk pushing every visible text node under `element`.
fn collect_text<'a>(element: ElementRef<'a>, out: &mut Vec<&'a str>) {
    if SKIP_TAGS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    out.push(trimmed);
                }
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_visible_text_in_document_order() {
        let html = "<html><body><h1>Title</h1><p>First para.</p><p>Second para.</p></body></html>";
        assert_eq!(extract_text(html), "Title First para. Second para.");
    }

    #[test]
    fn skips_scripts_and_styles() {
        let html = r#"<html><head><style>p { color: red; }</style></head>
            <body><script>var x = "invisible";</script><p>Visible</p>
            <noscript>enable js</noscript></body></html>"#;
        assert_eq!(extract_text(html), "Visible");
    }

    #[test]
    fn collapses_whitespace_runs() {
        let html = "<p>spread\n    over\t\tlines</p>";
        assert_eq!(extract_text(html), "spread over lines");
    }

    #[test]
    fn malformed_markup_is_best_effort_not_an_error() {
        let html = "<p>unclosed <div><b>nested <p>chaos";
        let text = extract_text(html);
        assert!(text.contains("unclosed"));
        assert!(text.contains("chaos"));
    }

    #[test]
    fn empty_and_tag_only_documents_yield_empty_string() {
        assert_eq!(extract_text(""), "");
        assert_eq!(extract_text("<html><body><div></div></body></html>"), "");
    }

    #[test]
    fn nested_inline_elements_keep_single_spaces() {
        let html = "<p>one <b>two</b> three</p>";
        assert_eq!(extract_text(html), "one two three");
    }
}
