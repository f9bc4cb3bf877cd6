//! The summarization prompt template.
//!
//! Centralising the prompt here serves two purposes:
//!
//! 1. **Single source of truth** — tuning the instructions requires editing
//!    exactly one place.
//!
//! 2. **Testability** — unit tests can render and inspect prompts without a
//!    live model, making prompt regressions easy to catch.
//!
//! Callers can override the template via
//! [`crate::config::SummarizeConfig::prompt_template`]; the constant here is
//! used only when no override is provided.

/// Default instruction template for summarizing one chunk of extracted text.
///
/// The `{text}` placeholder is replaced with the chunk body by
/// [`render_prompt`]. Used when `SummarizeConfig::prompt_template` is `None`.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"As a professional summarizer, create a detailed and comprehensive summary of the provided text, be it an article, post, conversation, or passage, while adhering to these guidelines:

1. Craft a summary that is detailed, thorough, in-depth, and complex, while maintaining clarity.
2. Incorporate main ideas and essential information, eliminating extraneous language and focusing on critical aspects.
3. Rely strictly on the provided text, without including external information.
4. Format the summary in paragraph form for easy understanding.
5. Give clear titles to portions of the summary to enhance readability.
6. Add subheadings under the main headings of the summary.

"{text}"

DETAILED SUMMARY:"#;

/// Render the prompt for one chunk by substituting the `{text}` placeholder.
///
/// The template is treated as opaque text; only the first-class `{text}`
/// placeholder is substituted, so braces elsewhere in a custom template are
/// left alone.
pub fn render_prompt(template: &str, chunk: &str) -> String {
    template.replace("{text}", chunk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_has_placeholder() {
        assert!(SUMMARY_PROMPT_TEMPLATE.contains("{text}"));
    }

    #[test]
    fn render_substitutes_chunk_text() {
        let prompt = render_prompt(SUMMARY_PROMPT_TEMPLATE, "the quick brown fox");
        assert!(prompt.contains("the quick brown fox"));
        assert!(!prompt.contains("{text}"));
    }

    #[test]
    fn render_leaves_other_braces_alone() {
        let prompt = render_prompt("keep {this} but fill {text}", "body");
        assert_eq!(prompt, "keep {this} but fill body");
    }
}
