//! PDF rendering: lay the aggregate summary out as paged, wrapped text.
//!
//! Layout is intentionally plain — A4, fixed margins, one built-in 12-pt
//! font, no styling. The summary is split on line breaks; each line is
//! word-wrapped to the content width and a new page is started when the
//! content area is exhausted. Built-in Helvetica keeps the file small and
//! avoids shipping font assets; the wrap width is derived from its average
//! glyph width, which is accurate enough for a reading copy.

use crate::error::WebsumError;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::debug;

// printpdf works in f32 millimetres (`Mm(pub f32)`); keep the geometry in
// the same type so no casts happen at the API boundary.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const FONT_SIZE_PT: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 7.0;

/// Average advance width of a 12-pt Helvetica glyph, in millimetres.
/// Used to derive the character budget per wrapped line.
const APPROX_CHAR_WIDTH_MM: f32 = 2.1;

fn max_chars_per_line() -> usize {
    ((PAGE_WIDTH_MM - 2.0 * MARGIN_MM) / APPROX_CHAR_WIDTH_MM) as usize
}

/// Render `summary` to PDF bytes.
///
/// Produces at least one page even for an empty summary. Lines wrap at the
/// content width; page breaks are inserted automatically once the cursor
/// reaches the bottom margin.
pub fn render_pdf_bytes(summary: &str) -> Result<Vec<u8>, WebsumError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Summary",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "text",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| WebsumError::RenderFailed {
            detail: e.to_string(),
        })?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut cursor_y = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM;
    let max_chars = max_chars_per_line();
    let mut page_count = 1usize;

    for line in summary.split('\n') {
        for piece in wrap_line(line, max_chars) {
            if cursor_y < MARGIN_MM {
                let (page, layer_idx) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text");
                layer = doc.get_page(page).get_layer(layer_idx);
                cursor_y = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM;
                page_count += 1;
            }
            emit_line(&layer, &piece, cursor_y, &font);
            cursor_y -= LINE_HEIGHT_MM;
        }
    }

    let mut bytes: Vec<u8> = Vec::new();
    doc.save(&mut std::io::BufWriter::new(&mut bytes))
        .map_err(|e| WebsumError::RenderFailed {
            detail: e.to_string(),
        })?;

    debug!("Rendered PDF: {} pages, {} bytes", page_count, bytes.len());
    Ok(bytes)
}

/// Render `summary` to a uniquely named temporary PDF file.
///
/// The caller owns the returned handle; the file is deleted when the handle
/// is dropped, so hold it for as long as the path must stay valid.
pub fn render_pdf_file(summary: &str) -> Result<NamedTempFile, WebsumError> {
    let bytes = render_pdf_bytes(summary)?;

    let mut file = tempfile::Builder::new()
        .prefix("websum-")
        .suffix(".pdf")
        .tempfile()
        .map_err(|e| WebsumError::RenderFailed {
            detail: format!("tempfile: {e}"),
        })?;

    file.write_all(&bytes)
        .and_then(|_| file.flush())
        .map_err(|e| WebsumError::RenderFailed {
            detail: format!("tempfile write: {e}"),
        })?;

    Ok(file)
}

/// Render `summary` and write the PDF to `path`.
pub fn render_pdf_to_path(
    summary: &str,
    path: impl AsRef<std::path::Path>,
) -> Result<(), WebsumError> {
    let bytes = render_pdf_bytes(summary)?;
    std::fs::write(path.as_ref(), bytes).map_err(|e| WebsumError::OutputWriteFailed {
        path: path.as_ref().to_path_buf(),
        source: e,
    })
}

/// Draw one wrapped line. Blank lines only advance the cursor.
fn emit_line(layer: &PdfLayerReference, text: &str, y: f32, font: &IndirectFontRef) {
    if !text.is_empty() {
        layer.use_text(text, FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), font);
    }
}

/// Greedy word-wrap of a single line to `max_chars` characters.
///
/// Words longer than the budget are hard-split so no piece ever exceeds the
/// line width. Always returns at least one piece (empty for a blank line)
/// so vertical spacing in the source survives.
fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    let mut pieces: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if current_len > 0 && current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else if current_len == 0 && word_len <= max_chars {
            current.push_str(word);
        } else {
            if !current.is_empty() {
                pieces.push(std::mem::take(&mut current));
            }
            if word_len <= max_chars {
                current.push_str(word);
            } else {
                // Hard-split an over-long word
                let chars: Vec<char> = word.chars().collect();
                for slab in chars.chunks(max_chars) {
                    pieces.push(slab.iter().collect());
                }
                // Last slab stays on the current line so following words join it
                current = pieces.pop().unwrap_or_default();
            }
        }
    }

    if !current.is_empty() || pieces.is_empty() {
        pieces.push(current);
    }

    pieces
}
