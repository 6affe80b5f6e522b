//! # pageflow
//!
//! Paginated rich-text layout.
//!
//! A document is an ordered list of blocks: styled text, small tables,
//! spacers and explicit page breaks. pageflow measures each block at the
//! content width, flows the blocks top to bottom into fixed-size pages, and
//! draws the result to PDF. A block is never split across pages; one that
//! does not fit moves to the next page whole.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON / Resume)
//!       ↓
//!   [model]   : Document: blocks, page config, metadata
//!       ↓
//!   [measure] : Block heights from font metrics + line breaking
//!       ↓
//!   [layout]  : Greedy paginator: blocks → placements per page
//!       ↓
//!   [pdf]     : Serialize to PDF bytes
//! ```

pub mod error;
pub mod font;
pub mod layout;
pub mod measure;
pub mod model;
pub mod pdf;
pub mod resume;
pub mod style;
pub mod text;

pub use error::{Error, Result};

use font::FontContext;
use layout::{LayoutInfo, Pagination, Paginator};
use measure::TextMeasurer;
use model::Document;
use pdf::PdfWriter;

/// Flow a document's blocks into pages using real font metrics.
pub fn paginate<'a>(document: &'a Document, font_context: &FontContext) -> Result<Pagination<'a>> {
    let content = document.page.content_rect()?;
    Paginator::new(TextMeasurer::new(font_context)).paginate(&document.blocks, content)
}

/// Render a document to PDF bytes.
///
/// This is the primary entry point. Registers the document's fonts,
/// paginates, and returns the raw bytes of a valid PDF file.
pub fn render(document: &Document) -> Result<Vec<u8>> {
    let font_context = FontContext::with_fonts(&document.fonts)?;
    let pagination = paginate(document, &font_context)?;
    let writer = PdfWriter::new();
    Ok(writer.write(&pagination, &document.page, &document.metadata, &font_context))
}

/// Render a document described as JSON to PDF bytes.
pub fn render_json(json: &str) -> Result<Vec<u8>> {
    render(&parse_document(json)?)
}

/// Paginate a JSON document and return the placements as pretty JSON.
pub fn layout_json(json: &str) -> Result<String> {
    layout_info(&parse_document(json)?)
}

/// Parse a JSON document and give id-less blocks their positional ids.
pub fn parse_document(json: &str) -> Result<Document> {
    let mut document: Document = serde_json::from_str(json)?;
    document.assign_ids();
    Ok(document)
}

/// Paginate a document and return the placements as pretty JSON.
pub fn layout_info(document: &Document) -> Result<String> {
    let font_context = FontContext::with_fonts(&document.fonts)?;
    let pagination = paginate(document, &font_context)?;
    let info = LayoutInfo::from_pagination(&pagination);
    Ok(serde_json::to_string_pretty(&info)?)
}
