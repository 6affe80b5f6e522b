//! # Measurement
//!
//! The paginator never looks inside a block. It asks a [`Measure`] for the
//! height the block needs at the content width and trusts the answer.
//! [`TextMeasurer`] is the real implementation, built on font metrics and
//! the greedy line breaker. Tests and callers with their own text engine can
//! plug in anything else, including a closure.

pub mod table;

use crate::font::FontContext;
use crate::model::{BlockContent, TableContent, TextContent};
use crate::text::TextLayout;

pub use table::TableLayout;

/// The height-measurement primitive.
///
/// Must return the height in points needed to render `content` wrapped to
/// `max_width`, and must return the same answer for the same input.
pub trait Measure {
    fn measure_height(&self, content: &BlockContent, max_width: f64) -> f64;
}

impl<F> Measure for F
where
    F: Fn(&BlockContent, f64) -> f64,
{
    fn measure_height(&self, content: &BlockContent, max_width: f64) -> f64 {
        self(content, max_width)
    }
}

/// Measures blocks with real font metrics.
pub struct TextMeasurer<'a> {
    font_context: &'a FontContext,
    text_layout: TextLayout,
}

impl<'a> TextMeasurer<'a> {
    pub fn new(font_context: &'a FontContext) -> Self {
        Self {
            font_context,
            text_layout: TextLayout::new(),
        }
    }

    /// Height of a text run, rounded up to a whole point.
    pub fn text_height(&self, text: &TextContent, max_width: f64) -> f64 {
        self.text_layout
            .measure_height(
                self.font_context,
                &text.text,
                max_width,
                &text.font,
                text.line_height,
            )
            .ceil()
    }

    /// Row heights and column widths for a table at `max_width`.
    pub fn table_layout(&self, table: &TableContent, max_width: f64) -> TableLayout {
        TableLayout::compute(table, max_width, |text, width| {
            self.text_height(text, width)
        })
    }
}

impl Measure for TextMeasurer<'_> {
    fn measure_height(&self, content: &BlockContent, max_width: f64) -> f64 {
        match content {
            BlockContent::Text(text) => self.text_height(text, max_width),
            BlockContent::Table(table) => self.table_layout(table, max_width).height(),
            BlockContent::Spacer { height } => *height,
            BlockContent::PageBreak => 0.0,
        }
    }
}
