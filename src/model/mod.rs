//! # Document Model
//!
//! The input representation for pagination. A document is a flat, ordered
//! list of blocks plus the page they flow into. Blocks only describe *what*
//! to draw; where they land is decided by the paginator.
//!
//! There are four kinds of block: styled text, simple tables, spacers the
//! caller inserts for vertical gaps, and explicit page breaks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::style::{BorderStyle, Color, FontDescriptor, TextAlign, TextStyle};

/// A complete document ready for pagination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// The blocks, in reading order.
    pub blocks: Vec<StyledBlock>,

    /// Page size and margins. Every page of the document shares it.
    #[serde(default)]
    pub page: PageConfig,

    /// Document metadata (title, author, etc.)
    #[serde(default)]
    pub metadata: Metadata,

    /// Custom fonts to register before measuring.
    #[serde(default)]
    pub fonts: Vec<FontEntry>,
}

impl Document {
    pub fn new(page: PageConfig) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Append a block. Blocks without an id get `b{position}`.
    pub fn push(&mut self, mut block: StyledBlock) -> &mut Self {
        block.id.fill_positional(self.blocks.len());
        self.blocks.push(block);
        self
    }

    /// Give every block without an id its positional `b{index}` id.
    ///
    /// Blocks deserialized from JSON may omit `id`; call this before
    /// paginating so placements can be told apart.
    pub fn assign_ids(&mut self) -> &mut Self {
        for (index, block) in self.blocks.iter_mut().enumerate() {
            block.id.fill_positional(index);
        }
        self
    }

    pub fn text(&mut self, text: &str, style: TextStyle) -> &mut Self {
        self.push(StyledBlock::text(TextContent::styled(text, style)))
    }

    pub fn space(&mut self, height: f64) -> &mut Self {
        self.push(StyledBlock::spacer(height))
    }

    pub fn page_break(&mut self) -> &mut Self {
        self.push(StyledBlock::page_break())
    }
}

/// A custom font to register with the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontEntry {
    /// Font family name (e.g. "Inter", "Roboto").
    pub family: String,
    /// Base64-encoded font data, or a data URI (e.g. "data:font/ttf;base64,...").
    pub src: String,
    /// Font weight (100-900). Defaults to 400.
    #[serde(default = "default_weight")]
    pub weight: u32,
    /// Whether this is an italic variant.
    #[serde(default)]
    pub italic: bool,
}

fn default_weight() -> u32 {
    400
}

/// Document metadata embedded in the PDF.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
}

/// Configuration for the page: size and margins.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageConfig {
    /// Page size. Defaults to US Letter.
    #[serde(default = "PageSize::default")]
    pub size: PageSize,

    /// Page margins in points (1/72 inch).
    #[serde(default = "default_margin")]
    pub margin: Edges,
}

fn default_margin() -> Edges {
    Edges::uniform(50.0)
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: PageSize::Letter,
            margin: default_margin(),
        }
    }
}

impl PageConfig {
    /// The area blocks flow into: the page minus its margins.
    pub fn content_rect(&self) -> Result<PageRect> {
        let (w, h) = self.size.dimensions();
        PageRect::new(w - self.margin.horizontal(), h - self.margin.vertical())
    }
}

/// Standard page sizes in points.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum PageSize {
    A4,
    A5,
    #[default]
    Letter,
    Legal,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// Returns (width, height) in points.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::A5 => (419.53, 595.28),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Edge values (top, right, bottom, left), used for margins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// The fixed content area every page offers. Origin is the top-left corner
/// of the area; `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageRect {
    pub width: f64,
    pub height: f64,
}

impl PageRect {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) {
            return Err(Error::InvalidPage { width, height });
        }
        Ok(Self { width, height })
    }
}

/// Opaque block identity. Only used to tell blocks apart in output and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub String);

impl BlockId {
    fn fill_positional(&mut self, index: usize) {
        if self.0.is_empty() {
            self.0 = format!("b{index}");
        }
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        BlockId(s.to_string())
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A unit of flowable content.
///
/// Two blocks with identical text are still different blocks, so equality
/// compares ids only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyledBlock {
    #[serde(default)]
    pub id: BlockId,
    pub content: BlockContent,
}

impl PartialEq for StyledBlock {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for StyledBlock {}

impl StyledBlock {
    pub fn new(content: BlockContent) -> Self {
        Self {
            id: BlockId::default(),
            content,
        }
    }

    pub fn text(content: TextContent) -> Self {
        Self::new(BlockContent::Text(content))
    }

    pub fn table(content: TableContent) -> Self {
        Self::new(BlockContent::Table(content))
    }

    pub fn spacer(height: f64) -> Self {
        Self::new(BlockContent::Spacer { height })
    }

    pub fn page_break() -> Self {
        Self::new(BlockContent::PageBreak)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = BlockId(id.into());
        self
    }
}

/// What a block draws.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockContent {
    Text(TextContent),
    Table(TableContent),
    /// Vertical gap of a fixed height. Draws nothing.
    Spacer { height: f64 },
    /// Ends the current page. Never placed.
    PageBreak,
}

impl BlockContent {
    pub fn kind_name(&self) -> &'static str {
        match self {
            BlockContent::Text(_) => "Text",
            BlockContent::Table(_) => "Table",
            BlockContent::Spacer { .. } => "Spacer",
            BlockContent::PageBreak => "PageBreak",
        }
    }
}

/// A run of text sharing one font, color and alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub text: String,
    #[serde(default)]
    pub font: FontDescriptor,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub alignment: TextAlign,
    /// Line height as a multiplier of font size.
    #[serde(default = "default_line_height")]
    pub line_height: f64,
}

fn default_line_height() -> f64 {
    1.2
}

impl TextContent {
    pub fn new(text: &str, font: FontDescriptor) -> Self {
        Self {
            text: text.to_string(),
            font,
            color: Color::BLACK,
            alignment: TextAlign::Left,
            line_height: default_line_height(),
        }
    }

    pub fn styled(text: &str, style: TextStyle) -> Self {
        Self::new(text, style.font())
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, alignment: TextAlign) -> Self {
        self.alignment = alignment;
        self
    }
}

/// A grid of text cells. Rows may be ragged; missing cells are empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableContent {
    pub rows: Vec<Vec<TableCell>>,
    /// Column width definitions. If omitted, columns share the width evenly.
    #[serde(default)]
    pub columns: Vec<ColumnWidth>,
    #[serde(default)]
    pub border: BorderStyle,
    /// Inner padding on every side of every cell.
    #[serde(default)]
    pub cell_padding: f64,
}

impl TableContent {
    /// An empty `rows` × `cols` grid.
    pub fn grid(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![vec![TableCell::default(); cols]; rows],
            columns: Vec::new(),
            border: BorderStyle::None,
            cell_padding: 0.0,
        }
    }

    pub fn set(&mut self, row: usize, col: usize, cell: TableCell) {
        if let Some(slot) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = cell;
        }
    }

    /// Number of columns: the longest row wins.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub text: TextContent,
    #[serde(default)]
    pub alignment: TextAlign,
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            text: TextContent::new("", FontDescriptor::default()),
            alignment: TextAlign::Left,
        }
    }
}

impl TableCell {
    pub fn new(text: TextContent, alignment: TextAlign) -> Self {
        Self { text, alignment }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColumnWidth {
    /// Fraction of available width (0.0-1.0).
    Fraction(f64),
    /// Fixed width in points.
    Fixed(f64),
    /// Distribute remaining space evenly among Auto columns.
    Auto,
}
