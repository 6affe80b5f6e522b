//! # Paginator
//!
//! Flows an ordered list of blocks into pages of a fixed content area.
//!
//! The algorithm is a single greedy pass:
//!
//! 1. Open page 0 with the cursor at the top of the content area
//! 2. Measure the next block at the content width
//! 3. If it does not fit below the cursor and the page already holds
//!    something, close the page and open the next one
//! 4. Place the block at the cursor, move the cursor down by its height
//!
//! A page-break block closes the current page unconditionally. A block taller
//! than a whole page is placed at the top of a page and allowed to overflow;
//! blocks are never split.
//!
//! ## Coordinates
//!
//! Placements use the content area's own frame: origin at its top-left
//! corner, `y` growing downward. The PDF writer converts to page coordinates
//! once, when drawing.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::measure::Measure;
use crate::model::{BlockContent, BlockId, PageRect, StyledBlock};

/// Slack for float comparisons when deciding whether a block fits.
const FIT_TOLERANCE: f64 = 1e-6;

/// A rectangle inside the content area (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Where a block landed.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<'a> {
    pub page_index: usize,
    pub block: &'a StyledBlock,
    pub rect: Rect,
}

/// One page's placements, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPage<'a> {
    pub index: usize,
    pub placements: Vec<Placement<'a>>,
}

/// The paginator's output: every page in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination<'a> {
    pub content: PageRect,
    pub pages: Vec<LayoutPage<'a>>,
}

impl<'a> Pagination<'a> {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All placements, page by page, top to bottom.
    pub fn placements(&self) -> impl Iterator<Item = &Placement<'a>> {
        self.pages.iter().flat_map(|p| p.placements.iter())
    }
}

/// Tracks where we are on the current page.
#[derive(Debug)]
struct PageCursor<'a> {
    index: usize,
    y: f64,
    placements: Vec<Placement<'a>>,
}

impl<'a> PageCursor<'a> {
    fn new(index: usize) -> Self {
        Self {
            index,
            y: 0.0,
            placements: Vec::new(),
        }
    }

    fn fits(&self, height: f64, content: &PageRect) -> bool {
        self.y + height <= content.height + FIT_TOLERANCE
    }

    fn place(&mut self, block: &'a StyledBlock, height: f64, content: &PageRect) {
        let rect = Rect {
            x: 0.0,
            y: self.y,
            width: content.width,
            height,
        };
        log::trace!(
            "page {}: {} {} at y={:.2} h={:.2}",
            self.index,
            block.content.kind_name(),
            block.id,
            rect.y,
            rect.height
        );
        self.placements.push(Placement {
            page_index: self.index,
            block,
            rect,
        });
        self.y += height;
    }

    /// Close this page and return it along with a fresh cursor for the next.
    fn finish(self) -> (LayoutPage<'a>, PageCursor<'a>) {
        log::debug!(
            "closing page {} with {} placements",
            self.index,
            self.placements.len()
        );
        let next = PageCursor::new(self.index + 1);
        let page = LayoutPage {
            index: self.index,
            placements: self.placements,
        };
        (page, next)
    }
}

/// Converts an ordered block list into page-grouped placements.
///
/// Holds nothing but the measurer, so one paginator can serve many documents
/// and the same input always yields the same output.
pub struct Paginator<M> {
    measurer: M,
}

impl<M: Measure> Paginator<M> {
    pub fn new(measurer: M) -> Self {
        Self { measurer }
    }

    /// Flow `blocks` into pages of `content`.
    ///
    /// Fails only if the measurer reports a negative or non-finite height.
    /// Zero blocks yield zero pages.
    pub fn paginate<'a>(&self, blocks: &'a [StyledBlock], content: PageRect) -> Result<Pagination<'a>> {
        let mut pages = Vec::new();
        let mut cursor = PageCursor::new(0);

        for block in blocks {
            if let BlockContent::PageBreak = block.content {
                let (page, next) = cursor.finish();
                pages.push(page);
                cursor = next;
                continue;
            }

            let height = self.measure(block, content.width)?;

            if !cursor.fits(height, &content) && !cursor.placements.is_empty() {
                let (page, next) = cursor.finish();
                pages.push(page);
                cursor = next;
            }

            if height > content.height + FIT_TOLERANCE {
                log::debug!(
                    "block {} is {:.2}pt tall, taller than the {:.2}pt page; it will overflow",
                    block.id,
                    height,
                    content.height
                );
            }

            cursor.place(block, height, &content);
        }

        if !cursor.placements.is_empty() {
            let (page, _) = cursor.finish();
            pages.push(page);
        }

        Ok(Pagination { content, pages })
    }

    fn measure(&self, block: &StyledBlock, width: f64) -> Result<f64> {
        let height = self.measurer.measure_height(&block.content, width);
        if !height.is_finite() || height < 0.0 {
            return Err(Error::InvalidMeasurement {
                block_id: block.id.clone(),
                height,
            });
        }
        Ok(height)
    }
}

// ── Serializable layout metadata (for debugging / the CLI) ───

/// Complete layout metadata for all pages.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInfo {
    pub content_width: f64,
    pub content_height: f64,
    pub pages: Vec<PageInfo>,
}

/// Layout metadata for a single page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub index: usize,
    pub elements: Vec<ElementInfo>,
}

/// One placed block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInfo {
    pub id: BlockId,
    pub kind: &'static str,
    #[serde(flatten)]
    pub rect: Rect,
}

impl LayoutInfo {
    pub fn from_pagination(pagination: &Pagination<'_>) -> Self {
        LayoutInfo {
            content_width: pagination.content.width,
            content_height: pagination.content.height,
            pages: pagination
                .pages
                .iter()
                .map(|page| PageInfo {
                    index: page.index,
                    elements: page
                        .placements
                        .iter()
                        .map(|p| ElementInfo {
                            id: p.block.id.clone(),
                            kind: p.block.content.kind_name(),
                            rect: p.rect,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
