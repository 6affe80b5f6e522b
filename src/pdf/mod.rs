//! # PDF Serializer
//!
//! Takes a pagination and writes a valid PDF file.
//!
//! This is a from-scratch PDF 1.7 writer covering the subset a text and
//! table document needs: Type1 standard fonts, Flate-compressed content
//! streams, an info dictionary.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (fonts, pages, content streams, etc.)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Placements arrive in content-area coordinates (top-left origin). They are
//! shifted by the page margins and flipped into PDF's bottom-left space here.

use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::font::{FontContext, FontData, FontKey, StandardFont};
use crate::layout::{LayoutPage, Pagination, Placement};
use crate::measure::TextMeasurer;
use crate::model::{BlockContent, Metadata, PageConfig, TableContent, TextContent};
use crate::style::{BorderStyle, FontDescriptor, TextAlign};
use crate::text::TextLayout;

/// Fraction of the font size that sits above the baseline.
const ASCENT: f64 = 0.8;

pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// Font resources in registration order; `/F{i}` is the i-th entry.
    font_objects: Vec<(FontKey, usize)>,
}

struct PdfObject {
    data: Vec<u8>,
}

/// Everything the drawing code needs to place one page's content.
struct PageCanvas<'a> {
    font_context: &'a FontContext,
    font_objects: &'a [(FontKey, usize)],
    page_height: f64,
    /// Content-area origin in PDF space (left edge, top edge).
    origin_x: f64,
    origin_top: f64,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write paginated blocks to a PDF byte vector.
    ///
    /// A pagination with no pages still produces one blank page.
    pub fn write(
        &self,
        pagination: &Pagination<'_>,
        page: &PageConfig,
        metadata: &Metadata,
        font_context: &FontContext,
    ) -> Vec<u8> {
        let mut builder = PdfBuilder {
            objects: Vec::new(),
            font_objects: Vec::new(),
        };

        // Reserve object IDs:
        // 0 = placeholder (PDF objects are 1-indexed)
        // 1 = Catalog
        // 2 = Pages (page tree root)
        // 3+ = fonts, then page objects, then content streams
        for _ in 0..3 {
            builder.objects.push(PdfObject { data: vec![] });
        }

        self.register_fonts(&mut builder, pagination, font_context);

        let (page_width, page_height) = page.size.dimensions();
        let canvas = PageCanvas {
            font_context,
            font_objects: &builder.font_objects,
            page_height,
            origin_x: page.margin.left,
            origin_top: page.margin.top,
        };

        let blank = LayoutPage {
            index: 0,
            placements: Vec::new(),
        };
        let pages: Vec<&LayoutPage<'_>> = if pagination.pages.is_empty() {
            vec![&blank]
        } else {
            pagination.pages.iter().collect()
        };

        let streams: Vec<String> = pages
            .iter()
            .map(|p| self.build_content_stream(p, &canvas))
            .collect();
        let font_resources = self.build_font_resource_dict(&builder.font_objects);

        let mut page_obj_ids: Vec<usize> = Vec::new();
        for content in streams {
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let content_obj_id = builder.objects.len();
            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            builder.objects.push(PdfObject { data: content_data });

            let page_obj_id = builder.objects.len();
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << {} >> >> >>",
                page_width, page_height, content_obj_id, font_resources
            );
            builder.objects.push(PdfObject {
                data: page_dict.into_bytes(),
            });
            page_obj_ids.push(page_obj_id);
        }

        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let info_obj_id = self.write_info(&mut builder, metadata);

        log::debug!(
            "wrote {} pages, {} font resources",
            page_obj_ids.len(),
            builder.font_objects.len()
        );

        self.serialize(&builder, info_obj_id)
    }

    /// Info dictionary, only when the document has metadata.
    fn write_info(&self, builder: &mut PdfBuilder, metadata: &Metadata) -> Option<usize> {
        let fields = [
            ("Title", &metadata.title),
            ("Author", &metadata.author),
            ("Subject", &metadata.subject),
            ("Creator", &metadata.creator),
        ];
        if fields.iter().all(|(_, v)| v.is_none()) {
            return None;
        }

        let mut info = String::from("<< ");
        for (key, value) in fields {
            if let Some(value) = value {
                let _ = write!(info, "/{} ({}) ", key, Self::escape_pdf_string(value));
            }
        }
        info.push_str("/Producer (pageflow) >>");

        let id = builder.objects.len();
        builder.objects.push(PdfObject {
            data: info.into_bytes(),
        });
        Some(id)
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(&self, page: &LayoutPage<'_>, canvas: &PageCanvas<'_>) -> String {
        let mut stream = String::new();
        for placement in &page.placements {
            self.draw_at(&mut stream, placement, canvas);
        }
        stream
    }

    /// Draw one placed block.
    fn draw_at(&self, stream: &mut String, placement: &Placement<'_>, canvas: &PageCanvas<'_>) {
        let rect = placement.rect;
        let left = canvas.origin_x + rect.x;
        let top = canvas.origin_top + rect.y;

        match &placement.block.content {
            BlockContent::Text(text) => {
                self.write_text(stream, text, text.alignment, left, top, rect.width, canvas);
            }
            BlockContent::Table(table) => {
                self.write_table(stream, table, left, top, rect.width, canvas);
            }
            BlockContent::Spacer { .. } | BlockContent::PageBreak => {}
        }
    }

    /// Write wrapped text whose box starts at (`left`, `top`) in top-down
    /// page coordinates.
    #[allow(clippy::too_many_arguments)]
    fn write_text(
        &self,
        stream: &mut String,
        text: &TextContent,
        alignment: TextAlign,
        left: f64,
        top: f64,
        width: f64,
        canvas: &PageCanvas<'_>,
    ) {
        let lines =
            TextLayout::new().break_into_lines(canvas.font_context, &text.text, width, &text.font);
        if lines.iter().all(|l| l.chars.is_empty()) {
            return;
        }

        let font = &text.font;
        let font_name = format!("F{}", self.font_index(font, canvas.font_objects));
        let pitch = font.size * text.line_height;
        let color = text.color;

        let _ = write!(
            stream,
            "BT\n{:.3} {:.3} {:.3} rg\n/{} {:.1} Tf\n",
            color.r, color.g, color.b, font_name, font.size
        );

        let last = lines.len() - 1;
        for (i, line) in lines.iter().enumerate() {
            if line.chars.is_empty() {
                continue;
            }

            let slack = (width - line.width).max(0.0);
            let (x, word_spacing) = match alignment {
                TextAlign::Left => (left, 0.0),
                TextAlign::Right => (left + slack, 0.0),
                TextAlign::Center => (left + slack / 2.0, 0.0),
                TextAlign::Justify => {
                    let spaces = line.space_count();
                    if i < last && spaces > 0 {
                        (left, slack / spaces as f64)
                    } else {
                        (left, 0.0)
                    }
                }
            };

            let baseline = top + i as f64 * pitch + (pitch - font.size) / 2.0 + font.size * ASCENT;
            let pdf_y = canvas.page_height - baseline;

            if word_spacing > 0.0 {
                let _ = writeln!(stream, "{:.3} Tw", word_spacing);
            }
            let _ = write!(
                stream,
                "1 0 0 1 {:.2} {:.2} Tm\n({}) Tj\n",
                x,
                pdf_y,
                Self::escape_pdf_string(&line.text)
            );
            if word_spacing > 0.0 {
                stream.push_str("0 Tw\n");
            }
        }

        stream.push_str("ET\n");
    }

    fn write_table(
        &self,
        stream: &mut String,
        table: &TableContent,
        left: f64,
        top: f64,
        width: f64,
        canvas: &PageCanvas<'_>,
    ) {
        let layout = TextMeasurer::new(canvas.font_context).table_layout(table, width);
        let col_offsets = layout.column_offsets();
        let row_offsets = layout.row_offsets();
        let pad = layout.cell_padding;

        for (r, row) in table.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let cell_left = left + col_offsets[c] + pad;
                let cell_top = top + row_offsets[r] + pad;
                let cell_width = (layout.column_widths[c] - 2.0 * pad).max(0.0);
                self.write_text(stream, &cell.text, cell.alignment, cell_left, cell_top, cell_width, canvas);
            }
        }

        if let BorderStyle::Solid { width: bw, color } = table.border {
            if bw <= 0.0 {
                return;
            }
            let height = layout.height();
            let half = bw / 2.0;
            let to_pdf = |y: f64| canvas.page_height - y;

            let _ = write!(
                stream,
                "q\n{:.3} {:.3} {:.3} RG\n{:.2} w\n",
                color.r, color.g, color.b, bw
            );
            let _ = writeln!(
                stream,
                "{:.2} {:.2} {:.2} {:.2} re",
                left + half,
                to_pdf(top + height - half),
                width - bw,
                height - bw
            );
            for &x in col_offsets.iter().skip(1) {
                let _ = write!(
                    stream,
                    "{:.2} {:.2} m\n{:.2} {:.2} l\n",
                    left + x,
                    to_pdf(top + half),
                    left + x,
                    to_pdf(top + height - half)
                );
            }
            for &y in row_offsets.iter().skip(1) {
                let _ = write!(
                    stream,
                    "{:.2} {:.2} m\n{:.2} {:.2} l\n",
                    left + half,
                    to_pdf(top + y),
                    left + width - half,
                    to_pdf(top + y)
                );
            }
            stream.push_str("S\nQ\n");
        }
    }

    /// Register fonts used across all pages. Each unique (family, weight,
    /// italic) combination gets its own PDF font object.
    fn register_fonts(&self, builder: &mut PdfBuilder, pagination: &Pagination<'_>, font_context: &FontContext) {
        let mut keys: Vec<FontKey> = Vec::new();
        for placement in pagination.placements() {
            match &placement.block.content {
                BlockContent::Text(text) => keys.push(FontKey::snapped(&text.font)),
                BlockContent::Table(table) => keys.extend(
                    table
                        .rows
                        .iter()
                        .flatten()
                        .map(|cell| FontKey::snapped(&cell.text.font)),
                ),
                BlockContent::Spacer { .. } | BlockContent::PageBreak => {}
            }
        }

        // Sort for deterministic ordering, then dedup
        keys.sort();
        keys.dedup();

        // Always have at least Helvetica
        if keys.is_empty() {
            keys.push(FontKey::snapped(&FontDescriptor::default()));
        }

        for key in keys {
            let std_font = match font_context.registry().resolve(&key.family, key.weight, key.italic) {
                FontData::Standard(std_font) => *std_font,
                FontData::Custom { .. } => {
                    log::warn!(
                        "custom font {} is not embedded; drawing it with Helvetica",
                        key.family
                    );
                    StandardFont::helvetica_like(key.weight, key.italic)
                }
            };

            let obj_id = builder.objects.len();
            let font_dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                std_font.pdf_name()
            );
            builder.objects.push(PdfObject {
                data: font_dict.into_bytes(),
            });
            builder.font_objects.push((key, obj_id));
        }
    }

    fn build_font_resource_dict(&self, font_objects: &[(FontKey, usize)]) -> String {
        font_objects
            .iter()
            .enumerate()
            .map(|(i, (_, obj_id))| format!("/F{} {} 0 R", i, obj_id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Look up the font index (/F0, /F1, etc.) for a descriptor.
    fn font_index(&self, font: &FontDescriptor, font_objects: &[(FontKey, usize)]) -> usize {
        let key = FontKey::snapped(font);
        font_objects
            .iter()
            .position(|(k, _)| *k == key)
            .unwrap_or(0)
    }

    /// Escape a string for a PDF literal, encoding it as WinAnsi.
    ///
    /// Characters WinAnsi cannot represent become `?`.
    fn escape_pdf_string(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for ch in s.chars() {
            match ch {
                '\\' => out.push_str("\\\\"),
                '(' => out.push_str("\\("),
                ')' => out.push_str("\\)"),
                ' '..='~' => out.push(ch),
                _ => match win_ansi_code(ch) {
                    Some(code) => {
                        let _ = write!(out, "\\{:03o}", code);
                    }
                    None => out.push('?'),
                },
            }
        }
        out
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: Option<usize>) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        // Header
        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let header = format!("{} 0 obj\n", i);
            output.extend_from_slice(header.as_bytes());
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(output, "trailer\n<< /Size {} /Root 1 0 R", builder.objects.len());
        if let Some(info_id) = info_obj_id {
            let _ = write!(output, " /Info {} 0 R", info_id);
        }
        let _ = write!(output, " >>\nstartxref\n{}\n%%EOF\n", xref_offset);

        output
    }
}

/// WinAnsiEncoding byte for a non-ASCII character.
fn win_ansi_code(ch: char) -> Option<u8> {
    let code = match ch {
        '\u{00A0}'..='\u{00FF}' => ch as u32 as u8,
        '\u{20AC}' => 0x80,
        '\u{2026}' => 0x85,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{2122}' => 0x99,
        _ => return None,
    };
    Some(code)
}
