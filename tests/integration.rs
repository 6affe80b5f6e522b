//! Integration tests for the pageflow pipeline.
//!
//! These tests exercise the full path from documents (built in code or
//! parsed from JSON) through pagination to PDF output.
//! They verify:
//! - Pages break exactly where the greedy flow says they should
//! - Explicit page breaks, oversized blocks and empty input behave
//! - PDF output is structurally valid
//! - Bad input surfaces as the right error
//! - A resume assembles, paginates and renders

use pageflow::font::FontContext;
use pageflow::layout::{LayoutPage, Pagination};
use pageflow::model::*;
use pageflow::resume::{Resume, Skill};
use pageflow::style::*;
use pageflow::Error;

// ─── Helpers ────────────────────────────────────────────────────

/// A page whose content area is exactly 612 × 792.
fn tall_page() -> PageConfig {
    PageConfig {
        size: PageSize::Custom {
            width: 712.0,
            height: 892.0,
        },
        margin: Edges::uniform(50.0),
    }
}

fn doc_of(blocks: Vec<StyledBlock>) -> Document {
    let mut doc = Document::new(tall_page());
    for block in blocks {
        doc.push(block);
    }
    doc
}

fn spacers(count: usize, height: f64) -> Vec<StyledBlock> {
    (0..count)
        .map(|i| StyledBlock::spacer(height).with_id(format!("s{i}")))
        .collect()
}

fn paginate<'a>(doc: &'a Document, ctx: &FontContext) -> Pagination<'a> {
    pageflow::paginate(doc, ctx).expect("pagination should succeed")
}

fn page_ids(page: &LayoutPage<'_>) -> Vec<String> {
    page.placements.iter().map(|p| p.block.id.0.clone()).collect()
}

fn assert_valid_pdf(bytes: &[u8]) {
    assert!(bytes.len() > 50, "PDF too small to be valid");
    assert!(bytes.starts_with(b"%PDF-1.7"), "Missing PDF header");
    assert!(
        bytes.windows(5).any(|w| w == b"%%EOF"),
        "Missing %%EOF marker"
    );
    assert!(
        bytes.windows(4).any(|w| w == b"xref"),
        "Missing xref table"
    );
    assert!(
        bytes.windows(7).any(|w| w == b"trailer"),
        "Missing trailer"
    );
}

fn page_count_in_pdf(bytes: &[u8]) -> usize {
    let text = String::from_utf8_lossy(bytes);
    let start = text.find("/Count ").expect("page tree has a count") + "/Count ".len();
    text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .expect("count is a number")
}

// ─── Pagination Tests ───────────────────────────────────────────

#[test]
fn test_empty_document_has_no_pages() {
    let doc = doc_of(vec![]);
    let ctx = FontContext::new();
    assert_eq!(paginate(&doc, &ctx).page_count(), 0);

    // The PDF still gets one blank page
    let bytes = pageflow::render(&doc).unwrap();
    assert_valid_pdf(&bytes);
    assert_eq!(page_count_in_pdf(&bytes), 1);
}

#[test]
fn test_single_short_block() {
    let doc = doc_of(vec![StyledBlock::spacer(20.0).with_id("a")]);
    let ctx = FontContext::new();
    let result = paginate(&doc, &ctx);

    assert_eq!(result.page_count(), 1);
    let p = &result.pages[0].placements[0];
    assert_eq!(p.page_index, 0);
    assert_eq!(p.rect.y, 0.0);
    assert_eq!(p.rect.height, 20.0);
    assert_eq!(p.rect.width, 612.0);
}

#[test]
fn test_forced_overflow() {
    let doc = doc_of(spacers(40, 30.0));
    let ctx = FontContext::new();
    let result = paginate(&doc, &ctx);

    assert_eq!(result.page_count(), 2);
    assert_eq!(result.pages[0].placements.len(), 26);
    assert_eq!(result.pages[1].placements.len(), 14);
    assert_eq!(page_ids(&result.pages[1])[0], "s26");

    let bytes = pageflow::render(&doc).unwrap();
    assert_eq!(page_count_in_pdf(&bytes), 2);
}

#[test]
fn test_oversized_block_is_placed_whole() {
    let doc = doc_of(vec![StyledBlock::spacer(2000.0).with_id("huge")]);
    let ctx = FontContext::new();
    let result = paginate(&doc, &ctx);

    assert_eq!(result.page_count(), 1);
    assert_eq!(result.pages[0].placements[0].rect.y, 0.0);
    assert_eq!(result.pages[0].placements[0].rect.height, 2000.0);
}

#[test]
fn test_explicit_page_break() {
    let doc = doc_of(vec![
        StyledBlock::text(TextContent::styled("A", TextStyle::Body)).with_id("a"),
        StyledBlock::page_break(),
        StyledBlock::text(TextContent::styled("B", TextStyle::Body)).with_id("b"),
    ]);
    let ctx = FontContext::new();
    let result = paginate(&doc, &ctx);

    assert_eq!(result.page_count(), 2);
    assert_eq!(page_ids(&result.pages[0]), vec!["a"]);
    assert_eq!(page_ids(&result.pages[1]), vec!["b"]);
}

#[test]
fn test_order_preserved_across_pages() {
    let mut blocks = Vec::new();
    for i in 0..120 {
        let text = format!("Paragraph {i}: the quick brown fox jumps over the lazy dog.");
        blocks.push(StyledBlock::text(TextContent::styled(&text, TextStyle::Title2)).with_id(format!("p{i}")));
    }
    let doc = doc_of(blocks);
    let ctx = FontContext::new();
    let result = paginate(&doc, &ctx);

    assert!(result.page_count() > 1);
    let placed: Vec<String> = result.placements().map(|p| p.block.id.0.clone()).collect();
    let expected: Vec<String> = (0..120).map(|i| format!("p{i}")).collect();
    assert_eq!(placed, expected);

    for page in &result.pages {
        for p in &page.placements {
            assert!(p.rect.y + p.rect.height <= 792.0 + 1e-6);
        }
    }
}

#[test]
fn test_larger_font_needs_more_pages() {
    let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(4);
    let build = |style: TextStyle| {
        doc_of(
            (0..60)
                .map(|_| StyledBlock::text(TextContent::styled(&text, style)))
                .collect(),
        )
    };
    let ctx = FontContext::new();
    let small = build(TextStyle::Footnote);
    let large = build(TextStyle::LargeTitle);
    assert!(paginate(&large, &ctx).page_count() > paginate(&small, &ctx).page_count());
}

#[test]
fn test_narrower_page_wraps_more() {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(10);
    let mut doc = doc_of(vec![StyledBlock::text(TextContent::styled(&text, TextStyle::Body)).with_id("t")]);
    let ctx = FontContext::new();
    let wide = paginate(&doc, &ctx).pages[0].placements[0].rect.height;

    doc.page.margin = Edges::symmetric(50.0, 250.0);
    let narrow = paginate(&doc, &ctx).pages[0].placements[0].rect.height;
    assert!(narrow > wide);
}

#[test]
fn test_pagination_is_idempotent() {
    let doc = Resume::sample().to_document();
    let ctx = FontContext::new();
    assert_eq!(paginate(&doc, &ctx), paginate(&doc, &ctx));
}

// ─── Error Tests ────────────────────────────────────────────────

#[test]
fn test_negative_spacer_is_invalid_measurement() {
    let doc = doc_of(vec![StyledBlock::spacer(-5.0).with_id("neg")]);
    match pageflow::render(&doc) {
        Err(Error::InvalidMeasurement { block_id, height }) => {
            assert_eq!(block_id.0, "neg");
            assert_eq!(height, -5.0);
        }
        other => panic!("expected InvalidMeasurement, got {:?}", other.map(|b| b.len())),
    }
}

#[test]
fn test_margins_larger_than_page() {
    let mut doc = doc_of(vec![StyledBlock::spacer(5.0)]);
    doc.page.margin = Edges::uniform(500.0);
    assert!(matches!(
        pageflow::render(&doc),
        Err(Error::InvalidPage { .. })
    ));
}

#[test]
fn test_malformed_json() {
    let err = pageflow::render_json(r#"{ "blocks": [ }"#).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert!(err.to_string().contains("Hint:"));
}

#[test]
fn test_undecodable_font() {
    let json = r#"{
        "blocks": [],
        "fonts": [ { "family": "Broken", "src": "not base64!!" } ]
    }"#;
    assert!(matches!(pageflow::render_json(json), Err(Error::Font(_))));
}

// ─── JSON Tests ─────────────────────────────────────────────────

#[test]
fn test_minimal_json() {
    let json = r#"{
        "blocks": [
            { "id": "hello", "content": { "type": "Text", "text": "Hello from JSON", "font": { "size": 14 } } }
        ]
    }"#;
    let bytes = pageflow::render_json(json).expect("Should parse minimal JSON");
    assert_valid_pdf(&bytes);
}

#[test]
fn test_page_config_json() {
    let json = r#"{
        "page": {
            "size": "A4",
            "margin": { "top": 72, "right": 72, "bottom": 72, "left": 72 }
        },
        "metadata": { "title": "Quarterly Report" },
        "blocks": [
            {
                "content": {
                    "type": "Text",
                    "text": "Centered",
                    "font": { "family": "Times", "size": 16, "weight": 700 },
                    "alignment": "Center",
                    "lineHeight": 1.5,
                    "color": { "r": 0.2, "g": 0.2, "b": 0.6 }
                }
            }
        ]
    }"#;
    let doc: Document = serde_json::from_str(json).expect("Should deserialize camelCase JSON");
    assert!(matches!(doc.page.size, PageSize::A4));
    assert_eq!(doc.page.margin.top, 72.0);

    let bytes = pageflow::render(&doc).unwrap();
    assert_valid_pdf(&bytes);
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Title (Quarterly Report)"));
    assert!(text.contains("/BaseFont /Times-Bold"));
}

#[test]
fn test_table_json() {
    let json = r#"{
        "blocks": [
            {
                "id": "t",
                "content": {
                    "type": "Table",
                    "columns": [ { "Fraction": 0.7 }, "Auto" ],
                    "border": { "Solid": { "width": 1, "color": { "r": 0, "g": 0, "b": 0 } } },
                    "cellPadding": 4,
                    "rows": [
                        [ { "text": { "text": "Item" } }, { "text": { "text": "Price" }, "alignment": "Right" } ],
                        [ { "text": { "text": "Widget" } }, { "text": { "text": "$10" }, "alignment": "Right" } ]
                    ]
                }
            }
        ]
    }"#;
    let bytes = pageflow::render_json(json).expect("Should parse table JSON");
    assert_valid_pdf(&bytes);
}

#[test]
fn test_layout_json() {
    let json = r#"{
        "blocks": [
            { "id": "a", "content": { "type": "Spacer", "height": 100 } },
            { "content": { "type": "PageBreak" } },
            { "id": "b", "content": { "type": "Spacer", "height": 50 } }
        ]
    }"#;
    let layout = pageflow::layout_json(json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&layout).unwrap();

    assert_eq!(value["pages"].as_array().unwrap().len(), 2);
    assert_eq!(value["pages"][1]["elements"][0]["id"], "b");
    assert_eq!(value["pages"][1]["elements"][0]["y"], 0.0);
    assert_eq!(value["contentWidth"], 512.0);
}

#[test]
fn test_layout_json_gives_id_less_blocks_distinct_ids() {
    let json = r#"{
        "blocks": [
            { "content": { "type": "Spacer", "height": 10 } },
            { "content": { "type": "Spacer", "height": 10 } },
            { "id": "named", "content": { "type": "Spacer", "height": 10 } }
        ]
    }"#;
    let layout = pageflow::layout_json(json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&layout).unwrap();

    let ids: Vec<&str> = value["pages"][0]["elements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["b0", "b1", "named"]);

    let doc = pageflow::parse_document(json).unwrap();
    assert_ne!(doc.blocks[0], doc.blocks[1]);
}

// ─── Resume Tests ───────────────────────────────────────────────

#[test]
fn test_sample_resume_renders() {
    let doc = Resume::sample().to_document();
    let bytes = pageflow::render(&doc).unwrap();
    assert_valid_pdf(&bytes);

    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Author (John Doe)"));
    assert!(text.contains("/MediaBox [0 0 595.28 841.89]"));
}

#[test]
fn test_resume_tables_never_split() {
    let mut resume = Resume::sample();
    for i in 0..40 {
        resume.add_skill(Skill::new(&format!("Extra {i}"), "Rust, Go, Zig, C"));
    }
    let doc = resume.to_document();
    let ctx = FontContext::new();
    let result = paginate(&doc, &ctx);

    assert!(result.page_count() >= 2);
    let content_height = doc.page.content_rect().unwrap().height;
    for p in result.placements() {
        assert!(p.rect.y + p.rect.height <= content_height + 1e-6);
    }
    let first_job = result
        .placements()
        .find(|p| p.block.id.0 == "experience-0")
        .expect("first job is placed");
    assert!(matches!(first_job.block.content, BlockContent::Table(_)));
}

#[test]
fn test_resume_json_round_trip_through_cli_format() {
    let json = serde_json::to_string_pretty(&Resume::sample()).unwrap();
    let parsed: Resume = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, Resume::sample());
    assert!(json.contains("\"workExperience\""));
}

#[test]
fn test_reordering_skills_changes_layout_order() {
    let mut resume = Resume::default();
    resume.personal_info.set_name("Ada");
    resume
        .add_skill(Skill::new("First", "a"))
        .add_skill(Skill::new("Second", "b"));
    resume.move_skill(1, 0).unwrap();

    let doc = resume.to_document();
    let ctx = FontContext::new();
    let result = paginate(&doc, &ctx);
    let texts: Vec<String> = result
        .placements()
        .filter_map(|p| match &p.block.content {
            BlockContent::Text(t) if p.block.id.0.starts_with("skill-") => Some(t.text.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["Second: b", "First: a"]);
}

#[test]
fn test_colors_and_alignment_survive_rendering() {
    let doc = doc_of(vec![
        StyledBlock::text(
            TextContent::styled("Right", TextStyle::Caption)
                .color(Color::hex("#336699"))
                .align(TextAlign::Right),
        ),
    ]);
    let bytes = pageflow::render(&doc).unwrap();
    assert_valid_pdf(&bytes);
}
