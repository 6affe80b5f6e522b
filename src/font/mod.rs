//! # Font Management
//!
//! Font lookup and glyph advance widths for text measurement.
//!
//! The 14 standard PDF fonts need no embedding and their widths are known
//! ahead of time. Custom TrueType/OpenType fonts are parsed with ttf-parser
//! for their advance widths; when drawing, they are substituted with
//! Helvetica.

pub mod metrics;

pub use metrics::StandardFontMetrics;

use std::collections::HashMap;

use base64::Engine as _;

use crate::error::{Error, Result};
use crate::model::FontEntry;
use crate::style::FontDescriptor;

/// A font registry that maps font family + weight + style to font data.
pub struct FontRegistry {
    fonts: HashMap<FontKey, FontData>,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontKey {
    pub family: String,
    pub weight: u32,
    pub italic: bool,
}

impl FontKey {
    /// The key a descriptor resolves to, with weight snapped to 400 or 700.
    pub fn snapped(font: &FontDescriptor) -> Self {
        Self {
            family: font.family.clone(),
            weight: snap_weight(font.weight),
            italic: font.is_italic(),
        }
    }
}

fn snap_weight(weight: u32) -> u32 {
    if weight >= 600 {
        700
    } else {
        400
    }
}

#[derive(Debug, Clone)]
pub enum FontData {
    /// One of the 14 standard PDF fonts. No embedding needed.
    Standard(StandardFont),
    /// A TrueType/OpenType font registered by the caller.
    /// Only the metrics are kept; drawing substitutes a Helvetica variant.
    Custom {
        /// Parsed metrics from ttf-parser, if available.
        metrics: Option<CustomFontMetrics>,
    },
}

/// Parsed metrics from a TrueType/OpenType font via ttf-parser.
#[derive(Debug, Clone)]
pub struct CustomFontMetrics {
    pub units_per_em: u16,
    pub advance_widths: HashMap<char, u16>,
    pub default_advance: u16,
}

impl CustomFontMetrics {
    /// Get the advance width of a character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let w = self
            .advance_widths
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance);
        (w as f64 / self.units_per_em as f64) * font_size
    }

    /// Parse metrics from font data using ttf-parser.
    pub fn from_font_data(data: &[u8]) -> Option<Self> {
        let face = ttf_parser::Face::parse(data, 0).ok()?;
        let units_per_em = face.units_per_em();

        let mut advance_widths = HashMap::new();
        let mut default_advance = 0u16;

        // Latin, Latin-1 and the general punctuation block cover resume text
        let ranges = [32u32..=0x024F, 0x2000..=0x206F];
        for code in ranges.into_iter().flatten() {
            if let Some(ch) = char::from_u32(code) {
                if let Some(glyph_id) = face.glyph_index(ch) {
                    let advance = face.glyph_hor_advance(glyph_id).unwrap_or(0);
                    advance_widths.insert(ch, advance);
                    if ch == ' ' {
                        default_advance = advance;
                    }
                }
            }
        }

        if default_advance == 0 {
            default_advance = units_per_em / 2;
        }

        Some(CustomFontMetrics {
            units_per_em,
            advance_widths,
            default_advance,
        })
    }
}

/// The standard PDF fonts this engine measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl StandardFont {
    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Self::TimesRoman => "Times-Roman",
            Self::TimesBold => "Times-Bold",
            Self::TimesItalic => "Times-Italic",
            Self::TimesBoldItalic => "Times-BoldItalic",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
            Self::CourierOblique => "Courier-Oblique",
            Self::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// The Helvetica variant with the same weight and slant.
    pub fn helvetica_like(weight: u32, italic: bool) -> Self {
        match (snap_weight(weight) == 700, italic) {
            (false, false) => Self::Helvetica,
            (true, false) => Self::HelveticaBold,
            (false, true) => Self::HelveticaOblique,
            (true, true) => Self::HelveticaBoldOblique,
        }
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    pub fn new() -> Self {
        let mut fonts = HashMap::new();

        let standard_mappings = vec![
            (("Helvetica", 400, false), StandardFont::Helvetica),
            (("Helvetica", 700, false), StandardFont::HelveticaBold),
            (("Helvetica", 400, true), StandardFont::HelveticaOblique),
            (("Helvetica", 700, true), StandardFont::HelveticaBoldOblique),
            (("Times", 400, false), StandardFont::TimesRoman),
            (("Times", 700, false), StandardFont::TimesBold),
            (("Times", 400, true), StandardFont::TimesItalic),
            (("Times", 700, true), StandardFont::TimesBoldItalic),
            (("Courier", 400, false), StandardFont::Courier),
            (("Courier", 700, false), StandardFont::CourierBold),
            (("Courier", 400, true), StandardFont::CourierOblique),
            (("Courier", 700, true), StandardFont::CourierBoldOblique),
        ];

        for ((family, weight, italic), font) in standard_mappings {
            fonts.insert(
                FontKey {
                    family: family.to_string(),
                    weight,
                    italic,
                },
                FontData::Standard(font),
            );
        }

        Self { fonts }
    }

    /// Look up a font, falling back to Helvetica if not found.
    pub fn resolve(&self, family: &str, weight: u32, italic: bool) -> &FontData {
        let key = FontKey {
            family: family.to_string(),
            weight,
            italic,
        };
        if let Some(font) = self.fonts.get(&key) {
            return font;
        }

        // Try with normalized weight (snap to 400 or 700)
        let snapped_weight = snap_weight(weight);
        let key = FontKey {
            family: family.to_string(),
            weight: snapped_weight,
            italic,
        };
        if let Some(font) = self.fonts.get(&key) {
            return font;
        }

        log::trace!(
            "font {} {} {} not registered, using Helvetica",
            family,
            weight,
            if italic { "italic" } else { "upright" }
        );

        // Fallback to Helvetica; every weight/slant pair is registered in new()
        let key = FontKey {
            family: "Helvetica".to_string(),
            weight: snapped_weight,
            italic,
        };
        match self.fonts.get(&key) {
            Some(font) => font,
            None => &HELVETICA,
        }
    }

    /// Register a custom font.
    pub fn register(&mut self, family: &str, weight: u32, italic: bool, data: &[u8]) {
        let metrics = CustomFontMetrics::from_font_data(data);
        self.fonts.insert(
            FontKey {
                family: family.to_string(),
                weight,
                italic,
            },
            FontData::Custom { metrics },
        );
    }
}

static HELVETICA: FontData = FontData::Standard(StandardFont::Helvetica);

/// Shared font context used by measurement and PDF serialization.
/// Provides text measurement with real glyph metrics.
pub struct FontContext {
    registry: FontRegistry,
}

impl Default for FontContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FontContext {
    pub fn new() -> Self {
        Self {
            registry: FontRegistry::new(),
        }
    }

    /// A context with the document's custom fonts registered.
    pub fn with_fonts(entries: &[FontEntry]) -> Result<Self> {
        let mut ctx = Self::new();
        for entry in entries {
            let data = decode_font_src(&entry.src).map_err(|e| {
                Error::Font(format!("{} ({}): {}", entry.family, entry.weight, e))
            })?;
            if ttf_parser::Face::parse(&data, 0).is_err() {
                return Err(Error::Font(format!(
                    "{} ({}): not a TrueType/OpenType font",
                    entry.family, entry.weight
                )));
            }
            ctx.registry
                .register(&entry.family, entry.weight, entry.italic, &data);
        }
        Ok(ctx)
    }

    /// Get the advance width of a single character in points.
    pub fn char_width(&self, ch: char, font: &FontDescriptor) -> f64 {
        let font_data = self
            .registry
            .resolve(&font.family, font.weight, font.is_italic());
        match font_data {
            FontData::Standard(std_font) => std_font.metrics().char_width(ch, font.size),
            FontData::Custom {
                metrics: Some(m), ..
            } => m.char_width(ch, font.size),
            FontData::Custom { metrics: None, .. } => {
                StandardFont::Helvetica.metrics().char_width(ch, font.size)
            }
        }
    }

    /// Measure the width of a string in points.
    pub fn measure_string(&self, text: &str, font: &FontDescriptor) -> f64 {
        text.chars().map(|ch| self.char_width(ch, font)).sum()
    }

    /// The standard font used to draw text in this descriptor.
    pub fn standard_font(&self, font: &FontDescriptor) -> StandardFont {
        match self
            .registry
            .resolve(&font.family, font.weight, font.is_italic())
        {
            FontData::Standard(std_font) => *std_font,
            FontData::Custom { .. } => StandardFont::helvetica_like(font.weight, font.is_italic()),
        }
    }

    /// Access the underlying font registry.
    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }
}

/// Decode a font `src`: plain base64, or a `data:` URI with a base64 payload.
fn decode_font_src(src: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    let payload = match src.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map(|(_, b64)| b64).unwrap_or(rest),
        None => src,
    };
    base64::engine::general_purpose::STANDARD.decode(payload.trim())
}
