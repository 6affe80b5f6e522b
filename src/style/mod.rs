//! # Style
//!
//! The typographic vocabulary a block carries: which font, how big, what
//! color, how lines sit inside the block's width. Blocks carry fully
//! resolved values; there is no cascade or inheritance here.

use serde::{Deserialize, Serialize};

/// Everything needed to pick a face and size for a run of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontDescriptor {
    /// Font family name. Standard families are Helvetica, Times and Courier;
    /// anything else must be registered as a custom font or falls back to
    /// Helvetica.
    #[serde(default = "default_family")]
    pub family: String,
    /// Font size in points.
    #[serde(default = "default_size")]
    pub size: f64,
    /// Font weight (100-900).
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub style: FontStyle,
}

fn default_family() -> String {
    "Helvetica".to_string()
}

fn default_size() -> f64 {
    12.0
}

fn default_weight() -> u32 {
    400
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: default_family(),
            size: default_size(),
            weight: default_weight(),
            style: FontStyle::Normal,
        }
    }
}

impl FontDescriptor {
    pub fn new(family: &str, size: f64) -> Self {
        Self {
            family: family.to_string(),
            size,
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = 700;
        self
    }

    pub fn italic(mut self) -> Self {
        self.style = FontStyle::Italic;
        self
    }

    pub fn is_italic(&self) -> bool {
        matches!(self.style, FontStyle::Italic | FontStyle::Oblique)
    }
}

/// Named text styles, sized after the platform's preferred fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextStyle {
    LargeTitle,
    Title1,
    Title2,
    Title3,
    Headline,
    Subheadline,
    #[default]
    Body,
    Callout,
    Footnote,
    Caption,
}

impl TextStyle {
    /// The font this style maps to.
    pub fn font(&self) -> FontDescriptor {
        let (size, weight) = match self {
            TextStyle::LargeTitle => (26.0, 400),
            TextStyle::Title1 => (22.0, 400),
            TextStyle::Title2 => (17.0, 400),
            TextStyle::Title3 => (15.0, 400),
            TextStyle::Headline => (13.0, 700),
            TextStyle::Subheadline => (11.0, 400),
            TextStyle::Body => (13.0, 400),
            TextStyle::Callout => (12.0, 400),
            TextStyle::Footnote => (10.0, 400),
            TextStyle::Caption => (10.0, 400),
        };
        FontDescriptor {
            size,
            weight,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// Horizontal placement of each line inside the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

/// Whether a table draws its grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum BorderStyle {
    #[default]
    None,
    Solid {
        width: f64,
        color: Color,
    },
}

impl BorderStyle {
    /// Stroke width, zero when no border is drawn.
    pub fn width(&self) -> f64 {
        match self {
            BorderStyle::None => 0.0,
            BorderStyle::Solid { width, .. } => *width,
        }
    }
}

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const SECONDARY: Color = Color {
        r: 0.4,
        g: 0.4,
        b: 0.4,
        a: 1.0,
    };

    /// Link color for online profiles.
    pub const LINK: Color = Color {
        r: 0.0,
        g: 0.48,
        b: 1.0,
        a: 1.0,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rgb` or `#rrggbb`. Anything else is black.
    pub fn hex(hex: &str) -> Self {
        let digits: Option<Vec<u8>> = hex
            .trim_start_matches('#')
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect();
        let (r, g, b) = match digits.as_deref() {
            Some(&[r, g, b]) => (r * 17, g * 17, b * 17),
            Some(&[r1, r2, g1, g2, b1, b2]) => ((r1 << 4) | r2, (g1 << 4) | g2, (b1 << 4) | b2),
            _ => return Color::BLACK,
        };
        Self::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}
