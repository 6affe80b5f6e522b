//! # Text Layout
//!
//! Line breaking and text measurement.
//!
//! Uses real font metrics from the FontContext for accurate character widths
//! and the UAX#14 break opportunities from `unicode-linebreak`.

use crate::font::FontContext;
use crate::style::FontDescriptor;
use unicode_linebreak::{linebreaks, BreakOpportunity};

/// A line of text after line-breaking.
#[derive(Debug, Clone)]
pub struct BrokenLine {
    /// The characters on this line.
    pub chars: Vec<char>,
    /// The text as a string.
    pub text: String,
    /// X position of each character relative to line start.
    pub char_positions: Vec<f64>,
    /// Total width of the line, trailing whitespace excluded.
    pub width: f64,
}

impl BrokenLine {
    /// Number of spaces between words, for justification.
    pub fn space_count(&self) -> usize {
        self.chars.iter().filter(|&&c| c == ' ').count()
    }
}

/// Compute UAX#14 break opportunities indexed by char position.
///
/// Returns a vec of length `text.chars().count()`. Each entry is the break
/// opportunity *before* that character position (i.e. "can we break before
/// char[i]?"). Index 0 is always `None` (no break before the first char).
fn compute_break_opportunities(text: &str) -> Vec<Option<BreakOpportunity>> {
    let char_count = text.chars().count();
    let mut result = vec![None; char_count];

    // linebreaks() yields (byte_offset, opportunity) where byte_offset is the
    // position after the break, which is where the next segment starts.
    // We need to convert byte offsets to char indices.
    let byte_to_char: Vec<usize> = {
        let mut map = vec![0usize; text.len() + 1];
        let mut char_idx = 0;
        for (byte_idx, _) in text.char_indices() {
            map[byte_idx] = char_idx;
            char_idx += 1;
        }
        map[text.len()] = char_idx;
        map
    };

    for (byte_offset, opp) in linebreaks(text) {
        let char_idx = byte_to_char[byte_offset];
        if char_idx < char_count {
            result[char_idx] = Some(opp);
        }
        // byte_offset == text.len() is the end-of-text break; nothing to record
    }

    result
}

fn is_newline(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

pub struct TextLayout;

impl Default for TextLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayout {
    pub fn new() -> Self {
        Self
    }

    /// Break a string into lines that fit within `max_width`.
    ///
    /// Greedy first-fit: each line takes as many words as fit. Newlines force
    /// a break. A word wider than `max_width` on its own is broken at the
    /// character that overflows. Empty text yields a single empty line.
    pub fn break_into_lines(
        &self,
        font_context: &FontContext,
        text: &str,
        max_width: f64,
        font: &FontDescriptor,
    ) -> Vec<BrokenLine> {
        if text.is_empty() {
            return vec![self.make_line(&[], &[])];
        }

        let chars: Vec<char> = text.chars().collect();
        let char_widths = self.measure_chars(font_context, &chars, font);
        let break_opps = compute_break_opportunities(text);

        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut line_width = 0.0;
        // Index of the first char of the next line if we break at the last opportunity
        let mut last_break_point: Option<usize> = None;

        for (i, &ch) in chars.iter().enumerate() {
            if i > 0 {
                match break_opps[i] {
                    Some(BreakOpportunity::Mandatory) => {
                        lines.push(self.make_line(&chars[line_start..i], &char_widths[line_start..i]));
                        line_start = i;
                        line_width = 0.0;
                        last_break_point = None;
                    }
                    Some(BreakOpportunity::Allowed) => {
                        last_break_point = Some(i);
                    }
                    None => {}
                }
            }

            if is_newline(ch) {
                continue;
            }

            let char_width = char_widths[i];
            // Trailing spaces may hang past the edge; they are trimmed from the line
            if line_width + char_width > max_width && line_start < i && !ch.is_whitespace() {
                match last_break_point {
                    Some(bp) if bp > line_start => {
                        lines.push(self.make_line(&chars[line_start..bp], &char_widths[line_start..bp]));
                        line_start = bp;
                        line_width = char_widths[bp..i].iter().sum();
                    }
                    _ => {
                        // No opportunity on this line: split the word here
                        lines.push(self.make_line(&chars[line_start..i], &char_widths[line_start..i]));
                        line_start = i;
                        line_width = 0.0;
                    }
                }
                last_break_point = None;
            }

            line_width += char_width;
        }

        lines.push(self.make_line(&chars[line_start..], &char_widths[line_start..]));
        lines
    }

    /// Height of `text` wrapped at `max_width`: line count × line pitch.
    pub fn measure_height(
        &self,
        font_context: &FontContext,
        text: &str,
        max_width: f64,
        font: &FontDescriptor,
        line_height: f64,
    ) -> f64 {
        let lines = self.break_into_lines(font_context, text, max_width, font);
        lines.len() as f64 * font.size * line_height
    }

    fn measure_chars(&self, font_context: &FontContext, chars: &[char], font: &FontDescriptor) -> Vec<f64> {
        chars
            .iter()
            .map(|&ch| {
                if is_newline(ch) {
                    0.0
                } else {
                    font_context.char_width(ch, font)
                }
            })
            .collect()
    }

    /// Build a line, dropping newline characters and trailing whitespace.
    fn make_line(&self, chars: &[char], widths: &[f64]) -> BrokenLine {
        let mut end = chars.len();
        while end > 0 && chars[end - 1].is_whitespace() {
            end -= 1;
        }

        let mut line_chars = Vec::with_capacity(end);
        let mut char_positions = Vec::with_capacity(end);
        let mut x = 0.0;
        for (&ch, &w) in chars[..end].iter().zip(&widths[..end]) {
            if is_newline(ch) {
                continue;
            }
            line_chars.push(ch);
            char_positions.push(x);
            x += w;
        }

        BrokenLine {
            text: line_chars.iter().collect(),
            chars: line_chars,
            char_positions,
            width: x,
        }
    }
}
