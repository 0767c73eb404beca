//! Glyph coverage and advance widths used for text fitting.

pub trait GlyphMetrics {
    /// Whether the active font can draw `ch`.
    fn supports(&self, ch: char) -> bool;

    fn char_width(&self, ch: char) -> f32;

    fn line_height(&self) -> f32;

    fn text_width(&self, text: &str) -> f32 {
        text.chars().map(|c| self.char_width(c)).sum()
    }
}

/// Fixed-advance metrics covering Latin, Greek and Cyrillic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub advance: f32,
    pub line_height: f32,
}

impl MonospaceMetrics {
    pub const fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl GlyphMetrics for MonospaceMetrics {
    fn supports(&self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        ch == ' ' || ch.is_ascii_graphic() || (('\u{a0}'..'\u{530}').contains(&ch))
    }

    fn char_width(&self, _ch: char) -> f32 {
        self.advance
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}
