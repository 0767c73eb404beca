use crate::font::GlyphMetrics;
use crate::geometry::Size;

/// Floating hint text. Sized to its content plus padding on every side.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    text: String,
    padding: f32,
}

impl Tooltip {
    pub fn new(text: impl Into<String>, padding: f32) -> Self {
        Self {
            text: text.into(),
            padding: padding.max(0.0),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Width of the longest line and height of all lines, plus padding.
    pub fn fit_size(&self, metrics: &dyn GlyphMetrics) -> Size {
        let lines = self.text.lines().count().max(1);
        let widest = self
            .text
            .lines()
            .map(|line| metrics.text_width(line))
            .fold(0.0, f32::max);
        Size::new(
            widest + self.padding * 2.0,
            lines as f32 * metrics.line_height() + self.padding * 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::MonospaceMetrics;

    #[test]
    fn fit_size_covers_longest_line() {
        let m = MonospaceMetrics::new(8.0, 12.0);
        let t = Tooltip::new("ab\nabcd", 10.0);
        assert_eq!(t.fit_size(&m), Size::new(52.0, 44.0));
    }

    #[test]
    fn empty_text_still_has_one_line() {
        let m = MonospaceMetrics::new(1.0, 1.0);
        let t = Tooltip::new("", 1.0);
        assert_eq!(t.fit_size(&m), Size::new(2.0, 3.0));
    }
}
