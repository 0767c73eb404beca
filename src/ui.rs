//! `UiFrame`: the drawing surface the renderer paints into.
//!
//! Layout units convert to cells by truncation, and node rectangles routinely
//! hang off the edge of the terminal while a frame is dragged. Every write
//! goes through [`UiFrame`], which clips to the visible area so painting code
//! never has to bounds-check the underlying `Buffer` itself.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Draw into a detached buffer, e.g. for tests or offscreen snapshots.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Paint `symbol` with `style` over the visible part of `area`.
    pub fn fill(&mut self, area: Rect, symbol: &str, style: Style) {
        let Some(clipped) = self.clip_rect(area) else {
            return;
        };
        for y in clipped.top()..clipped.bottom() {
            for x in clipped.left()..clipped.right() {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_symbol(symbol);
                    cell.set_style(style);
                }
            }
        }
    }

    /// Restyle the visible part of `area`, keeping its symbols.
    pub fn set_style(&mut self, area: Rect, style: Style) {
        if let Some(clipped) = self.clip_rect(area) {
            self.buffer.set_style(clipped, style);
        }
    }

    /// Write `text` starting at `(x, y)`, cut at the right edge of `bounds`
    /// and of the frame.
    pub fn set_string(&mut self, bounds: Rect, x: u16, y: u16, text: &str, style: Style) {
        if let Some(clipped) = self.clip_rect(bounds) {
            safe_set_string(self.buffer, clipped, x, y, text, style);
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}
