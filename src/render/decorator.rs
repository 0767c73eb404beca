use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::theme;
use crate::ui::UiFrame;

/// What a decorator needs to know about the frame it is drawing.
#[derive(Debug, Clone, Copy)]
pub struct FrameChrome<'a> {
    pub title: &'a str,
    pub active: bool,
    pub border: bool,
    /// The pointer is on a resize zone, or a resize is running.
    pub hot: bool,
}

/// Frame chrome painter. Runs after the frame's content, so the title bar
/// and border overlay whatever the content drew at the edges.
pub trait FrameDecorator: std::fmt::Debug {
    fn decorate(&self, out: &mut UiFrame<'_>, rect: Rect, title_bar: Rect, chrome: FrameChrome<'_>);
}

#[derive(Debug, Default)]
pub struct BoxDecorator;

impl FrameDecorator for BoxDecorator {
    fn decorate(
        &self,
        out: &mut UiFrame<'_>,
        rect: Rect,
        title_bar: Rect,
        chrome: FrameChrome<'_>,
    ) {
        let header_style = theme::title_style(chrome.active);
        out.fill(title_bar, " ", header_style);
        let title_len = chrome.title.chars().count() as u16;
        if title_len > 0 && title_bar.height > 0 {
            let start_x = title_bar.x + title_bar.width.saturating_sub(title_len) / 2;
            out.set_string(title_bar, start_x, title_bar.y, chrome.title, header_style);
        }

        if !chrome.border || rect.width < 2 {
            return;
        }
        let border_style = Style::default().fg(if chrome.hot {
            theme::frame_border_hot()
        } else {
            theme::frame_border()
        });
        let left = rect.x;
        let right = rect.right().saturating_sub(1);
        let bottom = rect.bottom().saturating_sub(1);
        let body_top = title_bar.bottom().max(rect.y);

        // Sides start below the title bar, which already marks the top edge.
        if body_top < bottom {
            let side_height = bottom - body_top;
            out.fill(Rect::new(left, body_top, 1, side_height), "│", border_style);
            out.fill(Rect::new(right, body_top, 1, side_height), "│", border_style);
        }
        if bottom >= body_top {
            out.fill(Rect::new(left, bottom, rect.width, 1), "─", border_style);
            out.fill(Rect::new(left, bottom, 1, 1), "└", border_style);
            out.fill(Rect::new(right, bottom, 1, 1), "┘", border_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;
    use ratatui::style::Color;

    fn draw(chrome: FrameChrome<'_>) -> Buffer {
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        let mut out = UiFrame::from_parts(area, &mut buf);
        BoxDecorator.decorate(&mut out, area, Rect::new(0, 0, 10, 1), chrome);
        buf
    }

    #[test]
    fn title_is_centered_in_the_bar() {
        let buf = draw(FrameChrome {
            title: "ab",
            active: true,
            border: true,
            hot: false,
        });
        assert_eq!(buf[(4, 0)].symbol(), "a");
        assert_eq!(buf[(5, 0)].symbol(), "b");
        assert_eq!(buf[(0, 0)].bg, Color::Blue);
    }

    #[test]
    fn border_frames_the_body() {
        let buf = draw(FrameChrome {
            title: "",
            active: false,
            border: true,
            hot: true,
        });
        assert_eq!(buf[(0, 1)].symbol(), "│");
        assert_eq!(buf[(9, 2)].symbol(), "│");
        assert_eq!(buf[(0, 3)].symbol(), "└");
        assert_eq!(buf[(5, 3)].symbol(), "─");
        assert_eq!(buf[(9, 3)].symbol(), "┘");
        assert_eq!(buf[(0, 1)].fg, theme::frame_border_hot());
        assert_eq!(buf[(0, 0)].bg, Color::DarkGray);
    }

    #[test]
    fn borderless_frame_draws_only_the_title_bar() {
        let buf = draw(FrameChrome {
            title: "",
            active: false,
            border: false,
            hot: false,
        });
        assert_eq!(buf[(0, 3)].symbol(), " ");
    }
}
