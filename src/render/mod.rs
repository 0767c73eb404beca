//! Paint a [`UiContext`] into a terminal buffer.
//!
//! One layout unit is one cell, so this is meant for contexts built with
//! [`crate::UiConfig::terminal`]. The tree is painted back to front in child
//! order; open drop-down lists, the focus rectangle and the tooltip go on top
//! of everything.

pub mod decorator;

pub use decorator::{BoxDecorator, FrameChrome, FrameDecorator};

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{
    Button, Checkbox, DropDownList, Frame, Menu, Scrollbar, TextInput, Widget,
};
use crate::context::{NodeId, UiContext};
use crate::geometry;
use crate::theme;
use crate::ui::UiFrame;

pub fn render_scene(ui: &UiContext, out: &mut UiFrame<'_>) {
    render_scene_with(ui, out, &BoxDecorator);
}

pub fn render_scene_with(ui: &UiContext, out: &mut UiFrame<'_>, decorator: &dyn FrameDecorator) {
    let area = out.area();
    out.fill(area, " ", Style::default().bg(theme::stage_bg()));

    let mut painter = Painter {
        ui,
        out,
        decorator,
        overlays: Vec::new(),
    };
    painter.paint_node(ui.root(), area);

    for (id, clip) in std::mem::take(&mut painter.overlays) {
        painter.paint_dropdown_list(id, clip);
    }
    painter.paint_focus_rect();
    painter.paint_tooltip();
}

/// Snap a layout rectangle to whole cells. Parts left of or above the origin
/// are cut off; `None` when nothing remains.
pub fn to_cells(rect: geometry::Rect) -> Option<Rect> {
    let snap = |v: f32| v.floor().clamp(0.0, f32::from(u16::MAX)) as u16;
    let (x0, y0) = (snap(rect.x), snap(rect.y));
    let (x1, y1) = (snap(rect.right()), snap(rect.bottom()));
    (x1 > x0 && y1 > y0).then(|| Rect::new(x0, y0, x1 - x0, y1 - y0))
}

struct Painter<'u, 'a, 'b> {
    ui: &'u UiContext,
    out: &'a mut UiFrame<'b>,
    decorator: &'u dyn FrameDecorator,
    overlays: Vec<(NodeId, Rect)>,
}

impl Painter<'_, '_, '_> {
    fn paint_node(&mut self, id: NodeId, clip: Rect) {
        let ui = self.ui;
        let Some(node) = ui.node(id) else {
            return;
        };
        if !node.is_visible() || node.alpha() <= 0.0 {
            return;
        }
        // The shown tooltip is painted last, over everything else.
        if matches!(node.widget(), Widget::Tooltip(_)) {
            return;
        }
        let Some(area) = ui.global_bounds(id).and_then(to_cells) else {
            return;
        };
        let visible = area.intersection(clip);
        if visible.is_empty() {
            return;
        }

        match node.widget() {
            Widget::Panel(panel) if panel.background => {
                self.out
                    .fill(visible, " ", Style::default().bg(theme::panel_bg()));
            }
            Widget::Label(label) => {
                let style = Style::default().fg(theme::label_fg());
                for (i, line) in label.text().lines().enumerate() {
                    let y = area.y.saturating_add(i as u16);
                    self.out.set_string(visible, area.x, y, line, style);
                }
            }
            Widget::Button(button) => self.paint_button(button, node.is_enabled(), area, visible),
            Widget::Checkbox(checkbox) => {
                self.paint_checkbox(checkbox, node.is_enabled(), area, visible)
            }
            Widget::DropDownList(list) => {
                self.paint_dropdown(list, node.is_enabled(), area, visible);
                if list.is_open() {
                    self.overlays.push((id, self.out.area()));
                }
            }
            Widget::Frame(_) => {
                self.out
                    .fill(visible, " ", Style::default().bg(theme::panel_bg()));
            }
            Widget::ScrollPane(pane) if pane.background_visible() => {
                self.out
                    .fill(visible, " ", Style::default().bg(theme::panel_bg()));
            }
            Widget::Scrollbar(bar) => self.paint_scrollbar(bar, node.alpha(), area, visible),
            Widget::TextInput(input) => self.paint_text_input(id, input, area, visible),
            Widget::Menu(menu) => self.paint_menu(menu, area, visible),
            _ => {}
        }

        let skip = node.widget().as_frame().map(Frame::title_bar);
        for &child in node.children() {
            if Some(child) != skip {
                self.paint_node(child, visible);
            }
        }

        if let Widget::Frame(frame) = node.widget() {
            self.paint_frame_chrome(frame, area, visible);
        }
    }

    fn paint_frame_chrome(&mut self, frame: &Frame, area: Rect, clip: Rect) {
        let title_bar = self
            .ui
            .global_bounds(frame.title_bar())
            .and_then(to_cells)
            .map(|r| r.intersection(clip))
            .unwrap_or_default();
        let chrome = FrameChrome {
            title: frame.title(),
            active: frame.is_active(),
            border: frame.has_border(),
            hot: frame.hover_edge().is_some() || frame.is_resizing(),
        };
        // The decorator may only touch cells inside the frame's visible area.
        let mut clipped = UiFrame::from_parts(clip.intersection(area), self.out.buffer_mut());
        self.decorator.decorate(&mut clipped, area, title_bar, chrome);
    }

    fn paint_button(&mut self, button: &Button, enabled: bool, area: Rect, clip: Rect) {
        let style = if enabled && (button.is_pressed() || button.is_selected()) {
            theme::control_selected_style()
        } else {
            theme::control_style(enabled)
        };
        self.out.fill(clip, " ", style);
        let text = match (button.label(), button.icon()) {
            (Some(label), _) => label.to_owned(),
            (None, Some(icon)) => format!("[{icon}]"),
            (None, None) => String::new(),
        };
        self.centered(&text, area, clip, style);
    }

    fn paint_checkbox(&mut self, checkbox: &Checkbox, enabled: bool, area: Rect, clip: Rect) {
        let style = theme::control_style(enabled);
        self.out.fill(clip, " ", style);
        let mark = if checkbox.is_checked() { 'x' } else { ' ' };
        let text = format!("[{mark}] {}", checkbox.label());
        self.out.set_string(clip, area.x, middle_row(area), &text, style);
    }

    fn paint_dropdown(&mut self, list: &DropDownList, enabled: bool, area: Rect, clip: Rect) {
        let style = theme::control_style(enabled);
        self.out.fill(clip, " ", style);
        let label = list.selected().map(|item| item.label.as_str()).unwrap_or("");
        let row = middle_row(area);
        self.out.set_string(clip, area.x, row, label, style);
        let arrow_x = area.right().saturating_sub(1);
        self.out.set_string(clip, arrow_x, row, "▾", style);
    }

    /// The expanded item list, one row per item directly below the control.
    fn paint_dropdown_list(&mut self, id: NodeId, clip: Rect) {
        let Some(list) = self.ui.dropdown(id) else {
            return;
        };
        let Some(area) = self.ui.global_bounds(id).and_then(to_cells) else {
            return;
        };
        let selected = list.selected_index();
        for (i, item) in list.items().iter().enumerate() {
            let y = area.bottom().saturating_add(i as u16);
            let row = Rect::new(area.x, y, area.width, 1).intersection(clip);
            let style = if selected == Some(i) {
                theme::control_selected_style()
            } else {
                theme::control_style(true)
            };
            self.out.fill(row, " ", style);
            self.out.set_string(row, area.x, y, &item.label, style);
        }
    }

    fn paint_menu(&mut self, menu: &Menu, area: Rect, clip: Rect) {
        let base = theme::control_style(true);
        self.out.fill(clip, " ", base);
        for (i, entry) in menu.entries().iter().enumerate() {
            let y = area.y.saturating_add(menu.entry_top(i).floor() as u16);
            let row = Rect::new(area.x, y, area.width, 1).intersection(clip);
            let Some(label) = entry.label() else {
                let rule = "─".repeat(usize::from(area.width));
                self.out.set_string(row, area.x, y, &rule, base);
                continue;
            };
            let style = if menu.hovered() == Some(i) {
                theme::control_selected_style()
            } else {
                base
            };
            self.out.fill(row, " ", style);
            self.out.set_string(row, area.x.saturating_add(1), y, label, style);
            if entry.submenu().is_some() {
                let arrow_x = area.right().saturating_sub(2);
                self.out.set_string(row, arrow_x, y, "▸", style);
            }
        }
    }

    fn paint_scrollbar(&mut self, bar: &Scrollbar, node_alpha: f32, area: Rect, clip: Rect) {
        self.out
            .fill(clip, " ", Style::default().bg(theme::track()));
        if !bar.is_thumb_visible() {
            return;
        }
        let thumb = geometry::Rect::new(
            f32::from(area.x),
            f32::from(area.y) + bar.thumb_offset(),
            f32::from(area.width),
            bar.thumb_length().max(1.0),
        );
        if let Some(thumb) = to_cells(thumb) {
            let color = theme::thumb(bar.alpha() * node_alpha);
            self.out
                .fill(thumb.intersection(clip), " ", Style::default().bg(color));
        }
    }

    fn paint_text_input(&mut self, id: NodeId, input: &TextInput, area: Rect, clip: Rect) {
        let base = theme::input_style();
        self.out.fill(clip, " ", base);

        let ui = self.ui;
        let metrics = ui.metrics();
        let text_x = f32::from(area.x) + input.margin();
        let row = middle_row(area);
        let selection = input.selection();
        let mut advance = 0.0;
        for (i, ch) in input.text().chars().enumerate() {
            let x = (text_x + advance).floor() as u16;
            advance += metrics.char_width(ch);
            let style = match selection {
                Some((from, to)) if (from..to).contains(&i) => theme::selection_style(),
                _ => base,
            };
            let mut buf = [0u8; 4];
            self.out.set_string(clip, x, row, ch.encode_utf8(&mut buf), style);
        }

        if ui.focused() == Some(id) && input.caret_visible() {
            let prefix: String = input.text().chars().take(input.caret()).collect();
            let x = (text_x + metrics.text_width(&prefix)).floor() as u16;
            self.out
                .set_style(Rect::new(x, row, 1, 1).intersection(clip), theme::caret_style());
        }
    }

    fn paint_focus_rect(&mut self) {
        let Some(focused) = self.ui.focused() else {
            return;
        };
        let Some(rect) = self.ui.node(focused).and_then(|n| n.focus_rect()) else {
            return;
        };
        let Some(origin) = self.ui.global_position(focused) else {
            return;
        };
        let Some(area) = to_cells(rect.translate(origin.x, origin.y)) else {
            return;
        };
        let style = Style::default()
            .add_modifier(Modifier::UNDERLINED)
            .underline_color(theme::focus_rect());
        self.out.set_style(area, style);
    }

    fn paint_tooltip(&mut self) {
        let Some(id) = self.ui.shown_tooltip() else {
            return;
        };
        let (Some(tooltip), Some(area)) = (
            self.ui.tooltip(id),
            self.ui.global_bounds(id).and_then(to_cells),
        ) else {
            return;
        };
        let style = theme::tooltip_style();
        self.out.fill(area, " ", style);
        let pad = tooltip.padding().floor() as u16;
        let line_height = self.ui.metrics().line_height().max(1.0);
        for (i, line) in tooltip.text().lines().enumerate() {
            let y = area.y + pad + (i as f32 * line_height).floor() as u16;
            self.out.set_string(area, area.x + pad, y, line, style);
        }
    }

    fn centered(&mut self, text: &str, area: Rect, clip: Rect, style: Style) {
        let len = text.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(len) / 2;
        self.out.set_string(clip, x, middle_row(area), text, style);
    }
}

fn middle_row(area: Rect) -> u16 {
    area.y + area.height.saturating_sub(1) / 2
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::buffer::Buffer;
    use ratatui::style::Color;

    use super::*;
    use crate::config::UiConfig;
    use crate::event::FocusOrigin;
    use crate::geometry::{Point, Size};
    use crate::input::InputEvent;

    fn ctx() -> UiContext {
        UiContext::new(UiConfig::terminal(), Size::new(40.0, 12.0))
    }

    fn draw(ui: &UiContext) -> Buffer {
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        let mut out = UiFrame::from_parts(area, &mut buf);
        render_scene(ui, &mut out);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn to_cells_cuts_negative_origins() {
        let r = to_cells(geometry::Rect::new(-2.0, 1.5, 5.0, 2.0)).unwrap();
        assert_eq!(r, Rect::new(0, 1, 3, 2));
        assert!(to_cells(geometry::Rect::new(-5.0, 0.0, 3.0, 3.0)).is_none());
    }

    #[test]
    fn frame_title_follows_activation() {
        let mut ui = ctx();
        let frame = ui.create_frame("Hi");
        ui.set_size(frame, 20.0, 6.0).unwrap();
        ui.attach(ui.root(), frame).unwrap();
        // centered on attach: (40 - 20) / 2, (12 - 6) / 2
        let buf = draw(&ui);
        assert_eq!(buf[(19, 3)].symbol(), "H");
        assert_eq!(buf[(10, 3)].bg, Color::DarkGray);
        assert_eq!(buf[(10, 8)].symbol(), "└");

        ui.activate_frame(frame).unwrap();
        let buf = draw(&ui);
        assert_eq!(buf[(10, 3)].bg, Color::Blue);
    }

    #[test]
    fn focused_text_input_shows_caret() {
        let mut ui = ctx();
        let input = ui.create_text_input();
        ui.attach(ui.root(), input).unwrap();
        ui.set_text(input, "abc").unwrap();
        ui.focus(input, FocusOrigin::Program).unwrap();
        let buf = draw(&ui);
        assert!(row_text(&buf, 0).starts_with(" abc"));
        assert!(buf[(4, 0)].modifier.contains(Modifier::REVERSED));
        assert!(!buf[(3, 0)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn scrolled_pane_shows_thumb_at_the_bottom() {
        let mut ui = ctx();
        let pane = ui.create_scroll_pane();
        ui.attach(ui.root(), pane).unwrap();
        for i in 0..20 {
            let item = ui.create_label(format!("item {i}"));
            ui.add_item(pane, item).unwrap();
        }
        let buf = draw(&ui);
        // 10 rows of 20 items, scrolled to the end
        assert!(row_text(&buf, 0).starts_with("item 10"));
        assert!(row_text(&buf, 9).starts_with("item 19"));
        assert_eq!(buf[(29, 0)].bg, theme::track());
        assert_ne!(buf[(29, 9)].bg, theme::track());
    }

    #[test]
    fn open_menu_paints_rows_and_rules() {
        let mut ui = ctx();
        let menu = ui.create_menu();
        let sub = ui.create_menu();
        ui.add_menu_item(menu, "cut", "Cut").unwrap();
        ui.add_menu_separator(menu).unwrap();
        ui.add_submenu(menu, "More", sub).unwrap();
        ui.show_menu(menu, Point::new(2.0, 1.0)).unwrap();
        let buf = draw(&ui);
        // shown one row below the pointer, labels inset by a cell
        assert!(row_text(&buf, 2)[3..].starts_with("Cut"));
        assert_eq!(buf[(2, 3)].symbol(), "─");
        assert!(row_text(&buf, 4).contains("More"));
        assert_eq!(buf[(24, 4)].symbol(), "▸");
    }

    #[test]
    fn tooltip_is_painted_on_top() {
        let mut ui = ctx();
        let button = ui.create_button("go");
        ui.attach(ui.root(), button).unwrap();
        ui.set_tooltip(button, "tip").unwrap();
        ui.handle_input(&InputEvent::PointerMove {
            pos: Point::new(0.0, 0.0),
        });
        ui.tick(Duration::from_secs(2));
        assert!(ui.shown_tooltip().is_some());
        let buf = draw(&ui);
        assert!((0..12).any(|y| row_text(&buf, y).contains("tip")));
    }
}
