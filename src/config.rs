//! Tunables shared by every component living in a [`crate::UiContext`].

use std::time::Duration;

use crate::constants::*;
use crate::geometry::Size;

#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    pub padding: f32,
    pub edge_threshold: f32,
    pub title_height: f32,
    pub frame_size: Size,
    pub frame_min_size: Size,
    pub scroll_pane_size: Size,
    pub item_height: f32,
    pub scroll_step: i32,
    pub scrollbar_width: f32,
    pub scrollbar_wheel_step: f32,
    pub fade_hold: u32,
    pub min_alpha: f32,
    pub max_alpha: f32,
    pub alpha_step: f32,
    pub text_input_size: Size,
    pub text_margin: f32,
    pub caret_blink_period: u32,
    pub tooltip_delay: Duration,
    pub tooltip_padding: f32,
    pub tooltip_size: Size,
    pub glyph_advance: f32,
    pub line_height: f32,
    pub dialog_size: Size,
    /// Inset of a dialog's message, and the distance of its buttons from
    /// the bottom edge.
    pub dialog_padding: f32,
    pub menu_width: f32,
    pub menu_item_height: f32,
    pub menu_separator_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            edge_threshold: EDGE_THRESHOLD,
            title_height: FRAME_TITLE_HEIGHT,
            frame_size: Size::new(FRAME_DEFAULT_WIDTH, FRAME_DEFAULT_HEIGHT),
            frame_min_size: Size::new(FRAME_MIN_WIDTH, FRAME_MIN_HEIGHT),
            scroll_pane_size: Size::new(SCROLL_PANE_DEFAULT_WIDTH, SCROLL_PANE_DEFAULT_HEIGHT),
            item_height: SCROLL_PANE_ITEM_HEIGHT,
            scroll_step: SCROLL_STEP,
            scrollbar_width: SCROLLBAR_WIDTH,
            scrollbar_wheel_step: SCROLLBAR_WHEEL_STEP,
            fade_hold: SCROLLBAR_FADE_HOLD,
            min_alpha: SCROLLBAR_MIN_ALPHA,
            max_alpha: SCROLLBAR_MAX_ALPHA,
            alpha_step: SCROLLBAR_ALPHA_STEP,
            text_input_size: Size::new(TEXT_INPUT_DEFAULT_WIDTH, TEXT_INPUT_DEFAULT_HEIGHT),
            text_margin: TEXT_MARGIN,
            caret_blink_period: CARET_BLINK_PERIOD,
            tooltip_delay: TOOLTIP_DELAY,
            tooltip_padding: TOOLTIP_PADDING,
            tooltip_size: Size::new(TOOLTIP_DEFAULT_WIDTH, TOOLTIP_DEFAULT_HEIGHT),
            glyph_advance: GLYPH_ADVANCE,
            line_height: GLYPH_LINE_HEIGHT,
            dialog_size: Size::new(DIALOG_DEFAULT_WIDTH, DIALOG_DEFAULT_HEIGHT),
            dialog_padding: DIALOG_PADDING,
            menu_width: MENU_WIDTH,
            menu_item_height: MENU_ITEM_HEIGHT,
            menu_separator_height: MENU_SEPARATOR_HEIGHT,
        }
    }
}

impl UiConfig {
    /// Cell-sized configuration for hosting the widgets in a terminal, where
    /// one layout unit is one character cell.
    pub fn terminal() -> Self {
        Self {
            padding: 0.0,
            edge_threshold: 1.0,
            title_height: 1.0,
            frame_size: Size::new(48.0, 16.0),
            frame_min_size: Size::new(12.0, 4.0),
            scroll_pane_size: Size::new(30.0, 10.0),
            item_height: 1.0,
            scroll_step: 3,
            scrollbar_width: 1.0,
            scrollbar_wheel_step: 1.0,
            text_input_size: Size::new(24.0, 1.0),
            text_margin: 1.0,
            tooltip_padding: 1.0,
            tooltip_size: Size::new(20.0, 3.0),
            glyph_advance: 1.0,
            line_height: 1.0,
            dialog_size: Size::new(40.0, 9.0),
            dialog_padding: 1.0,
            menu_width: 24.0,
            menu_item_height: 1.0,
            menu_separator_height: 1.0,
            ..Self::default()
        }
    }

    /// Builder-style override for the tooltip delay.
    pub fn with_tooltip_delay(mut self, delay: Duration) -> Self {
        self.tooltip_delay = delay;
        self
    }

    pub fn with_edge_threshold(mut self, threshold: f32) -> Self {
        self.edge_threshold = threshold.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_config_keeps_timing_defaults() {
        let cfg = UiConfig::terminal();
        assert_eq!(cfg.tooltip_delay, TOOLTIP_DELAY);
        assert_eq!(cfg.fade_hold, SCROLLBAR_FADE_HOLD);
        assert_eq!(cfg.caret_blink_period, CARET_BLINK_PERIOD);
        assert_eq!(cfg.glyph_advance, 1.0);
    }

    #[test]
    fn negative_threshold_is_floored() {
        let cfg = UiConfig::default().with_edge_threshold(-3.0);
        assert_eq!(cfg.edge_threshold, 0.0);
    }
}
