//! Shared crate-wide constants.
//!
//! These are the defaults behind [`crate::config::UiConfig::default`]. Units
//! are abstract layout units; the terminal host maps one unit to one cell and
//! uses [`crate::config::UiConfig::terminal`] instead.

use std::time::Duration;

/// Padding applied to every side of a freshly created component.
pub const DEFAULT_PADDING: f32 = 2.0;

/// Thickness of the band along a frame's border that arms manual resize.
///
/// The pointer is classified against the frame's global bounds each tick;
/// anything within this many units from an edge selects that edge (or the
/// corner, when two bands overlap).
pub const EDGE_THRESHOLD: f32 = 8.0;

pub const FRAME_DEFAULT_WIDTH: f32 = 600.0;
pub const FRAME_DEFAULT_HEIGHT: f32 = 400.0;
pub const FRAME_TITLE_HEIGHT: f32 = 25.0;

/// Smallest extent a frame can be dragged down to with manual resize.
pub const FRAME_MIN_WIDTH: f32 = 120.0;
pub const FRAME_MIN_HEIGHT: f32 = 60.0;

pub const SCROLL_PANE_DEFAULT_WIDTH: f32 = 300.0;
pub const SCROLL_PANE_DEFAULT_HEIGHT: f32 = 300.0;
pub const SCROLL_PANE_ITEM_HEIGHT: f32 = 30.0;

/// Items scrolled per wheel notch over a scroll pane.
pub const SCROLL_STEP: i32 = 4;

pub const SCROLLBAR_WIDTH: f32 = 6.0;

/// Units the thumb travels per wheel notch over the scrollbar itself.
pub const SCROLLBAR_WHEEL_STEP: f32 = 25.0;

/// Ticks the scrollbar stays fully opaque after activity.
///
/// The counter does not run down while the pointer hovers the bar.
pub const SCROLLBAR_FADE_HOLD: u32 = 50;
pub const SCROLLBAR_MIN_ALPHA: f32 = 0.1;
pub const SCROLLBAR_MAX_ALPHA: f32 = 1.0;
pub const SCROLLBAR_ALPHA_STEP: f32 = 0.1;

pub const TEXT_INPUT_DEFAULT_WIDTH: f32 = 200.0;
pub const TEXT_INPUT_DEFAULT_HEIGHT: f32 = 30.0;

/// Horizontal inset of the text inside an input, applied on both sides.
pub const TEXT_MARGIN: f32 = 5.0;

/// Ticks between caret visibility toggles.
pub const CARET_BLINK_PERIOD: u32 = 25;

/// Hover time before a tooltip shows, and hover-out time before it hides.
pub const TOOLTIP_DELAY: Duration = Duration::from_millis(1000);
pub const TOOLTIP_PADDING: f32 = 10.0;
pub const TOOLTIP_DEFAULT_WIDTH: f32 = 200.0;
pub const TOOLTIP_DEFAULT_HEIGHT: f32 = 200.0;

/// Horizontal advance of a glyph in the default monospace metrics.
pub const GLYPH_ADVANCE: f32 = 8.0;
pub const GLYPH_LINE_HEIGHT: f32 = 12.0;

pub const DIALOG_DEFAULT_WIDTH: f32 = 400.0;
pub const DIALOG_DEFAULT_HEIGHT: f32 = 200.0;
pub const DIALOG_PADDING: f32 = 20.0;

pub const MENU_WIDTH: f32 = 200.0;
pub const MENU_ITEM_HEIGHT: f32 = 30.0;
pub const MENU_SEPARATOR_HEIGHT: f32 = 6.0;
