use crate::config::UiConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    hold: u32,
    min_alpha: f32,
    max_alpha: f32,
    step: f32,
}

/// Vertical scrollbar with a draggable thumb.
///
/// The thumb length and offset are derived from the owning pane; the only
/// state that originates here is the thumb position while it is dragged or
/// wheeled, which the pane reads back as a normalized value in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Scrollbar {
    track: f32,
    thumb_y: f32,
    thumb_len: f32,
    thumb_visible: bool,
    alpha: f32,
    hold_left: u32,
    hovered: bool,
    drag_anchor: Option<f32>,
    fade: Fade,
}

impl Scrollbar {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            track: 0.0,
            thumb_y: 0.0,
            thumb_len: 0.0,
            thumb_visible: false,
            alpha: config.min_alpha,
            hold_left: 0,
            hovered: false,
            drag_anchor: None,
            fade: Fade {
                hold: config.fade_hold,
                min_alpha: config.min_alpha,
                max_alpha: config.max_alpha,
                step: config.alpha_step,
            },
        }
    }

    pub fn track(&self) -> f32 {
        self.track
    }

    pub fn set_track(&mut self, track: f32) {
        self.track = track.max(0.0);
        self.thumb_len = self.thumb_len.min(self.track);
        self.fix_bounds();
    }

    pub fn thumb_length(&self) -> f32 {
        self.thumb_len
    }

    pub fn set_thumb_length(&mut self, length: f32) {
        self.thumb_len = length.clamp(0.0, self.track);
        self.fix_bounds();
    }

    /// Thumb offset from the top of the track.
    pub fn thumb_offset(&self) -> f32 {
        self.thumb_y
    }

    pub fn is_thumb_visible(&self) -> bool {
        self.thumb_visible
    }

    pub(crate) fn set_thumb_visible(&mut self, visible: bool) {
        self.thumb_visible = visible;
        if !visible {
            self.drag_anchor = None;
        }
    }

    fn travel(&self) -> f32 {
        (self.track - self.thumb_len).max(0.0)
    }

    /// Normalized thumb position.
    pub fn value(&self) -> f32 {
        let travel = self.travel();
        if travel <= 0.0 {
            0.0
        } else {
            self.thumb_y / travel
        }
    }

    pub fn set_value(&mut self, value: f32) {
        self.sync_value(value);
        self.fade_in();
    }

    /// Move the thumb to `value` without counting as scroll activity.
    pub(crate) fn sync_value(&mut self, value: f32) {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        self.thumb_y = value * self.travel();
    }

    /// Starts a thumb drag if `y` (track-local) is on the thumb.
    pub fn begin_drag(&mut self, y: f32) -> bool {
        if !self.thumb_visible || y < self.thumb_y || y >= self.thumb_y + self.thumb_len {
            return false;
        }
        self.drag_anchor = Some(y);
        self.fade_in();
        true
    }

    /// Moves the thumb by the pointer travel and returns the new value.
    pub fn drag_to(&mut self, y: f32) -> Option<f32> {
        let anchor = self.drag_anchor?;
        self.thumb_y += y - anchor;
        self.drag_anchor = Some(y);
        self.fix_bounds();
        self.fade_in();
        Some(self.value())
    }

    pub fn end_drag(&mut self) -> bool {
        self.drag_anchor.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Wheel over the bar itself moves the thumb by `step` per notch.
    pub fn wheel(&mut self, delta: i32, step: f32) -> f32 {
        self.thumb_y -= delta as f32 * step;
        self.fix_bounds();
        self.fade_in();
        self.value()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        if hovered {
            self.fade_in();
        }
        self.hovered = hovered;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Restart the full-opacity hold.
    pub fn fade_in(&mut self) {
        self.hold_left = self.fade.hold;
    }

    /// One frame of the hold/fade animation.
    pub fn tick(&mut self) {
        if self.hold_left > 0 {
            self.alpha = (self.alpha + self.fade.step).min(self.fade.max_alpha);
        } else if self.alpha > self.fade.min_alpha {
            self.alpha = (self.alpha - self.fade.step).max(self.fade.min_alpha);
        }
        if self.hold_left > 0 && !self.hovered {
            self.hold_left -= 1;
        }
    }

    fn fix_bounds(&mut self) {
        self.thumb_y = self.thumb_y.clamp(0.0, self.travel());
    }
}
