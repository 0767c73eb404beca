//! Routing raw input to nodes, and the per-frame tick.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{NodeId, UiContext};
use crate::components::Widget;
use crate::event::FocusOrigin;
use crate::geometry::Point;
use crate::input::{InputEvent, PointerButton};

impl UiContext {
    /// Deliver one input event. Returns whether anything consumed it.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerMove { pos } => {
                self.update_hover(*pos);
                self.hover_menus(*pos);
                false
            }
            InputEvent::PointerDown { pos, button } => self.pointer_down(*pos, *button),
            InputEvent::PointerDrag { pos, .. } => self.pointer_drag(*pos),
            InputEvent::PointerUp { pos, .. } => self.pointer_up(*pos),
            InputEvent::Wheel { pos, delta } => self.wheel(*pos, *delta),
            InputEvent::Key(key) => self.key(key),
            InputEvent::StageResize(size) => {
                let root = self.root;
                self.set_size(root, size.width, size.height).is_ok()
            }
        }
    }

    /// Advance the frame clock: fire due timers, then animate.
    pub fn tick(&mut self, dt: Duration) {
        self.frame_count += 1;
        for (token, action) in self.timers.advance(dt) {
            self.fire_timer(token, action);
        }
        for node in self.nodes.values_mut() {
            if let Some(bar) = node.widget.as_scrollbar_mut() {
                bar.tick();
            }
        }
        if let Some(input) = self
            .focused
            .and_then(|id| self.nodes.get_mut(id))
            .and_then(|n| n.widget.as_text_input_mut())
        {
            input.tick();
        }
        self.update_resize_zones();
    }

    fn pointer_down(&mut self, pos: Point, button: PointerButton) -> bool {
        self.update_hover(pos);
        self.dismiss_tooltips();
        if self.press_menus(pos) {
            return true;
        }
        let Some(hit) = self.hit_test(pos) else {
            self.blur();
            return false;
        };
        if !self.enabled_chain(hit) {
            return false;
        }
        if let Some(frame) = self.nearest_frame(hit) {
            let _ = self.activate_frame(frame);
            if button == PointerButton::Left && self.press_frame(frame, hit, pos) {
                return true;
            }
        }
        if self.is_focusable(hit) {
            let _ = self.focus(hit, FocusOrigin::Pointer);
        } else {
            self.blur();
        }
        if button != PointerButton::Left {
            return true;
        }
        self.pressed = Some(hit);
        let local = self
            .global_position(hit)
            .map(|o| Point::new(pos.x - o.x, pos.y - o.y))
            .unwrap_or_default();
        match self.nodes.get(hit).map(|n| &n.widget) {
            Some(Widget::TextInput(_)) => self.text_click(hit, pos),
            Some(Widget::Scrollbar(_)) => {
                if let Some(bar) = self
                    .nodes
                    .get_mut(hit)
                    .and_then(|n| n.widget.as_scrollbar_mut())
                {
                    bar.begin_drag(local.y);
                }
            }
            Some(Widget::Button(_) | Widget::Checkbox(_) | Widget::DropDownList(_)) => {
                self.press_control(hit);
            }
            _ => {}
        }
        true
    }

    fn pointer_drag(&mut self, pos: Point) -> bool {
        self.update_hover(pos);
        if self.drag_frames(pos) {
            return true;
        }
        let Some(pressed) = self.pressed else {
            return false;
        };
        let Some(origin) = self.global_position(pressed) else {
            return false;
        };
        let value = self
            .nodes
            .get_mut(pressed)
            .and_then(|n| n.widget.as_scrollbar_mut())
            .and_then(|bar| bar.drag_to(pos.y - origin.y));
        match value {
            Some(value) => {
                self.apply_scrollbar_value(pressed, value);
                true
            }
            None => false,
        }
    }

    fn pointer_up(&mut self, pos: Point) -> bool {
        self.update_hover(pos);
        let mut handled = self.release_frames();
        if let Some(pressed) = self.pressed.take() {
            if let Some(bar) = self
                .nodes
                .get_mut(pressed)
                .and_then(|n| n.widget.as_scrollbar_mut())
            {
                bar.end_drag();
            }
            let over = self.is_hovered(pressed);
            self.release_control(pressed, over);
            handled = true;
        }
        handled
    }

    /// Positive `delta` is wheel-up. The innermost scrollbar or pane under
    /// the pointer takes it.
    fn wheel(&mut self, pos: Point, delta: i32) -> bool {
        self.update_hover(pos);
        let mut cursor = self.hit_test(pos);
        while let Some(id) = cursor {
            let Some(node) = self.nodes.get(id) else {
                return false;
            };
            match &node.widget {
                Widget::Scrollbar(_) => {
                    let step = self.config.scrollbar_wheel_step;
                    let value = self
                        .nodes
                        .get_mut(id)
                        .and_then(|n| n.widget.as_scrollbar_mut())
                        .filter(|bar| bar.is_thumb_visible())
                        .map(|bar| bar.wheel(delta, step));
                    if let Some(value) = value {
                        self.apply_scrollbar_value(id, value);
                    }
                    return true;
                }
                Widget::ScrollPane(pane) => {
                    let step = i64::from(pane.scroll_step());
                    return self.scroll(id, -i64::from(delta) * step).is_ok();
                }
                _ => cursor = node.parent,
            }
        }
        false
    }

    fn key(&mut self, key: &KeyEvent) -> bool {
        if self.menu_root.is_some() {
            return self.menu_key(key);
        }
        match key.code {
            KeyCode::BackTab => return self.focus_next(false).is_some(),
            KeyCode::Tab => {
                let back = key.modifiers.contains(KeyModifiers::SHIFT);
                return self.focus_next(!back).is_some();
            }
            _ => {}
        }
        let used = match self.focused.filter(|&f| self.enabled_chain(f)) {
            Some(focused) => match self.nodes.get(focused).map(|n| &n.widget) {
                Some(Widget::TextInput(_)) => self.text_key(focused, key),
                Some(Widget::Button(_) | Widget::Checkbox(_) | Widget::DropDownList(_)) => {
                    self.control_key(focused, key)
                }
                _ => false,
            },
            None => false,
        };
        used || self.dialog_key(key)
    }

    /// A node takes input only while it and all its ancestors are enabled.
    fn enabled_chain(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(node_id) = cursor {
            match self.nodes.get(node_id) {
                Some(node) if node.enabled => cursor = node.parent,
                _ => return false,
            }
        }
        true
    }
}
