//! Frame activation, keyboard focus and hit-testing.
//!
//! The active frame and the focused node only change through
//! [`UiContext::activate_frame`], [`UiContext::focus`] and
//! [`UiContext::blur`].

use super::{NodeId, UiContext};
use crate::components::Widget;
use crate::error::{Result, UiError};
use crate::event::{FocusOrigin, UiEvent};
use crate::geometry::Point;

/// Cyclic traversal order with wraparound at both ends.
#[derive(Debug, Clone)]
pub(crate) struct FocusRing<T: Copy + Eq> {
    order: Vec<T>,
    current: Option<T>,
}

impl<T: Copy + Eq> FocusRing<T> {
    pub(crate) fn new(current: Option<T>) -> Self {
        Self {
            order: Vec::new(),
            current,
        }
    }

    pub(crate) fn set_order(&mut self, order: Vec<T>) {
        self.order = order;
    }

    pub(crate) fn current(&self) -> Option<T> {
        self.current
    }

    /// Step to the next entry. Starting outside the order lands on the first
    /// entry going forward and on the last going back.
    pub(crate) fn advance(&mut self, forward: bool) -> Option<T> {
        if self.order.is_empty() {
            return None;
        }
        let len = self.order.len() as isize;
        let idx = self
            .current
            .and_then(|c| self.order.iter().position(|item| *item == c));
        let next = match idx {
            Some(i) => {
                let step = if forward { 1isize } else { -1isize };
                (i as isize + step).rem_euclid(len) as usize
            }
            None if forward => 0,
            None => self.order.len() - 1,
        };
        self.current = Some(self.order[next]);
        self.current
    }
}

impl UiContext {
    pub fn active_frame(&self) -> Option<NodeId> {
        self.active_frame
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn focus_origin(&self) -> Option<FocusOrigin> {
        self.focus_origin
    }

    /// Make `frame` the active frame and raise it to the top of its parent.
    ///
    /// Returns `Ok(false)` without notifying anyone when it already is active.
    pub fn activate_frame(&mut self, frame: NodeId) -> Result<bool> {
        if self.node_ref(frame)?.widget.as_frame().is_none() {
            return Err(UiError::WrongKind { expected: "frame" });
        }
        if self.active_frame == Some(frame) {
            return Ok(false);
        }
        if let Some(previous) = self.active_frame.take() {
            if let Some(f) = self
                .nodes
                .get_mut(previous)
                .and_then(|n| n.widget.as_frame_mut())
            {
                f.set_active(false);
            }
            self.emit(previous, UiEvent::Deactivate);
        }
        self.active_frame = Some(frame);
        if let Ok(f) = self.widget_mut(frame, "frame", Widget::as_frame_mut) {
            f.set_active(true);
        }
        if let Some(parent) = self.parent(frame)
            && let Some(p) = self.nodes.get_mut(parent)
        {
            p.children.retain(|&c| c != frame);
            p.children.push(frame);
        }
        tracing::debug!(frame = ?frame, "activated frame");
        self.emit(frame, UiEvent::Activate);
        Ok(true)
    }

    /// `id` itself when it is a frame, otherwise its closest frame ancestor.
    pub fn nearest_frame(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = Some(id);
        while let Some(node_id) = cursor {
            let node = self.nodes.get(node_id)?;
            if node.widget.as_frame().is_some() {
                return Some(node_id);
            }
            cursor = node.parent;
        }
        None
    }

    /// Whether `id` can take focus right now.
    pub fn is_focusable(&self, id: NodeId) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|n| n.enabled && n.visible && n.widget.is_focusable())
    }

    /// Move keyboard focus to `id` and activate its frame.
    ///
    /// Returns `Ok(false)` when the node can't take focus or already has it.
    pub fn focus(&mut self, id: NodeId, origin: FocusOrigin) -> Result<bool> {
        self.node_ref(id)?;
        if !self.is_focusable(id) {
            return Ok(false);
        }
        if self.focused == Some(id) {
            self.focus_origin = Some(origin);
            let node = self.node_mut(id)?;
            node.focus_rect_visible = origin == FocusOrigin::Keyboard && node.focus_rect_enabled;
            return Ok(false);
        }
        self.blur();

        self.focused = Some(id);
        self.focus_origin = Some(origin);
        let node = self.node_mut(id)?;
        node.focus_rect_visible = origin == FocusOrigin::Keyboard && node.focus_rect_enabled;
        if let Some(input) = node.widget.as_text_input_mut() {
            input.focus_gained();
        }
        self.emit(id, UiEvent::FocusIn { origin });

        if let Some(frame) = self.nearest_frame(id) {
            self.activate_frame(frame)?;
        }
        Ok(true)
    }

    /// Clear focus. Returns `false` when nothing was focused.
    pub fn blur(&mut self) -> bool {
        let Some(id) = self.focused.take() else {
            return false;
        };
        self.focus_origin = None;
        if let Some(node) = self.nodes.get_mut(id) {
            node.focus_rect_visible = false;
            match &mut node.widget {
                Widget::TextInput(input) => input.focus_lost(),
                Widget::DropDownList(list) => list.set_open(false),
                _ => {}
            }
        }
        self.emit(id, UiEvent::FocusOut);
        true
    }

    /// Tab traversal. Cycles through focusable nodes of the active frame, or
    /// of the whole scene when the frame has none.
    pub fn focus_next(&mut self, forward: bool) -> Option<NodeId> {
        let mut order = self
            .active_frame
            .map(|f| self.focusable_under(f))
            .unwrap_or_default();
        if order.is_empty() {
            order = self.focusable_under(self.root);
        }
        let mut ring = FocusRing::new(self.focused);
        ring.set_order(order);
        let next = ring.advance(forward)?;
        match self.focus(next, FocusOrigin::Keyboard) {
            Ok(_) => ring.current(),
            Err(_) => None,
        }
    }

    /// Focusable descendants of `scope` in tree order.
    fn focusable_under(&self, scope: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![scope];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if !node.visible || !node.enabled {
                continue;
            }
            if node.widget.is_focusable() {
                found.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        found
    }

    /// Topmost visible node under `point`, in stage coordinates. Later
    /// children are above earlier ones; the stage itself is never returned.
    /// Tooltips are never hit, so a press always reaches the owner below.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.hit_in(self.root, point, Point::default())
            .filter(|&id| id != self.root)
    }

    fn hit_in(&self, id: NodeId, point: Point, parent_origin: Point) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        if !node.visible || matches!(node.widget, Widget::Tooltip(_)) {
            return None;
        }
        let global = node.bounds.translate(parent_origin.x, parent_origin.y);
        if !global.contains(point) {
            return None;
        }
        node.children
            .iter()
            .rev()
            .find_map(|&child| self.hit_in(child, point, global.origin()))
            .or(Some(id))
    }

    /// Whether any frame lies under `point`.
    pub fn frame_hit_test(&self, point: Point) -> bool {
        self.hit_test(point)
            .and_then(|id| self.nearest_frame(id))
            .is_some()
    }
}
