//! Floating frames: registration, drag-to-move and manual resize.

use super::{NodeId, UiContext};
use crate::components::{Frame, Label, Panel, Widget};
use crate::error::Result;
use crate::event::UiEvent;
use crate::geometry::Point;
use crate::layout::{HeaderDrag, ResizeDrag, classify_zone};

/// Pointer shape requested by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CursorMode {
    #[default]
    Idle,
    Text,
    /// Double-headed arrow, rotated by `rotation` degrees.
    Resize { rotation: f32 },
}

impl UiContext {
    /// A detached frame with a title bar and an empty content panel. It
    /// registers with the frame list right away and centers itself on the
    /// stage the first time it is attached.
    pub fn create_frame(&mut self, title: impl Into<String>) -> NodeId {
        let title = title.into();
        let title_bar = self.insert(Widget::Label(Label::new(title.clone())), Default::default());
        let content = self.insert(Widget::Panel(Panel::with_background()), Default::default());
        let frame = self.insert(
            Widget::Frame(Frame::new(title, title_bar, content)),
            Default::default(),
        );
        self.link(frame, title_bar);
        self.link(frame, content);

        let min = self.config.frame_min_size;
        let size = self.config.frame_size;
        let _ = self.set_min_size(frame, min.width, min.height);
        let _ = self.set_size(frame, size.width, size.height);

        self.frames.push(frame);
        tracing::debug!(frame = ?frame, "registered frame");
        frame
    }

    /// Known frames in registration order.
    pub fn frames(&self) -> &[NodeId] {
        &self.frames
    }

    pub fn set_frame_title(&mut self, id: NodeId, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        let frame = self.widget_mut(id, "frame", Widget::as_frame_mut)?;
        frame.set_title(title.clone());
        let title_bar = frame.title_bar();
        self.set_label_text(title_bar, title)
    }

    pub fn set_draggable(&mut self, id: NodeId, draggable: bool) -> Result<()> {
        self.widget_mut(id, "frame", Widget::as_frame_mut)?
            .set_draggable(draggable);
        Ok(())
    }

    pub fn set_frame_border(&mut self, id: NodeId, border: bool) -> Result<()> {
        self.widget_mut(id, "frame", Widget::as_frame_mut)?
            .set_border(border);
        Ok(())
    }

    pub fn set_manual_resize_enabled(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        let frame = self.widget_mut(id, "frame", Widget::as_frame_mut)?;
        let was_resizing = frame.is_resizing();
        frame.set_manual_resize(enabled);
        if !enabled && was_resizing {
            self.cursor = CursorMode::Idle;
            self.emit(id, UiEvent::ResizeComplete);
        }
        Ok(())
    }

    pub fn set_center_on_attach(&mut self, id: NodeId, center: bool) -> Result<()> {
        self.widget_mut(id, "frame", Widget::as_frame_mut)?
            .set_center_on_attach(center);
        Ok(())
    }

    /// Place the frame in the middle of the stage.
    pub fn center_frame(&mut self, id: NodeId) -> Result<()> {
        let size = self.node_ref(id)?.bounds.size();
        let stage = self.stage_bounds();
        let parent_origin = self
            .parent(id)
            .and_then(|p| self.global_position(p))
            .unwrap_or_default();
        self.set_position(
            id,
            ((stage.width - size.width) / 2.0).floor() - parent_origin.x,
            ((stage.height - size.height) / 2.0).floor() - parent_origin.y,
        )
    }

    pub fn cursor(&self) -> CursorMode {
        self.cursor
    }

    /// Per-tick zone classification for frames with manual resize enabled.
    /// Only the topmost frame under the pointer gets a zone.
    pub(crate) fn update_resize_zones(&mut self) {
        let pointer = self.pointer;
        let hit = pointer.and_then(|p| self.hit_test(p));
        let top = hit.and_then(|h| self.nearest_frame(h));
        let threshold = self.config.edge_threshold;

        for id in self.frames.clone() {
            let bounds = self.global_bounds(id);
            let Some(frame) = self.nodes.get_mut(id).and_then(|n| n.widget.as_frame_mut()) else {
                continue;
            };
            if !frame.manual_resize_enabled() || frame.is_resizing() {
                continue;
            }
            let edge = match (pointer, bounds) {
                (Some(p), Some(b)) if top == Some(id) => classify_zone(b, p, threshold),
                _ => None,
            };
            frame.set_hover_edge(edge);
        }

        self.cursor = self.compute_cursor(top, hit);
    }

    fn compute_cursor(&self, top: Option<NodeId>, hit: Option<NodeId>) -> CursorMode {
        let engaged = self
            .frames
            .iter()
            .filter_map(|&f| self.frame(f))
            .find_map(|f| f.resize_drag.map(|d| d.edge));
        let hovered = top.and_then(|f| self.frame(f)).and_then(Frame::hover_edge);
        if let Some(edge) = engaged.or(hovered) {
            return CursorMode::Resize {
                rotation: edge.cursor_rotation(),
            };
        }
        if hit.is_some_and(|h| self.text_input(h).is_some()) {
            return CursorMode::Text;
        }
        CursorMode::Idle
    }

    /// Pointer-down inside `frame`. Starts a resize when the pointer is in an
    /// edge zone, otherwise a title drag when the title bar was hit. Returns
    /// `true` when a resize started.
    pub(crate) fn press_frame(&mut self, id: NodeId, hit: NodeId, pointer: Point) -> bool {
        let threshold = self.config.edge_threshold;
        let Some(global) = self.global_bounds(id) else {
            return false;
        };
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        let local = node.bounds;
        let Some(frame) = node.widget.as_frame_mut() else {
            return false;
        };

        if frame.manual_resize_enabled()
            && let Some(edge) = classify_zone(global, pointer, threshold)
        {
            frame.set_hover_edge(Some(edge));
            frame.resize_drag = Some(ResizeDrag::new(edge, pointer, local));
            self.cursor = CursorMode::Resize {
                rotation: edge.cursor_rotation(),
            };
            tracing::debug!(frame = ?id, ?edge, "resize started");
            self.emit(id, UiEvent::ResizeStart);
            return true;
        }
        if hit == frame.title_bar() && frame.title_draggable() {
            frame.header_drag = Some(HeaderDrag::new(pointer, local.origin()));
        }
        false
    }

    /// Continue whichever frame drag is running. Returns `false` when none is.
    pub(crate) fn drag_frames(&mut self, pointer: Point) -> bool {
        for id in self.frames.clone() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let size_bounds = node.size_bounds;
            let Some(frame) = node.widget.as_frame() else {
                continue;
            };
            if let Some(drag) = frame.resize_drag {
                let rect = drag.apply(pointer, size_bounds);
                let _ = self.set_position(id, rect.x, rect.y);
                let _ = self.set_size(id, rect.width, rect.height);
                return true;
            }
            if let Some(drag) = frame.header_drag {
                let to = drag.position_for(pointer);
                let _ = self.set_position(id, to.x, to.y);
                return true;
            }
        }
        false
    }

    /// Pointer-up: end every frame drag. Returns `true` if one was running.
    pub(crate) fn release_frames(&mut self) -> bool {
        let mut released = false;
        for id in self.frames.clone() {
            let Some(frame) = self.nodes.get_mut(id).and_then(|n| n.widget.as_frame_mut()) else {
                continue;
            };
            released |= frame.header_drag.take().is_some();
            if frame.resize_drag.take().is_some() {
                released = true;
                self.cursor = CursorMode::Idle;
                tracing::debug!(frame = ?id, "resize complete");
                self.emit(id, UiEvent::ResizeComplete);
            }
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::geometry::{Rect, Size};
    use crate::layout::ResizeEdge;

    fn ctx() -> UiContext {
        UiContext::new(UiConfig::default(), Size::new(800.0, 600.0))
    }

    #[test]
    fn frames_register_in_order_and_center_on_attach() {
        let mut ui = ctx();
        let a = ui.create_frame("a");
        let b = ui.create_frame("b");
        assert_eq!(ui.frames(), &[a, b]);
        ui.attach(ui.root(), a).unwrap();
        assert_eq!(ui.bounds(a).unwrap(), Rect::new(100.0, 100.0, 600.0, 400.0));
        ui.set_position(a, 0.0, 0.0).unwrap();
        ui.detach(a);
        ui.attach(ui.root(), a).unwrap();
        assert_eq!(ui.bounds(a).unwrap().origin(), Point::new(0.0, 0.0));
    }

    #[test]
    fn title_tracks_set_frame_title() {
        let mut ui = ctx();
        let f = ui.create_frame("old");
        ui.set_frame_title(f, "new").unwrap();
        let title_bar = ui.frame(f).unwrap().title_bar();
        assert_eq!(ui.frame(f).unwrap().title(), "new");
        assert_eq!(ui.label(title_bar).unwrap().text(), "new");
    }

    #[test]
    fn zone_updates_cursor_and_title_drag() {
        let mut ui = ctx();
        let f = ui.create_frame("a");
        ui.attach(ui.root(), f).unwrap();
        ui.set_manual_resize_enabled(f, true).unwrap();

        ui.pointer = Some(Point::new(103.0, 300.0));
        ui.update_resize_zones();
        assert_eq!(ui.frame(f).unwrap().hover_edge(), Some(ResizeEdge::Left));
        assert_eq!(ui.cursor(), CursorMode::Resize { rotation: 0.0 });
        assert!(ui.frame(f).unwrap().title_draggable());

        ui.pointer = Some(Point::new(400.0, 102.0));
        ui.update_resize_zones();
        assert_eq!(ui.frame(f).unwrap().hover_edge(), Some(ResizeEdge::Top));
        assert!(!ui.frame(f).unwrap().title_draggable());

        ui.pointer = Some(Point::new(400.0, 300.0));
        ui.update_resize_zones();
        assert_eq!(ui.frame(f).unwrap().hover_edge(), None);
        assert_eq!(ui.cursor(), CursorMode::Idle);
    }

    #[test]
    fn disabled_manual_resize_never_classifies() {
        let mut ui = ctx();
        let f = ui.create_frame("a");
        ui.attach(ui.root(), f).unwrap();
        ui.pointer = Some(Point::new(101.0, 101.0));
        ui.update_resize_zones();
        assert_eq!(ui.frame(f).unwrap().hover_edge(), None);
        assert_eq!(ui.cursor(), CursorMode::Idle);
    }
}
