//! The geometry contract.
//!
//! Every size change goes clamp, apply, notify, update. The update step is the
//! widget's layout hook. While it runs, the node is flagged as updating and
//! any resize it issues against itself is applied silently: no second
//! notification and no nested update.

use super::{NodeId, UiContext};
use crate::components::Widget;
use crate::error::Result;
use crate::event::UiEvent;
use crate::geometry::{Padding, Point, Rect, Size};

impl UiContext {
    /// Returns the size actually applied.
    pub fn set_size(&mut self, id: NodeId, width: f32, height: f32) -> Result<Size> {
        let node = self.node_mut(id)?;
        let size = node.size_bounds.clamp(Size::new(width, height));
        node.bounds.width = size.width;
        node.bounds.height = size.height;
        if node.updating {
            return Ok(size);
        }
        self.emit(
            id,
            UiEvent::Resize {
                width: size.width,
                height: size.height,
            },
        );
        self.run_update(id);
        Ok(size)
    }

    pub fn set_width(&mut self, id: NodeId, width: f32) -> Result<Size> {
        let height = self.node_ref(id)?.bounds.height;
        self.set_size(id, width, height)
    }

    pub fn set_height(&mut self, id: NodeId, height: f32) -> Result<Size> {
        let width = self.node_ref(id)?.bounds.width;
        self.set_size(id, width, height)
    }

    /// Zero leaves a side unbounded. The current size is re-clamped through
    /// [`Self::set_size`].
    pub fn set_min_size(&mut self, id: NodeId, width: f32, height: f32) -> Result<Size> {
        let node = self.node_mut(id)?;
        node.size_bounds.min = Size::new(width.max(0.0), height.max(0.0));
        let current = node.bounds.size();
        self.set_size(id, current.width, current.height)
    }

    pub fn set_max_size(&mut self, id: NodeId, width: f32, height: f32) -> Result<Size> {
        let node = self.node_mut(id)?;
        node.size_bounds.max = Size::new(width.max(0.0), height.max(0.0));
        let current = node.bounds.size();
        self.set_size(id, current.width, current.height)
    }

    pub fn set_position(&mut self, id: NodeId, x: f32, y: f32) -> Result<()> {
        let node = self.node_mut(id)?;
        node.bounds.x = x;
        node.bounds.y = y;
        Ok(())
    }

    pub fn set_padding(&mut self, id: NodeId, padding: Padding) -> Result<()> {
        self.node_mut(id)?.padding = padding;
        self.run_update(id);
        Ok(())
    }

    /// Disabled nodes ignore input and give up focus.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        self.node_mut(id)?.enabled = enabled;
        if !enabled && self.focused == Some(id) {
            self.blur();
        }
        Ok(())
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<()> {
        self.node_mut(id)?.visible = visible;
        if !visible && self.focused.is_some_and(|f| self.is_ancestor(id, f)) {
            self.blur();
        }
        Ok(())
    }

    pub fn set_alpha(&mut self, id: NodeId, alpha: f32) -> Result<()> {
        self.node_mut(id)?.alpha = alpha.clamp(0.0, 1.0);
        Ok(())
    }

    pub fn set_focus_rect_enabled(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        node.focus_rect_enabled = enabled;
        if !enabled {
            node.focus_rect_visible = false;
        }
        Ok(())
    }

    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.nodes.get(id).map(|n| n.bounds)
    }

    /// Position in stage coordinates: the sum of the node's and every
    /// ancestor's origin.
    pub fn global_position(&self, id: NodeId) -> Option<Point> {
        let mut node = self.nodes.get(id)?;
        let mut pos = node.bounds.origin();
        while let Some(parent) = node.parent.and_then(|p| self.nodes.get(p)) {
            pos = pos.offset(parent.bounds.x, parent.bounds.y);
            node = parent;
        }
        Some(pos)
    }

    pub fn global_bounds(&self, id: NodeId) -> Option<Rect> {
        let size = self.nodes.get(id)?.bounds.size();
        Some(Rect::from_parts(self.global_position(id)?, size))
    }

    pub(crate) fn run_update(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.updating {
            return;
        }
        node.updating = true;
        self.layout(id);
        if let Some(node) = self.nodes.get_mut(id) {
            node.updating = false;
        }
    }

    fn layout(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let size = node.bounds.size();
        let padding = node.padding;
        match &node.widget {
            Widget::Frame(frame) => {
                let (title_bar, content) = (frame.title_bar(), frame.content());
                self.layout_frame(size, padding, title_bar, content);
                if self.dialogs.contains_key(id) {
                    self.layout_dialog(id);
                }
            }
            Widget::ScrollPane(pane) => {
                let scrollbar = pane.scrollbar();
                let bar_width = self.config.scrollbar_width;
                let _ = self.set_position(scrollbar, size.width - bar_width, 0.0);
                let _ = self.set_size(scrollbar, bar_width, size.height);
                self.rebuild(id, true);
            }
            Widget::Scrollbar(_) => {
                if let Ok(bar) = self.widget_mut(id, "scrollbar", Widget::as_scrollbar_mut) {
                    bar.set_track(size.height);
                }
            }
            Widget::TextInput(input) => {
                let available = size.width - 2.0 * input.margin();
                if let Ok(input) = self.widget_mut(id, "text input", Widget::as_text_input_mut) {
                    input.set_available_width(available);
                }
            }
            Widget::Tooltip(tooltip) => {
                let fit = tooltip.fit_size(self.metrics.as_ref());
                let _ = self.set_size(id, fit.width, fit.height);
            }
            Widget::Panel(_)
            | Widget::Label(_)
            | Widget::Button(_)
            | Widget::Checkbox(_)
            | Widget::DropDownList(_)
            | Widget::Menu(_) => {}
        }
    }

    fn layout_frame(&mut self, size: Size, padding: Padding, title_bar: NodeId, content: NodeId) {
        let title_height = self.config.title_height.min(size.height);
        let _ = self.set_position(title_bar, 0.0, 0.0);
        let _ = self.set_size(title_bar, size.width, title_height);
        let _ = self.set_position(content, padding.left, title_height + padding.top);
        let _ = self.set_size(
            content,
            (size.width - padding.horizontal()).max(0.0),
            (size.height - title_height - padding.vertical()).max(0.0),
        );
    }
}
