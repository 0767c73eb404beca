//! Virtualized scroll panes.
//!
//! A pane keeps an ordered list of item nodes it does not own and attaches
//! only the ones that fit at the current scroll position. Every change to the
//! position, the item list or the pane size ends in [`UiContext::rebuild`],
//! which diffs the attached items against the wanted ones by identity.

use super::{NodeId, UiContext};
use crate::components::scroll_pane::{
    position_for_value, thumb_fraction, value_for_position, visible_range,
};
use crate::components::{ScrollPane, Scrollbar, Widget};
use crate::error::{Result, UiError};
use crate::event::UiEvent;
use crate::geometry::Size;

impl UiContext {
    /// A detached pane with its scrollbar, at the configured default size.
    pub fn create_scroll_pane(&mut self) -> NodeId {
        let bar_width = self.config.scrollbar_width;
        let size = self.config.scroll_pane_size;
        let scrollbar = self.insert(
            Widget::Scrollbar(Scrollbar::new(&self.config)),
            Size::new(bar_width, size.height),
        );
        let pane = self.insert(
            Widget::ScrollPane(ScrollPane::new(
                scrollbar,
                self.config.item_height,
                self.config.scroll_step,
            )),
            Default::default(),
        );
        self.link(pane, scrollbar);
        let _ = self.set_size(pane, size.width, size.height);
        pane
    }

    /// Append `item` and scroll to the end. Moves the item out of any other
    /// pane first. Returns `false` if the pane already lists it.
    pub fn add_item(&mut self, pane: NodeId, item: NodeId) -> Result<bool> {
        self.pane_parts(pane)?;
        let owner = self.node_ref(item)?.list_owner;
        if item == pane || self.is_ancestor(item, pane) {
            return Err(UiError::StateConflict("a pane can't list its own ancestor"));
        }
        match owner {
            Some(o) if o == pane => return Ok(false),
            Some(other) => {
                self.remove_item(other, item)?;
            }
            None => {}
        }
        let (height, list) = self.pane_parts(pane)?;
        let before = list.position();
        list.push_item(item);
        let end = list.max_position(height);
        list.set_position(end as i64, height);
        self.node_mut(item)?.list_owner = Some(pane);
        self.commit_scroll(pane, before, true);
        Ok(true)
    }

    /// Drop `item` from the list and reset the position to the start. The
    /// item is detached, not disposed.
    pub fn remove_item(&mut self, pane: NodeId, item: NodeId) -> Result<bool> {
        let (height, list) = self.pane_parts(pane)?;
        let before = list.position();
        if list.remove_item(item).is_none() {
            return Ok(false);
        }
        list.set_position(0, height);
        if let Some(node) = self.nodes.get_mut(item) {
            node.list_owner = None;
        }
        self.commit_scroll(pane, before, true);
        Ok(true)
    }

    /// Detach and forget every item.
    pub fn clear_items(&mut self, pane: NodeId) -> Result<()> {
        let (_, list) = self.pane_parts(pane)?;
        let before = list.position();
        for item in list.take_items() {
            if let Some(node) = self.nodes.get_mut(item) {
                node.list_owner = None;
            }
        }
        self.commit_scroll(pane, before, true);
        Ok(())
    }

    pub fn set_item_height(&mut self, pane: NodeId, height: f32) -> Result<()> {
        let (_, list) = self.pane_parts(pane)?;
        let before = list.position();
        list.set_item_height(height);
        self.commit_scroll(pane, before, true);
        Ok(())
    }

    pub fn set_scroll_step(&mut self, pane: NodeId, step: i32) -> Result<()> {
        self.pane_parts(pane)?.1.set_scroll_step(step);
        Ok(())
    }

    /// Clamp into `[0, max]`, rebuild and return the stored position.
    pub fn set_scroll_position(&mut self, pane: NodeId, position: i64) -> Result<usize> {
        let (height, list) = self.pane_parts(pane)?;
        let before = list.position();
        let stored = list.set_position(position, height);
        let scrollbar = list.scrollbar();
        self.commit_scroll(pane, before, true);
        self.wake_scrollbar(scrollbar);
        Ok(stored)
    }

    /// Scroll by `delta` items; positive moves towards the end.
    pub fn scroll(&mut self, pane: NodeId, delta: i64) -> Result<usize> {
        let position = self.pane_parts(pane)?.1.position() as i64;
        self.set_scroll_position(pane, position.saturating_add(delta))
    }

    /// Scroll to a normalized value in `[0, 1]`.
    pub fn set_scroll_value(&mut self, pane: NodeId, value: f32) -> Result<usize> {
        let (height, list) = self.pane_parts(pane)?;
        let max = list.max_position(height);
        self.set_scroll_position(pane, position_for_value(value, max) as i64)
    }

    pub fn scroll_position(&self, pane: NodeId) -> Option<usize> {
        self.scroll_pane(pane).map(ScrollPane::position)
    }

    pub fn scroll_value(&self, pane: NodeId) -> Option<f32> {
        let node = self.nodes.get(pane)?;
        Some(node.widget.as_scroll_pane()?.value(node.bounds.height))
    }

    pub fn max_scroll_position(&self, pane: NodeId) -> Option<usize> {
        let node = self.nodes.get(pane)?;
        Some(node.widget.as_scroll_pane()?.max_position(node.bounds.height))
    }

    pub fn total_scrollable_height(&self, pane: NodeId) -> Option<f32> {
        self.scroll_pane(pane).map(ScrollPane::total_height)
    }

    /// Items attached at the current position, top to bottom.
    pub fn displayed_items(&self, pane: NodeId) -> &[NodeId] {
        self.scroll_pane(pane)
            .map(ScrollPane::displayed)
            .unwrap_or_default()
    }

    fn pane_parts(&mut self, pane: NodeId) -> Result<(f32, &mut ScrollPane)> {
        let node = self.node_mut(pane)?;
        let height = node.bounds.height;
        let list = node
            .widget
            .as_scroll_pane_mut()
            .ok_or(UiError::WrongKind {
                expected: "scroll pane",
            })?;
        Ok((height, list))
    }

    fn commit_scroll(&mut self, pane: NodeId, before: usize, sync_thumb: bool) {
        self.rebuild(pane, sync_thumb);
        if self.scroll_position(pane).is_some_and(|p| p != before) {
            self.emit(pane, UiEvent::Change);
        }
    }

    fn wake_scrollbar(&mut self, scrollbar: NodeId) {
        if let Ok(bar) = self.widget_mut(scrollbar, "scrollbar", Widget::as_scrollbar_mut) {
            bar.fade_in();
        }
    }

    /// Recompute the displayed range and attach, detach or reposition items
    /// to match it. With `sync_thumb` the thumb follows the position; a change
    /// that came from the thumb itself leaves it where the pointer put it.
    pub(crate) fn rebuild(&mut self, pane: NodeId, sync_thumb: bool) {
        let Some(node) = self.nodes.get(pane) else {
            return;
        };
        let Some(list) = node.widget.as_scroll_pane() else {
            return;
        };
        let size = node.bounds.size();
        let padding = node.padding;
        let scrollbar = list.scrollbar();
        let item_height = list.item_height();
        let max = list.max_position(size.height);
        let position = list.position().min(max);
        let range = visible_range(position, list.item_count(), size.height, item_height);
        let wanted = list.items()[range.clone()].to_vec();
        let total = list.total_height();
        let attached: Vec<NodeId> = node
            .children
            .iter()
            .copied()
            .filter(|&c| c != scrollbar)
            .collect();

        if let Ok((height, list)) = self.pane_parts(pane) {
            list.set_position(position as i64, height);
            list.set_displayed(range);
        }

        for item in attached.iter().filter(|i| !wanted.contains(i)) {
            self.detach(*item);
        }
        let item_width = (size.width - padding.horizontal()).max(0.0);
        let inner_height = (item_height - padding.vertical()).max(0.0);
        for (offset, &item) in wanted.iter().enumerate() {
            if !attached.contains(&item) {
                self.detach(item);
                self.link(pane, item);
            }
            let y = padding.top + offset as f32 * item_height;
            let _ = self.set_position(item, padding.left, y);
            let needs_size = self
                .bounds(item)
                .is_some_and(|b| b.width != item_width || b.height != inner_height);
            if needs_size {
                let _ = self.set_size(item, item_width, inner_height);
            }
        }
        if let Some(node) = self.nodes.get_mut(pane) {
            node.children = wanted.iter().copied().chain([scrollbar]).collect();
        }

        let fraction = thumb_fraction(size.height, total);
        if let Ok(bar) = self.widget_mut(scrollbar, "scrollbar", Widget::as_scrollbar_mut) {
            bar.set_track(size.height);
            bar.set_thumb_length(size.height * fraction);
            bar.set_thumb_visible(fraction < 1.0);
            if sync_thumb {
                bar.sync_value(value_for_position(position, max));
            }
        }
        // a bar with nothing to scroll must not swallow clicks meant for items
        if let Some(node) = self.nodes.get_mut(scrollbar) {
            node.visible = fraction < 1.0;
        }
        tracing::trace!(pane = ?pane, position, shown = wanted.len(), "rebuilt scroll pane");
    }

    /// Thumb moved by drag or wheel: notify, then map the value back onto a
    /// position without moving the thumb again.
    pub(crate) fn apply_scrollbar_value(&mut self, scrollbar: NodeId, value: f32) {
        self.emit(scrollbar, UiEvent::ScrollChange { value });
        let Some(pane) = self.parent(scrollbar) else {
            return;
        };
        let Ok((height, list)) = self.pane_parts(pane) else {
            return;
        };
        let before = list.position();
        let max = list.max_position(height);
        list.set_position(position_for_value(value, max) as i64, height);
        self.commit_scroll(pane, before, false);
    }

    /// Let go of every item before a pane is disposed.
    pub(crate) fn release_scroll_items(&mut self, pane: NodeId) {
        let Ok((_, list)) = self.pane_parts(pane) else {
            return;
        };
        for item in list.take_items() {
            if self.parent(item) == Some(pane) {
                self.detach(item);
            }
            if let Some(node) = self.nodes.get_mut(item) {
                node.list_owner = None;
            }
        }
    }
}
