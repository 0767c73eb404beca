use std::ops::Range;

use crate::context::NodeId;

/// Highest scroll position: the item count minus the items that fully fit.
pub fn max_scroll_position(count: usize, pane_height: f32, item_height: f32) -> usize {
    if item_height <= 0.0 {
        return 0;
    }
    let fit = (pane_height / item_height).floor().max(0.0) as usize;
    count.saturating_sub(fit)
}

/// Indices displayed from `position`, stacking whole items until the next
/// one would overflow the pane.
pub fn visible_range(
    position: usize,
    count: usize,
    pane_height: f32,
    item_height: f32,
) -> Range<usize> {
    let start = position.min(count);
    if item_height <= 0.0 {
        return start..start;
    }
    let mut end = start;
    let mut y = 0.0;
    while end < count && y + item_height <= pane_height {
        y += item_height;
        end += 1;
    }
    start..end
}

/// Visible fraction of the content, at most 1.0.
pub fn thumb_fraction(pane_height: f32, total_height: f32) -> f32 {
    if total_height <= 0.0 {
        return 1.0;
    }
    (pane_height / total_height).min(1.0)
}

/// Normalized value for a scroll position. Inverse of
/// [`position_for_value`] for every position in `0..=max`.
pub fn value_for_position(position: usize, max: usize) -> f32 {
    if max == 0 {
        0.0
    } else {
        position.min(max) as f32 / max as f32
    }
}

pub fn position_for_value(value: f32, max: usize) -> usize {
    if value.is_nan() {
        return 0;
    }
    (max as f32 * value.clamp(0.0, 1.0)).round() as usize
}

/// Virtualized list state.
///
/// `items` is the stable backing sequence; `displayed` is the subrange
/// currently attached under the pane. Items are not owned: disposing the
/// pane detaches them and leaves them alive.
#[derive(Debug, Clone)]
pub struct ScrollPane {
    items: Vec<NodeId>,
    displayed: Range<usize>,
    position: usize,
    item_height: f32,
    scroll_step: i32,
    scrollbar: NodeId,
    background_visible: bool,
}

impl ScrollPane {
    pub(crate) fn new(scrollbar: NodeId, item_height: f32, scroll_step: i32) -> Self {
        Self {
            items: Vec::new(),
            displayed: 0..0,
            position: 0,
            item_height: item_height.max(1.0),
            scroll_step,
            scrollbar,
            background_visible: true,
        }
    }

    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn item(&self, index: usize) -> Option<NodeId> {
        self.items.get(index).copied()
    }

    pub fn displayed(&self) -> &[NodeId] {
        &self.items[self.displayed.clone()]
    }

    pub fn displayed_range(&self) -> Range<usize> {
        self.displayed.clone()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn item_height(&self) -> f32 {
        self.item_height
    }

    pub fn scroll_step(&self) -> i32 {
        self.scroll_step
    }

    pub fn set_scroll_step(&mut self, step: i32) {
        self.scroll_step = step;
    }

    pub fn scrollbar(&self) -> NodeId {
        self.scrollbar
    }

    pub fn background_visible(&self) -> bool {
        self.background_visible
    }

    pub fn set_background_visible(&mut self, visible: bool) {
        self.background_visible = visible;
    }

    pub fn total_height(&self) -> f32 {
        self.items.len() as f32 * self.item_height
    }

    pub fn max_position(&self, pane_height: f32) -> usize {
        max_scroll_position(self.items.len(), pane_height, self.item_height)
    }

    pub fn value(&self, pane_height: f32) -> f32 {
        value_for_position(self.position, self.max_position(pane_height))
    }

    /// Clamp and store a position. Returns the stored value.
    pub(crate) fn set_position(&mut self, position: i64, pane_height: f32) -> usize {
        let max = self.max_position(pane_height) as i64;
        self.position = position.clamp(0, max) as usize;
        self.position
    }

    pub(crate) fn set_item_height(&mut self, height: f32) {
        self.item_height = height.max(1.0);
    }

    pub(crate) fn push_item(&mut self, item: NodeId) -> bool {
        if self.items.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub(crate) fn remove_item(&mut self, item: NodeId) -> Option<usize> {
        let index = self.items.iter().position(|&i| i == item)?;
        self.items.remove(index);
        let len = self.items.len();
        self.displayed = self.displayed.start.min(len)..self.displayed.end.min(len);
        Some(index)
    }

    pub(crate) fn take_items(&mut self) -> Vec<NodeId> {
        self.displayed = 0..0;
        self.position = 0;
        std::mem::take(&mut self.items)
    }

    pub(crate) fn set_displayed(&mut self, range: Range<usize>) {
        self.displayed = range;
    }
}
