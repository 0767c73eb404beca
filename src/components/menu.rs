//! Popup menus: a column of action rows, submenu rows and separators.

use crate::context::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item { key: String, label: String },
    Submenu { label: String, menu: NodeId },
    Separator,
}

impl MenuEntry {
    pub fn label(&self) -> Option<&str> {
        match self {
            MenuEntry::Item { label, .. } | MenuEntry::Submenu { label, .. } => Some(label),
            MenuEntry::Separator => None,
        }
    }

    pub fn submenu(&self) -> Option<NodeId> {
        match self {
            MenuEntry::Submenu { menu, .. } => Some(*menu),
            _ => None,
        }
    }

    fn is_row(&self) -> bool {
        !matches!(self, MenuEntry::Separator)
    }
}

#[derive(Debug, Clone)]
pub struct Menu {
    entries: Vec<MenuEntry>,
    row_height: f32,
    separator_height: f32,
    hovered: Option<usize>,
    open_child: Option<NodeId>,
    backward: bool,
}

impl Menu {
    pub fn new(row_height: f32, separator_height: f32) -> Self {
        Self {
            entries: Vec::new(),
            row_height,
            separator_height,
            hovered: None,
            open_child: None,
            backward: false,
        }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub(crate) fn push(&mut self, entry: MenuEntry) {
        self.entries.push(entry);
    }

    fn entry_height(&self, entry: &MenuEntry) -> f32 {
        if entry.is_row() {
            self.row_height
        } else {
            self.separator_height
        }
    }

    pub fn content_height(&self) -> f32 {
        self.entries.iter().map(|e| self.entry_height(e)).sum()
    }

    /// Offset of entry `index` from the top of the menu.
    pub fn entry_top(&self, index: usize) -> f32 {
        self.entries
            .iter()
            .take(index)
            .map(|e| self.entry_height(e))
            .sum()
    }

    /// The row under local `y`. Separators are never rows.
    pub fn row_at(&self, y: f32) -> Option<usize> {
        let mut top = 0.0;
        for (index, entry) in self.entries.iter().enumerate() {
            let bottom = top + self.entry_height(entry);
            if y >= top && y < bottom {
                return entry.is_row().then_some(index);
            }
            top = bottom;
        }
        None
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn hovered_entry(&self) -> Option<&MenuEntry> {
        self.hovered.and_then(|i| self.entries.get(i))
    }

    pub(crate) fn set_hovered(&mut self, index: Option<usize>) {
        self.hovered = index.filter(|&i| self.entries.get(i).is_some_and(MenuEntry::is_row));
    }

    /// Move the highlight to the next row in either direction, skipping
    /// separators and wrapping at the ends.
    pub(crate) fn step_hover(&mut self, forward: bool) -> Option<usize> {
        let len = self.entries.len();
        if !self.entries.iter().any(MenuEntry::is_row) {
            return None;
        }
        let mut cursor = match (self.hovered, forward) {
            (Some(i), _) => i,
            (None, true) => len - 1,
            (None, false) => 0,
        };
        loop {
            cursor = if forward {
                (cursor + 1) % len
            } else {
                (cursor + len - 1) % len
            };
            if self.entries[cursor].is_row() {
                self.hovered = Some(cursor);
                return self.hovered;
            }
        }
    }

    pub fn open_child(&self) -> Option<NodeId> {
        self.open_child
    }

    pub(crate) fn set_open_child(&mut self, child: Option<NodeId>) {
        self.open_child = child;
    }

    /// Whether submenus of this menu open to its left.
    pub fn opens_backward(&self) -> bool {
        self.backward
    }

    pub(crate) fn set_backward(&mut self, backward: bool) {
        self.backward = backward;
    }

    pub(crate) fn submenus(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().filter_map(MenuEntry::submenu)
    }

    /// Drop every row opening `menu`. Returns whether any was removed.
    pub(crate) fn remove_submenu(&mut self, menu: NodeId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.submenu() != Some(menu));
        if self.entries.len() == before {
            return false;
        }
        self.hovered = None;
        if self.open_child == Some(menu) {
            self.open_child = None;
        }
        true
    }

    pub(crate) fn reset(&mut self) {
        self.hovered = None;
        self.open_child = None;
        self.backward = false;
    }
}
