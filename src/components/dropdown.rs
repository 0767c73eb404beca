use crate::error::{Result, UiError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropDownItem {
    pub key: String,
    pub label: String,
}

/// Keyed single-selection list with an open/closed popup state.
#[derive(Debug, Clone, Default)]
pub struct DropDownList {
    items: Vec<DropDownItem>,
    selected: Option<usize>,
    open: bool,
}

impl DropDownList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[DropDownItem] {
        &self.items
    }

    /// Adds an item, or relabels it when the key already exists.
    pub fn add_item(&mut self, key: impl Into<String>, label: impl Into<String>) {
        let key = key.into();
        let label = label.into();
        if let Some(existing) = self.items.iter_mut().find(|item| item.key == key) {
            existing.label = label;
            return;
        }
        self.items.push(DropDownItem { key, label });
    }

    pub fn remove_item(&mut self, key: &str) -> Result<()> {
        let index = self.index_of(key)?;
        self.items.remove(index);
        self.selected = match self.selected {
            Some(sel) if sel == index => None,
            Some(sel) if sel > index => Some(sel - 1),
            other => other,
        };
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
        self.open = false;
    }

    /// Selects by key. Returns whether the selection changed.
    pub fn select(&mut self, key: &str) -> Result<bool> {
        let index = self.index_of(key)?;
        let changed = self.selected != Some(index);
        self.selected = Some(index);
        Ok(changed)
    }

    pub fn selected(&self) -> Option<&DropDownItem> {
        self.selected.and_then(|i| self.items.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Moves the selection by `step`, clamped to the list. Returns whether
    /// the selection changed.
    pub fn step_selection(&mut self, step: isize) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let last = self.items.len() as isize - 1;
        let next = match self.selected {
            Some(current) => (current as isize + step).clamp(0, last),
            None if step < 0 => last,
            None => 0,
        } as usize;
        let changed = self.selected != Some(next);
        self.selected = Some(next);
        changed
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        let changed = self.selected != Some(index);
        self.selected = Some(index);
        changed
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open && !self.items.is_empty();
    }

    pub fn toggle_open(&mut self) -> bool {
        self.set_open(!self.open);
        self.open
    }

    fn index_of(&self, key: &str) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.key == key)
            .ok_or_else(|| UiError::UnknownKey(key.to_owned()))
    }
}
