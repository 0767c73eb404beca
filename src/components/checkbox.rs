#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checkbox {
    label: String,
    checked: bool,
}

impl Checkbox {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Returns whether the state changed.
    pub fn set_checked(&mut self, checked: bool) -> bool {
        let changed = self.checked != checked;
        self.checked = checked;
        changed
    }

    pub fn toggle(&mut self) -> bool {
        self.checked = !self.checked;
        self.checked
    }
}
