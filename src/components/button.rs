use crate::error::{Result, UiError};

const LABEL_AND_ICON: &str = "can't set both text and icon";

/// What a pointer release over a button produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonRelease {
    pub action: bool,
    pub toggled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Button {
    label: Option<String>,
    icon: Option<String>,
    toggle_mode: bool,
    selected: bool,
    pressed: bool,
}

impl Button {
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn with_icon(icon: impl Into<String>) -> Self {
        Self {
            icon: Some(icon.into()),
            ..Self::default()
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Fails with a state conflict if the button already shows an icon.
    pub fn set_label(&mut self, label: impl Into<String>) -> Result<()> {
        if self.icon.is_some() {
            return Err(UiError::StateConflict(LABEL_AND_ICON));
        }
        self.label = Some(label.into());
        Ok(())
    }

    /// Fails with a state conflict if the button already shows a label.
    pub fn set_icon(&mut self, icon: impl Into<String>) -> Result<()> {
        if self.label.is_some() {
            return Err(UiError::StateConflict(LABEL_AND_ICON));
        }
        self.icon = Some(icon.into());
        Ok(())
    }

    pub fn clear_label(&mut self) {
        self.label = None;
    }

    pub fn clear_icon(&mut self) {
        self.icon = None;
    }

    pub fn is_toggle_mode(&self) -> bool {
        self.toggle_mode
    }

    pub fn set_toggle_mode(&mut self, toggle: bool) {
        self.toggle_mode = toggle;
        if !toggle {
            self.selected = false;
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Returns whether the state changed.
    pub fn set_selected(&mut self, selected: bool) -> bool {
        if !self.toggle_mode || self.selected == selected {
            return false;
        }
        self.selected = selected;
        true
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// Ends a press. Only a release over the button counts as a click.
    pub fn release(&mut self, over: bool) -> ButtonRelease {
        let was_pressed = std::mem::take(&mut self.pressed);
        if !was_pressed || !over {
            return ButtonRelease::default();
        }
        self.click()
    }

    /// Keyboard activation: the same outcome as a full press and release.
    pub fn click(&mut self) -> ButtonRelease {
        let toggled = if self.toggle_mode {
            self.selected = !self.selected;
            true
        } else {
            false
        };
        ButtonRelease {
            action: true,
            toggled,
        }
    }
}
