/// Plain container. Application children of a frame go into its content
/// panel.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    pub background: bool,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background() -> Self {
        Self { background: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}
