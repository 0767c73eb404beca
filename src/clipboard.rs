//! Clipboard access for text editing.
//!
//! [`SystemClipboard`] wraps the `arboard` crate and opens the platform
//! clipboard per call, the same way the free functions below do.
//! [`MemoryClipboard`] keeps the contents in process; contexts start with one
//! so tests and headless hosts never touch the user's clipboard.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard backend error: {0}")]
    Backend(#[from] arboard::Error),
    #[error("clipboard holds no text")]
    Empty,
}

pub trait ClipboardBackend {
    fn get_text(&mut self) -> Result<String, ClipboardError>;
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardBackend for SystemClipboard {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        get()
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        set(text)
    }
}

/// In-process clipboard. Clones share the same storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Rc<RefCell<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let clipboard = Self::default();
        clipboard.contents.replace(Some(text.to_owned()));
        clipboard
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        self.contents.borrow().clone().ok_or(ClipboardError::Empty)
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents.replace(Some(text.to_owned()));
        Ok(())
    }
}

/// Read the system clipboard as a `String`.
pub fn get() -> Result<String, ClipboardError> {
    let mut cb = arboard::Clipboard::new()?;
    cb.get_text().map_err(ClipboardError::from)
}

/// Set the system clipboard to `text`.
pub fn set(text: &str) -> Result<(), ClipboardError> {
    let mut cb = arboard::Clipboard::new()?;
    cb.set_text(text.to_owned()).map_err(ClipboardError::from)
}

/// Try to create a clipboard instance to detect availability.
pub fn available() -> bool {
    arboard::Clipboard::new().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_starts_empty() {
        let mut cb = MemoryClipboard::new();
        assert!(matches!(cb.get_text(), Err(ClipboardError::Empty)));
    }

    #[test]
    fn memory_clipboard_clones_share_storage() {
        let mut cb = MemoryClipboard::new();
        let observer = cb.clone();
        cb.set_text("copied").unwrap();
        assert_eq!(observer.contents().as_deref(), Some("copied"));
    }
}
