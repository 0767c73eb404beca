//! Key event cleanup applied before events reach the widget tree.

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

#[derive(Debug, Default)]
pub struct KeyboardNormalizer {
    esc_down: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift+Tab becomes BackTab so focus traversal sees one key code.
    /// Releases are dropped. Windows reports repeats and a held Esc as
    /// separate presses, so those are dropped there too.
    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        let Event::Key(mut key) = evt else {
            return Some(evt);
        };
        if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
            key.code = KeyCode::BackTab;
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
        match key.kind {
            KeyEventKind::Release => {
                if key.code == KeyCode::Esc {
                    self.esc_down = false;
                }
                return None;
            }
            KeyEventKind::Repeat if cfg!(windows) => return None,
            _ => {}
        }
        if cfg!(windows) && key.code == KeyCode::Esc {
            if self.esc_down {
                return None;
            }
            self.esc_down = true;
        }
        Some(Event::Key(key))
    }
}
