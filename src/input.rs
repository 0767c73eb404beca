//! Raw input vocabulary consumed by [`crate::UiContext::handle_input`].
//!
//! Keys reuse crossterm's key types directly; pointer positions are layout
//! units. [`InputEvent::from_terminal`] maps a terminal event one cell to one
//! unit.

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

use crate::geometry::{Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

impl From<MouseButton> for PointerButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => PointerButton::Left,
            MouseButton::Right => PointerButton::Right,
            MouseButton::Middle => PointerButton::Middle,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Point, button: PointerButton },
    PointerUp { pos: Point, button: PointerButton },
    PointerMove { pos: Point },
    PointerDrag { pos: Point, button: PointerButton },
    /// Positive deltas are wheel-up (towards the start of the content).
    Wheel { pos: Point, delta: i32 },
    Key(KeyEvent),
    StageResize(Size),
}

impl InputEvent {
    pub fn from_terminal(event: &Event) -> Option<Self> {
        match event {
            Event::Mouse(mouse) => {
                let pos = Point::new(mouse.column as f32, mouse.row as f32);
                match mouse.kind {
                    MouseEventKind::Down(button) => Some(InputEvent::PointerDown {
                        pos,
                        button: button.into(),
                    }),
                    MouseEventKind::Up(button) => Some(InputEvent::PointerUp {
                        pos,
                        button: button.into(),
                    }),
                    MouseEventKind::Drag(button) => Some(InputEvent::PointerDrag {
                        pos,
                        button: button.into(),
                    }),
                    MouseEventKind::Moved => Some(InputEvent::PointerMove { pos }),
                    MouseEventKind::ScrollUp => Some(InputEvent::Wheel { pos, delta: 1 }),
                    MouseEventKind::ScrollDown => Some(InputEvent::Wheel { pos, delta: -1 }),
                    MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => None,
                }
            }
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(InputEvent::Key(*key)),
            Event::Resize(cols, rows) => Some(InputEvent::StageResize(Size::new(
                *cols as f32,
                *rows as f32,
            ))),
            _ => None,
        }
    }

    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::PointerDown { pos, .. }
            | InputEvent::PointerUp { pos, .. }
            | InputEvent::PointerMove { pos }
            | InputEvent::PointerDrag { pos, .. }
            | InputEvent::Wheel { pos, .. } => Some(*pos),
            InputEvent::Key(_) | InputEvent::StageResize(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers, MouseEvent};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn mouse_events_map_cells_to_units() {
        let ev = InputEvent::from_terminal(&mouse(MouseEventKind::Down(MouseButton::Left), 4, 7));
        assert_eq!(
            ev,
            Some(InputEvent::PointerDown {
                pos: Point::new(4.0, 7.0),
                button: PointerButton::Left
            })
        );
    }

    #[test]
    fn wheel_up_is_positive() {
        let up = InputEvent::from_terminal(&mouse(MouseEventKind::ScrollUp, 0, 0));
        let down = InputEvent::from_terminal(&mouse(MouseEventKind::ScrollDown, 0, 0));
        assert!(matches!(up, Some(InputEvent::Wheel { delta: 1, .. })));
        assert!(matches!(down, Some(InputEvent::Wheel { delta: -1, .. })));
    }

    #[test]
    fn key_release_is_dropped() {
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(InputEvent::from_terminal(&Event::Key(key)).is_none());
    }

    #[test]
    fn resize_becomes_stage_resize() {
        let ev = InputEvent::from_terminal(&Event::Resize(80, 24));
        assert_eq!(ev, Some(InputEvent::StageResize(Size::new(80.0, 24.0))));
        assert!(ev.and_then(|e| e.position()).is_none());
    }
}
