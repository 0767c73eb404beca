use crossterm::event::{KeyCode, KeyEvent};

use super::{NodeId, UiContext};
use crate::components::{TextInput, Widget};
use crate::error::Result;
use crate::event::UiEvent;
use crate::geometry::Point;

impl UiContext {
    pub fn create_text_input(&mut self) -> NodeId {
        let input = TextInput::with_blink_period(
            self.config.text_margin,
            self.config.caret_blink_period,
        );
        let size = self.config.text_input_size;
        let id = self.insert(Widget::TextInput(input), Default::default());
        let _ = self.set_size(id, size.width, size.height);
        id
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.text_input(id).map(TextInput::text)
    }

    /// Replace the whole buffer. Raises `TextChanged`.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        self.widget_mut(id, "text input", Widget::as_text_input_mut)?
            .set_text(text);
        self.flush_text(id);
        Ok(())
    }

    pub fn set_caret(&mut self, id: NodeId, index: usize) -> Result<()> {
        self.widget_mut(id, "text input", Widget::as_text_input_mut)?
            .set_caret(index);
        Ok(())
    }

    pub fn select_text(&mut self, id: NodeId, from: usize, to: usize) -> Result<()> {
        self.widget_mut(id, "text input", Widget::as_text_input_mut)?
            .select(from, to);
        Ok(())
    }

    pub fn selected_text(&self, id: NodeId) -> Option<String> {
        self.text_input(id).and_then(TextInput::selected_text)
    }

    /// Feed a key to a text input. Returns whether it was consumed.
    pub(crate) fn text_key(&mut self, id: NodeId, key: &KeyEvent) -> bool {
        let Some(input) = self
            .nodes
            .get_mut(id)
            .and_then(|n| n.widget.as_text_input_mut())
        else {
            return false;
        };
        let outcome = input.handle_key(key, self.metrics.as_ref(), self.clipboard.as_mut());
        let submitted = outcome.submit.then(|| input.text().to_owned());
        self.flush_text(id);
        if let Some(text) = submitted {
            self.emit(
                id,
                UiEvent::Submit {
                    text,
                    key: KeyCode::Enter,
                },
            );
        }
        outcome.handled
    }

    /// Place the caret under a pointer given in stage coordinates.
    pub(crate) fn text_click(&mut self, id: NodeId, pointer: Point) {
        let Some(origin) = self.global_position(id) else {
            return;
        };
        if let Some(input) = self
            .nodes
            .get_mut(id)
            .and_then(|n| n.widget.as_text_input_mut())
        {
            input.click_at(pointer.x - origin.x, self.metrics.as_ref());
        }
    }

    fn flush_text(&mut self, id: NodeId) {
        let changed = self
            .nodes
            .get_mut(id)
            .and_then(|n| n.widget.as_text_input_mut())
            .and_then(TextInput::take_text_change);
        if let Some(text) = changed {
            self.emit(id, UiEvent::TextChanged { text });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::config::UiConfig;
    use crate::event::{EventKind, FocusOrigin};
    use crate::geometry::Size;

    fn ctx() -> UiContext {
        UiContext::new(UiConfig::default(), Size::new(800.0, 600.0))
    }

    #[test]
    fn available_width_follows_node_width() {
        let mut ui = ctx();
        let id = ui.create_text_input();
        assert_eq!(ui.text_input(id).unwrap().available_width(), 190.0);
        ui.set_width(id, 100.0).unwrap();
        assert_eq!(ui.text_input(id).unwrap().available_width(), 90.0);
    }

    #[test]
    fn set_text_raises_text_changed() {
        let mut ui = ctx();
        let id = ui.create_text_input();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = ui.subscribe(id, EventKind::TextChanged, move |n| {
            if let UiEvent::TextChanged { text } = &n.event {
                sink.borrow_mut().push(text.clone());
            }
        });
        ui.set_text(id, "hi").unwrap();
        assert_eq!(*seen.borrow(), vec!["hi".to_string()]);
    }

    #[test]
    fn enter_submits_text_and_key() {
        let mut ui = ctx();
        let id = ui.create_text_input();
        ui.attach(ui.root(), id).unwrap();
        ui.set_text(id, "query").unwrap();
        ui.focus(id, FocusOrigin::Program).unwrap();
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        let _sub = ui.subscribe(id, EventKind::Submit, move |n| {
            *sink.borrow_mut() = Some(n.event.clone());
        });
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert!(ui.text_key(id, &key));
        assert_eq!(
            *seen.borrow(),
            Some(UiEvent::Submit {
                text: "query".into(),
                key: KeyCode::Enter
            })
        );
        assert_eq!(ui.text_input(id).unwrap().caret(), 5);
    }

    #[test]
    fn click_maps_stage_x_to_caret() {
        let mut ui = ctx();
        let id = ui.create_text_input();
        ui.attach(ui.root(), id).unwrap();
        ui.set_position(id, 50.0, 0.0).unwrap();
        ui.set_text(id, "abcdef").unwrap();
        ui.text_click(id, Point::new(50.0 + 5.0 + 8.0 * 3.0, 5.0));
        assert_eq!(ui.text_input(id).unwrap().caret(), 3);
    }
}
