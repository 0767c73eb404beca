//! Buttons, checkboxes and drop-down lists.

use crossterm::event::{KeyCode, KeyEvent};

use super::{NodeId, UiContext};
use crate::components::{Button, ButtonRelease, Checkbox, DropDownList, Widget};
use crate::error::Result;
use crate::event::UiEvent;
use crate::geometry::Size;

impl UiContext {
    pub fn create_button(&mut self, label: impl Into<String>) -> NodeId {
        let button = Button::with_label(label);
        let size = self.control_size(button.label().unwrap_or_default());
        self.insert(Widget::Button(button), size)
    }

    pub fn create_icon_button(&mut self, icon: impl Into<String>) -> NodeId {
        let height = self.metrics.line_height() + self.config.padding * 2.0;
        self.insert(
            Widget::Button(Button::with_icon(icon)),
            Size::new(height, height),
        )
    }

    pub fn create_checkbox(&mut self, label: impl Into<String>) -> NodeId {
        let checkbox = Checkbox::new(label);
        // room for the box glyph and a space
        let text = format!("[x] {}", checkbox.label());
        let size = self.control_size(&text);
        self.insert(Widget::Checkbox(checkbox), size)
    }

    pub fn create_dropdown(&mut self) -> NodeId {
        let size = self.control_size("");
        self.insert(Widget::DropDownList(DropDownList::new()), size)
    }

    fn control_size(&self, text: &str) -> Size {
        let pad = self.config.padding * 2.0;
        Size::new(
            self.metrics.text_width(text) + pad,
            self.metrics.line_height() + pad,
        )
    }

    pub fn set_button_label(&mut self, id: NodeId, label: impl Into<String>) -> Result<()> {
        self.widget_mut(id, "button", Widget::as_button_mut)?
            .set_label(label)
    }

    pub fn set_button_icon(&mut self, id: NodeId, icon: impl Into<String>) -> Result<()> {
        self.widget_mut(id, "button", Widget::as_button_mut)?
            .set_icon(icon)
    }

    pub fn set_toggle_mode(&mut self, id: NodeId, toggle: bool) -> Result<()> {
        self.widget_mut(id, "button", Widget::as_button_mut)?
            .set_toggle_mode(toggle);
        Ok(())
    }

    /// Only meaningful in toggle mode. Raises `Change` when the state flips.
    pub fn set_button_selected(&mut self, id: NodeId, selected: bool) -> Result<bool> {
        let changed = self
            .widget_mut(id, "button", Widget::as_button_mut)?
            .set_selected(selected);
        if changed {
            self.emit(id, UiEvent::Change);
        }
        Ok(changed)
    }

    /// Programmatic click. Ignored while the button is disabled.
    pub fn click_button(&mut self, id: NodeId) -> Result<()> {
        let enabled = self.node_ref(id)?.enabled;
        let button = self.widget_mut(id, "button", Widget::as_button_mut)?;
        if enabled {
            let outcome = button.click();
            self.raise_release(id, outcome);
        }
        Ok(())
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<bool> {
        let changed = self
            .widget_mut(id, "checkbox", Widget::as_checkbox_mut)?
            .set_checked(checked);
        if changed {
            self.emit(id, UiEvent::Change);
        }
        Ok(changed)
    }

    /// Flip the box if the node is enabled. Returns the new state.
    pub fn toggle_checkbox(&mut self, id: NodeId) -> Result<bool> {
        let enabled = self.node_ref(id)?.enabled;
        let checkbox = self.widget_mut(id, "checkbox", Widget::as_checkbox_mut)?;
        if !enabled {
            return Ok(checkbox.is_checked());
        }
        let checked = checkbox.toggle();
        self.emit(id, UiEvent::Change);
        Ok(checked)
    }

    pub fn add_dropdown_item(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<()> {
        self.widget_mut(id, "dropdown", Widget::as_dropdown_mut)?
            .add_item(key, label);
        Ok(())
    }

    /// Fails with `UnknownKey` for a key that isn't listed. Raises `Change`
    /// when the removed item was the selected one.
    pub fn remove_dropdown_item(&mut self, id: NodeId, key: &str) -> Result<()> {
        let list = self.widget_mut(id, "dropdown", Widget::as_dropdown_mut)?;
        let had_selection = list.selected().is_some();
        list.remove_item(key)?;
        if had_selection && list.selected().is_none() {
            self.emit(id, UiEvent::Change);
        }
        Ok(())
    }

    pub fn clear_dropdown(&mut self, id: NodeId) -> Result<()> {
        let list = self.widget_mut(id, "dropdown", Widget::as_dropdown_mut)?;
        let had_selection = list.selected().is_some();
        list.clear();
        if had_selection {
            self.emit(id, UiEvent::Change);
        }
        Ok(())
    }

    /// Select by key. Raises `Change` when the selection moved.
    pub fn select_dropdown(&mut self, id: NodeId, key: &str) -> Result<bool> {
        let changed = self
            .widget_mut(id, "dropdown", Widget::as_dropdown_mut)?
            .select(key)?;
        if changed {
            self.emit(id, UiEvent::Change);
        }
        Ok(changed)
    }

    pub fn dropdown_selected(&self, id: NodeId) -> Option<&str> {
        self.dropdown(id)
            .and_then(DropDownList::selected)
            .map(|item| item.key.as_str())
    }

    pub fn set_dropdown_open(&mut self, id: NodeId, open: bool) -> Result<bool> {
        let list = self.widget_mut(id, "dropdown", Widget::as_dropdown_mut)?;
        list.set_open(open);
        Ok(list.is_open())
    }

    /// Pointer-down on a control.
    pub(crate) fn press_control(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if !node.enabled {
            return;
        }
        match &mut node.widget {
            Widget::Button(button) => button.press(),
            Widget::Checkbox(checkbox) => {
                checkbox.toggle();
                self.emit(id, UiEvent::Change);
            }
            Widget::DropDownList(list) => {
                list.toggle_open();
            }
            _ => {}
        }
    }

    /// Pointer-up after a press on `id`; `over` says whether the pointer is
    /// still on it.
    pub(crate) fn release_control(&mut self, id: NodeId, over: bool) {
        let Ok(button) = self.widget_mut(id, "button", Widget::as_button_mut) else {
            return;
        };
        let outcome = button.release(over);
        self.raise_release(id, outcome);
    }

    /// Keys for a focused control. Returns whether the key was used.
    pub(crate) fn control_key(&mut self, id: NodeId, key: &KeyEvent) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        let activate = matches!(key.code, KeyCode::Enter | KeyCode::Char(' '));
        match &mut node.widget {
            Widget::Button(button) if activate => {
                let outcome = button.click();
                self.raise_release(id, outcome);
                true
            }
            Widget::Checkbox(checkbox) if key.code == KeyCode::Char(' ') => {
                checkbox.toggle();
                self.emit(id, UiEvent::Change);
                true
            }
            Widget::DropDownList(list) => {
                let changed = match key.code {
                    _ if activate => {
                        list.toggle_open();
                        false
                    }
                    KeyCode::Esc if list.is_open() => {
                        list.set_open(false);
                        false
                    }
                    KeyCode::Up if list.is_open() => list.step_selection(-1),
                    KeyCode::Down if list.is_open() => list.step_selection(1),
                    _ => return false,
                };
                if changed {
                    self.emit(id, UiEvent::Change);
                }
                true
            }
            _ => false,
        }
    }

    fn raise_release(&mut self, id: NodeId, outcome: ButtonRelease) {
        if outcome.toggled {
            self.emit(id, UiEvent::Change);
        }
        if outcome.action {
            self.emit(id, UiEvent::Action);
            self.dialog_button_clicked(id);
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
    use crate::error::UiError;
    use crate::event::{EventKind, Notification};

    fn ctx() -> UiContext {
        UiContext::new(UiConfig::default(), Size::new(800.0, 600.0))
    }

    fn record(ui: &mut UiContext, kind: EventKind) -> Rc<RefCell<Vec<Notification>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = ui.subscribe_any(kind, move |n| sink.borrow_mut().push(n.clone()));
        seen
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn label_and_icon_conflict() {
        let mut ui = ctx();
        let b = ui.create_button("ok");
        assert_eq!(
            ui.set_button_icon(b, "check"),
            Err(UiError::StateConflict("can't set both text and icon"))
        );
        let icon = ui.create_icon_button("gear");
        assert!(ui.set_button_label(icon, "x").is_err());
    }

    #[test]
    fn toggle_button_raises_change_and_action() {
        let mut ui = ctx();
        let b = ui.create_button("bold");
        ui.set_toggle_mode(b, true).unwrap();
        let changes = record(&mut ui, EventKind::Change);
        let actions = record(&mut ui, EventKind::Action);
        ui.click_button(b).unwrap();
        assert!(ui.button(b).unwrap().is_selected());
        assert_eq!(changes.borrow().len(), 1);
        assert_eq!(actions.borrow().len(), 1);
    }

    #[test]
    fn disabled_button_ignores_clicks() {
        let mut ui = ctx();
        let b = ui.create_button("x");
        ui.set_enabled(b, false).unwrap();
        let actions = record(&mut ui, EventKind::Action);
        ui.click_button(b).unwrap();
        ui.press_control(b);
        ui.release_control(b, true);
        assert!(actions.borrow().is_empty());
    }

    #[test]
    fn release_outside_is_not_a_click() {
        let mut ui = ctx();
        let b = ui.create_button("x");
        let actions = record(&mut ui, EventKind::Action);
        ui.press_control(b);
        ui.release_control(b, false);
        assert!(actions.borrow().is_empty());
        ui.press_control(b);
        ui.release_control(b, true);
        assert_eq!(actions.borrow().len(), 1);
    }

    #[test]
    fn checkbox_toggles_on_space_and_press() {
        let mut ui = ctx();
        let c = ui.create_checkbox("agree");
        let changes = record(&mut ui, EventKind::Change);
        assert!(ui.control_key(c, &key(KeyCode::Char(' '))));
        assert!(ui.checkbox(c).unwrap().is_checked());
        ui.press_control(c);
        assert!(!ui.checkbox(c).unwrap().is_checked());
        assert_eq!(changes.borrow().len(), 2);
        assert_eq!(ui.set_checked(c, false), Ok(false));
    }

    #[test]
    fn dropdown_select_and_keys() {
        let mut ui = ctx();
        let d = ui.create_dropdown();
        ui.add_dropdown_item(d, "a", "Alpha").unwrap();
        ui.add_dropdown_item(d, "b", "Beta").unwrap();
        assert_eq!(
            ui.select_dropdown(d, "zzz"),
            Err(UiError::UnknownKey("zzz".into()))
        );
        let changes = record(&mut ui, EventKind::Change);
        assert_eq!(ui.select_dropdown(d, "a"), Ok(true));
        assert!(!ui.control_key(d, &key(KeyCode::Down)));
        assert!(ui.control_key(d, &key(KeyCode::Enter)));
        assert!(ui.dropdown(d).unwrap().is_open());
        assert!(ui.control_key(d, &key(KeyCode::Down)));
        assert_eq!(ui.dropdown_selected(d), Some("b"));
        assert_eq!(changes.borrow().len(), 2);
        ui.remove_dropdown_item(d, "b").unwrap();
        assert_eq!(ui.dropdown_selected(d), None);
        assert_eq!(changes.borrow().len(), 3);
    }
}
