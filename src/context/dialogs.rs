//! Message windows: a frame holding a label and an OK button, plus Cancel
//! for confirmations.
//!
//! A dialog lives off-stage until [`UiContext::show_dialog`]. Clicking one of
//! its buttons, or Enter and Esc while it is the active frame, takes it off the
//! stage again and raises `DialogClose` from the frame.

use crossterm::event::{KeyCode, KeyEvent};

use super::{NodeId, UiContext};
use crate::error::{Result, UiError};
use crate::event::{FocusOrigin, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// OK and Cancel.
    Confirm,
    /// OK only. Esc does not dismiss it.
    Alert,
}

#[derive(Debug, Clone)]
pub(crate) struct DialogBinding {
    kind: DialogKind,
    message: NodeId,
    ok: NodeId,
    cancel: Option<NodeId>,
}

impl UiContext {
    pub fn create_dialog(&mut self, title: impl Into<String>, text: impl Into<String>) -> NodeId {
        self.build_dialog(DialogKind::Confirm, title.into(), text.into())
    }

    pub fn create_alert(&mut self, title: impl Into<String>, text: impl Into<String>) -> NodeId {
        self.build_dialog(DialogKind::Alert, title.into(), text.into())
    }

    fn build_dialog(&mut self, kind: DialogKind, title: String, text: String) -> NodeId {
        let frame = self.create_frame(title);
        let content = self.frame(frame).map(|f| f.content());
        let message = self.create_label(text);
        let ok = self.create_button("OK");
        let cancel = (kind == DialogKind::Confirm).then(|| self.create_button("Cancel"));
        if let Some(content) = content {
            self.link(content, message);
            self.link(content, ok);
            if let Some(cancel) = cancel {
                self.link(content, cancel);
            }
        }
        self.dialogs.insert(
            frame,
            DialogBinding {
                kind,
                message,
                ok,
                cancel,
            },
        );
        let size = self.config.dialog_size;
        if let Err(err) = self.set_size(frame, size.width, size.height) {
            tracing::warn!(dialog = ?frame, error = %err, "dialog size not applied");
        }
        frame
    }

    fn dialog_binding(&self, id: NodeId) -> Result<&DialogBinding> {
        self.node_ref(id)?;
        self.dialogs
            .get(id)
            .ok_or(UiError::WrongKind { expected: "dialog" })
    }

    pub fn dialog_kind(&self, id: NodeId) -> Option<DialogKind> {
        self.dialogs.get(id).map(|d| d.kind)
    }

    pub fn dialog_text(&self, id: NodeId) -> Option<&str> {
        let message = self.dialogs.get(id)?.message;
        self.label(message).map(|l| l.text())
    }

    pub fn set_dialog_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        let message = self.dialog_binding(id)?.message;
        self.set_label_text(message, text)?;
        self.run_update(id);
        Ok(())
    }

    /// The OK button and, for confirmations, the Cancel button.
    pub fn dialog_buttons(&self, id: NodeId) -> Option<(NodeId, Option<NodeId>)> {
        self.dialogs.get(id).map(|d| (d.ok, d.cancel))
    }

    /// Put the dialog on the stage, centered and active, with OK focused.
    pub fn show_dialog(&mut self, id: NodeId) -> Result<()> {
        let ok = self.dialog_binding(id)?.ok;
        let root = self.root;
        self.attach(root, id)?;
        self.center_frame(id)?;
        self.activate_frame(id)?;
        self.focus(ok, FocusOrigin::Program)?;
        tracing::debug!(dialog = ?id, "dialog shown");
        Ok(())
    }

    /// Take the dialog off the stage and raise `DialogClose`. Returns
    /// `Ok(false)` when it wasn't shown.
    pub fn close_dialog(&mut self, id: NodeId, accepted: bool) -> Result<bool> {
        self.dialog_binding(id)?;
        if !self.detach(id) {
            return Ok(false);
        }
        if self.active_frame == Some(id) {
            self.active_frame = None;
            if let Some(frame) = self.nodes.get_mut(id).and_then(|n| n.widget.as_frame_mut()) {
                frame.set_active(false);
            }
            self.emit(id, UiEvent::Deactivate);
        }
        tracing::debug!(dialog = ?id, accepted, "dialog closed");
        self.emit(id, UiEvent::DialogClose { accepted });
        Ok(true)
    }

    /// Close the dialog owning `button`, if any. Called after the button
    /// raised `Action`.
    pub(crate) fn dialog_button_clicked(&mut self, button: NodeId) {
        let found = self.dialogs.iter().find_map(|(dialog, binding)| {
            if binding.ok == button {
                Some((dialog, true))
            } else if binding.cancel == Some(button) {
                Some((dialog, false))
            } else {
                None
            }
        });
        if let Some((dialog, accepted)) = found
            && let Err(err) = self.close_dialog(dialog, accepted)
        {
            tracing::warn!(dialog = ?dialog, error = %err, "dialog did not close");
        }
    }

    /// Enter accepts and Esc cancels the active dialog. Only sees keys the
    /// focused node left unused.
    pub(crate) fn dialog_key(&mut self, key: &KeyEvent) -> bool {
        let Some(dialog) = self
            .active_frame
            .filter(|&f| self.dialogs.contains_key(f) && self.is_attached(f))
        else {
            return false;
        };
        let accepted = match (key.code, self.dialog_kind(dialog)) {
            (KeyCode::Enter, _) => true,
            (KeyCode::Esc, Some(DialogKind::Confirm)) => false,
            _ => return false,
        };
        self.close_dialog(dialog, accepted).unwrap_or(false)
    }

    /// Message at the top left, buttons side by side centered along the
    /// bottom.
    pub(crate) fn layout_dialog(&mut self, id: NodeId) {
        let Some(binding) = self.dialogs.get(id).cloned() else {
            return;
        };
        let Some(content) = self
            .frame(id)
            .map(|f| f.content())
            .and_then(|c| self.bounds(c))
        else {
            return;
        };
        let pad = self.config.dialog_padding;
        let height = self.bounds(binding.ok).map_or(0.0, |r| r.height);
        let _ = self.set_position(binding.message, pad, pad);
        let _ = self.set_size(
            binding.message,
            (content.width - 2.0 * pad).max(0.0),
            (content.height - 3.0 * pad - height).max(self.metrics.line_height()),
        );

        let buttons: Vec<NodeId> = std::iter::once(binding.ok).chain(binding.cancel).collect();
        let widths: Vec<f32> = buttons
            .iter()
            .map(|&b| self.bounds(b).map_or(0.0, |r| r.width))
            .collect();
        let total = widths.iter().sum::<f32>() + pad * (buttons.len() - 1) as f32;
        let mut x = ((content.width - total) / 2.0).max(0.0);
        let y = (content.height - pad - height).max(0.0);
        for (button, width) in buttons.into_iter().zip(widths) {
            let _ = self.set_position(button, x, y);
            x += width + pad;
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
    use crate::event::EventKind;
    use crate::geometry::{Point, Size};

    fn ctx() -> UiContext {
        UiContext::new(UiConfig::default(), Size::new(800.0, 600.0))
    }

    fn record_closes(ui: &mut UiContext, dialog: NodeId) -> Rc<RefCell<Vec<bool>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = ui.subscribe(dialog, EventKind::DialogClose, move |n| {
            if let UiEvent::DialogClose { accepted } = n.event {
                sink.borrow_mut().push(accepted);
            }
        });
        seen
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn buttons_sit_centered_along_the_bottom() {
        let mut ui = ctx();
        let dialog = ui.create_dialog("Save", "Save changes?");
        let (ok, cancel) = ui.dialog_buttons(dialog).unwrap();
        let cancel = cancel.unwrap();
        // content is 396 x 171; OK is 20 wide, Cancel 52, 20 apart
        assert_eq!(ui.bounds(ok).unwrap().origin(), Point::new(152.0, 135.0));
        assert_eq!(ui.bounds(cancel).unwrap().origin(), Point::new(192.0, 135.0));
        let message = ui.dialogs[dialog].message;
        assert_eq!(ui.bounds(message).unwrap().origin(), Point::new(20.0, 20.0));
        assert_eq!(ui.dialog_text(dialog), Some("Save changes?"));
    }

    #[test]
    fn alert_has_a_single_centered_button() {
        let mut ui = ctx();
        let alert = ui.create_alert("Oops", "Disk full");
        let (ok, cancel) = ui.dialog_buttons(alert).unwrap();
        assert!(cancel.is_none());
        assert_eq!(ui.bounds(ok).unwrap().x, 188.0);
        assert_eq!(ui.dialog_kind(alert), Some(DialogKind::Alert));
    }

    #[test]
    fn show_then_close_round_trip() {
        let mut ui = ctx();
        let dialog = ui.create_dialog("Q", "Sure?");
        let closes = record_closes(&mut ui, dialog);
        assert_eq!(ui.close_dialog(dialog, true), Ok(false));
        ui.show_dialog(dialog).unwrap();
        let (ok, _) = ui.dialog_buttons(dialog).unwrap();
        assert_eq!(ui.active_frame(), Some(dialog));
        assert_eq!(ui.focused(), Some(ok));
        assert_eq!(ui.bounds(dialog).unwrap().origin(), Point::new(200.0, 200.0));

        assert_eq!(ui.close_dialog(dialog, false), Ok(true));
        assert_eq!(*closes.borrow(), vec![false]);
        assert!(!ui.is_attached(dialog));
        assert_eq!(ui.active_frame(), None);
        assert_eq!(ui.focused(), None);
    }

    #[test]
    fn esc_cancels_confirmations_but_not_alerts() {
        let mut ui = ctx();
        let alert = ui.create_alert("A", "done");
        let alert_closes = record_closes(&mut ui, alert);
        ui.show_dialog(alert).unwrap();
        assert!(!ui.dialog_key(&key(KeyCode::Esc)));
        assert!(ui.dialog_key(&key(KeyCode::Enter)));
        assert_eq!(*alert_closes.borrow(), vec![true]);

        let dialog = ui.create_dialog("D", "go?");
        let closes = record_closes(&mut ui, dialog);
        ui.show_dialog(dialog).unwrap();
        assert!(ui.dialog_key(&key(KeyCode::Esc)));
        assert_eq!(*closes.borrow(), vec![false]);
    }

    #[test]
    fn text_and_kind_checks() {
        let mut ui = ctx();
        let dialog = ui.create_dialog("T", "a");
        ui.set_dialog_text(dialog, "b").unwrap();
        assert_eq!(ui.dialog_text(dialog), Some("b"));
        let frame = ui.create_frame("plain");
        assert_eq!(
            ui.show_dialog(frame),
            Err(UiError::WrongKind { expected: "dialog" })
        );
        assert!(ui.dispose(dialog));
        assert_eq!(ui.dialog_kind(dialog), None);
    }
}
