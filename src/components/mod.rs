//! Per-widget state machines.
//!
//! Each type here owns the behavior of one kind of component and nothing
//! about the node tree; [`crate::UiContext`] stores them inside nodes as a
//! [`Widget`] and drives them. Anything that needs to reach another node
//! (laying out children, raising notifications) happens in the context.

pub mod button;
pub mod checkbox;
pub mod dropdown;
pub mod frame;
pub mod label;
pub mod menu;
pub mod scroll_pane;
pub mod scrollbar;
pub mod text_input;
pub mod tooltip;

pub use button::{Button, ButtonRelease};
pub use checkbox::Checkbox;
pub use dropdown::{DropDownItem, DropDownList};
pub use frame::Frame;
pub use label::{Label, Panel};
pub use menu::{Menu, MenuEntry};
pub use scroll_pane::ScrollPane;
pub use scrollbar::Scrollbar;
pub use text_input::{KeyOutcome, TextInput};
pub use tooltip::Tooltip;

#[derive(Debug, Clone)]
pub enum Widget {
    Panel(Panel),
    Label(Label),
    Button(Button),
    Checkbox(Checkbox),
    DropDownList(DropDownList),
    Frame(Frame),
    ScrollPane(ScrollPane),
    Scrollbar(Scrollbar),
    TextInput(TextInput),
    Tooltip(Tooltip),
    Menu(Menu),
}

macro_rules! capability {
    ($as_ref:ident, $as_mut:ident, $variant:ident, $ty:ty) => {
        pub fn $as_ref(&self) -> Option<&$ty> {
            match self {
                Widget::$variant(inner) => Some(inner),
                _ => None,
            }
        }

        pub fn $as_mut(&mut self) -> Option<&mut $ty> {
            match self {
                Widget::$variant(inner) => Some(inner),
                _ => None,
            }
        }
    };
}

impl Widget {
    capability!(as_frame, as_frame_mut, Frame, Frame);
    capability!(as_container, as_container_mut, Panel, Panel);
    capability!(as_label, as_label_mut, Label, Label);
    capability!(as_button, as_button_mut, Button, Button);
    capability!(as_checkbox, as_checkbox_mut, Checkbox, Checkbox);
    capability!(as_dropdown, as_dropdown_mut, DropDownList, DropDownList);
    capability!(as_scroll_pane, as_scroll_pane_mut, ScrollPane, ScrollPane);
    capability!(as_scrollbar, as_scrollbar_mut, Scrollbar, Scrollbar);
    capability!(as_text_input, as_text_input_mut, TextInput, TextInput);
    capability!(as_tooltip, as_tooltip_mut, Tooltip, Tooltip);
    capability!(as_menu, as_menu_mut, Menu, Menu);

    pub fn name(&self) -> &'static str {
        match self {
            Widget::Panel(_) => "panel",
            Widget::Label(_) => "label",
            Widget::Button(_) => "button",
            Widget::Checkbox(_) => "checkbox",
            Widget::DropDownList(_) => "dropdown",
            Widget::Frame(_) => "frame",
            Widget::ScrollPane(_) => "scroll pane",
            Widget::Scrollbar(_) => "scrollbar",
            Widget::TextInput(_) => "text input",
            Widget::Tooltip(_) => "tooltip",
            Widget::Menu(_) => "menu",
        }
    }

    /// Whether the widget takes keyboard focus.
    pub fn is_focusable(&self) -> bool {
        matches!(
            self,
            Widget::Button(_)
                | Widget::Checkbox(_)
                | Widget::DropDownList(_)
                | Widget::TextInput(_)
        )
    }

    /// Frames and scroll panes draw their own chrome instead of a focus
    /// rectangle.
    pub fn default_focus_rect(&self) -> bool {
        self.is_focusable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_queries_match_variant() {
        let w = Widget::Label(Label::new("hi"));
        assert!(w.as_label().is_some());
        assert!(w.as_frame().is_none());
        assert!(w.as_container().is_none());
        assert!(!w.is_focusable());
        assert_eq!(w.name(), "label");
    }

    #[test]
    fn text_input_is_focusable() {
        let w = Widget::TextInput(TextInput::new(5.0));
        assert!(w.is_focusable());
        assert!(w.as_text_input().is_some());
    }
}
