//! The scene and the managers that give its nodes behavior.
//!
//! [`UiContext`] owns every node in a slot-map arena and is the only place
//! that mutates them. There is no global state: the frame registry, the
//! focused node, the hover chain, the timer queue and the event bus all live
//! here and are reached through `&mut UiContext`.
//!
//! The implementation is split by concern:
//!
//! - `resize`: the geometry contract and per-widget layout hooks
//! - `focus`: activation, keyboard focus and hit-testing
//! - `frames`: frame construction, drag-to-move and manual resize
//! - `scrolling`: virtualized scroll panes
//! - `text`: text input editing
//! - `hover`: the hover chain and tooltip timers
//! - `controls`: buttons, checkboxes and drop-down lists
//! - `dialogs`: OK/Cancel and alert windows built from frames
//! - `menus`: popup menus and their submenu chains
//! - `input`: routing raw input and the per-frame tick

mod controls;
mod dialogs;
mod focus;
mod frames;
mod hover;
mod input;
mod menus;
mod node;
mod resize;
mod scrolling;
mod text;

use slotmap::{SecondaryMap, SlotMap};

pub use dialogs::DialogKind;
pub use frames::CursorMode;
pub use node::{Node, NodeId};

use crate::clipboard::{ClipboardBackend, MemoryClipboard};
use crate::components::{
    Button, Checkbox, DropDownList, Frame, Label, Menu, Panel, ScrollPane, Scrollbar, TextInput,
    Tooltip, Widget,
};
use crate::config::UiConfig;
use crate::error::{Result, UiError};
use crate::event::{EventBus, EventKind, FocusOrigin, Notification, Subscription, UiEvent};
use crate::font::{GlyphMetrics, MonospaceMetrics};
use crate::geometry::{Padding, Point, Rect, Size};
use crate::timer::Scheduler;
use dialogs::DialogBinding;
use hover::{TimerAction, TooltipBinding};

pub struct UiContext {
    config: UiConfig,
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    frames: Vec<NodeId>,
    active_frame: Option<NodeId>,
    focused: Option<NodeId>,
    focus_origin: Option<FocusOrigin>,
    // hit node first, outermost ancestor last; the stage is never included
    hovered: Vec<NodeId>,
    pointer: Option<Point>,
    pressed: Option<NodeId>,
    cursor: CursorMode,
    events: EventBus,
    timers: Scheduler<TimerAction>,
    tooltips: SecondaryMap<NodeId, TooltipBinding>,
    shown_tooltip: Option<NodeId>,
    dialogs: SecondaryMap<NodeId, DialogBinding>,
    // outermost menu of the open chain
    menu_root: Option<NodeId>,
    clipboard: Box<dyn ClipboardBackend>,
    metrics: Box<dyn GlyphMetrics>,
    frame_count: u64,
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext")
            .field("nodes", &self.nodes.len())
            .field("frames", &self.frames)
            .field("active_frame", &self.active_frame)
            .field("focused", &self.focused)
            .field("events", &self.events)
            .field("frame_count", &self.frame_count)
            .finish_non_exhaustive()
    }
}

const PANE_CHILDREN: &str = "scroll panes only hold listed items";

impl UiContext {
    /// A context whose stage (the root node) spans `stage`.
    ///
    /// Starts with an in-memory clipboard and monospace metrics taken from
    /// `config`; hosts swap them with [`Self::with_clipboard`] and
    /// [`Self::with_metrics`].
    pub fn new(config: UiConfig, stage: Size) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(
            Widget::Panel(Panel::new()),
            stage,
            Padding::uniform(0.0),
        ));
        let metrics = MonospaceMetrics::new(config.glyph_advance, config.line_height);
        Self {
            config,
            nodes,
            root,
            frames: Vec::new(),
            active_frame: None,
            focused: None,
            focus_origin: None,
            hovered: Vec::new(),
            pointer: None,
            pressed: None,
            cursor: CursorMode::Idle,
            events: EventBus::new(),
            timers: Scheduler::new(),
            tooltips: SecondaryMap::new(),
            shown_tooltip: None,
            dialogs: SecondaryMap::new(),
            menu_root: None,
            clipboard: Box::new(MemoryClipboard::new()),
            metrics: Box::new(metrics),
            frame_count: 0,
        }
    }

    pub fn with_clipboard(mut self, clipboard: impl ClipboardBackend + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn with_metrics(mut self, metrics: impl GlyphMetrics + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn metrics(&self) -> &dyn GlyphMetrics {
        self.metrics.as_ref()
    }

    /// The stage node every scene hangs from.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn stage_bounds(&self) -> Rect {
        self.nodes
            .get(self.root)
            .map(|n| n.bounds)
            .unwrap_or_default()
    }

    /// Ticks seen so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Whether `id` hangs from the stage.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.is_ancestor(self.root, id) && id != self.root
    }

    /// True when `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.parent(id);
        }
        false
    }

    pub fn frame(&self, id: NodeId) -> Option<&Frame> {
        self.nodes.get(id).and_then(|n| n.widget.as_frame())
    }

    pub fn scroll_pane(&self, id: NodeId) -> Option<&ScrollPane> {
        self.nodes.get(id).and_then(|n| n.widget.as_scroll_pane())
    }

    pub fn scrollbar(&self, id: NodeId) -> Option<&Scrollbar> {
        self.nodes.get(id).and_then(|n| n.widget.as_scrollbar())
    }

    pub fn text_input(&self, id: NodeId) -> Option<&TextInput> {
        self.nodes.get(id).and_then(|n| n.widget.as_text_input())
    }

    pub fn button(&self, id: NodeId) -> Option<&Button> {
        self.nodes.get(id).and_then(|n| n.widget.as_button())
    }

    pub fn checkbox(&self, id: NodeId) -> Option<&Checkbox> {
        self.nodes.get(id).and_then(|n| n.widget.as_checkbox())
    }

    pub fn dropdown(&self, id: NodeId) -> Option<&DropDownList> {
        self.nodes.get(id).and_then(|n| n.widget.as_dropdown())
    }

    pub fn tooltip(&self, id: NodeId) -> Option<&Tooltip> {
        self.nodes.get(id).and_then(|n| n.widget.as_tooltip())
    }

    pub fn menu(&self, id: NodeId) -> Option<&Menu> {
        self.nodes.get(id).and_then(|n| n.widget.as_menu())
    }

    pub fn label(&self, id: NodeId) -> Option<&Label> {
        self.nodes.get(id).and_then(|n| n.widget.as_label())
    }

    pub fn create_panel(&mut self) -> NodeId {
        self.insert(Widget::Panel(Panel::new()), Size::ZERO)
    }

    pub fn create_label(&mut self, text: impl Into<String>) -> NodeId {
        let text = text.into();
        let width = self.metrics.text_width(&text);
        let height = self.metrics.line_height();
        self.insert(Widget::Label(Label::new(text)), Size::new(width, height))
    }

    pub fn set_label_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        self.widget_mut(id, "label", Widget::as_label_mut)?
            .set_text(text);
        Ok(())
    }

    /// Put `child` at the top of `parent`'s children, moving it out of its
    /// current parent first.
    ///
    /// Scroll panes lay out only their listed items and refuse other
    /// children; use [`UiContext::add_item`] for those.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let index = self.node_ref(parent)?.children.len();
        self.attach_at(parent, child, index)
    }

    pub(crate) fn attach_at(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<()> {
        self.node_ref(parent)?;
        let is_tooltip = self.node_ref(child)?.widget.as_tooltip().is_some();
        if child == self.root || self.is_ancestor(child, parent) {
            return Err(UiError::StateConflict("node can't be attached under itself"));
        }
        if self.scroll_pane(parent).is_some() {
            return Err(UiError::StateConflict(PANE_CHILDREN));
        }
        self.detach(child);
        if is_tooltip {
            self.evict_tooltip(child);
        }
        let siblings = &mut self.node_mut(parent)?.children;
        let index = index.min(siblings.len());
        siblings.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        if is_tooltip {
            self.shown_tooltip = Some(child);
        }
        let center = self
            .nodes
            .get_mut(child)
            .and_then(|n| n.widget.as_frame_mut())
            .is_some_and(Frame::take_center_on_attach);
        if center {
            self.center_frame(child)?;
        }
        Ok(())
    }

    /// Returns `false` when the node had no parent.
    pub fn detach(&mut self, child: NodeId) -> bool {
        let Some(parent) = self.parent(child) else {
            return false;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|&c| c != child);
        }
        if let Some(n) = self.nodes.get_mut(child) {
            n.parent = None;
        }
        if self.shown_tooltip == Some(child) {
            self.shown_tooltip = None;
            tracing::debug!(tooltip = ?child, "tooltip hidden");
        }
        if self.focused.is_some_and(|f| self.is_ancestor(child, f)) {
            self.blur();
        }
        true
    }

    /// Destroy a node and everything it owns.
    ///
    /// Scroll pane items are not owned and survive, detached. Returns `false`
    /// for an already disposed node and for the stage.
    pub fn dispose(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.nodes.contains_key(id) {
            return false;
        }
        self.detach(id);
        self.dispose_subtree(id);
        true
    }

    fn dispose_subtree(&mut self, id: NodeId) {
        self.release_scroll_items(id);
        if let Some(owner) = self.nodes.get(id).and_then(|n| n.list_owner)
            && let Err(err) = self.remove_item(owner, id)
        {
            tracing::trace!(node = ?id, error = %err, "list owner already gone");
        }
        self.forget_tooltips(id);
        self.dialogs.remove(id);
        if self.menu(id).is_some() {
            self.forget_menu(id);
        }

        let children = self
            .nodes
            .get(id)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in children {
            self.dispose_subtree(child);
        }

        if self.focused == Some(id) {
            self.focused = None;
            self.focus_origin = None;
        }
        if self.active_frame == Some(id) {
            self.active_frame = None;
        }
        if self.frames.contains(&id) {
            self.frames.retain(|&f| f != id);
            tracing::debug!(frame = ?id, "unregistered frame");
        }
        self.hovered.retain(|&h| h != id);
        if self.pressed == Some(id) {
            self.pressed = None;
        }
        self.events.revoke_target(id);
        self.nodes.remove(id);
    }

    /// Listen for `kind` raised by `target`.
    pub fn subscribe<F>(&mut self, target: NodeId, kind: EventKind, handler: F) -> Subscription
    where
        F: FnMut(&Notification) + 'static,
    {
        self.events.subscribe(Some(target), kind, handler)
    }

    /// Listen for `kind` raised by any node.
    pub fn subscribe_any<F>(&mut self, kind: EventKind, handler: F) -> Subscription
    where
        F: FnMut(&Notification) + 'static,
    {
        self.events.subscribe(None, kind, handler)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }

    pub(crate) fn emit(&mut self, target: NodeId, event: UiEvent) {
        self.events.dispatch(&Notification { target, event });
    }

    pub(crate) fn insert(&mut self, widget: Widget, size: Size) -> NodeId {
        let padding = Padding::uniform(self.config.padding);
        self.nodes.insert(Node::new(widget, size, padding))
    }

    /// Parent `child` without any of the checks `attach` makes. Only for
    /// wiring freshly created nodes.
    pub(crate) fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(UiError::UnknownNode)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(UiError::UnknownNode)
    }

    pub(crate) fn widget_mut<T>(
        &mut self,
        id: NodeId,
        expected: &'static str,
        pick: fn(&mut Widget) -> Option<&mut T>,
    ) -> Result<&mut T> {
        let node = self.node_mut(id)?;
        pick(&mut node.widget).ok_or(UiError::WrongKind { expected })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> UiContext {
        UiContext::new(UiConfig::default(), Size::new(800.0, 600.0))
    }

    #[test]
    fn attach_moves_between_parents() {
        let mut ui = ctx();
        let a = ui.create_panel();
        let b = ui.create_panel();
        let leaf = ui.create_label("x");
        ui.attach(a, leaf).unwrap();
        ui.attach(b, leaf).unwrap();
        assert!(ui.children(a).is_empty());
        assert_eq!(ui.children(b), &[leaf]);
        assert_eq!(ui.parent(leaf), Some(b));
    }

    #[test]
    fn attach_rejects_cycles() {
        let mut ui = ctx();
        let a = ui.create_panel();
        let b = ui.create_panel();
        ui.attach(a, b).unwrap();
        assert!(matches!(ui.attach(b, a), Err(UiError::StateConflict(_))));
        assert!(ui.attach(a, a).is_err());
    }

    #[test]
    fn dispose_cascades_and_is_idempotent() {
        let mut ui = ctx();
        let frame = ui.create_frame("w");
        let content = ui.frame(frame).unwrap().content();
        let leaf = ui.create_label("x");
        ui.attach(content, leaf).unwrap();
        ui.attach(ui.root(), frame).unwrap();
        assert!(ui.dispose(frame));
        assert!(!ui.dispose(frame));
        assert!(!ui.contains(content));
        assert!(!ui.contains(leaf));
        assert!(ui.frames().is_empty());
        assert!(ui.children(ui.root()).is_empty());
    }

    #[test]
    fn dispose_revokes_node_subscriptions() {
        let mut ui = ctx();
        let panel = ui.create_panel();
        let _sub = ui.subscribe(panel, EventKind::Resize, |_| {});
        let _global = ui.subscribe_any(EventKind::Resize, |_| {});
        ui.dispose(panel);
        assert_eq!(ui.events.len(), 1);
    }

    #[test]
    fn stage_cannot_be_disposed() {
        let mut ui = ctx();
        assert!(!ui.dispose(ui.root()));
        assert!(ui.contains(ui.root()));
    }

    #[test]
    fn wrong_kind_is_reported() {
        let mut ui = ctx();
        let panel = ui.create_panel();
        assert_eq!(
            ui.set_label_text(panel, "x"),
            Err(UiError::WrongKind { expected: "label" })
        );
        ui.dispose(panel);
        assert_eq!(ui.set_label_text(panel, "x"), Err(UiError::UnknownNode));
    }
}
