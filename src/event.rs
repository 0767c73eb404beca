//! Notifications raised by components and the subscription registry that
//! delivers them.
//!
//! Listeners are stored against a typed [`Subscription`] handle rather than a
//! name, so revoking one can never collide with another caller's listener.
//! Delivery is synchronous and in subscription order.

use crossterm::event::KeyCode;

use crate::context::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    Change,
    Activate,
    Deactivate,
    FocusIn,
    FocusOut,
    Submit,
    TextChanged,
    ResizeStart,
    ResizeComplete,
    ScrollChange,
    Action,
    HoverIn,
    HoverOut,
    DialogClose,
    MenuSelect,
}

/// How keyboard focus reached a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOrigin {
    /// Tab traversal. The only origin that shows a focus rectangle.
    Keyboard,
    Pointer,
    Program,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Resize { width: f32, height: f32 },
    Change,
    Activate,
    Deactivate,
    FocusIn { origin: FocusOrigin },
    FocusOut,
    Submit { text: String, key: KeyCode },
    TextChanged { text: String },
    ResizeStart,
    ResizeComplete,
    ScrollChange { value: f32 },
    Action,
    HoverIn,
    HoverOut,
    /// A dialog left the stage; `accepted` is true for OK.
    DialogClose { accepted: bool },
    /// A menu row was chosen. Raised by the root menu that was opened.
    MenuSelect { key: String },
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::Resize { .. } => EventKind::Resize,
            UiEvent::Change => EventKind::Change,
            UiEvent::Activate => EventKind::Activate,
            UiEvent::Deactivate => EventKind::Deactivate,
            UiEvent::FocusIn { .. } => EventKind::FocusIn,
            UiEvent::FocusOut => EventKind::FocusOut,
            UiEvent::Submit { .. } => EventKind::Submit,
            UiEvent::TextChanged { .. } => EventKind::TextChanged,
            UiEvent::ResizeStart => EventKind::ResizeStart,
            UiEvent::ResizeComplete => EventKind::ResizeComplete,
            UiEvent::ScrollChange { .. } => EventKind::ScrollChange,
            UiEvent::Action => EventKind::Action,
            UiEvent::HoverIn => EventKind::HoverIn,
            UiEvent::HoverOut => EventKind::HoverOut,
            UiEvent::DialogClose { .. } => EventKind::DialogClose,
            UiEvent::MenuSelect { .. } => EventKind::MenuSelect,
        }
    }
}

/// An event together with the node that raised it.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub target: NodeId,
    pub event: UiEvent,
}

/// Handle returned by [`EventBus::subscribe`]; pass it back to revoke.
#[must_use = "dropping a subscription handle leaves no way to revoke the listener"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Handler = Box<dyn FnMut(&Notification)>;

struct Listener {
    id: u64,
    target: Option<NodeId>,
    kind: EventKind,
    handler: Handler,
}

#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for `kind` raised by `target`, or by any node when `target` is
    /// `None`.
    pub fn subscribe<F>(
        &mut self,
        target: Option<NodeId>,
        kind: EventKind,
        handler: F,
    ) -> Subscription
    where
        F: FnMut(&Notification) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            target,
            kind,
            handler: Box::new(handler),
        });
        Subscription(id)
    }

    /// Returns `false` when the handle was already revoked.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != subscription.0);
        self.listeners.len() != before
    }

    /// Drop every listener bound to `target`. Global listeners survive.
    pub fn revoke_target(&mut self, target: NodeId) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.target != Some(target));
        before - self.listeners.len()
    }

    pub fn dispatch(&mut self, notification: &Notification) {
        let kind = notification.event.kind();
        for listener in self.listeners.iter_mut() {
            if listener.kind != kind {
                continue;
            }
            if listener.target.is_some_and(|t| t != notification.target) {
                continue;
            }
            (listener.handler)(notification);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn two_ids() -> (NodeId, NodeId) {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        (map.insert(()), map.insert(()))
    }

    #[test]
    fn dispatch_filters_by_target_and_kind() {
        let (a, b) = two_ids();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let sink = seen.clone();
        let _sub = bus.subscribe(Some(a), EventKind::Change, move |n| {
            sink.borrow_mut().push(n.target)
        });

        bus.dispatch(&Notification {
            target: b,
            event: UiEvent::Change,
        });
        bus.dispatch(&Notification {
            target: a,
            event: UiEvent::Action,
        });
        bus.dispatch(&Notification {
            target: a,
            event: UiEvent::Change,
        });
        assert_eq!(*seen.borrow(), vec![a]);
    }

    #[test]
    fn global_listener_sees_every_target() {
        let (a, b) = two_ids();
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();
        let c = count.clone();
        let _sub = bus.subscribe(None, EventKind::Activate, move |_| *c.borrow_mut() += 1);
        for target in [a, b] {
            bus.dispatch(&Notification {
                target,
                event: UiEvent::Activate,
            });
        }
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let (a, _) = two_ids();
        let mut bus = EventBus::new();
        let sub = bus.subscribe(Some(a), EventKind::Resize, |_| {});
        assert!(bus.unsubscribe(sub));
        assert!(!bus.unsubscribe(sub));
        assert!(bus.is_empty());
    }

    #[test]
    fn revoke_target_keeps_global_listeners() {
        let (a, _) = two_ids();
        let mut bus = EventBus::new();
        let _s1 = bus.subscribe(Some(a), EventKind::Resize, |_| {});
        let _s2 = bus.subscribe(Some(a), EventKind::Change, |_| {});
        let _s3 = bus.subscribe(None, EventKind::Change, |_| {});
        assert_eq!(bus.revoke_target(a), 2);
        assert_eq!(bus.len(), 1);
    }
}
