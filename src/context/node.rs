use crate::components::Widget;
use crate::geometry::{Padding, Rect, Size, SizeBounds};

slotmap::new_key_type! {
    /// Handle to a node in a [`crate::UiContext`]. Stale after disposal.
    pub struct NodeId;
}

/// One component in the scene: the shared box model plus its widget state.
///
/// Parents own their children; `parent` is a back-reference only and never
/// keeps a node alive.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) bounds: Rect,
    pub(crate) padding: Padding,
    pub(crate) size_bounds: SizeBounds,
    pub(crate) enabled: bool,
    pub(crate) visible: bool,
    pub(crate) alpha: f32,
    pub(crate) focus_rect_enabled: bool,
    pub(crate) focus_rect_visible: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) widget: Widget,
    // set while the widget's layout hook runs
    pub(crate) updating: bool,
    // scroll pane whose item list holds this node
    pub(crate) list_owner: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(widget: Widget, size: Size, padding: Padding) -> Self {
        let focus_rect_enabled = widget.default_focus_rect();
        Self {
            bounds: Rect::from_parts(Default::default(), size),
            padding,
            size_bounds: SizeBounds::UNBOUNDED,
            enabled: true,
            visible: true,
            alpha: 1.0,
            focus_rect_enabled,
            focus_rect_visible: false,
            parent: None,
            children: Vec::new(),
            widget,
            updating: false,
            list_owner: None,
        }
    }

    /// Box relative to the parent.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn size(&self) -> Size {
        self.bounds.size()
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn size_bounds(&self) -> SizeBounds {
        self.size_bounds
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn focus_rect_enabled(&self) -> bool {
        self.focus_rect_enabled
    }

    /// Node-local focus rectangle, present while it is shown. It always
    /// spans the whole node, so resizing keeps it matched.
    pub fn focus_rect(&self) -> Option<Rect> {
        self.focus_rect_visible
            .then(|| Rect::from_parts(Default::default(), self.bounds.size()))
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    /// Scroll pane listing this node as an item, attached or not.
    pub fn list_owner(&self) -> Option<NodeId> {
        self.list_owner
    }
}
