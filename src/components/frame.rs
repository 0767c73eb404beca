use crate::context::NodeId;
use crate::layout::{HeaderDrag, ResizeDrag, ResizeEdge};

/// Floating window state. The title bar and content panel are child nodes
/// owned by the frame node; their ids are fixed at construction.
#[derive(Debug, Clone)]
pub struct Frame {
    title: String,
    title_bar: NodeId,
    content: NodeId,
    active: bool,
    draggable: bool,
    manual_resize: bool,
    center_on_attach: bool,
    border: bool,
    hover_edge: Option<ResizeEdge>,
    pub(crate) header_drag: Option<HeaderDrag>,
    pub(crate) resize_drag: Option<ResizeDrag>,
}

impl Frame {
    pub(crate) fn new(title: String, title_bar: NodeId, content: NodeId) -> Self {
        Self {
            title,
            title_bar,
            content,
            active: false,
            draggable: true,
            manual_resize: false,
            center_on_attach: true,
            border: true,
            hover_edge: None,
            header_drag: None,
            resize_drag: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn title_bar(&self) -> NodeId {
        self.title_bar
    }

    pub fn content(&self) -> NodeId {
        self.content
    }

    /// Tracks activate/deactivate notifications; drives the title color.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub(crate) fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
        if !draggable {
            self.header_drag = None;
        }
    }

    /// Whether the renderer overlays a border on top of the content.
    pub fn has_border(&self) -> bool {
        self.border
    }

    pub(crate) fn set_border(&mut self, border: bool) {
        self.border = border;
    }

    pub fn manual_resize_enabled(&self) -> bool {
        self.manual_resize
    }

    pub(crate) fn set_manual_resize(&mut self, enabled: bool) {
        self.manual_resize = enabled;
        if !enabled {
            self.hover_edge = None;
            self.resize_drag = None;
        }
    }

    /// The zone the pointer was last classified into, `None` for center.
    pub fn hover_edge(&self) -> Option<ResizeEdge> {
        self.hover_edge
    }

    pub(crate) fn set_hover_edge(&mut self, edge: Option<ResizeEdge>) {
        self.hover_edge = edge;
    }

    /// The title bar is click-through draggable unless a top resize zone
    /// is armed.
    pub fn title_draggable(&self) -> bool {
        self.draggable && !self.hover_edge.is_some_and(ResizeEdge::blocks_title_drag)
    }

    pub fn is_resizing(&self) -> bool {
        self.resize_drag.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.header_drag.is_some()
    }

    pub(crate) fn take_center_on_attach(&mut self) -> bool {
        std::mem::take(&mut self.center_on_attach)
    }

    pub(crate) fn set_center_on_attach(&mut self, center: bool) {
        self.center_on_attach = center;
    }
}
