pub mod floating;

pub use floating::{HeaderDrag, ResizeDrag, ResizeEdge, apply_resize_drag, classify_zone};
