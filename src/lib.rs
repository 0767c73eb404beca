//! Interactive widget core for floating-frame interfaces.
//!
//! A [`UiContext`] owns the node tree and every piece of interaction state:
//! which frame is active, which node has focus, hover, pending tooltip
//! timers and in-flight drags. Hosts feed it [`InputEvent`]s plus a periodic
//! [`UiContext::tick`], and read the scene back through the accessors (the
//! terminal host does this in [`render::render_scene`]).

pub mod clipboard;
pub mod components;
pub mod config;
pub mod constants;
pub mod context;
pub mod drivers;
pub mod error;
pub mod event;
pub mod event_loop;
pub mod font;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod render;
pub mod theme;
pub mod timer;
pub mod tracing_sub;
pub mod ui;

pub use clipboard::{ClipboardBackend, ClipboardError, MemoryClipboard, SystemClipboard};
pub use config::UiConfig;
pub use context::{CursorMode, DialogKind, Node, NodeId, UiContext};
pub use error::{Result, UiError};
pub use event::{EventKind, FocusOrigin, Notification, Subscription, UiEvent};
pub use font::{GlyphMetrics, MonospaceMetrics};
pub use geometry::{Padding, Point, Rect, Size, SizeBounds};
pub use input::{InputEvent, PointerButton};
pub use layout::ResizeEdge;
