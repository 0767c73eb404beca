use thiserror::Error;

/// Contract violations surfaced to the caller.
///
/// Positional corrections (caret, scroll position, size clamps) never end up
/// here; they are fixed in place.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UiError {
    #[error("no such item: {0}")]
    UnknownKey(String),
    #[error("state conflict: {0}")]
    StateConflict(&'static str),
    #[error("node is not part of this context (disposed or never created)")]
    UnknownNode,
    #[error("node is not a {expected}")]
    WrongKind { expected: &'static str },
}

pub type Result<T> = std::result::Result<T, UiError>;
