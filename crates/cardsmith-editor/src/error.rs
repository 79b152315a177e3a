use thiserror::Error;

/// Errors raised when an edit is given a caret that does not fit the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Offset {offset} is out of bounds (buffer length: {len})")]
    OutOfBounds { offset: usize, len: usize },

    #[error("Offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },

    #[error("Caret start {start} is after caret end {end}")]
    InvertedRange { start: usize, end: usize },
}
