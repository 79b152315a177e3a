//! Cardsmith Editor - the editing surface
//!
//! This crate holds the two text buffers a card is made of (markup and an
//! auxiliary style sheet) and the structural edits the code pane offers:
//! - Indent / dedent by a two-space unit
//! - Bracket, quote and HTML tag auto-closing
//! - Newline that inherits (and after an opener, deepens) indentation
//! - Line duplication
//! - Snippet insertion and a confirmed reset
//!
//! Every edit is planned by a pure function in [`edit`] over the buffer text
//! and a caret range, then applied through the [`TextBuffer`] trait, so the
//! string-backed and rope-backed buffers behave identically.

pub mod buffer;
pub mod confirm;
pub mod edit;
mod error;
pub mod snippets;
mod surface;

pub use buffer::{Caret, RopeBuffer, StringBuffer, TextBuffer};
pub use confirm::{AlwaysConfirm, ConfirmGate, NeverConfirm};
pub use edit::{INDENT_UNIT, Splice, VOID_ELEMENTS};
pub use error::EditError;
pub use snippets::{BUILTIN_SNIPPETS, DEFAULT_CARD_TEMPLATE, Snippet};
pub use surface::{BufferKind, EditCommand, EditingSurface};
