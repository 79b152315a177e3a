//! Text buffers and carets.
//!
//! ## Offsets
//!
//! Carets are UTF-8 byte offsets into the buffer text and must fall on
//! character boundaries. A caret with `start == end` is a plain insertion
//! point; otherwise it is a selection.
//!
//! ## Implementations
//!
//! - [`StringBuffer`] keeps the text in a `String`. Cards are small, so this is
//!   the default.
//! - [`RopeBuffer`] keeps the text in a `ropey::Rope`, for hosts that want
//!   O(log n) splices on large documents.
//!
//! Both only implement the primitive operations (`text`, `splice`, caret
//! access). The structural edits are provided methods on [`TextBuffer`] that
//! plan a [`Splice`] with the pure functions in [`crate::edit`] and apply it,
//! so callers never depend on the storage choice.

use ropey::Rope;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::ops::Range;

use crate::confirm::ConfirmGate;
use crate::edit::{self, Splice};
use crate::error::EditError;
use crate::surface::BufferKind;

/// A caret or selection, as byte offsets with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Caret {
    pub start: usize,
    pub end: usize,
}

impl Caret {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A collapsed caret (no selection)
    pub fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Verify `0 <= start <= end <= len(text)` and that both ends sit on
    /// character boundaries.
    pub fn validate(&self, text: &str) -> Result<(), EditError> {
        if self.start > self.end {
            return Err(EditError::InvertedRange {
                start: self.start,
                end: self.end,
            });
        }
        edit::check_offset(text, self.start)?;
        edit::check_offset(text, self.end)
    }
}

/// An editable text region with an associated caret.
///
/// Implementors provide storage; the editing operations are provided methods.
/// Each operation takes the caret range explicitly, returns the new caret and
/// leaves the buffer's stored caret at that value.
pub trait TextBuffer {
    /// Full buffer contents
    fn text(&self) -> Cow<'_, str>;

    /// Length in bytes
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn caret(&self) -> Caret;

    fn set_caret(&mut self, caret: Caret) -> Result<(), EditError>;

    /// Replace `range` with `insert`. Implementations bump [`version`](Self::version)
    /// when the text actually changes.
    fn splice(&mut self, range: Range<usize>, insert: &str) -> Result<(), EditError>;

    /// Monotonic counter of text mutations
    fn version(&self) -> u64;

    /// Apply a planned edit and move the caret to where the plan puts it.
    fn apply(&mut self, splice: Splice) -> Result<Caret, EditError> {
        if !splice.is_noop() {
            self.splice(splice.range.clone(), &splice.insert)?;
        }
        self.set_caret(splice.caret)?;
        Ok(splice.caret)
    }

    /// Replace the whole text, caret at the end.
    fn set_text(&mut self, text: &str) -> Result<Caret, EditError> {
        let len = self.len();
        self.apply(Splice {
            range: 0..len,
            insert: text.to_string(),
            caret: Caret::at(text.len()),
        })
    }

    fn insert_text(&mut self, caret: Caret, text: &str) -> Result<Caret, EditError> {
        let splice = edit::insert_text(&self.text(), caret, text)?;
        self.apply(splice)
    }

    fn insert_indent(&mut self, caret: Caret) -> Result<Caret, EditError> {
        let splice = edit::insert_indent(&self.text(), caret)?;
        self.apply(splice)
    }

    /// Dedent the caret's line by one unit. A line that does not start with
    /// two spaces is left alone and the caret is kept where it was.
    fn remove_indent(&mut self, caret_start: usize) -> Result<Caret, EditError> {
        match edit::remove_indent(&self.text(), caret_start)? {
            Some(splice) => self.apply(splice),
            None => {
                let caret = Caret::at(caret_start);
                self.set_caret(caret)?;
                Ok(caret)
            }
        }
    }

    fn auto_close(
        &mut self,
        caret: Caret,
        trigger: char,
        kind: BufferKind,
    ) -> Result<Caret, EditError> {
        let splice = edit::auto_close(&self.text(), caret, trigger, kind)?;
        self.apply(splice)
    }

    fn newline_with_indent(&mut self, caret_start: usize) -> Result<Caret, EditError> {
        let splice = edit::newline_with_indent(&self.text(), caret_start)?;
        self.apply(splice)
    }

    fn duplicate_line(&mut self, caret_start: usize) -> Result<Caret, EditError> {
        let splice = edit::duplicate_line(&self.text(), caret_start)?;
        self.apply(splice)
    }

    fn insert_template(&mut self, caret: Caret, snippet: &str) -> Result<Caret, EditError> {
        let splice = edit::insert_template(&self.text(), caret, snippet)?;
        self.apply(splice)
    }

    /// Clear the buffer once the gate confirms. Returns whether it was cleared.
    fn reset(&mut self, gate: &dyn ConfirmGate) -> bool {
        if !gate.confirm("Reset this buffer? All of its contents will be lost.") {
            tracing::debug!("buffer reset declined");
            return false;
        }
        let len = self.len();
        let cleared = self.apply(Splice {
            range: 0..len,
            insert: String::new(),
            caret: Caret::at(0),
        });
        cleared.is_ok()
    }
}

/// `String`-backed buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringBuffer {
    text: String,
    caret: Caret,
    version: u64,
}

impl StringBuffer {
    /// A buffer holding `text` with the caret at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = Caret::at(text.len());
        Self {
            text,
            caret,
            version: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl TextBuffer for StringBuffer {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn len(&self) -> usize {
        self.text.len()
    }

    fn caret(&self) -> Caret {
        self.caret
    }

    fn set_caret(&mut self, caret: Caret) -> Result<(), EditError> {
        caret.validate(&self.text)?;
        self.caret = caret;
        Ok(())
    }

    fn splice(&mut self, range: Range<usize>, insert: &str) -> Result<(), EditError> {
        Caret::new(range.start, range.end).validate(&self.text)?;
        if range.is_empty() && insert.is_empty() {
            return Ok(());
        }
        self.text.replace_range(range, insert);
        self.version += 1;
        // Keep the stored caret inside the (possibly shorter) text.
        if self.caret.validate(&self.text).is_err() {
            self.caret = Caret::at(self.text.len());
        }
        Ok(())
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Rope-backed buffer
#[derive(Debug, Clone, Default)]
pub struct RopeBuffer {
    rope: Rope,
    caret: Caret,
    version: u64,
}

impl RopeBuffer {
    /// A buffer holding `text` with the caret at the end.
    pub fn new(text: impl AsRef<str>) -> Self {
        let rope = Rope::from_str(text.as_ref());
        let caret = Caret::at(rope.len_bytes());
        Self {
            rope,
            caret,
            version: 0,
        }
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn check_offset(&self, offset: usize) -> Result<(), EditError> {
        let len = self.rope.len_bytes();
        if offset > len {
            return Err(EditError::OutOfBounds { offset, len });
        }
        // A byte offset inside a multi-byte char maps back to that char's start.
        if self.rope.char_to_byte(self.rope.byte_to_char(offset)) != offset {
            return Err(EditError::NotCharBoundary { offset });
        }
        Ok(())
    }

    fn check_caret(&self, caret: Caret) -> Result<(), EditError> {
        if caret.start > caret.end {
            return Err(EditError::InvertedRange {
                start: caret.start,
                end: caret.end,
            });
        }
        self.check_offset(caret.start)?;
        self.check_offset(caret.end)
    }
}

impl TextBuffer for RopeBuffer {
    fn text(&self) -> Cow<'_, str> {
        Cow::Owned(self.rope.to_string())
    }

    fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    fn caret(&self) -> Caret {
        self.caret
    }

    fn set_caret(&mut self, caret: Caret) -> Result<(), EditError> {
        self.check_caret(caret)?;
        self.caret = caret;
        Ok(())
    }

    fn splice(&mut self, range: Range<usize>, insert: &str) -> Result<(), EditError> {
        self.check_caret(Caret::new(range.start, range.end))?;
        if range.is_empty() && insert.is_empty() {
            return Ok(());
        }
        let start = self.rope.byte_to_char(range.start);
        let end = self.rope.byte_to_char(range.end);
        self.rope.remove(start..end);
        self.rope.insert(start, insert);
        self.version += 1;
        if self.check_caret(self.caret).is_err() {
            self.caret = Caret::at(self.rope.len_bytes());
        }
        Ok(())
    }

    fn version(&self) -> u64 {
        self.version
    }
}
