//! Edit planning.
//!
//! Each function here looks at the buffer text and a caret and returns the
//! [`Splice`] that performs the edit. Nothing is mutated; [`TextBuffer`]
//! applies the plan.
//!
//! [`TextBuffer`]: crate::TextBuffer

use std::ops::Range;

use crate::buffer::Caret;
use crate::error::EditError;
use crate::surface::BufferKind;

/// One indentation level
pub const INDENT_UNIT: &str = "  ";

/// Elements that never take a closing tag
pub const VOID_ELEMENTS: &[&str] = &[
    "br", "img", "input", "meta", "link", "hr", "area", "base", "col", "embed", "source", "track",
    "wbr",
];

/// A planned replacement: put `insert` where `range` was, then move the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub range: Range<usize>,
    pub insert: String,
    pub caret: Caret,
}

impl Splice {
    fn insert_at(offset: usize, insert: impl Into<String>, caret: Caret) -> Self {
        Self {
            range: offset..offset,
            insert: insert.into(),
            caret,
        }
    }

    /// True when applying the splice leaves the text untouched.
    pub fn is_noop(&self) -> bool {
        self.range.is_empty() && self.insert.is_empty()
    }

    /// Apply to a copy of `text`. Used by callers that only want the result.
    pub fn apply_to(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + self.insert.len());
        out.push_str(&text[..self.range.start]);
        out.push_str(&self.insert);
        out.push_str(&text[self.range.end..]);
        out
    }
}

pub(crate) fn check_offset(text: &str, offset: usize) -> Result<(), EditError> {
    if offset > text.len() {
        return Err(EditError::OutOfBounds {
            offset,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(offset) {
        return Err(EditError::NotCharBoundary { offset });
    }
    Ok(())
}

fn line_start(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

fn line_end(text: &str, offset: usize) -> usize {
    text[offset..]
        .find('\n')
        .map(|i| offset + i)
        .unwrap_or(text.len())
}

fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

fn bracket_closer(open: char) -> Option<char> {
    match open {
        '{' => Some('}'),
        '[' => Some(']'),
        '(' => Some(')'),
        '"' => Some('"'),
        '\'' => Some('\''),
        _ => None,
    }
}

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// The tag name of an unterminated `<tagname ...` opener ending at `offset`,
/// if there is one.
///
/// Closing tags (`</div`), comments, doctypes and self-closed openers
/// (`<img /`) are not openers. Quoted attribute values are skipped, so a `<`
/// or `>` inside `title="a<b"` does not end the opener, and an offset inside
/// an unterminated value has no opener.
pub fn open_tag_before(text: &str, offset: usize) -> Option<&str> {
    let prefix = &text[..offset];
    let mut start = None;
    let mut quote = None;
    let mut after_eq = false;
    for (i, c) in prefix.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '<' => start = Some(i + 1),
            '>' => start = None,
            '"' | '\'' if start.is_some() && after_eq => quote = Some(c),
            _ => {}
        }
        if !c.is_whitespace() {
            after_eq = c == '=';
        }
    }
    if quote.is_some() {
        return None;
    }

    let opener = &prefix[start?..];
    if opener.trim_end().ends_with('/') {
        return None;
    }

    let name_len = opener
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(opener.len());
    let name = &opener[..name_len];
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    match opener[name_len..].chars().next() {
        None => Some(name),
        Some(c) if c.is_whitespace() => Some(name),
        Some(_) => None,
    }
}

/// Replace the selection with `insert`, caret after it.
pub fn insert_text(text: &str, caret: Caret, insert: &str) -> Result<Splice, EditError> {
    caret.validate(text)?;
    Ok(Splice {
        range: caret.range(),
        insert: insert.to_string(),
        caret: Caret::at(caret.start + insert.len()),
    })
}

/// Two spaces at the selection start. The selection itself is kept.
pub fn insert_indent(text: &str, caret: Caret) -> Result<Splice, EditError> {
    caret.validate(text)?;
    let at = caret.start + INDENT_UNIT.len();
    Ok(Splice::insert_at(caret.start, INDENT_UNIT, Caret::at(at)))
}

/// Remove one indent unit from the start of the caret's line.
///
/// Returns `None` when the line does not begin with two spaces.
pub fn remove_indent(text: &str, caret_start: usize) -> Result<Option<Splice>, EditError> {
    check_offset(text, caret_start)?;
    let start = line_start(text, caret_start);
    if !text[start..].starts_with(INDENT_UNIT) {
        return Ok(None);
    }
    let caret = caret_start.saturating_sub(INDENT_UNIT.len()).max(start);
    Ok(Some(Splice {
        range: start..start + INDENT_UNIT.len(),
        insert: String::new(),
        caret: Caret::at(caret),
    }))
}

/// Handle a typed character that may open a pair.
///
/// Brackets and quotes wrap the selection and keep it selected between the
/// pair. In markup, `>` after an unterminated non-void opener also writes the
/// matching closing tag, caret between the two. Anything else is inserted as
/// typed.
pub fn auto_close(
    text: &str,
    caret: Caret,
    trigger: char,
    kind: BufferKind,
) -> Result<Splice, EditError> {
    caret.validate(text)?;

    if let Some(closer) = bracket_closer(trigger) {
        let selected = &text[caret.range()];
        let mut insert = String::with_capacity(selected.len() + 2);
        insert.push(trigger);
        insert.push_str(selected);
        insert.push(closer);
        let inner = caret.start + trigger.len_utf8();
        return Ok(Splice {
            range: caret.range(),
            insert,
            caret: Caret::new(inner, inner + selected.len()),
        });
    }

    if trigger == '>' && kind == BufferKind::Markup {
        if let Some(tag) = open_tag_before(text, caret.start) {
            if !is_void_element(tag) {
                tracing::trace!(tag, "closing tag inserted");
                return Ok(Splice {
                    range: caret.range(),
                    insert: format!("></{tag}>"),
                    caret: Caret::at(caret.start + 1),
                });
            }
        }
    }

    let mut buf = [0u8; 4];
    insert_text(text, caret, trigger.encode_utf8(&mut buf))
}

/// Break the line at `caret_start`, carrying its indentation over and adding
/// one unit after an opening `{`, `(` or `[`.
pub fn newline_with_indent(text: &str, caret_start: usize) -> Result<Splice, EditError> {
    check_offset(text, caret_start)?;
    let before = &text[line_start(text, caret_start)..caret_start];

    let mut insert = String::from("\n");
    insert.push_str(leading_whitespace(before));
    if before.trim_end().ends_with(['{', '(', '[']) {
        insert.push_str(INDENT_UNIT);
    }
    let caret = Caret::at(caret_start + insert.len());
    Ok(Splice::insert_at(caret_start, insert, caret))
}

/// Copy the caret's line below itself. The caret follows into the copy at
/// the same column.
pub fn duplicate_line(text: &str, caret_start: usize) -> Result<Splice, EditError> {
    check_offset(text, caret_start)?;
    let start = line_start(text, caret_start);
    let end = line_end(text, caret_start);
    let column = caret_start - start;

    let insert = format!("\n{}", &text[start..end]);
    Ok(Splice::insert_at(end, insert, Caret::at(end + 1 + column)))
}

pub fn insert_template(text: &str, caret: Caret, snippet: &str) -> Result<Splice, EditError> {
    insert_text(text, caret, snippet)
}
