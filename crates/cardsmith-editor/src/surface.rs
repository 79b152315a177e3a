use serde::{Deserialize, Serialize};

use crate::buffer::{Caret, StringBuffer, TextBuffer};
use crate::confirm::ConfirmGate;
use crate::error::EditError;
use crate::snippets::DEFAULT_CARD_TEMPLATE;

/// Which of the two buffers an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferKind {
    #[default]
    Markup,
    Style,
}

impl BufferKind {
    pub fn label(&self) -> &'static str {
        match self {
            BufferKind::Markup => "HTML",
            BufferKind::Style => "CSS",
        }
    }
}

/// A discrete input event against the active buffer, at its current caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    InsertIndent,
    RemoveIndent,
    AutoClose(char),
    NewlineWithIndent,
    DuplicateLine,
    InsertTemplate(String),
    InsertText(String),
    SetText(String),
}

/// The markup and style buffers of a card plus the active-buffer selector.
///
/// Each buffer is owned here and only the active one is touched by
/// [`apply`](Self::apply).
#[derive(Debug, Clone)]
pub struct EditingSurface<B: TextBuffer = StringBuffer> {
    markup: B,
    style: B,
    active: BufferKind,
}

impl EditingSurface<StringBuffer> {
    /// Markup seeded with [`DEFAULT_CARD_TEMPLATE`], empty style.
    pub fn with_default_template() -> Self {
        Self::new(StringBuffer::new(DEFAULT_CARD_TEMPLATE), StringBuffer::default())
    }
}

impl<B: TextBuffer + Default> Default for EditingSurface<B> {
    fn default() -> Self {
        Self::new(B::default(), B::default())
    }
}

impl<B: TextBuffer> EditingSurface<B> {
    pub fn new(markup: B, style: B) -> Self {
        Self {
            markup,
            style,
            active: BufferKind::Markup,
        }
    }

    pub fn active(&self) -> BufferKind {
        self.active
    }

    pub fn set_active(&mut self, kind: BufferKind) {
        self.active = kind;
    }

    pub fn buffer(&self, kind: BufferKind) -> &B {
        match kind {
            BufferKind::Markup => &self.markup,
            BufferKind::Style => &self.style,
        }
    }

    pub fn buffer_mut(&mut self, kind: BufferKind) -> &mut B {
        match kind {
            BufferKind::Markup => &mut self.markup,
            BufferKind::Style => &mut self.style,
        }
    }

    pub fn active_buffer(&self) -> &B {
        self.buffer(self.active)
    }

    pub fn markup_text(&self) -> String {
        self.markup.text().into_owned()
    }

    pub fn style_text(&self) -> String {
        self.style.text().into_owned()
    }

    /// Changes whenever either buffer's text changes. Preview scheduling keys
    /// off this.
    pub fn revision(&self) -> u64 {
        self.markup.version() + self.style.version()
    }

    pub fn set_caret(&mut self, caret: Caret) -> Result<(), EditError> {
        let kind = self.active;
        self.buffer_mut(kind).set_caret(caret)
    }

    pub fn apply(&mut self, command: EditCommand) -> Result<Caret, EditError> {
        let kind = self.active;
        let buffer = self.buffer_mut(kind);
        let caret = buffer.caret();
        tracing::trace!(buffer = kind.label(), ?command, start = caret.start, end = caret.end, "edit");

        match command {
            EditCommand::InsertIndent => buffer.insert_indent(caret),
            EditCommand::RemoveIndent => buffer.remove_indent(caret.start),
            EditCommand::AutoClose(trigger) => buffer.auto_close(caret, trigger, kind),
            EditCommand::NewlineWithIndent => buffer.newline_with_indent(caret.start),
            EditCommand::DuplicateLine => buffer.duplicate_line(caret.start),
            EditCommand::InsertTemplate(snippet) => buffer.insert_template(caret, &snippet),
            EditCommand::InsertText(text) => buffer.insert_text(caret, &text),
            EditCommand::SetText(text) => buffer.set_text(&text),
        }
    }

    /// Clear the active buffer after confirmation.
    pub fn reset_active(&mut self, gate: &dyn ConfirmGate) -> bool {
        let kind = self.active;
        let cleared = self.buffer_mut(kind).reset(gate);
        if cleared {
            tracing::debug!(buffer = kind.label(), "buffer reset");
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::{AlwaysConfirm, NeverConfirm};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_edits_only_touch_active_buffer() {
        let mut surface: EditingSurface = EditingSurface::default();
        surface.apply(EditCommand::InsertText("<p".into())).unwrap();
        surface.set_active(BufferKind::Style);
        surface.apply(EditCommand::InsertText("p ".into())).unwrap();
        surface.apply(EditCommand::AutoClose('{')).unwrap();

        assert_eq!(surface.markup_text(), "<p");
        assert_eq!(surface.style_text(), "p {}");
    }

    #[test]
    fn test_revision_tracks_both_buffers() {
        let mut surface: EditingSurface = EditingSurface::default();
        assert_eq!(surface.revision(), 0);
        surface.apply(EditCommand::InsertText("a".into())).unwrap();
        surface.set_active(BufferKind::Style);
        surface.apply(EditCommand::InsertText("b".into())).unwrap();
        assert_eq!(surface.revision(), 2);
    }

    #[test]
    fn test_reset_active_needs_confirmation() {
        let mut surface = EditingSurface::with_default_template();
        assert!(!surface.reset_active(&NeverConfirm));
        assert_eq!(surface.markup_text(), DEFAULT_CARD_TEMPLATE);

        assert!(surface.reset_active(&AlwaysConfirm));
        assert_eq!(surface.markup_text(), "");
    }

    #[test]
    fn test_remove_indent_without_indent_keeps_caret() {
        let mut surface: EditingSurface = EditingSurface::default();
        surface.apply(EditCommand::SetText("abc".into())).unwrap();
        surface.set_caret(Caret::at(1)).unwrap();
        let caret = surface.apply(EditCommand::RemoveIndent).unwrap();
        assert_eq!(caret, Caret::at(1));
        assert_eq!(surface.markup_text(), "abc");
    }
}
