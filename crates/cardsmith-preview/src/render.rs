use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::RenderError;

/// An isolated render target.
///
/// Every call replaces the previous document entirely, so scripts embedded in
/// the card run again after each render.
pub trait DocumentRenderer: Send {
    fn render(&mut self, document: &str) -> Result<(), RenderError>;
}

/// Keeps every rendered document in memory.
///
/// Clones share the same history, so a test can hand one clone to a
/// [`PreviewPane`](crate::PreviewPane) and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    rendered: Arc<Mutex<Vec<String>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_count(&self) -> usize {
        self.rendered.lock().len()
    }

    pub fn last(&self) -> Option<String> {
        self.rendered.lock().last().cloned()
    }

    pub fn all(&self) -> Vec<String> {
        self.rendered.lock().clone()
    }
}

impl DocumentRenderer for RecordingRenderer {
    fn render(&mut self, document: &str) -> Result<(), RenderError> {
        self.rendered.lock().push(document.to_string());
        Ok(())
    }
}

/// Rewrites a single HTML file on every render, for viewing in an external
/// browser that reloads on change.
#[derive(Debug, Clone)]
pub struct FileRenderer {
    path: PathBuf,
}

impl FileRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentRenderer for FileRenderer {
    fn render(&mut self, document: &str) -> Result<(), RenderError> {
        std::fs::write(&self.path, document)?;
        tracing::trace!(path = %self.path.display(), bytes = document.len(), "preview file written");
        Ok(())
    }
}
