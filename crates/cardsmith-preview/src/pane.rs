//! Debounced live preview.

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use cardsmith_core::Debouncer;
use cardsmith_settings::PreviewSettings;

use crate::compose::compose_with;
use crate::error::RenderError;
use crate::render::DocumentRenderer;

struct PaneShared {
    settings: PreviewSettings,
    target: Mutex<Option<Box<dyn DocumentRenderer>>>,
    last_document: Mutex<Option<String>>,
    loading: AtomicBool,
    renders: AtomicU64,
}

impl PaneShared {
    /// Compose and push to the target. `Ok(false)` when nothing is mounted.
    fn render(&self, markup: &str, style: &str) -> Result<bool, RenderError> {
        let document = compose_with(markup, style, self.settings.head_fallback);
        *self.last_document.lock() = Some(document.clone());

        let mut target = self.target.lock();
        let Some(renderer) = target.as_mut() else {
            tracing::trace!("preview target not mounted, render skipped");
            return Ok(false);
        };
        renderer.render(&document)?;
        self.renders.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(bytes = document.len(), "preview rendered");
        Ok(true)
    }

    fn render_logged(&self, markup: &str, style: &str) {
        if let Err(e) = self.render(markup, style) {
            tracing::warn!(error = %e, "preview render failed");
        }
        self.loading.store(false, Ordering::Release);
    }
}

/// The live preview: owns the render target and the render-debounce timer.
///
/// Buffer changes render only after the configured quiet period; a manual
/// refresh replaces any pending render with one after the shorter refresh
/// delay, with [`is_loading`](Self::is_loading) set in between.
pub struct PreviewPane {
    shared: Arc<PaneShared>,
    debouncer: Debouncer<(String, String)>,
}

impl PreviewPane {
    pub fn new(settings: PreviewSettings) -> Self {
        Self {
            shared: Arc::new(PaneShared {
                settings,
                target: Mutex::new(None),
                last_document: Mutex::new(None),
                loading: AtomicBool::new(false),
                renders: AtomicU64::new(0),
            }),
            debouncer: Debouncer::new("preview"),
        }
    }

    pub fn settings(&self) -> &PreviewSettings {
        &self.shared.settings
    }

    /// Attach the render target. Replaces any previous target.
    pub fn mount(&self, renderer: impl DocumentRenderer + 'static) {
        *self.shared.target.lock() = Some(Box::new(renderer));
        tracing::debug!("preview target mounted");
    }

    /// Detach the render target; later renders are skipped until remounted.
    pub fn unmount(&self) -> bool {
        self.shared.target.lock().take().is_some()
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.target.lock().is_some()
    }

    /// Schedule a render of the given buffers after the render debounce.
    /// Must be called from within a Tokio runtime.
    pub fn on_buffers_changed(&self, markup: impl Into<String>, style: impl Into<String>) {
        let shared = Arc::clone(&self.shared);
        self.debouncer.schedule(
            self.shared.settings.render_debounce(),
            (markup.into(), style.into()),
            move |(markup, style)| async move { shared.render_logged(&markup, &style) },
        );
    }

    /// Manual refresh: skip the render debounce but wait the short refresh
    /// delay so a loading indicator can show first.
    pub fn refresh(&self, markup: impl Into<String>, style: impl Into<String>) {
        self.shared.loading.store(true, Ordering::Release);
        let shared = Arc::clone(&self.shared);
        self.debouncer.schedule(
            self.shared.settings.refresh_delay(),
            (markup.into(), style.into()),
            move |(markup, style)| async move { shared.render_logged(&markup, &style) },
        );
    }

    /// Render immediately, bypassing the timer. Returns whether a target was
    /// mounted.
    pub fn render_now(&self, markup: &str, style: &str) -> Result<bool, RenderError> {
        self.debouncer.cancel();
        let result = self.shared.render(markup, style);
        self.shared.loading.store(false, Ordering::Release);
        result
    }

    /// Drop a pending render, if any.
    pub fn cancel_pending(&self) -> bool {
        let cancelled = self.debouncer.cancel();
        self.shared.loading.store(false, Ordering::Release);
        cancelled
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.loading.load(Ordering::Acquire)
    }

    /// Number of renders that reached a mounted target
    pub fn render_count(&self) -> u64 {
        self.shared.renders.load(Ordering::Relaxed)
    }

    /// The most recently composed document, whether or not it reached a
    /// target. Exports use this so they match the preview byte for byte.
    pub fn current_document(&self) -> Option<String> {
        self.shared.last_document.lock().clone()
    }
}

impl std::fmt::Debug for PreviewPane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewPane")
            .field("mounted", &self.is_mounted())
            .field("pending", &self.is_pending())
            .field("loading", &self.is_loading())
            .finish()
    }
}
