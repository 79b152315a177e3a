//! Headless application controller.
//!
//! `CardApp` ties the editing surface, live preview and services together and
//! tracks which screen is showing. A front end forwards input events to it and
//! renders `screen()`, `notice()` and the preview target.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use cardsmith_core::SubmissionStore;
use cardsmith_editor::snippets::find_snippet;
use cardsmith_editor::{
    BufferKind, Caret, ConfirmGate, EditCommand, EditError, EditingSurface,
};
use cardsmith_preview::{
    DocumentOpener, DocumentRenderer, ExportError, PreviewPane, compose_with, download_as_file,
    open_in_new_tab, sandboxed_frame,
};
use cardsmith_services::{
    CardSummary, CardView, GalleryService, NameCheckState, NameReservationChecker, SaveOutcome,
    SaveService, ServiceError, validate_name,
};
use cardsmith_settings::CardSettings;

use crate::routes::Screen;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Still checking whether the name is available")]
    NameCheckPending,

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Unknown snippet: {0}")]
    UnknownSnippet(String),
}

impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Service(e) => e.user_message(),
            AppError::NameCheckPending => {
                "Please wait while we check that name.".to_string()
            }
            AppError::Edit(e) => e.to_string(),
            AppError::Export(e) => format!("Export failed: {e}"),
            AppError::UnknownSnippet(name) => format!("No snippet named \"{name}\"."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    fn error(err: &AppError) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: err.user_message(),
        }
    }
}

pub struct CardApp {
    settings: CardSettings,
    screen: Screen,
    name_input: String,
    surface: EditingSurface,
    preview: PreviewPane,
    checker: Arc<NameReservationChecker>,
    gallery: Arc<GalleryService>,
    saver: SaveService,
    notice: Option<Notice>,
}

impl CardApp {
    pub fn new(store: Arc<dyn SubmissionStore>, settings: CardSettings) -> Self {
        let checker = Arc::new(NameReservationChecker::new(
            store.clone(),
            settings.names.clone(),
        ));
        let gallery = Arc::new(GalleryService::new(
            store.clone(),
            settings.gallery.clone(),
            settings.preview.head_fallback,
        ));
        let saver = SaveService::new(
            store,
            checker.clone(),
            gallery.clone(),
            settings.names.clone(),
        );
        Self {
            preview: PreviewPane::new(settings.preview.clone()),
            settings,
            screen: Screen::Landing,
            name_input: String::new(),
            surface: EditingSurface::with_default_template(),
            checker,
            gallery,
            saver,
            notice: None,
        }
    }

    pub fn settings(&self) -> &CardSettings {
        &self.settings
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn surface(&self) -> &EditingSurface {
        &self.surface
    }

    pub fn preview(&self) -> &PreviewPane {
        &self.preview
    }

    fn fail<T>(&mut self, err: AppError) -> Result<T, AppError> {
        self.notice = Some(Notice::error(&err));
        Err(err)
    }

    // Landing

    /// Load the recent list. A failure is logged and the previous list kept.
    pub async fn load_landing(&mut self) {
        self.screen = Screen::Landing;
        let _ = self.gallery.refresh_recent().await;
    }

    /// Recent cards linked from the landing page
    pub fn featured(&self) -> Vec<CardSummary> {
        self.gallery.featured()
    }

    pub fn recent(&self) -> Vec<CardSummary> {
        self.gallery.recent()
    }

    /// Name field changed. Must be called from within a Tokio runtime.
    pub fn set_name(&mut self, raw: &str) {
        self.name_input = raw.to_string();
        self.checker.on_name_edit(raw);
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn name_state(&self) -> NameCheckState {
        self.checker.state()
    }

    pub fn subscribe_name_state(&self) -> tokio::sync::watch::Receiver<NameCheckState> {
        self.checker.subscribe()
    }

    /// Enter the editor. Blocked while the name is invalid, taken or still
    /// being checked.
    pub fn start_editing(&mut self) -> Result<(), AppError> {
        let name = match validate_name(&self.name_input, &self.settings.names) {
            Ok(name) => name.to_string(),
            Err(e) => return self.fail(ServiceError::from(e).into()),
        };
        match self.checker.state() {
            NameCheckState::Taken => return self.fail(ServiceError::Conflict { name }.into()),
            NameCheckState::Checking => return self.fail(AppError::NameCheckPending),
            NameCheckState::Idle | NameCheckState::Available => {}
        }

        tracing::info!(name = %name, "entering editor");
        self.notice = None;
        self.screen = Screen::Editor;
        self.schedule_preview();
        Ok(())
    }

    // Editor

    fn schedule_preview(&self) {
        self.preview
            .on_buffers_changed(self.surface.markup_text(), self.surface.style_text());
    }

    pub fn select_buffer(&mut self, kind: BufferKind) {
        self.surface.set_active(kind);
    }

    pub fn set_caret(&mut self, caret: Caret) -> Result<(), AppError> {
        Ok(self.surface.set_caret(caret)?)
    }

    /// Apply an edit to the active buffer and schedule a preview render if the
    /// text changed.
    pub fn edit(&mut self, command: EditCommand) -> Result<Caret, AppError> {
        let before = self.surface.revision();
        let caret = self.surface.apply(command)?;
        if self.surface.revision() != before {
            self.schedule_preview();
        }
        Ok(caret)
    }

    pub fn insert_snippet(&mut self, name: &str) -> Result<Caret, AppError> {
        let Some(snippet) = find_snippet(name) else {
            return self.fail(AppError::UnknownSnippet(name.to_string()));
        };
        if snippet.kind != self.surface.active() {
            tracing::debug!(snippet = name, "snippet inserted into a different buffer kind");
        }
        self.edit(EditCommand::InsertTemplate(snippet.body.to_string()))
    }

    /// Clear the active buffer once `gate` confirms.
    pub fn reset_buffer(&mut self, gate: &dyn ConfirmGate) -> bool {
        let cleared = self.surface.reset_active(gate);
        if cleared {
            self.schedule_preview();
        }
        cleared
    }

    pub fn mount_preview(&self, renderer: impl DocumentRenderer + 'static) {
        self.preview.mount(renderer);
    }

    pub fn unmount_preview(&self) -> bool {
        self.preview.unmount()
    }

    /// Manual refresh of the preview
    pub fn refresh_preview(&self) {
        self.preview
            .refresh(self.surface.markup_text(), self.surface.style_text());
    }

    /// The composed document for the current buffers, identical to what the
    /// preview renders for them.
    pub fn current_document(&self) -> String {
        compose_with(
            &self.surface.markup_text(),
            &self.surface.style_text(),
            self.settings.preview.head_fallback,
        )
    }

    /// The current document in a sandboxed iframe, for front ends that embed
    /// the preview as markup.
    pub fn preview_frame(&self) -> String {
        sandboxed_frame(&self.current_document())
    }

    /// Write the current document to `dir` under the configured file name.
    pub fn download(&mut self, dir: &Path) -> Result<PathBuf, AppError> {
        let document = self.current_document();
        match download_as_file(&document, dir, &self.settings.export.download_file_name) {
            Ok(path) => {
                self.notice = Some(Notice::info(format!("Downloaded to {}", path.display())));
                Ok(path)
            }
            Err(e) => self.fail(e.into()),
        }
    }

    pub fn open_in_new_tab(&mut self, opener: &dyn DocumentOpener) -> Result<PathBuf, AppError> {
        let document = self.current_document();
        match open_in_new_tab(opener, &document) {
            Ok(path) => Ok(path),
            Err(e) => self.fail(e.into()),
        }
    }

    /// Save the card and show it. On failure the editor stays open with an
    /// error notice; nothing is retried.
    pub async fn save(&mut self) -> Result<SaveOutcome, AppError> {
        let markup = self.surface.markup_text();
        let style = self.surface.style_text();
        match self.saver.save(&self.name_input, &markup, &style).await {
            Ok(outcome) => {
                let name = outcome.submission.name.clone();
                self.notice = Some(Notice::success(format!("Card saved as \"{name}\".")));
                self.preview.cancel_pending();
                self.checker.reset();
                self.name_input.clear();
                self.screen = Screen::View(name);
                Ok(outcome)
            }
            Err(e) => self.fail(e.into()),
        }
    }

    // View and gallery

    pub async fn open_view(&mut self, name: &str) -> Result<CardView, AppError> {
        match self.gallery.view(name).await {
            Ok(view) => {
                self.screen = Screen::View(view.submission.name.clone());
                Ok(view)
            }
            Err(e) => self.fail(e.into()),
        }
    }

    pub async fn open_gallery(&mut self, filter: &str) -> Result<Vec<CardSummary>, AppError> {
        match self.gallery.search(filter).await {
            Ok(list) => {
                self.screen = Screen::Gallery;
                Ok(list)
            }
            Err(e) => self.fail(e.into()),
        }
    }

    /// Follow a path. Returns the loaded card for view paths.
    pub async fn navigate(&mut self, path: &str) -> Result<Option<CardView>, AppError> {
        match Screen::parse(path) {
            Some(Screen::View(name)) => self.open_view(&name).await.map(Some),
            Some(Screen::Gallery) => self.open_gallery("").await.map(|_| None),
            Some(Screen::Editor) => self.start_editing().map(|_| None),
            Some(Screen::Landing) | None => {
                self.load_landing().await;
                Ok(None)
            }
        }
    }
}

impl std::fmt::Debug for CardApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardApp")
            .field("screen", &self.screen)
            .field("name_input", &self.name_input)
            .field("notice", &self.notice)
            .finish_non_exhaustive()
    }
}
