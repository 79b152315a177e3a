//! Cardsmith Preview - turns the two card buffers into a rendered document
//!
//! - [`compose`] merges markup and style into one self-contained document
//! - [`DocumentRenderer`] is the isolated render target (replaced wholesale
//!   on every render)
//! - [`PreviewPane`] debounces buffer changes into renders and handles the
//!   manual refresh
//! - [`export`] writes or opens exactly the document the preview shows

mod compose;
mod error;
pub mod export;
mod frame;
mod pane;
mod render;

pub use compose::{VIEWPORT_META, compose, compose_with};
pub use error::{ExportError, RenderError};
pub use export::{DocumentOpener, SystemOpener, download_as_file, open_in_new_tab};
pub use frame::{escape_attribute, sandboxed_frame};
pub use pane::PreviewPane;
pub use render::{DocumentRenderer, FileRenderer, RecordingRenderer};

pub use cardsmith_settings::HeadFallback;
