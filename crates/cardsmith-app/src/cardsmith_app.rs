//! Cardsmith - greeting cards with live preview and name-reserved sharing
//!
//! The application layer: a headless controller over the editor, preview and
//! services, plus screen routing and logging setup.

mod app;
pub mod logging;
pub mod routes;

pub use app::{AppError, CardApp, Notice, NoticeKind};
pub use routes::Screen;
