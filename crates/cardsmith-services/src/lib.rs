//! Cardsmith Services Layer
//!
//! Sits between the application controller and the record store.
//!
//! ```text
//! App (cardsmith-app)
//!     ↓
//! Services (cardsmith-services) ← This crate
//!     ↓
//! Core + Preview (cardsmith-core, cardsmith-preview)
//! ```
//!
//! # Services
//!
//! - [`NameReservationChecker`] - debounced, fail-open availability feedback
//!   plus the authoritative check used before saving
//! - [`SaveService`] - the save chain (validate, re-check, insert, reload recent)
//! - [`GalleryService`] - recent list, gallery search, view by name

mod error;
mod gallery_service;
mod name_check;
mod save_service;
mod validation;
mod view_models;

pub use error::{ServiceError, ServiceResult, ValidationError};
pub use gallery_service::{GalleryService, filter_by_name};
pub use name_check::{NameCheckState, NameReservationChecker};
pub use save_service::SaveService;
pub use validation::validate_name;
pub use view_models::{CardSummary, CardView, SaveOutcome};
