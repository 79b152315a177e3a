//! Cardsmith Core - shared abstractions for the greeting-card editor
//!
//! This crate provides the types and traits that every other Cardsmith
//! crate depends on. It defines:
//!
//! - `Submission` / `NewSubmission` - the persisted greeting card record
//! - `SubmissionStore` - trait for the external record store
//! - `StoreError` - error taxonomy shared by store implementations
//! - `Debouncer` - a trailing-edge timer that cancels before rescheduling

mod debounce;
mod error;
mod store;
mod types;

pub use debounce::*;
pub use error::*;
pub use store::*;
pub use types::*;
