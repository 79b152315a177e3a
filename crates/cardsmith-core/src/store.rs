//! Record store contract

use crate::{NewSubmission, StoreResult, Submission};
use async_trait::async_trait;

/// The external record store holding greeting-card submissions.
///
/// The store is the final authority on name uniqueness: `insert_submission`
/// must reject a duplicate `name` with [`StoreError::Conflict`](crate::StoreError::Conflict)
/// no matter what any client-side pre-check concluded.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Backend identifier (e.g. "sqlite", "memory")
    fn backend_name(&self) -> &str;

    /// Insert a new submission and return the stored record
    async fn insert_submission(&self, submission: NewSubmission) -> StoreResult<Submission>;

    /// Find the submission whose name matches exactly (case-sensitive)
    async fn get_by_exact_name(&self, name: &str) -> StoreResult<Option<Submission>>;

    /// List submissions newest first, optionally capped at `limit` rows
    async fn list_recent(&self, limit: Option<usize>) -> StoreResult<Vec<Submission>>;
}
