//! Common test utilities and mocks

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use cardsmith_core::{NewSubmission, StoreError, StoreResult, Submission, SubmissionStore};

/// In-memory store for testing service logic without a database.
///
/// Supports failure injection, per-name lookup latency (driven by Tokio's
/// clock, so paused-clock tests stay deterministic) and a call log for
/// asserting which store operations ran.
#[derive(Default)]
pub struct MockStore {
    records: Mutex<Vec<Submission>>,
    pub fail_lookups: bool,
    pub fail_inserts: bool,
    pub fail_lists: bool,
    /// Report a uniqueness violation on insert even though the lookup found
    /// nothing, as if another client won the race in between.
    pub insert_conflict: bool,
    lookup_delays: HashMap<String, Duration>,
    call_log: Arc<Mutex<Vec<String>>>,
    inserted: Arc<Mutex<Vec<NewSubmission>>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing(self, name: &str) -> Self {
        let mut records = self.records.lock();
        let created_at = Utc::now() + ChronoDuration::seconds(records.len() as i64);
        records.push(
            NewSubmission::from_draft(name, format!("<p>{name}</p>"), "")
                .into_submission(Uuid::new_v4(), created_at),
        );
        drop(records);
        self
    }

    pub fn with_lookup_failure(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    pub fn with_insert_failure(mut self) -> Self {
        self.fail_inserts = true;
        self
    }

    pub fn with_list_failure(mut self) -> Self {
        self.fail_lists = true;
        self
    }

    pub fn with_insert_conflict(mut self) -> Self {
        self.insert_conflict = true;
        self
    }

    /// Delay lookups of `name` by `delay`.
    pub fn with_lookup_delay(mut self, name: &str, delay: Duration) -> Self {
        self.lookup_delays.insert(name.to_string(), delay);
        self
    }

    pub fn call_log(&self) -> Vec<String> {
        self.call_log.lock().clone()
    }

    pub fn insert_calls(&self) -> Vec<NewSubmission> {
        self.inserted.lock().clone()
    }

    pub fn lookups(&self) -> usize {
        self.call_log()
            .iter()
            .filter(|c| c.starts_with("get_by_exact_name"))
            .count()
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl SubmissionStore for MockStore {
    fn backend_name(&self) -> &str {
        "mock"
    }

    async fn insert_submission(&self, submission: NewSubmission) -> StoreResult<Submission> {
        self.call_log
            .lock()
            .push(format!("insert_submission({})", submission.name));
        self.inserted.lock().push(submission.clone());

        if self.fail_inserts {
            return Err(StoreError::Transport("connection reset".into()));
        }
        let mut records = self.records.lock();
        if self.insert_conflict || records.iter().any(|r| r.name == submission.name) {
            return Err(StoreError::Conflict {
                name: submission.name,
            });
        }
        let created_at = Utc::now() + ChronoDuration::seconds(records.len() as i64);
        let saved = submission.into_submission(Uuid::new_v4(), created_at);
        records.push(saved.clone());
        Ok(saved)
    }

    async fn get_by_exact_name(&self, name: &str) -> StoreResult<Option<Submission>> {
        self.call_log
            .lock()
            .push(format!("get_by_exact_name({name})"));
        if let Some(delay) = self.lookup_delays.get(name) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail_lookups {
            return Err(StoreError::Transport("store unreachable".into()));
        }
        Ok(self.records.lock().iter().find(|r| r.name == name).cloned())
    }

    async fn list_recent(&self, limit: Option<usize>) -> StoreResult<Vec<Submission>> {
        self.call_log.lock().push(format!("list_recent({limit:?})"));
        if self.fail_lists {
            return Err(StoreError::Query("list failed".into()));
        }
        let mut records = self.records.lock().clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            records.truncate(limit);
        }
        Ok(records)
    }
}
