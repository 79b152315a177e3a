//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cardsmith_app::CardApp;
use cardsmith_core::{NewSubmission, StoreResult, Submission, SubmissionStore};
use cardsmith_settings::CardSettings;
use cardsmith_store_sqlite::SqliteSubmissionStore;

/// In-memory SQLite store that counts calls per operation.
pub struct CountingStore {
    inner: SqliteSubmissionStore,
    inserts: AtomicUsize,
    lookups: AtomicUsize,
    lists: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: SqliteSubmissionStore::in_memory().expect("in-memory store"),
            inserts: AtomicUsize::new(0),
            lookups: AtomicUsize::new(0),
            lists: AtomicUsize::new(0),
        })
    }

    /// Insert directly, bypassing the counters, as another client would.
    pub async fn seed(&self, name: &str, markup: &str, style: &str) -> Submission {
        self.inner
            .insert_submission(NewSubmission::from_draft(name, markup, style))
            .await
            .expect("seed insert")
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn lists(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionStore for CountingStore {
    fn backend_name(&self) -> &str {
        "counting-sqlite"
    }

    async fn insert_submission(&self, submission: NewSubmission) -> StoreResult<Submission> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_submission(submission).await
    }

    async fn get_by_exact_name(&self, name: &str) -> StoreResult<Option<Submission>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.get_by_exact_name(name).await
    }

    async fn list_recent(&self, limit: Option<usize>) -> StoreResult<Vec<Submission>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.list_recent(limit).await
    }
}

pub fn app_with(store: &Arc<CountingStore>) -> CardApp {
    CardApp::new(store.clone(), CardSettings::default())
}
