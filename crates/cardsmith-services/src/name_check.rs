//! Name reservation checking.
//!
//! Two tiers:
//!
//! - The advisory check runs while the user types. It is debounced, cancelled
//!   by further edits and fails open: a store error reads as "available" so
//!   typing is never blocked by backend trouble.
//! - The authoritative check runs right before a mutating action and surfaces
//!   store errors.
//!
//! Neither tier is a lock. The store's unique constraint on `name` has the
//! final word.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

use cardsmith_core::{Debouncer, SubmissionStore, name_len, normalize_name};
use cardsmith_settings::NameSettings;

use crate::error::ServiceResult;

/// Live availability of the name being typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameCheckState {
    #[default]
    Idle,
    Checking,
    Available,
    Taken,
}

impl NameCheckState {
    /// Whether "start editing" may proceed in this state
    pub fn allows_start(&self) -> bool {
        !matches!(self, NameCheckState::Checking | NameCheckState::Taken)
    }
}

/// Look up `name` in the store. `true` means taken.
async fn exists_by_name(store: &dyn SubmissionStore, name: &str) -> ServiceResult<bool> {
    Ok(store.get_by_exact_name(name).await?.is_some())
}

struct CheckerShared {
    store: Arc<dyn SubmissionStore>,
    /// Trimmed field value as of the latest edit
    current: Mutex<String>,
    state: watch::Sender<NameCheckState>,
}

impl CheckerShared {
    async fn check_advisory(&self, name: &str) -> NameCheckState {
        match exists_by_name(self.store.as_ref(), name).await {
            Ok(true) => NameCheckState::Taken,
            Ok(false) => NameCheckState::Available,
            Err(e) => {
                tracing::warn!(name, error = %e, "name check failed, treating as available");
                NameCheckState::Available
            }
        }
    }

    /// Run the advisory check for `name` and publish the result only if the
    /// field still holds `name`.
    async fn run_check(&self, name: String) -> Option<NameCheckState> {
        let result = self.check_advisory(&name).await;
        self.publish_if_current(&name, result).then_some(result)
    }

    /// Compare and publish under one `current` guard so an edit cannot land
    /// between the two.
    fn publish_if_current(&self, name: &str, result: NameCheckState) -> bool {
        let current = self.current.lock();
        if *current != name {
            tracing::debug!(name, ?result, "discarding stale name check");
            return false;
        }
        self.state.send_replace(result);
        true
    }
}

/// Tracks the name field and keeps a [`NameCheckState`] for it.
///
/// Subscribers get every state change through a `tokio::sync::watch`
/// channel.
pub struct NameReservationChecker {
    shared: Arc<CheckerShared>,
    settings: NameSettings,
    debouncer: Debouncer<String>,
}

impl NameReservationChecker {
    pub fn new(store: Arc<dyn SubmissionStore>, settings: NameSettings) -> Self {
        let (state, _) = watch::channel(NameCheckState::Idle);
        Self {
            shared: Arc::new(CheckerShared {
                store,
                current: Mutex::new(String::new()),
                state,
            }),
            settings,
            debouncer: Debouncer::new("name-check"),
        }
    }

    pub fn state(&self) -> NameCheckState {
        *self.shared.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<NameCheckState> {
        self.shared.state.subscribe()
    }

    /// The trimmed field value as of the latest edit
    pub fn current_name(&self) -> String {
        self.shared.current.lock().clone()
    }

    /// React to the name field changing to `raw`.
    ///
    /// - Empty: cancel any pending check and go idle.
    /// - Shorter than the check threshold: cancel any pending check, keep
    ///   the state.
    /// - Otherwise: go to checking and (re)arm the debounced check.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn on_name_edit(&self, raw: &str) {
        let name = normalize_name(raw).to_string();
        let len = name_len(&name);
        {
            let mut current = self.shared.current.lock();
            *current = name.clone();
            if len == 0 {
                self.debouncer.cancel();
                self.shared.state.send_replace(NameCheckState::Idle);
                return;
            }
            if len < self.settings.min_check_chars {
                self.debouncer.cancel();
                return;
            }
            self.shared.state.send_replace(NameCheckState::Checking);
        }

        let shared = Arc::clone(&self.shared);
        self.debouncer
            .schedule(self.settings.check_debounce(), name, move |name| async move {
                shared.run_check(name).await;
            });
    }

    /// Run the advisory check for `name` now, applying the result only if
    /// the field still holds `name`. Returns the applied state.
    pub async fn check_now(&self, name: &str) -> Option<NameCheckState> {
        self.shared.run_check(normalize_name(name).to_string()).await
    }

    /// Fail-open lookup for live feedback; never errors.
    pub async fn check_advisory(&self, name: &str) -> NameCheckState {
        self.shared.check_advisory(normalize_name(name)).await
    }

    /// Lookup that surfaces store errors, for gating a save. `true` means
    /// taken.
    #[tracing::instrument(skip(self))]
    pub async fn check_authoritative(&self, name: &str) -> ServiceResult<bool> {
        let name = normalize_name(name);
        exists_by_name(self.shared.store.as_ref(), name)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "authoritative name check failed"))
    }

    /// Forget the field: cancel any armed check, clear the name and go idle.
    pub fn reset(&self) {
        let mut current = self.shared.current.lock();
        current.clear();
        self.debouncer.cancel();
        self.shared.state.send_replace(NameCheckState::Idle);
    }

    /// Whether a debounced check is armed and not yet fired
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
