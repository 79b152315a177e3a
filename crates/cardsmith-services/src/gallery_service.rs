//! Recent list, gallery browsing and viewing a card by name.

use parking_lot::RwLock;
use std::sync::Arc;

use cardsmith_core::{Submission, SubmissionStore, normalize_name};
use cardsmith_preview::compose_with;
use cardsmith_settings::{GallerySettings, HeadFallback};

use crate::error::{ServiceError, ServiceResult};
use crate::view_models::{CardSummary, CardView};

/// Keep the submissions whose name contains `term`, ignoring case. A blank
/// term keeps everything.
pub fn filter_by_name(submissions: Vec<Submission>, term: &str) -> Vec<Submission> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return submissions;
    }
    submissions
        .into_iter()
        .filter(|s| s.name.to_lowercase().contains(&term))
        .collect()
}

pub struct GalleryService {
    store: Arc<dyn SubmissionStore>,
    settings: GallerySettings,
    head_fallback: HeadFallback,
    /// Last successfully loaded recent list
    recent: RwLock<Vec<Submission>>,
}

impl GalleryService {
    pub fn new(
        store: Arc<dyn SubmissionStore>,
        settings: GallerySettings,
        head_fallback: HeadFallback,
    ) -> Self {
        Self {
            store,
            settings,
            head_fallback,
            recent: RwLock::new(Vec::new()),
        }
    }

    /// Reload the recent list. On failure the previous list is kept.
    #[tracing::instrument(skip(self), fields(limit = self.settings.recent_limit))]
    pub async fn refresh_recent(&self) -> ServiceResult<Vec<CardSummary>> {
        match self.store.list_recent(Some(self.settings.recent_limit)).await {
            Ok(list) => {
                tracing::debug!(count = list.len(), "recent cards loaded");
                let summaries = list.iter().map(CardSummary::from).collect();
                *self.recent.write() = list;
                Ok(summaries)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load recent cards");
                Err(e.into())
            }
        }
    }

    /// Cached recent list, newest first
    pub fn recent(&self) -> Vec<CardSummary> {
        self.recent.read().iter().map(CardSummary::from).collect()
    }

    /// The leading entries of the recent list shown as links on the landing page
    pub fn featured(&self) -> Vec<CardSummary> {
        self.recent
            .read()
            .iter()
            .take(self.settings.preview_count)
            .map(CardSummary::from)
            .collect()
    }

    /// Every card, newest first
    pub async fn all(&self) -> ServiceResult<Vec<CardSummary>> {
        self.search("").await
    }

    /// Cards whose name contains `term` (case-insensitive), newest first
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, term: &str) -> ServiceResult<Vec<CardSummary>> {
        let all = self.store.list_recent(None).await.inspect_err(|e| {
            tracing::warn!(error = %e, "failed to load gallery");
        })?;
        Ok(filter_by_name(all, term)
            .iter()
            .map(CardSummary::from)
            .collect())
    }

    /// Load the card stored under exactly `name` and compose it the same way
    /// the live preview does.
    #[tracing::instrument(skip(self))]
    pub async fn view(&self, name: &str) -> ServiceResult<CardView> {
        let name = normalize_name(name);
        let submission = self
            .store
            .get_by_exact_name(name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(name.to_string()))?;
        let document = compose_with(
            &submission.html_content,
            submission.style(),
            self.head_fallback,
        );
        Ok(CardView {
            submission,
            document,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardsmith_core::NewSubmission;
    use chrono::Utc;

    fn submission(name: &str) -> Submission {
        NewSubmission::from_draft(name, "<p></p>", "")
            .into_submission(Default::default(), Utc::now())
    }

    #[test]
    fn test_filter_by_name_is_case_insensitive() {
        let list = vec![submission("Omar"), submission("Rosa"), submission("omari")];
        let names: Vec<_> = filter_by_name(list.clone(), " OMA ")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["Omar", "omari"]);
        assert_eq!(filter_by_name(list, "").len(), 3);
    }
}
