use std::sync::Arc;

use cardsmith_core::{NewSubmission, SubmissionStore};
use cardsmith_settings::NameSettings;

use crate::error::{ServiceError, ServiceResult};
use crate::gallery_service::GalleryService;
use crate::name_check::NameReservationChecker;
use crate::validation::validate_name;
use crate::view_models::SaveOutcome;

/// Saves a card: validate, re-check the name, insert, reload the recent list.
///
/// Nothing is written if validation or the re-check fails. Store failures
/// are returned as-is and never retried here.
pub struct SaveService {
    store: Arc<dyn SubmissionStore>,
    checker: Arc<NameReservationChecker>,
    gallery: Arc<GalleryService>,
    settings: NameSettings,
}

impl SaveService {
    pub fn new(
        store: Arc<dyn SubmissionStore>,
        checker: Arc<NameReservationChecker>,
        gallery: Arc<GalleryService>,
        settings: NameSettings,
    ) -> Self {
        Self {
            store,
            checker,
            gallery,
            settings,
        }
    }

    #[tracing::instrument(skip(self, markup, style), fields(markup_len = markup.len(), style_len = style.len()))]
    pub async fn save(&self, name: &str, markup: &str, style: &str) -> ServiceResult<SaveOutcome> {
        let name = validate_name(name, &self.settings)?;

        // The live state may be stale; always ask the store again.
        if self.checker.check_authoritative(name).await? {
            tracing::info!(name, "save blocked, name already taken");
            return Err(ServiceError::Conflict {
                name: name.to_string(),
            });
        }

        let submission = self
            .store
            .insert_submission(NewSubmission::from_draft(name, markup, style))
            .await
            .map_err(ServiceError::from)
            .inspect_err(|e| {
                if e.is_conflict() {
                    tracing::info!(name, "insert lost a race for the name");
                } else {
                    tracing::error!(name, error = %e, "failed to save card");
                }
            })?;
        tracing::info!(name, id = %submission.id, "card saved");

        let recent_refreshed = self.gallery.refresh_recent().await.is_ok();
        Ok(SaveOutcome {
            submission,
            recent_refreshed,
        })
    }
}
