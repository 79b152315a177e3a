use cardsmith_core::Submission;
use cardsmith_preview::sandboxed_frame;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A gallery or recent-list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSummary {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Submission> for CardSummary {
    fn from(submission: &Submission) -> Self {
        Self {
            name: submission.name.clone(),
            created_at: submission.created_at,
        }
    }
}

/// A stored card ready to display
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub submission: Submission,
    /// The stored markup composed with the stored style
    pub document: String,
}

impl CardView {
    /// The document wrapped in a sandboxed iframe, ready to embed in a page
    pub fn frame(&self) -> String {
        sandboxed_frame(&self.document)
    }
}

/// Result of a successful save
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub submission: Submission,
    /// Whether the recent list was reloaded afterwards
    pub recent_refreshed: bool,
}
