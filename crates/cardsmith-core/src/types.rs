//! Core types for Cardsmith

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved greeting card as stored in the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Unique identifier assigned by the store
    pub id: Uuid,
    /// Display name of the author; unique, case-sensitive, already trimmed
    pub name: String,
    /// Markup buffer contents, stored verbatim
    pub html_content: String,
    /// Auxiliary style buffer contents, `None` when it was blank
    pub css_content: Option<String>,
    /// Creation timestamp assigned by the store
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// Style text to inject when composing, empty when none was saved
    pub fn style(&self) -> &str {
        self.css_content.as_deref().unwrap_or("")
    }
}

/// Insert payload for a new submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubmission {
    pub name: String,
    pub html_content: String,
    pub css_content: Option<String>,
}

impl NewSubmission {
    /// Build an insert payload from raw editor state.
    ///
    /// The name is trimmed, markup is kept as-is and a style buffer that is
    /// blank after trimming becomes `None`.
    pub fn from_draft(name: &str, markup: impl Into<String>, style: &str) -> Self {
        let css = style.trim();
        Self {
            name: normalize_name(name).to_string(),
            html_content: markup.into(),
            css_content: (!css.is_empty()).then(|| css.to_string()),
        }
    }

    /// Materialize the record the store would return for this payload
    pub fn into_submission(self, id: Uuid, created_at: DateTime<Utc>) -> Submission {
        Submission {
            id,
            name: self.name,
            html_content: self.html_content,
            css_content: self.css_content,
            created_at,
        }
    }
}

/// Canonical form of a display name: surrounding whitespace removed, nothing else.
pub fn normalize_name(raw: &str) -> &str {
    raw.trim()
}

/// Length of a name in characters, as counted by the name checks.
pub fn name_len(name: &str) -> usize {
    name.chars().count()
}
