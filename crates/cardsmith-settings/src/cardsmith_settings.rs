//! Cardsmith Settings
//!
//! User-tunable behaviour, persisted as JSON in the platform config directory:
//! - Preview timing (render debounce, manual refresh delay) and the compositor's
//!   fallback for markup without a head section
//! - Name reservation timing and length limits
//! - Gallery list sizes
//! - Export file naming
//! - Record store location

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod settings_file;

pub use settings_file::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CardSettings {
    pub preview: PreviewSettings,
    pub names: NameSettings,
    pub gallery: GallerySettings,
    pub export: ExportSettings,
    pub store: StoreSettings,
}

impl CardSettings {
    /// Load settings from the default location, falling back to defaults when
    /// no settings file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&settings_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        serde_json::from_str(&content).with_context(|| "Failed to parse settings JSON")
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&settings_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// What the compositor does with markup that has no head section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeadFallback {
    /// Return the markup untouched (no style, no viewport injected)
    #[default]
    LeaveUnchanged,
    /// Wrap markup that has neither `<html>` nor `<head>` in a full document
    SynthesizeDocument,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    pub render_debounce_ms: u64,
    pub refresh_delay_ms: u64,
    pub head_fallback: HeadFallback,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            render_debounce_ms: 300,
            refresh_delay_ms: 100,
            head_fallback: HeadFallback::LeaveUnchanged,
        }
    }
}

impl PreviewSettings {
    pub fn render_debounce(&self) -> Duration {
        Duration::from_millis(self.render_debounce_ms)
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameSettings {
    pub check_debounce_ms: u64,
    /// Names shorter than this (trimmed, in characters) are never checked
    pub min_check_chars: usize,
    pub max_chars: usize,
}

impl Default for NameSettings {
    fn default() -> Self {
        Self {
            check_debounce_ms: 800,
            min_check_chars: 2,
            max_chars: 50,
        }
    }
}

impl NameSettings {
    pub fn check_debounce(&self) -> Duration {
        Duration::from_millis(self.check_debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GallerySettings {
    /// Rows loaded for the landing page's recent list
    pub recent_limit: usize,
    /// Recent entries surfaced as links on the landing page
    pub preview_count: usize,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            recent_limit: 10,
            preview_count: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub download_file_name: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            download_file_name: "greeting-card.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreSettings {
    /// Explicit database file; `None` means `<data dir>/cardsmith/cards.db`
    pub database_path: Option<PathBuf>,
}

impl StoreSettings {
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => default_database_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_documented_timings() {
        let settings = CardSettings::default();
        assert_eq!(settings.preview.render_debounce(), Duration::from_millis(300));
        assert_eq!(settings.preview.refresh_delay(), Duration::from_millis(100));
        assert_eq!(settings.names.check_debounce(), Duration::from_millis(800));
        assert_eq!(settings.names.min_check_chars, 2);
        assert_eq!(settings.names.max_chars, 50);
        assert_eq!(settings.gallery.recent_limit, 10);
        assert_eq!(settings.export.download_file_name, "greeting-card.html");
        assert_eq!(settings.preview.head_fallback, HeadFallback::LeaveUnchanged);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "preview": { "head_fallback": "synthesize_document" } }"#;
        let settings: CardSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.preview.head_fallback, HeadFallback::SynthesizeDocument);
        assert_eq!(settings.preview.render_debounce_ms, 300);
        assert_eq!(settings.names, NameSettings::default());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = CardSettings::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, CardSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = CardSettings::default();
        settings.names.check_debounce_ms = 500;
        settings.store.database_path = Some(dir.path().join("cards.db"));
        settings.save_to(&path).unwrap();

        let loaded = CardSettings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.store.database_path().unwrap(), dir.path().join("cards.db"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(CardSettings::load_from(&path).is_err());
    }
}
