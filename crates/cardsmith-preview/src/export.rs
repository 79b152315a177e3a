//! Exporting the composed document.
//!
//! Both exports take the already composed document rather than the raw
//! buffers, so what leaves the app is exactly what the preview rendered.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ExportError;

/// Append `.html` unless the name already ends with it (case-insensitive).
pub fn html_file_name(name: &str) -> Result<String, ExportError> {
    let name = name.trim();
    if name.is_empty() || name.contains(['/', '\\']) {
        return Err(ExportError::InvalidFileName(name.to_string()));
    }
    if name.to_ascii_lowercase().ends_with(".html") {
        Ok(name.to_string())
    } else {
        Ok(format!("{name}.html"))
    }
}

/// Write `document` to `dir/file_name`, creating `dir` if needed.
pub fn download_as_file(
    document: &str,
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf, ExportError> {
    let file_name = html_file_name(file_name)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, document)?;
    tracing::info!(path = %path.display(), bytes = document.len(), "card exported");
    Ok(path)
}

/// Opens a document somewhere the user can see it.
pub trait DocumentOpener {
    fn open(&self, document: &str) -> Result<PathBuf, ExportError>;
}

/// Writes the document to a kept temp file and opens it in the default browser.
#[derive(Debug, Clone, Default)]
pub struct SystemOpener;

impl DocumentOpener for SystemOpener {
    fn open(&self, document: &str) -> Result<PathBuf, ExportError> {
        let mut file = tempfile::Builder::new()
            .prefix("cardsmith-")
            .suffix(".html")
            .tempfile()?;
        file.write_all(document.as_bytes())?;
        let path = file.into_temp_path().keep().map_err(|e| e.error)?;

        open::that(&path).map_err(|e| ExportError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::info!(path = %path.display(), "card opened in browser");
        Ok(path)
    }
}

/// Show `document` in a new browser tab through `opener`.
pub fn open_in_new_tab(opener: &dyn DocumentOpener, document: &str) -> Result<PathBuf, ExportError> {
    opener.open(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_html_file_name() {
        assert_eq!(html_file_name("greeting-card").unwrap(), "greeting-card.html");
        assert_eq!(html_file_name("Card.HTML").unwrap(), "Card.HTML");
        assert!(html_file_name("  ").is_err());
        assert!(html_file_name("../evil").is_err());
    }

    #[test]
    fn test_download_writes_document_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let document = "<html><head></head><body>é</body></html>";
        let path = download_as_file(document, &dir.path().join("out"), "greeting-card").unwrap();
        assert_eq!(path.file_name().unwrap(), "greeting-card.html");
        assert_eq!(std::fs::read_to_string(path).unwrap(), document);
    }
}
