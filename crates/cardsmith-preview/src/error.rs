use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render target failed: {0}")]
    Target(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open {path} in a browser: {message}")]
    Open { path: String, message: String },

    #[error("Invalid export file name: {0:?}")]
    InvalidFileName(String),
}
