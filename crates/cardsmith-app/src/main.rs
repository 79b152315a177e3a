//! Cardsmith entry point
//!
//! Boots the stack without a front end: loads settings, opens the store,
//! loads the recent list and writes a live preview of the starter card to the
//! data directory.

use std::sync::Arc;

use anyhow::Context;
use cardsmith_app::{CardApp, logging};
use cardsmith_preview::FileRenderer;
use cardsmith_settings::{CardSettings, data_dir, ensure_directories};
use cardsmith_store_sqlite::SqliteSubmissionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = match logging::init_default() {
        Ok(guard) => guard,
        Err(e) => {
            // Logging isn't up yet.
            eprintln!("FATAL: Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        build_mode = if cfg!(debug_assertions) { "debug" } else { "release" },
        "Starting Cardsmith"
    );

    ensure_directories()?;
    let settings = CardSettings::load().context("Failed to load settings")?;
    let db_path = settings.store.database_path()?;
    let store = SqliteSubmissionStore::open(&db_path)
        .with_context(|| format!("Failed to open card store at {}", db_path.display()))?;

    let mut app = CardApp::new(Arc::new(store), settings);
    app.load_landing().await;
    for card in app.featured() {
        tracing::info!(name = %card.name, path = %cardsmith_app::Screen::View(card.name.clone()), "recent card");
    }

    let preview_path = data_dir()?.join("preview.html");
    app.mount_preview(FileRenderer::new(&preview_path));
    app.refresh_preview();
    tokio::time::sleep(app.settings().preview.refresh_delay() * 2).await;
    tracing::info!(path = %preview_path.display(), "starter card preview written");

    Ok(())
}
