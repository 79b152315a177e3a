//! End-to-end flows through the application controller

mod common;

use std::time::Duration;

use cardsmith_app::{AppError, NoticeKind, Screen};
use cardsmith_editor::{AlwaysConfirm, BufferKind, EditCommand};
use cardsmith_preview::{RecordingRenderer, compose};
use cardsmith_services::{NameCheckState, ServiceError, ValidationError};
use common::{CountingStore, app_with};
use indoc::indoc;
use pretty_assertions::assert_eq;
use tokio_test::{assert_err, assert_ok};

const MARKUP: &str = indoc! {r#"
    <!DOCTYPE html>
    <html>
    <head><title>Eid</title></head>
    <body><h1>Eid Mubarak, Omar!</h1></body>
    </html>"#};

const STYLE: &str = "h1 { color: seagreen; }";

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn test_unique_name_saves_and_navigates_to_view() {
    let store = CountingStore::new();
    let mut app = app_with(&store);

    app.set_name("  Omar ");
    tokio::time::sleep(ms(900)).await;
    assert_eq!(app.name_state(), NameCheckState::Available);

    assert_ok!(app.start_editing());
    assert_eq!(app.screen(), &Screen::Editor);

    assert_ok!(app.edit(EditCommand::SetText(MARKUP.to_string())));
    app.select_buffer(BufferKind::Style);
    assert_ok!(app.edit(EditCommand::SetText(STYLE.to_string())));

    let outcome = assert_ok!(app.save().await);
    assert_eq!(store.inserts(), 1);
    assert_eq!(outcome.submission.name, "Omar");
    assert_eq!(outcome.submission.html_content, MARKUP);
    assert_eq!(outcome.submission.css_content.as_deref(), Some(STYLE));

    assert_eq!(app.screen(), &Screen::View("Omar".into()));
    assert_eq!(app.screen().path(), "/view/Omar");
    assert_eq!(app.notice().map(|n| n.kind), Some(NoticeKind::Success));

    let view = assert_ok!(app.navigate("/view/Omar").await).unwrap();
    assert_eq!(view.document, compose(MARKUP, STYLE));
    assert_eq!(app.recent()[0].name, "Omar");
}

#[tokio::test(start_paused = true)]
async fn test_save_disarms_pending_name_check() {
    let store = CountingStore::new();
    let mut app = app_with(&store);

    app.set_name("Omar");
    tokio::time::sleep(ms(900)).await;
    assert_ok!(app.start_editing());

    // Retyping arms a fresh check that would otherwise fire after the save.
    app.set_name("Omar ");
    assert_eq!(app.name_state(), NameCheckState::Checking);
    assert_ok!(app.save().await);
    assert_eq!(app.name_state(), NameCheckState::Idle);
    assert_eq!(app.name_input(), "");

    let lookups = store.lookups();
    tokio::time::sleep(ms(2000)).await;
    assert_eq!(store.lookups(), lookups);
    assert_eq!(app.name_state(), NameCheckState::Idle);
    assert_eq!(app.screen(), &Screen::View("Omar".into()));
}

#[tokio::test(start_paused = true)]
async fn test_taken_name_conflict_skips_insert() {
    let store = CountingStore::new();
    store.seed("Yasmin", "<p>first</p>", "").await;
    let mut app = app_with(&store);

    app.set_name("Yasmin");
    assert_eq!(app.name_state(), NameCheckState::Checking);

    let err = assert_err!(app.save().await);
    assert!(matches!(err, AppError::Service(ServiceError::Conflict { ref name }) if name == "Yasmin"));
    assert_eq!(store.inserts(), 0);
    assert_eq!(store.lookups(), 1);

    let notice = app.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.message.contains("already taken"));
    assert_eq!(app.screen(), &Screen::Landing);
}

#[tokio::test(start_paused = true)]
async fn test_start_gate_waits_for_definitive_answer() {
    let store = CountingStore::new();
    store.seed("Yasmin", "<p></p>", "").await;
    let mut app = app_with(&store);

    app.set_name("Yasmin");
    let err = assert_err!(app.start_editing());
    assert!(matches!(err, AppError::NameCheckPending));

    tokio::time::sleep(ms(900)).await;
    assert_eq!(app.name_state(), NameCheckState::Taken);
    let err = assert_err!(app.start_editing());
    assert!(matches!(err, AppError::Service(ServiceError::Conflict { .. })));

    app.set_name("Yasmin2");
    tokio::time::sleep(ms(900)).await;
    assert_ok!(app.start_editing());
}

#[tokio::test]
async fn test_start_gate_rejects_invalid_names() {
    let store = CountingStore::new();
    let mut app = app_with(&store);

    app.set_name("   ");
    let err = assert_err!(app.start_editing());
    assert!(matches!(
        err,
        AppError::Service(ServiceError::Validation(ValidationError::Empty))
    ));
    assert_eq!(app.notice().unwrap().message, "Please enter your name");

    app.set_name(&"x".repeat(60));
    let err = assert_err!(app.start_editing());
    assert!(matches!(
        err,
        AppError::Service(ServiceError::Validation(ValidationError::TooLong { max: 50 }))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_editing_debounces_preview_renders() {
    let store = CountingStore::new();
    let mut app = app_with(&store);
    let recorder = RecordingRenderer::new();
    app.mount_preview(recorder.clone());

    app.set_name("Omar");
    tokio::time::sleep(ms(900)).await;
    assert_ok!(app.start_editing());
    tokio::time::sleep(ms(400)).await;
    assert_eq!(recorder.render_count(), 1);

    app.select_buffer(BufferKind::Style);
    for c in "h1 ".chars() {
        assert_ok!(app.edit(EditCommand::InsertText(c.to_string())));
        tokio::time::sleep(ms(50)).await;
    }
    assert_ok!(app.edit(EditCommand::AutoClose('{')));
    tokio::time::sleep(ms(400)).await;

    assert_eq!(recorder.render_count(), 2);
    assert_eq!(recorder.last().unwrap(), app.current_document());
    assert!(app.current_document().contains("<style>h1 {}</style></head>"));
}

#[tokio::test(start_paused = true)]
async fn test_reset_buffer_rerenders_empty_markup() {
    let store = CountingStore::new();
    let mut app = app_with(&store);
    let recorder = RecordingRenderer::new();
    app.mount_preview(recorder.clone());

    assert!(app.reset_buffer(&AlwaysConfirm));
    tokio::time::sleep(ms(400)).await;
    assert_eq!(recorder.last().as_deref(), Some(""));
}

#[tokio::test]
async fn test_download_matches_preview_document() {
    let store = CountingStore::new();
    let mut app = app_with(&store);
    let dir = tempfile::tempdir().unwrap();

    let path = assert_ok!(app.download(dir.path()));
    assert_eq!(path.file_name().unwrap(), "greeting-card.html");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), app.current_document());

    let notice = app.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Info);
    assert!(notice.message.starts_with("Downloaded to "));
}

#[tokio::test]
async fn test_preview_frame_and_view_frame_are_sandboxed() {
    let store = CountingStore::new();
    store.seed("Rosa", "<p class=\"rose\">Hi</p>", "").await;
    let mut app = app_with(&store);

    let frame = app.preview_frame();
    assert!(frame.starts_with(r#"<iframe sandbox="allow-scripts""#));
    assert!(!frame.contains("allow-same-origin"));

    let view = assert_ok!(app.open_view("Rosa").await);
    assert_eq!(
        view.frame(),
        r#"<iframe sandbox="allow-scripts" title="Card preview" srcdoc="&lt;p class=&quot;rose&quot;&gt;Hi&lt;/p&gt;"></iframe>"#
    );
}

#[tokio::test]
async fn test_landing_features_three_newest() {
    let store = CountingStore::new();
    for name in ["Ali", "Sara", "Omar", "Yasmin"] {
        store.seed(name, "<p></p>", "").await;
    }
    let mut app = app_with(&store);

    app.load_landing().await;
    let featured: Vec<_> = app.featured().into_iter().map(|c| c.name).collect();
    assert_eq!(featured, ["Yasmin", "Omar", "Sara"]);
    assert_eq!(app.recent().len(), 4);
}

#[tokio::test]
async fn test_gallery_and_unknown_view() {
    let store = CountingStore::new();
    store.seed("Omar", "<p></p>", "").await;
    store.seed("Rosa", "<p></p>", "").await;
    let mut app = app_with(&store);

    let list = assert_ok!(app.navigate("/gallery").await);
    assert!(list.is_none());
    assert_eq!(app.screen(), &Screen::Gallery);
    assert_eq!(assert_ok!(app.open_gallery("ros").await).len(), 1);

    let err = assert_err!(app.open_view("Nobody").await);
    assert!(matches!(err, AppError::Service(ServiceError::NotFound(_))));
    assert_eq!(app.screen(), &Screen::Gallery);
}

#[tokio::test]
async fn test_unknown_snippet_is_reported() {
    let store = CountingStore::new();
    let mut app = app_with(&store);
    let err = assert_err!(app.insert_snippet("nope"));
    assert!(matches!(err, AppError::UnknownSnippet(_)));
    assert_ok!(app.insert_snippet("card"));
}
