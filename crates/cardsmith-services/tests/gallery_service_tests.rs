mod common;

use cardsmith_preview::compose;
use cardsmith_services::{GalleryService, ServiceError};
use cardsmith_settings::{GallerySettings, HeadFallback};
use common::MockStore;
use pretty_assertions::assert_eq;

fn gallery(store: MockStore) -> GalleryService {
    GalleryService::new(
        store.into_shared(),
        GallerySettings::default(),
        HeadFallback::LeaveUnchanged,
    )
}

fn names(list: Vec<cardsmith_services::CardSummary>) -> Vec<String> {
    list.into_iter().map(|c| c.name).collect()
}

#[tokio::test]
async fn test_recent_limits_and_features() {
    let mut store = MockStore::new();
    for i in 0..12 {
        store = store.with_existing(&format!("card-{i:02}"));
    }
    let gallery = gallery(store);

    let recent = gallery.refresh_recent().await.unwrap();
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].name, "card-11");
    assert_eq!(
        names(gallery.featured()),
        ["card-11", "card-10", "card-09"]
    );
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_list() {
    let gallery = gallery(MockStore::new().with_list_failure());
    assert!(gallery.refresh_recent().await.is_err());
    assert!(gallery.recent().is_empty());
}

#[tokio::test]
async fn test_search_filters_case_insensitively() {
    let store = MockStore::new()
        .with_existing("Omar")
        .with_existing("Rosa")
        .with_existing("OMARI");
    let gallery = gallery(store);

    assert_eq!(names(gallery.search("omar").await.unwrap()), ["OMARI", "Omar"]);
    assert_eq!(gallery.all().await.unwrap().len(), 3);
    assert!(gallery.search("zz").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_view_composes_stored_card() {
    let gallery = gallery(MockStore::new().with_existing("Sara"));

    let view = gallery.view("Sara").await.unwrap();
    assert_eq!(view.submission.name, "Sara");
    assert_eq!(
        view.document,
        compose(&view.submission.html_content, view.submission.style())
    );
}

#[tokio::test]
async fn test_view_unknown_name_is_not_found() {
    let gallery = gallery(MockStore::new());
    let err = gallery.view("Nobody").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(ref name) if name == "Nobody"));
}
