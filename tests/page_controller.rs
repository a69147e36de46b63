use std::sync::Arc;

use serde_json::json;

use artist_events::domain::artist::Artist;
use artist_events::models::config::AppConfig;
use artist_events::query::PageUrl;
use artist_events::repository::errors::{ApiError, RepositoryError};
use artist_events::sanitizer::EntitySanitizer;
use artist_events::services::page::PageController;

mod common;

use common::StubSource;

fn controller(source: &StubSource) -> PageController<'_, StubSource> {
    PageController::new(source, "artists", Arc::new(AppConfig::default()))
}

#[tokio::test]
async fn out_of_range_page_falls_back_to_last_page_once() {
    let source = StubSource::with_pages(3);

    let data = controller(&source)
        .load_page_data::<Artist>(&PageUrl::parse("/artists?page=10"), false)
        .await;

    let calls = source.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1.page, 9);
    assert_eq!(calls[1].1.page, 2);
    assert_eq!(data.pagination.page, 3);
    assert!(data.pagination.last);
    assert!(!data.is_error());
}

#[tokio::test]
async fn in_range_page_is_fetched_once() {
    let source = StubSource::with_pages(3);

    let data = controller(&source)
        .load_page_data::<Artist>(&PageUrl::parse("/artists?page=2&size=2"), false)
        .await;

    assert_eq!(source.calls().len(), 1);
    assert_eq!(data.pagination.page, 2);
    assert_eq!(data.pagination.size, 2);
    assert_eq!(data.items.len(), 2);
    assert_eq!(data.items[0].label, "Artiste inconnu(e)");
}

#[tokio::test]
async fn empty_listing_does_not_retry() {
    let source = StubSource::with_pages(0);

    let data = controller(&source)
        .load_page_data::<Artist>(&PageUrl::parse("/artists?page=4"), false)
        .await;

    assert_eq!(source.calls().len(), 1);
    assert!(data.items.is_empty());
    assert_eq!(data.pagination.page, 4);
    assert_eq!(data.pagination.total_pages, 0);
}

#[tokio::test]
async fn network_failure_degrades_to_empty_page() {
    let source = StubSource::failing(|| RepositoryError::Network("Network error".to_string()));
    let config = AppConfig::default();

    let data = controller(&source)
        .load_page_data::<Artist>(&PageUrl::parse("/artists?page=2&size=20&search=x"), true)
        .await;

    assert!(data.items.is_empty());
    assert_eq!(data.error_message.as_deref(), Some(config.errors.messages.server.as_str()));
    assert_eq!(data.pagination.total_pages, config.pagination.min_size);
    assert_eq!(data.pagination.page, 2);
    assert_eq!(data.pagination.size, 20);
    assert!(data.pagination.first && data.pagination.last);
    assert_eq!(data.pagination.total_elements, 0);
    assert_eq!(data.search_term.as_deref(), Some("x"));
}

#[tokio::test]
async fn application_error_message_is_surfaced() {
    let source = StubSource::failing(|| ApiError::new(403, "Accès refusé").into());

    let data = controller(&source)
        .load_page_data::<Artist>(&PageUrl::parse("/artists"), false)
        .await;

    assert_eq!(data.error_message.as_deref(), Some("Accès refusé"));
}

#[tokio::test]
async fn search_term_follows_the_search_flag() {
    let source = StubSource::with_pages(1);
    let controller = controller(&source);

    let with_search = controller
        .load_page_data::<Artist>(&PageUrl::parse("/artists"), true)
        .await;
    let without_search = controller
        .load_page_data::<Artist>(&PageUrl::parse("/artists?search=nina"), false)
        .await;

    assert_eq!(with_search.search_term.as_deref(), Some(""));
    assert_eq!(without_search.search_term, None);
    assert!(source.calls().iter().all(|(_, params)| params.search.is_none()
        || params.search.as_deref() == Some("")));
}

#[tokio::test]
async fn loading_twice_yields_identical_view_models() {
    let source = StubSource::with_pages(5);
    let controller = controller(&source);
    let url = PageUrl::parse("/artists?page=3&size=5&search=nina");

    let first = controller.load_page_data::<Artist>(&url, true).await;
    let second = controller.load_page_data::<Artist>(&url, true).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_size_requests_ten_items() {
    let source = StubSource::with_pages(2);

    controller(&source)
        .load_page_data::<Artist>(&PageUrl::parse("/artists?page=1"), false)
        .await;

    assert_eq!(source.calls()[0].1.size, 10);
}

#[test]
fn sanitizer_substitutes_configured_artist_label() {
    let config = AppConfig::default();
    let sanitizer = EntitySanitizer::new(&config.labels);

    let artist = sanitizer.artist(&json!({"id": null, "label": null}));

    assert_eq!(
        artist,
        Artist {
            id: String::new(),
            label: config.labels.unknown_artist.clone()
        }
    );
}
