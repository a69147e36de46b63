//! Services coordinating artist listings and edits.

use std::sync::Arc;

use crate::ARTISTS_ENDPOINT;
use crate::domain::artist::{Artist, NewArtist};
use crate::domain::event::Event;
use crate::dto::page::PageData;
use crate::forms::artists::ArtistForm;
use crate::models::config::AppConfig;
use crate::query::PageUrl;
use crate::repository::{DataSource, ResourceReader, ResourceWriter};
use crate::sanitizer::EntitySanitizer;
use crate::services::page::PageController;
use crate::services::{ServiceError, ServiceResult, ensure_id};

/// Loads the searchable artists listing for the page at `url`.
pub async fn load_artists_page<R>(
    repo: &R,
    config: Arc<AppConfig>,
    url: &PageUrl,
) -> PageData<Artist>
where
    R: DataSource + ?Sized,
{
    PageController::new(repo, ARTISTS_ENDPOINT, config)
        .load_page_data(url, true)
        .await
}

/// Loads the events an artist performs at.
pub async fn load_artist_events_page<R>(
    repo: &R,
    config: Arc<AppConfig>,
    artist_id: &str,
    url: &PageUrl,
) -> PageData<Event>
where
    R: DataSource + ?Sized,
{
    match ensure_id(artist_id) {
        Ok(artist_id) => {
            PageController::new(repo, format!("{ARTISTS_ENDPOINT}/{artist_id}/events"), config)
                .load_page_data(url, false)
                .await
        }
        Err(err) => {
            log::error!("Refusing to list events of artist {artist_id:?}: {err}");
            let message = err.user_message(&config.errors);
            PageController::new(repo, ARTISTS_ENDPOINT, config).error_page(url, false, message)
        }
    }
}

pub async fn get_artist<R>(repo: &R, config: &AppConfig, artist_id: &str) -> ServiceResult<Artist>
where
    R: ResourceReader + ?Sized,
{
    let artist_id = ensure_id(artist_id)?;

    let raw = repo
        .get_by_id(ARTISTS_ENDPOINT, artist_id)
        .await
        .map_err(|err| {
            log::error!("Failed to load artist {artist_id}: {err}");
            ServiceError::from(err)
        })?;

    Ok(EntitySanitizer::new(&config.labels).artist(&raw))
}

/// Validates the form and creates the artist.
pub async fn create_artist<R>(
    repo: &R,
    config: &AppConfig,
    form: ArtistForm,
) -> ServiceResult<Artist>
where
    R: ResourceWriter + ?Sized,
{
    let new_artist = NewArtist::try_from(form).map_err(|err| {
        log::error!("Failed to validate artist form: {err}");
        ServiceError::from(err)
    })?;
    let body = serde_json::to_value(&new_artist)?;

    let raw = repo
        .create(ARTISTS_ENDPOINT, &body)
        .await
        .map_err(|err| {
            log::error!("Failed to create artist: {err}");
            ServiceError::from(err)
        })?;

    Ok(EntitySanitizer::new(&config.labels).artist(&raw))
}

pub async fn update_artist<R>(
    repo: &R,
    config: &AppConfig,
    artist_id: &str,
    form: ArtistForm,
) -> ServiceResult<Artist>
where
    R: ResourceWriter + ?Sized,
{
    let artist_id = ensure_id(artist_id)?;
    let updates = NewArtist::try_from(form).map_err(|err| {
        log::error!("Failed to validate artist form: {err}");
        ServiceError::from(err)
    })?;
    let body = serde_json::to_value(&updates)?;

    let raw = repo
        .update(ARTISTS_ENDPOINT, artist_id, &body)
        .await
        .map_err(|err| {
            log::error!("Failed to update artist {artist_id}: {err}");
            ServiceError::from(err)
        })?;

    Ok(EntitySanitizer::new(&config.labels).artist(&raw))
}

pub async fn delete_artist<R>(repo: &R, artist_id: &str) -> ServiceResult<()>
where
    R: ResourceWriter + ?Sized,
{
    let artist_id = ensure_id(artist_id)?;

    repo.delete(ARTISTS_ENDPOINT, artist_id)
        .await
        .map_err(|err| {
            log::error!("Failed to delete artist {artist_id}: {err}");
            ServiceError::from(err)
        })
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::repository::errors::{ApiError, RepositoryError};
    use crate::repository::mock::MockRepository;

    fn config() -> AppConfig {
        AppConfig::default()
    }

    #[tokio::test]
    async fn listing_uses_artists_endpoint_with_search() {
        let mut repo = MockRepository::new();
        repo.expect_get_all()
            .withf(|endpoint, params| {
                endpoint == "artists" && params.search.as_deref() == Some("nina")
            })
            .times(1)
            .returning(|_, _| {
                Ok(json!({
                    "content": [{"id": "a1", "label": "Nina"}],
                    "totalElements": 1,
                    "totalPages": 1,
                    "number": 0,
                    "size": 10,
                    "first": true,
                    "last": true
                }))
            });

        let data = load_artists_page(
            &repo,
            Arc::new(config()),
            &PageUrl::parse("/artists?search=nina"),
        )
        .await;

        assert_eq!(
            data.items,
            vec![Artist {
                id: "a1".to_string(),
                label: "Nina".to_string()
            }]
        );
        assert_eq!(data.search_term.as_deref(), Some("nina"));
    }

    #[tokio::test]
    async fn artist_events_listing_targets_nested_endpoint() {
        let mut repo = MockRepository::new();
        repo.expect_get_all()
            .withf(|endpoint, params| endpoint == "artists/a1/events" && params.search.is_none())
            .times(1)
            .returning(|_, _| Err(RepositoryError::Network("down".to_string())));

        let data = load_artist_events_page(
            &repo,
            Arc::new(config()),
            "a1",
            &PageUrl::parse("/artists/a1?search=x"),
        )
        .await;

        assert!(data.items.is_empty());
        assert!(data.is_error());
        assert_eq!(data.search_term, None);
    }

    #[tokio::test]
    async fn create_sends_cleaned_label() {
        let mut repo = MockRepository::new();
        repo.expect_create()
            .withf(|endpoint, body| endpoint == "artists" && body == &json!({"label": "Nina"}))
            .times(1)
            .returning(|_, _| Ok(json!({"id": 7, "label": "Nina"})));
        let form = ArtistForm {
            label: " Nina<script>x</script> ".to_string(),
        };

        let artist = create_artist(&repo, &config(), form)
            .await
            .expect("artist created");

        assert_eq!(artist.id, "7");
    }

    #[tokio::test]
    async fn create_sends_ampersand_unescaped() {
        let mut repo = MockRepository::new();
        repo.expect_create()
            .withf(|_, body| body == &json!({"label": "Simon & Garfunkel"}))
            .times(1)
            .returning(|_, body| {
                let mut created = body.clone();
                created["id"] = json!("a2");
                Ok(created)
            });
        let form = ArtistForm {
            label: "Simon & Garfunkel".to_string(),
        };

        let artist = create_artist(&repo, &config(), form)
            .await
            .expect("artist created");

        assert_eq!(artist.label, "Simon & Garfunkel");
    }

    #[tokio::test]
    async fn artist_events_listing_rejects_unsafe_ids() {
        let mut repo = MockRepository::new();
        repo.expect_get_all().times(0);

        for artist_id in ["  ", "../events", "a1?x=1"] {
            let data: PageData<Event> = load_artist_events_page(
                &repo,
                Arc::new(config()),
                artist_id,
                &PageUrl::parse("/artists/x?page=2"),
            )
            .await;

            assert!(data.items.is_empty());
            assert!(data.is_error());
            assert_eq!(data.pagination.page, 2);
        }
    }

    #[tokio::test]
    async fn create_with_invalid_form_skips_backend() {
        let mut repo = MockRepository::new();
        repo.expect_create().times(0);
        let form = ArtistForm {
            label: String::new(),
        };

        let result = create_artist(&repo, &config(), form).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[tokio::test]
    async fn get_missing_artist_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_by_id()
            .withf(|endpoint, id| endpoint == "artists" && id == "a9")
            .times(1)
            .returning(|_, _| Err(ApiError::new(404, "absent").into()));

        let result = get_artist(&repo, &config(), " a9 ").await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[tokio::test]
    async fn update_sanitizes_backend_answer() {
        let mut repo = MockRepository::new();
        repo.expect_update()
            .withf(|endpoint, id, _| endpoint == "artists" && id == "a1")
            .times(1)
            .returning(|_, _, _| Ok(json!({"id": "a1", "label": Value::Null})));
        let form = ArtistForm {
            label: "Nina".to_string(),
        };

        let artist = update_artist(&repo, &config(), "a1", form)
            .await
            .expect("artist updated");

        assert_eq!(artist.label, "Artiste inconnu(e)");
    }

    #[tokio::test]
    async fn delete_requires_an_id() {
        let mut repo = MockRepository::new();
        repo.expect_delete().times(0);

        let result = delete_artist(&repo, "  ").await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[tokio::test]
    async fn delete_forwards_to_backend() {
        let mut repo = MockRepository::new();
        repo.expect_delete()
            .withf(|endpoint, id| endpoint == "artists" && id == "a1")
            .times(1)
            .returning(|_, _| Ok(()));

        delete_artist(&repo, "a1").await.expect("artist deleted");
    }
}
