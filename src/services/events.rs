//! Services coordinating event listings, edits and their artist line-up.

use std::sync::Arc;

use crate::EVENTS_ENDPOINT;
use crate::domain::event::{Event, NewEvent};
use crate::dto::page::PageData;
use crate::forms::events::EventForm;
use crate::models::config::AppConfig;
use crate::query::PageUrl;
use crate::repository::{DataSource, EventArtistLinker, ResourceReader, ResourceWriter};
use crate::sanitizer::EntitySanitizer;
use crate::services::page::PageController;
use crate::services::{ServiceError, ServiceResult, ensure_id};

/// Loads the searchable events listing for the page at `url`.
pub async fn load_events_page<R>(
    repo: &R,
    config: Arc<AppConfig>,
    url: &PageUrl,
) -> PageData<Event>
where
    R: DataSource + ?Sized,
{
    PageController::new(repo, EVENTS_ENDPOINT, config)
        .load_page_data(url, true)
        .await
}

pub async fn get_event<R>(repo: &R, config: &AppConfig, event_id: &str) -> ServiceResult<Event>
where
    R: ResourceReader + ?Sized,
{
    let event_id = ensure_id(event_id)?;

    let raw = repo
        .get_by_id(EVENTS_ENDPOINT, event_id)
        .await
        .map_err(|err| {
            log::error!("Failed to load event {event_id}: {err}");
            ServiceError::from(err)
        })?;

    Ok(EntitySanitizer::new(&config.labels).event(&raw))
}

/// Validates the form and creates the event.
pub async fn create_event<R>(
    repo: &R,
    config: &AppConfig,
    form: EventForm,
) -> ServiceResult<Event>
where
    R: ResourceWriter + ?Sized,
{
    let new_event = NewEvent::try_from(form).map_err(|err| {
        log::error!("Failed to validate event form: {err}");
        ServiceError::from(err)
    })?;
    let body = serde_json::to_value(&new_event)?;

    let raw = repo.create(EVENTS_ENDPOINT, &body).await.map_err(|err| {
        log::error!("Failed to create event: {err}");
        ServiceError::from(err)
    })?;

    Ok(EntitySanitizer::new(&config.labels).event(&raw))
}

pub async fn update_event<R>(
    repo: &R,
    config: &AppConfig,
    event_id: &str,
    form: EventForm,
) -> ServiceResult<Event>
where
    R: ResourceWriter + ?Sized,
{
    let event_id = ensure_id(event_id)?;
    let updates = NewEvent::try_from(form).map_err(|err| {
        log::error!("Failed to validate event form: {err}");
        ServiceError::from(err)
    })?;
    let body = serde_json::to_value(&updates)?;

    let raw = repo
        .update(EVENTS_ENDPOINT, event_id, &body)
        .await
        .map_err(|err| {
            log::error!("Failed to update event {event_id}: {err}");
            ServiceError::from(err)
        })?;

    Ok(EntitySanitizer::new(&config.labels).event(&raw))
}

pub async fn delete_event<R>(repo: &R, event_id: &str) -> ServiceResult<()>
where
    R: ResourceWriter + ?Sized,
{
    let event_id = ensure_id(event_id)?;

    repo.delete(EVENTS_ENDPOINT, event_id).await.map_err(|err| {
        log::error!("Failed to delete event {event_id}: {err}");
        ServiceError::from(err)
    })
}

/// Adds an artist to the event's line-up and returns the updated event.
///
/// When the backend answers without a body the event is fetched again.
pub async fn attach_artist<R>(
    repo: &R,
    config: &AppConfig,
    event_id: &str,
    artist_id: &str,
) -> ServiceResult<Event>
where
    R: EventArtistLinker + ResourceReader + ?Sized,
{
    let event_id = ensure_id(event_id)?;
    let artist_id = ensure_id(artist_id)?;

    let raw = repo
        .attach_artist(event_id, artist_id)
        .await
        .map_err(|err| {
            log::error!("Failed to attach artist {artist_id} to event {event_id}: {err}");
            ServiceError::from(err)
        })?;

    if raw.is_object() {
        return Ok(EntitySanitizer::new(&config.labels).event(&raw));
    }
    get_event(repo, config, event_id).await
}

/// Removes an artist from the event's line-up.
pub async fn detach_artist<R>(repo: &R, event_id: &str, artist_id: &str) -> ServiceResult<()>
where
    R: EventArtistLinker + ?Sized,
{
    let event_id = ensure_id(event_id)?;
    let artist_id = ensure_id(artist_id)?;

    repo.detach_artist(event_id, artist_id)
        .await
        .map_err(|err| {
            log::error!("Failed to detach artist {artist_id} from event {event_id}: {err}");
            ServiceError::from(err)
        })
}
