//! REST repository backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde_json::Value;

use crate::models::config::{AppConfig, ErrorConfig};
use crate::{ARTISTS_ENDPOINT, EVENTS_ENDPOINT};
use crate::pagination::PaginationParams;
use crate::repository::errors::{ApiError, RepositoryError, RepositoryResult};
use crate::repository::{DataSource, EventArtistLinker, ResourceReader, ResourceWriter};

/// Repository talking JSON to the backend at `api.base_url`.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    base_url: Url,
    errors: ErrorConfig,
}

impl HttpRepository {
    pub fn new(config: &AppConfig) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(|e| RepositoryError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        let base_url = Url::parse(config.api.base_url.trim()).map_err(|e| {
            RepositoryError::Unexpected(format!(
                "Invalid API base URL {}: {e}",
                config.api.base_url
            ))
        })?;

        Ok(Self {
            client,
            base_url,
            errors: config.errors.clone(),
        })
    }

    /// Appends `segments` to the base URL, each escaped as exactly one path
    /// segment.
    fn url(&self, segments: &[&str]) -> RepositoryResult<Url> {
        if let Some(segment) = segments
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(RepositoryError::Unexpected(format!(
                "Invalid path segment {segment:?}"
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RepositoryError::Unexpected(format!(
                    "API base URL {} cannot hold a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of `endpoint`, a `/`-separated path, followed by `ids`.
    fn resource_url(&self, endpoint: &str, ids: &[&str]) -> RepositoryResult<Url> {
        let segments: Vec<&str> = endpoint
            .split('/')
            .filter(|segment| !segment.is_empty())
            .chain(ids.iter().copied())
            .collect();
        self.url(&segments)
    }

    async fn send(&self, request: RequestBuilder) -> RepositoryResult<Value> {
        let resp = request.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(api_error(status, &body, &self.errors).into());
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| RepositoryError::Decode(e.to_string()))
    }
}

/// Builds the application error for a failed response, preferring the
/// backend's own `message` field over the configured one.
fn api_error(status: StatusCode, body: &str, errors: &ErrorConfig) -> ApiError {
    let code = status.as_u16();
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| errors.message_for(code).to_string());

    ApiError::new(code, message)
}

fn page_query(params: &PaginationParams) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("page", params.page.to_string()),
        ("size", params.size.to_string()),
    ];
    if let Some(search) = params.search.as_deref().map(str::trim) {
        if !search.is_empty() {
            query.push(("search", search.to_string()));
        }
    }
    query
}

#[async_trait]
impl DataSource for HttpRepository {
    async fn get_all(&self, endpoint: &str, params: &PaginationParams) -> RepositoryResult<Value> {
        log::debug!("GET {endpoint} page={} size={}", params.page, params.size);
        let request = self
            .client
            .get(self.resource_url(endpoint, &[])?)
            .query(&page_query(params));
        self.send(request).await
    }
}

#[async_trait]
impl ResourceReader for HttpRepository {
    async fn get_by_id(&self, endpoint: &str, id: &str) -> RepositoryResult<Value> {
        let request = self.client.get(self.resource_url(endpoint, &[id])?);
        self.send(request).await
    }
}

#[async_trait]
impl ResourceWriter for HttpRepository {
    async fn create(&self, endpoint: &str, body: &Value) -> RepositoryResult<Value> {
        let request = self
            .client
            .post(self.resource_url(endpoint, &[])?)
            .json(body);
        self.send(request).await
    }

    async fn update(&self, endpoint: &str, id: &str, body: &Value) -> RepositoryResult<Value> {
        let request = self
            .client
            .put(self.resource_url(endpoint, &[id])?)
            .json(body);
        self.send(request).await
    }

    async fn delete(&self, endpoint: &str, id: &str) -> RepositoryResult<()> {
        let request = self.client.delete(self.resource_url(endpoint, &[id])?);
        self.send(request).await.map(|_| ())
    }
}

#[async_trait]
impl EventArtistLinker for HttpRepository {
    async fn attach_artist(&self, event_id: &str, artist_id: &str) -> RepositoryResult<Value> {
        let url = self.url(&[EVENTS_ENDPOINT, event_id, ARTISTS_ENDPOINT, artist_id])?;
        let request = self.client.post(url);
        self.send(request).await
    }

    async fn detach_artist(&self, event_id: &str, artist_id: &str) -> RepositoryResult<()> {
        let url = self.url(&[EVENTS_ENDPOINT, event_id, ARTISTS_ENDPOINT, artist_id])?;
        let request = self.client.delete(url);
        self.send(request).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_prefers_backend_message() {
        let error = api_error(
            StatusCode::FORBIDDEN,
            r#"{"message": "Accès refusé"}"#,
            &ErrorConfig::default(),
        );

        assert_eq!(error, ApiError::new(403, "Accès refusé"));
    }

    #[test]
    fn api_error_falls_back_to_configured_message() {
        let errors = ErrorConfig::default();

        let not_found = api_error(StatusCode::NOT_FOUND, "<html>", &errors);
        assert_eq!(not_found.message, "Ressource introuvable");

        let blank = api_error(StatusCode::BAD_GATEWAY, r#"{"message": "  "}"#, &errors);
        assert_eq!(blank.message, "Erreur interne du serveur");
    }

    #[test]
    fn page_query_skips_blank_search() {
        let params = PaginationParams {
            page: 0,
            size: 10,
            search: Some("  ".to_string()),
        };

        assert_eq!(
            page_query(&params),
            vec![("page", "0".to_string()), ("size", "10".to_string())]
        );
    }

    fn repo(base_url: &str) -> HttpRepository {
        let mut config = AppConfig::default();
        config.api.base_url = base_url.to_string();
        HttpRepository::new(&config).expect("client builds")
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let repo = repo("http://backend/api/");

        assert_eq!(
            repo.resource_url("/artists", &[]).expect("url").as_str(),
            "http://backend/api/artists"
        );
        assert_eq!(
            repo.resource_url("events", &["3"]).expect("url").as_str(),
            "http://backend/api/events/3"
        );
        assert_eq!(
            repo.resource_url("artists/a1/events", &[]).expect("url").as_str(),
            "http://backend/api/artists/a1/events"
        );
    }

    #[test]
    fn ids_stay_a_single_path_segment() {
        let repo = repo("http://backend/api");

        let slash = repo.resource_url("artists", &["a/b"]).expect("url");
        assert_eq!(slash.as_str(), "http://backend/api/artists/a%2Fb");

        let query = repo.resource_url("artists", &["a1?x=1"]).expect("url");
        assert_eq!(query.path(), "/api/artists/a1%3Fx=1");
        assert_eq!(query.query(), None);

        let link = repo.url(&["events", "e 1", "artists", "a#1"]).expect("url");
        assert_eq!(link.as_str(), "http://backend/api/events/e%201/artists/a%231");
    }

    #[test]
    fn dot_segments_are_refused() {
        let repo = repo("http://backend/api");

        for id in ["..", ".", ""] {
            assert!(matches!(
                repo.resource_url("artists", &[id]),
                Err(RepositoryError::Unexpected(_))
            ));
        }
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let mut config = AppConfig::default();
        config.api.base_url = "not a url".to_string();

        assert!(matches!(
            HttpRepository::new(&config),
            Err(RepositoryError::Unexpected(_))
        ));
    }
}
