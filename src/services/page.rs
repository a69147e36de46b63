//! Loads one page of a listing into a renderable view model.
//!
//! [`PageController::load_page_data`] is a boundary: every failure ends in an
//! empty page carrying a displayable message, never in an error.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::page::PaginatedResponse;
use crate::dto::page::PageData;
use crate::models::config::AppConfig;
use crate::pagination::{PaginationParams, PaginationState, PaginationValidator, ValidatedPage};
use crate::query::PageUrl;
use crate::repository::DataSource;
use crate::repository::errors::{ApiError, RepositoryError, RepositoryResult};
use crate::sanitizer::{EntitySanitizer, FromRaw};
use crate::settings;
use crate::validation::parse_paginated;

/// Size used when the URL carries no `size` parameter.
pub const DEFAULT_SIZE_PARAM: &str = "10";

pub struct PageController<'a, S: ?Sized> {
    source: &'a S,
    endpoint: String,
    config: Arc<AppConfig>,
    validator: PaginationValidator,
    sanitizer: EntitySanitizer,
}

impl<'a, S> PageController<'a, S>
where
    S: DataSource + ?Sized,
{
    pub fn new(source: &'a S, endpoint: impl Into<String>, config: Arc<AppConfig>) -> Self {
        Self {
            source,
            endpoint: endpoint.into(),
            validator: PaginationValidator::from_config(&config.pagination),
            sanitizer: EntitySanitizer::new(&config.labels),
            config,
        }
    }

    /// Controller using the process-wide configuration in effect now.
    pub fn from_current(source: &'a S, endpoint: impl Into<String>) -> Self {
        Self::new(source, endpoint, settings::current())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Loads the page described by `url`'s `page`, `size` and, when
    /// `with_search` is set, `search` query parameters.
    ///
    /// A page past the end is replaced by the last page, with one retry at
    /// most.
    pub async fn load_page_data<T: FromRaw>(
        &self,
        url: &PageUrl,
        with_search: bool,
    ) -> PageData<T> {
        let (requested, search_term) = self.requested(url, with_search);

        match self.fetch_with_fallback(requested, search_term.as_deref()).await {
            Ok(response) => self.page_data(response, search_term),
            Err(err) => {
                log::error!(
                    "Failed to load page {} of {}: {err}",
                    requested.page,
                    self.endpoint
                );
                let message = match err {
                    RepositoryError::Api(api) => api.message,
                    _ => self.config.errors.messages.server.clone(),
                };
                self.empty_page(requested, search_term, message)
            }
        }
    }

    /// Empty page for `url` carrying `message`, without asking the source.
    pub fn error_page<T>(
        &self,
        url: &PageUrl,
        with_search: bool,
        message: String,
    ) -> PageData<T> {
        let (requested, search_term) = self.requested(url, with_search);
        self.empty_page(requested, search_term, message)
    }

    fn requested(&self, url: &PageUrl, with_search: bool) -> (ValidatedPage, Option<String>) {
        let requested = self.validator.validate(
            url.get("page"),
            Some(url.get("size").unwrap_or(DEFAULT_SIZE_PARAM)),
        );
        let search_term = with_search.then(|| {
            url.get("search")
                .map(str::trim)
                .unwrap_or_default()
                .to_string()
        });
        (requested, search_term)
    }

    async fn fetch(
        &self,
        api_page: u64,
        size: u64,
        search: Option<&str>,
    ) -> RepositoryResult<PaginatedResponse<Value>> {
        let params = PaginationParams {
            page: api_page,
            size,
            search: search.map(str::to_string),
        };
        log::debug!("Fetching {} page={api_page} size={size}", self.endpoint);

        let raw = self.source.get_all(&self.endpoint, &params).await?;
        parse_paginated(raw).map_err(|err| {
            log::warn!("Invalid paginated response from {}: {err}", self.endpoint);
            RepositoryError::from(ApiError::new(
                500,
                format!("Réponse invalide du serveur pour {}", self.endpoint),
            ))
        })
    }

    async fn fetch_with_fallback(
        &self,
        requested: ValidatedPage,
        search: Option<&str>,
    ) -> RepositoryResult<PaginatedResponse<Value>> {
        let api_page = PaginationValidator::to_api_page(requested.page);
        let response = self.fetch(api_page, requested.size, search).await?;

        if requested.page > response.total_pages && response.total_pages > 0 {
            log::warn!(
                "Page {} of {} is past the last page {}, loading the last page instead",
                requested.page,
                self.endpoint,
                response.total_pages
            );
            let last_page = PaginationValidator::to_api_page(response.total_pages);
            return self.fetch(last_page, requested.size, search).await;
        }

        Ok(response)
    }

    fn page_data<T: FromRaw>(
        &self,
        response: PaginatedResponse<Value>,
        search_term: Option<String>,
    ) -> PageData<T> {
        let pagination = PaginationState {
            page: PaginationValidator::from_api_page(response.number),
            total_pages: response.total_pages,
            first: response.first,
            last: response.last,
            total_elements: response.total_elements,
            size: response.size,
        };
        let items = response
            .content
            .iter()
            .map(|raw| T::from_raw(raw, &self.sanitizer))
            .collect();

        PageData {
            items,
            pagination,
            search_term,
            error_message: None,
        }
    }

    fn empty_page<T>(
        &self,
        requested: ValidatedPage,
        search_term: Option<String>,
        error_message: String,
    ) -> PageData<T> {
        PageData {
            items: Vec::new(),
            pagination: PaginationState {
                page: requested.page,
                total_pages: self.config.pagination.min_size,
                first: true,
                last: true,
                total_elements: 0,
                size: requested.size,
            },
            search_term,
            error_message: Some(error_message),
        }
    }
}
