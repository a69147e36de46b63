//! Hand-written data source recording every page request it serves.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use artist_events::pagination::PaginationParams;
use artist_events::repository::DataSource;
use artist_events::repository::errors::{RepositoryError, RepositoryResult};

/// Serves `total_pages` pages of artists; out-of-range requests echo the
/// requested page number back like a real backend would.
pub struct StubSource {
    pub total_pages: u64,
    pub failure: Option<fn() -> RepositoryError>,
    pub calls: Mutex<Vec<(String, PaginationParams)>>,
}

impl StubSource {
    pub fn with_pages(total_pages: u64) -> Self {
        Self {
            total_pages,
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(failure: fn() -> RepositoryError) -> Self {
        Self {
            total_pages: 0,
            failure: Some(failure),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, PaginationParams)> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl DataSource for StubSource {
    async fn get_all(&self, endpoint: &str, params: &PaginationParams) -> RepositoryResult<Value> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((endpoint.to_string(), params.clone()));
        }
        if let Some(failure) = self.failure {
            return Err(failure());
        }

        let content: Vec<Value> = if params.page < self.total_pages {
            (0..params.size.min(3))
                .map(|i| json!({"id": format!("a{}-{i}", params.page), "label": null}))
                .collect()
        } else {
            Vec::new()
        };

        Ok(json!({
            "content": content,
            "totalElements": self.total_pages * params.size,
            "totalPages": self.total_pages,
            "number": params.page,
            "size": params.size,
            "first": params.page == 0,
            "last": params.page + 1 >= self.total_pages
        }))
    }
}
