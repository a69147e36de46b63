//! Collaborators giving access to the REST backend.
//!
//! Everything returns raw JSON: the backend is untrusted and its payloads go
//! through [`crate::validation`] and [`crate::sanitizer`] before use.

use async_trait::async_trait;
use serde_json::Value;

use crate::pagination::PaginationParams;
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(feature = "client")]
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Source of paginated listings.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn get_all(&self, endpoint: &str, params: &PaginationParams) -> RepositoryResult<Value>;
}

#[async_trait]
pub trait ResourceReader: Send + Sync {
    async fn get_by_id(&self, endpoint: &str, id: &str) -> RepositoryResult<Value>;
}

#[async_trait]
pub trait ResourceWriter: Send + Sync {
    async fn create(&self, endpoint: &str, body: &Value) -> RepositoryResult<Value>;
    async fn update(&self, endpoint: &str, id: &str, body: &Value) -> RepositoryResult<Value>;
    async fn delete(&self, endpoint: &str, id: &str) -> RepositoryResult<()>;
}

/// Links between events and the artists performing at them.
#[async_trait]
pub trait EventArtistLinker: Send + Sync {
    async fn attach_artist(&self, event_id: &str, artist_id: &str) -> RepositoryResult<Value>;
    async fn detach_artist(&self, event_id: &str, artist_id: &str) -> RepositoryResult<()>;
}
