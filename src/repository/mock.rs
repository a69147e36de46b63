//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;

use crate::pagination::PaginationParams;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DataSource, EventArtistLinker, ResourceReader, ResourceWriter};

mock! {
    pub Repository {}

    #[async_trait]
    impl DataSource for Repository {
        async fn get_all(
            &self,
            endpoint: &str,
            params: &PaginationParams,
        ) -> RepositoryResult<Value>;
    }

    #[async_trait]
    impl ResourceReader for Repository {
        async fn get_by_id(&self, endpoint: &str, id: &str) -> RepositoryResult<Value>;
    }

    #[async_trait]
    impl ResourceWriter for Repository {
        async fn create(&self, endpoint: &str, body: &Value) -> RepositoryResult<Value>;
        async fn update(&self, endpoint: &str, id: &str, body: &Value) -> RepositoryResult<Value>;
        async fn delete(&self, endpoint: &str, id: &str) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl EventArtistLinker for Repository {
        async fn attach_artist(&self, event_id: &str, artist_id: &str) -> RepositoryResult<Value>;
        async fn detach_artist(&self, event_id: &str, artist_id: &str) -> RepositoryResult<()>;
    }
}
