use async_trait::async_trait;

use crate::error::VectorResult;
use crate::models::{CollectionConfig, Point, ScoredPoint};

/// Repository trait for the remote vector store
///
/// Thin seam over the vector database client so the storage façade can be
/// exercised without a running store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorRepository: Send + Sync {
    /// Check whether a collection with this name exists
    async fn collection_exists(&self, collection_name: &str) -> VectorResult<bool>;

    /// Create a collection with the given vector size and metric
    async fn create_collection(&self, config: &CollectionConfig) -> VectorResult<()>;

    /// Upsert points in a single request, waiting for the write to be applied
    async fn upsert_points(&self, collection_name: &str, points: Vec<Point>) -> VectorResult<()>;

    /// Nearest-neighbour query returning hits with their payloads
    async fn query_points(
        &self,
        collection_name: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> VectorResult<Vec<ScoredPoint>>;
}
