use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, PointStruct, QueryPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};
use tracing::debug;

use super::QdrantConfig;
use crate::conversions::{
    distance_to_qdrant, payload_to_qdrant, point_key_to_qdrant, scored_point_from_qdrant,
};
use crate::error::{VectorError, VectorResult};
use crate::models::{CollectionConfig, Point, ScoredPoint};
use crate::repository::VectorRepository;

/// Qdrant-backed implementation of VectorRepository
pub struct QdrantRepository {
    client: Qdrant,
}

impl QdrantRepository {
    pub fn new(config: &QdrantConfig) -> VectorResult<Self> {
        let mut builder = Qdrant::from_url(&config.url);

        if let Some(api_key) = &config.api_key {
            builder = builder.api_key(api_key.clone());
        }

        builder = builder.timeout(Duration::from_secs(config.timeout_secs));

        let client = builder
            .build()
            .map_err(|e| VectorError::Qdrant(format!("Failed to build client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl VectorRepository for QdrantRepository {
    async fn collection_exists(&self, collection_name: &str) -> VectorResult<bool> {
        Ok(self.client.collection_exists(collection_name).await?)
    }

    async fn create_collection(&self, config: &CollectionConfig) -> VectorResult<()> {
        let builder = CreateCollectionBuilder::new(&config.name).vectors_config(
            VectorParamsBuilder::new(config.dimension, distance_to_qdrant(config.distance)),
        );

        self.client.create_collection(builder).await?;
        Ok(())
    }

    async fn upsert_points(&self, collection_name: &str, points: Vec<Point>) -> VectorResult<()> {
        let points = points
            .into_iter()
            .map(|p| {
                Ok(PointStruct::new(
                    point_key_to_qdrant(p.id),
                    p.vector,
                    payload_to_qdrant(p.payload)?,
                ))
            })
            .collect::<VectorResult<Vec<_>>>()?;

        let builder = UpsertPointsBuilder::new(collection_name, points).wait(true);
        let response = self.client.upsert_points(builder).await?;

        debug!(
            collection = collection_name,
            status = ?response.result.map(|r| r.status),
            "Upsert acknowledged"
        );

        Ok(())
    }

    async fn query_points(
        &self,
        collection_name: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> VectorResult<Vec<ScoredPoint>> {
        let builder = QueryPointsBuilder::new(collection_name)
            .query(vector)
            .limit(limit)
            .with_payload(true);

        let response = self.client.query(builder).await?;

        Ok(response
            .result
            .into_iter()
            .map(scored_point_from_qdrant)
            .collect())
    }
}
