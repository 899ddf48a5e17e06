use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::error::{VectorError, VectorResult};
use crate::models::{
    CollectionConfig, DistanceMetric, Payload, Point, PointKey, RetrievedContext, ScoredPoint,
};
use crate::qdrant::{QdrantConfig, QdrantRepository};
use crate::repository::VectorRepository;

/// Number of hits requested when the caller has no preference
pub const DEFAULT_TOP_K: u64 = 5;

/// Payload field holding the chunk text
pub const TEXT_FIELD: &str = "text";

/// Payload field holding the document the chunk came from
pub const SOURCE_FIELD: &str = "source";

/// Storage adapter bound to a single collection
///
/// Wraps a [`VectorRepository`] and exposes collection initialization,
/// batch upsert and search with payload extraction.
pub struct VectorStorage<R: VectorRepository> {
    repository: Arc<R>,
    collection: String,
}

impl<R: VectorRepository> Clone for VectorStorage<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            collection: self.collection.clone(),
        }
    }
}

impl VectorStorage<QdrantRepository> {
    /// Build a Qdrant client and make sure the configured collection exists.
    pub async fn connect(config: &QdrantConfig) -> VectorResult<Self> {
        info!(url = %config.url, collection = %config.collection, "Connecting to Qdrant");

        let target = config.collection_config();
        let repository = QdrantRepository::new(config)?;
        let storage = Self::new(repository, target.name.clone());

        storage
            .ensure_collection(&target.name, target.dimension, target.distance)
            .await?;

        Ok(storage)
    }
}

impl<R: VectorRepository> VectorStorage<R> {
    pub fn new(repository: R, collection: impl Into<String>) -> Self {
        Self {
            repository: Arc::new(repository),
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Create the collection if it does not exist yet.
    ///
    /// Returns `true` when a collection was created, `false` when it was
    /// already present. An existing collection is left untouched even if its
    /// size or metric differ.
    #[instrument(skip(self))]
    pub async fn ensure_collection(
        &self,
        name: &str,
        dimension: u64,
        distance: DistanceMetric,
    ) -> VectorResult<bool> {
        if dimension == 0 {
            return Err(VectorError::Validation(
                "Vector dimension must be greater than zero".to_string(),
            ));
        }

        if self.repository.collection_exists(name).await? {
            debug!("Collection already exists");
            return Ok(false);
        }

        let config = CollectionConfig::new(name, dimension).with_distance(distance);
        self.repository.create_collection(&config).await?;

        info!("Collection created");
        Ok(true)
    }

    /// Zip ids, vectors and payloads into points and write them in one request.
    ///
    /// The three inputs must have the same length. Returns the number of
    /// points written.
    #[instrument(skip_all, fields(collection = %self.collection, count = ids.len()))]
    pub async fn upsert(
        &self,
        ids: Vec<PointKey>,
        vectors: Vec<Vec<f32>>,
        payloads: Vec<Payload>,
    ) -> VectorResult<usize> {
        if ids.len() != vectors.len() || ids.len() != payloads.len() {
            return Err(VectorError::Validation(format!(
                "ids, vectors and payloads must have the same length (got {}, {}, {})",
                ids.len(),
                vectors.len(),
                payloads.len()
            )));
        }

        if ids.is_empty() {
            debug!("Nothing to upsert");
            return Ok(0);
        }

        let points: Vec<Point> = ids
            .into_iter()
            .zip(vectors)
            .zip(payloads)
            .map(|((id, vector), payload)| Point::new(id, vector, payload))
            .collect();
        let count = points.len();

        self.repository
            .upsert_points(&self.collection, points)
            .await?;

        info!(count, "Points upserted");
        Ok(count)
    }

    /// Nearest-neighbour search returning the `text` of each hit and the
    /// distinct `source` values.
    #[instrument(skip_all, fields(collection = %self.collection, top_k = top_k))]
    pub async fn search(
        &self,
        query_vector: Vec<f32>,
        top_k: u64,
    ) -> VectorResult<RetrievedContext> {
        if top_k == 0 {
            return Ok(RetrievedContext::default());
        }

        let hits = self
            .repository
            .query_points(&self.collection, query_vector, top_k)
            .await?;

        let hit_count = hits.len();
        let context = extract_context(hits);

        debug!(
            hits = hit_count,
            contexts = context.contexts.len(),
            sources = context.sources.len(),
            "Search completed"
        );

        Ok(context)
    }
}

/// Collect texts and deduplicated sources from search hits.
///
/// Hits without a payload, and fields that are missing, empty or not
/// strings, are skipped. Texts keep hit order; sources keep first-seen order.
pub fn extract_context(hits: impl IntoIterator<Item = ScoredPoint>) -> RetrievedContext {
    let mut context = RetrievedContext::default();
    let mut seen = HashSet::new();

    for hit in hits {
        let Some(payload) = hit.payload.filter(|p| !p.is_empty()) else {
            continue;
        };

        if let Some(text) = non_empty_str(&payload, TEXT_FIELD) {
            context.contexts.push(text.to_string());
        }

        if let Some(source) = non_empty_str(&payload, SOURCE_FIELD) {
            if seen.insert(source.to_string()) {
                context.sources.push(source.to_string());
            }
        }
    }

    context
}

fn non_empty_str<'a>(payload: &'a Payload, key: &str) -> Option<&'a str> {
    payload
        .get(key)
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
}
