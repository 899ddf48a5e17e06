use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse};

use crate::models::{CollectionConfig, DistanceMetric};

pub const DEFAULT_URL: &str = "http://localhost:6334";
pub const DEFAULT_COLLECTION: &str = "docs";
pub const DEFAULT_DIMENSION: u64 = 3072;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Qdrant connection and collection configuration
#[derive(Debug, Clone)]
pub struct QdrantConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub collection: String,
    pub dimension: u64,
    pub distance: DistanceMetric,
}

impl QdrantConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_collection(mut self, name: impl Into<String>, dimension: u64) -> Self {
        self.collection = name.into();
        self.dimension = dimension;
        self
    }

    pub fn with_distance(mut self, distance: DistanceMetric) -> Self {
        self.distance = distance;
        self
    }

    /// Collection definition derived from this configuration
    pub fn collection_config(&self) -> CollectionConfig {
        CollectionConfig::new(self.collection.clone(), self.dimension).with_distance(self.distance)
    }
}

impl FromEnv for QdrantConfig {
    /// Reads from environment variables with defaults:
    /// - QDRANT_URL: defaults to http://localhost:6334 (gRPC port)
    /// - QDRANT_API_KEY: optional
    /// - QDRANT_TIMEOUT_SECS: defaults to 30
    /// - QDRANT_COLLECTION: defaults to "docs"
    /// - QDRANT_VECTOR_DIM: defaults to 3072
    /// - QDRANT_DISTANCE: defaults to cosine
    fn from_env() -> Result<Self, ConfigError> {
        let distance_raw = env_or_default("QDRANT_DISTANCE", DistanceMetric::default().as_str());
        let distance: DistanceMetric = distance_raw
            .parse()
            .map_err(|e: crate::error::VectorError| ConfigError::ParseError {
                key: "QDRANT_DISTANCE".to_string(),
                details: e.to_string(),
            })?;

        let dimension = env_parse("QDRANT_VECTOR_DIM", DEFAULT_DIMENSION)?;
        if dimension == 0 {
            return Err(ConfigError::ParseError {
                key: "QDRANT_VECTOR_DIM".to_string(),
                details: "dimension must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            url: env_or_default("QDRANT_URL", DEFAULT_URL),
            api_key: env_optional("QDRANT_API_KEY"),
            timeout_secs: env_parse("QDRANT_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            collection: env_or_default("QDRANT_COLLECTION", DEFAULT_COLLECTION),
            dimension,
            distance,
        })
    }
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            collection: DEFAULT_COLLECTION.to_string(),
            dimension: DEFAULT_DIMENSION,
            distance: DistanceMetric::Cosine,
        }
    }
}
