use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::VectorError;

/// Arbitrary key-value metadata attached to a point
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Distance metric for similarity calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Cosine,
    Euclidean,
    DotProduct,
    Manhattan,
}

impl DistanceMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::DotProduct => "dot_product",
            DistanceMetric::Manhattan => "manhattan",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMetric {
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "cosine" => Ok(DistanceMetric::Cosine),
            "euclid" | "euclidean" => Ok(DistanceMetric::Euclidean),
            "dot" | "dotproduct" => Ok(DistanceMetric::DotProduct),
            "manhattan" => Ok(DistanceMetric::Manhattan),
            other => Err(VectorError::Config(format!(
                "Unknown distance metric: {}",
                other
            ))),
        }
    }
}

/// Collection definition: name, vector dimensionality and metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub name: String,
    pub dimension: u64,
    pub distance: DistanceMetric,
}

impl CollectionConfig {
    pub fn new(name: impl Into<String>, dimension: u64) -> Self {
        Self {
            name: name.into(),
            dimension,
            distance: DistanceMetric::default(),
        }
    }

    pub fn with_distance(mut self, distance: DistanceMetric) -> Self {
        self.distance = distance;
        self
    }
}

/// Point identifier. Qdrant accepts unsigned integers or UUIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointKey {
    Num(u64),
    Uuid(Uuid),
}

/// A vector point with payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointKey,
    pub vector: Vec<f32>,
    #[serde(default)]
    pub payload: Payload,
}

impl Point {
    pub fn new(id: PointKey, vector: Vec<f32>, payload: Payload) -> Self {
        Self {
            id,
            vector,
            payload,
        }
    }
}

/// A search hit as returned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPoint {
    pub id: Option<PointKey>,
    pub score: f32,
    pub payload: Option<Payload>,
}

impl ScoredPoint {
    pub fn new(id: Option<PointKey>, score: f32, payload: Option<Payload>) -> Self {
        Self { id, score, payload }
    }
}

/// Texts and distinct sources pulled from the payloads of search hits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedContext {
    pub contexts: Vec<String>,
    pub sources: Vec<String>,
}

impl RetrievedContext {
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty() && self.sources.is_empty()
    }
}
