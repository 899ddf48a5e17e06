//! Vector Domain Library
//!
//! Storage adapter over Qdrant for retrieval workloads: make sure a
//! collection exists, upsert points in one batch, and search for the
//! nearest points while pulling `text` and `source` out of their payloads.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  VectorStorage  │  ← ensure_collection / upsert / search
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ VectorRepository│
//! │   (trait)       │
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ QdrantRepository│
//! └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::FromEnv;
//! use domain_vector::{DEFAULT_TOP_K, PointKey, QdrantConfig, VectorStorage};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = QdrantConfig::from_env()?;
//! let storage = VectorStorage::connect(&config).await?;
//!
//! let payload = json!({"text": "Qdrant stores vectors", "source": "intro.md"});
//! let serde_json::Value::Object(payload) = payload else { unreachable!() };
//!
//! storage
//!     .upsert(vec![PointKey::Num(1)], vec![vec![0.1; 3072]], vec![payload])
//!     .await?;
//!
//! let found = storage.search(vec![0.1; 3072], DEFAULT_TOP_K).await?;
//! println!("{:?} from {:?}", found.contexts, found.sources);
//! # Ok(())
//! # }
//! ```

pub mod conversions;
pub mod error;
pub mod models;
pub mod qdrant;
pub mod repository;
pub mod service;

pub use error::{VectorError, VectorResult};
pub use models::{
    CollectionConfig, DistanceMetric, Payload, Point, PointKey, RetrievedContext, ScoredPoint,
};
pub use qdrant::{QdrantConfig, QdrantRepository};
pub use repository::VectorRepository;
pub use service::{DEFAULT_TOP_K, SOURCE_FIELD, TEXT_FIELD, VectorStorage, extract_context};
