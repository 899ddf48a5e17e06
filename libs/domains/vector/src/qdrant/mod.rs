mod client;
mod config;

pub use client::QdrantRepository;
pub use config::{
    DEFAULT_COLLECTION, DEFAULT_DIMENSION, DEFAULT_TIMEOUT_SECS, DEFAULT_URL, QdrantConfig,
};
