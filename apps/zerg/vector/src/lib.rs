//! Vector CLI
//!
//! Command line access to the retrieval store backed by Qdrant.
//!
//! ## Architecture
//!
//! ```text
//! zerg-vector <command>
//!   ↓ (clap)
//! runner.rs
//!   ↓ (point files / query vectors parsed in points.rs)
//! VectorStorage (domain layer)
//!   ↓
//! Qdrant (gRPC)
//! ```
//!
//! ## Commands
//!
//! - `init`: ensure the configured collection exists
//! - `upsert --file points.json`: write a batch of points
//! - `search --vector '[...]'`: print matching texts and their sources as JSON
//!
//! Connection settings come from `QDRANT_*` environment variables.

pub mod cli;
pub mod points;
pub mod runner;

pub use runner::run;
