use std::path::PathBuf;

use clap::{Parser, Subcommand};
use domain_vector::DEFAULT_TOP_K;

#[derive(Debug, Parser)]
#[command(name = "zerg-vector")]
#[command(about = "Store and search document chunks in Qdrant")]
pub struct Cli {
    /// Collection to use instead of QDRANT_COLLECTION
    #[arg(short, long, global = true)]
    pub collection: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the collection if it does not exist
    Init,

    /// Upsert points from a JSON file
    Upsert {
        /// JSON array of {"id", "vector", "payload"} objects
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Search for the nearest points and print their texts and sources
    Search {
        /// Query vector as a JSON array, e.g. '[0.1, 0.2, 0.3]'
        #[arg(short, long)]
        vector: String,

        /// Number of hits to request
        #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
        top_k: u64,
    },
}
