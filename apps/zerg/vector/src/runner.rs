//! Command execution
//!
//! Sets up logging, loads the Qdrant configuration from the environment,
//! connects the storage (creating the collection if needed) and runs the
//! requested command.

use std::io::Write;

use clap::Parser;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use domain_vector::{QdrantConfig, VectorRepository, VectorStorage};
use eyre::{Result, WrapErr};
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::points::{load_points, parse_query_vector};

/// Parse arguments and run the CLI
///
/// # Errors
///
/// Returns an error if:
/// - Qdrant configuration is invalid
/// - Qdrant cannot be reached or rejects a request
/// - Input files or query vectors cannot be parsed
pub async fn run() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();

    let mut config = QdrantConfig::from_env().wrap_err("Failed to load Qdrant configuration")?;
    if let Some(collection) = cli.collection {
        config.collection = collection;
    }

    let storage = VectorStorage::connect(&config)
        .await
        .wrap_err_with(|| format!("Failed to connect to Qdrant at {}", config.url))?;

    execute(&storage, cli.command, &mut std::io::stdout()).await
}

/// Run one command against an already connected storage, writing search
/// results to `out`
async fn execute<R: VectorRepository>(
    storage: &VectorStorage<R>,
    command: Commands,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Init => {
            info!(collection = storage.collection(), "Collection ready");
        }

        Commands::Upsert { file } => {
            let batch = load_points(&file)?;
            let written = storage
                .upsert(batch.ids, batch.vectors, batch.payloads)
                .await
                .wrap_err("Upsert failed")?;

            info!(written, collection = storage.collection(), "Upsert complete");
        }

        Commands::Search { vector, top_k } => {
            let query = parse_query_vector(&vector)?;
            let found = storage
                .search(query, top_k)
                .await
                .wrap_err("Search failed")?;

            writeln!(out, "{}", serde_json::to_string_pretty(&found)?)?;
        }
    }

    Ok(())
}
