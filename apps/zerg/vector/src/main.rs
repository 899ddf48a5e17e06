//! Vector CLI - Entry Point
//!
//! Minimal entry point that delegates to the runner module.

#[tokio::main]
async fn main() -> eyre::Result<()> {
    zerg_vector::run().await
}
