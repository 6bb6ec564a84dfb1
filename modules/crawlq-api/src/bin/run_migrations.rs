//! Runs pending SQLx migrations against the database.
//!
//! Migrations are embedded at compile time, so no migration files
//! are needed at runtime. Used as a deploy step before starting the API.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crawlq_store::PgArmStore;

#[derive(Parser)]
#[command(name = "run-migrations", about = "Apply crawler query sampler migrations")]
struct Cli {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing::info!("Running database migrations...");
    let store = PgArmStore::connect(&cli.database_url, 2).await?;
    store.migrate().await?;
    tracing::info!("Migrations completed successfully.");

    Ok(())
}
