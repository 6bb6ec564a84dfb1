use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crawlq_api::{build_router, AppState};
use crawlq_common::Config;
use crawlq_sampler::AdaptiveQuerySampler;
use crawlq_store::{ArmStore, MemoryArmStore, PgArmStore};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn ArmStore> = match &config.database_url {
        Some(url) => {
            let pg = PgArmStore::connect(url, config.database_max_connections).await?;
            pg.migrate().await?;
            info!(
                max_connections = config.database_max_connections,
                "Connected to Postgres, migrations complete"
            );
            Arc::new(pg)
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory arm store (beliefs are lost on restart)");
            Arc::new(MemoryArmStore::new())
        }
    };

    if config.ingest_token.is_empty() {
        warn!("INGEST_TOKEN not set, every ingest call will be rejected");
    }

    let state = Arc::new(AppState::new(
        AdaptiveQuerySampler::new(store),
        config.ingest_token.clone(),
    ));
    let app = build_router(state);

    let addr = format!("{}:{}", config.api_host, config.api_port);
    info!("Query sampler API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
