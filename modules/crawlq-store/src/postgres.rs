//! PgArmStore: arm table backed by Postgres.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::debug;

use crawlq_common::{Result, SamplerError};

use crate::store::ArmStore;
use crate::types::{Arm, BeliefDelta};

#[derive(Clone)]
pub struct PgArmStore {
    pool: PgPool,
}

impl PgArmStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(unavailable)?;
        Ok(Self::new(pool))
    }

    /// Apply the embedded migrations under `migrations/`.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| SamplerError::StoreUnavailable(e.to_string()))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn unavailable(err: sqlx::Error) -> SamplerError {
    SamplerError::StoreUnavailable(err.to_string())
}

#[async_trait]
impl ArmStore for PgArmStore {
    async fn insert_if_absent(&self, platform: &str, queries: &[String]) -> Result<u64> {
        if queries.is_empty() {
            return Ok(0);
        }

        // ON CONFLICT DO NOTHING leaves updated_at alone on re-seed.
        let result = sqlx::query(
            r#"
            INSERT INTO crawler_query_stats (platform, query_text, alpha, beta)
            SELECT $1, q, 1.0, 1.0 FROM UNNEST($2::text[]) AS q
            ON CONFLICT (platform, query_text) DO NOTHING
            "#,
        )
        .bind(platform)
        .bind(queries)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        let created = result.rows_affected();
        debug!(platform, requested = queries.len(), created, "Seeded arms");
        Ok(created)
    }

    async fn apply_reward(&self, platform: &str, query: &str, delta: BeliefDelta) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO crawler_query_stats (platform, query_text, alpha, beta, last_reward)
            VALUES ($1, $2, $3, $4, $7)
            ON CONFLICT (platform, query_text) DO UPDATE SET
                alpha = crawler_query_stats.alpha + $5,
                beta = crawler_query_stats.beta + $6,
                last_reward = $7,
                updated_at = NOW()
            "#,
        )
        .bind(platform)
        .bind(query)
        .bind(delta.initial_alpha())
        .bind(delta.initial_beta())
        .bind(delta.success)
        .bind(delta.failure)
        .bind(delta.reward)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        debug!(
            platform,
            query,
            success = delta.success,
            failure = delta.failure,
            "Applied reward"
        );
        Ok(())
    }

    async fn arms_for_platform(&self, platform: &str) -> Result<Vec<Arm>> {
        sqlx::query_as::<_, Arm>(
            r#"
            SELECT platform, query_text, alpha, beta, last_reward, created_at, updated_at
            FROM crawler_query_stats
            WHERE platform = $1
            "#,
        )
        .bind(platform)
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)
    }

    async fn recent_arms(&self, platform: &str, limit: usize) -> Result<Vec<Arm>> {
        sqlx::query_as::<_, Arm>(
            r#"
            SELECT platform, query_text, alpha, beta, last_reward, created_at, updated_at
            FROM crawler_query_stats
            WHERE platform = $1
            ORDER BY updated_at DESC, query_text ASC
            LIMIT $2
            "#,
        )
        .bind(platform)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)
    }
}
