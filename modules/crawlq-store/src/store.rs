// ArmStore: the read/write contract the sampler needs from persistence.
//
// Two implementations:
// - PgArmStore: Postgres, atomicity from single INSERT ... ON CONFLICT statements.
// - MemoryArmStore: mutex-guarded map, for local runs and tests.
//
// Inputs arriving here are already normalized by the sampler.

use async_trait::async_trait;

use crawlq_common::Result;

use crate::types::{Arm, BeliefDelta};

#[async_trait]
pub trait ArmStore: Send + Sync {
    /// Insert each query at the neutral prior unless a row already exists.
    /// Existing rows are left untouched, including `updated_at`.
    /// Returns the number of rows actually created.
    async fn insert_if_absent(&self, platform: &str, queries: &[String]) -> Result<u64>;

    /// Atomically add `delta` to the arm's counters, or create the arm at
    /// prior + delta if it does not exist yet. Must never read-then-write.
    async fn apply_reward(&self, platform: &str, query: &str, delta: BeliefDelta) -> Result<()>;

    /// All arms registered for a platform, in no particular order.
    async fn arms_for_platform(&self, platform: &str) -> Result<Vec<Arm>>;

    /// Up to `limit` arms for a platform, most recently updated first.
    async fn recent_arms(&self, platform: &str, limit: usize) -> Result<Vec<Arm>>;
}
