use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crawlq_common::{
    clamp_limit, clamp_reward, clamp_trials, normalize_platform, normalize_query, Result,
    DEFAULT_LIST_LIMIT, DEFAULT_SAMPLE_LIMIT,
};
use crawlq_store::{ArmStore, BeliefDelta};

use crate::scoring::{self, EXPLORATION_WEIGHT, JITTER_CEILING};
use crate::types::{ArmSummary, RewardReport};

#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Weight of the exploration term in the ranking score.
    pub exploration_weight: f64,
    /// Exclusive upper bound of the tie-breaking jitter. 0 disables it.
    pub jitter_ceiling: f64,
    pub default_sample_limit: usize,
    pub default_list_limit: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            exploration_weight: EXPLORATION_WEIGHT,
            jitter_ceiling: JITTER_CEILING,
            default_sample_limit: DEFAULT_SAMPLE_LIMIT,
            default_list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

/// Picks which queries to crawl next per platform and learns from reported rewards.
///
/// Holds no mutable state of its own; every call is one round trip to the store,
/// so a single instance can be shared freely across tasks.
#[derive(Clone)]
pub struct AdaptiveQuerySampler {
    store: Arc<dyn ArmStore>,
    config: SamplerConfig,
}

impl AdaptiveQuerySampler {
    pub fn new(store: Arc<dyn ArmStore>) -> Self {
        Self::with_config(store, SamplerConfig::default())
    }

    pub fn with_config(store: Arc<dyn ArmStore>, config: SamplerConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Register seed queries as arms at the neutral prior.
    ///
    /// Existing arms keep their learned beliefs. Blank platform, blank queries
    /// and an empty list are no-ops. Returns how many arms were created.
    pub async fn upsert_seeds<S: AsRef<str>>(&self, platform: &str, queries: &[S]) -> Result<u64> {
        let Some(platform) = normalize_platform(platform) else {
            return Ok(0);
        };

        let mut seen = HashSet::new();
        let cleaned: Vec<String> = queries
            .iter()
            .filter_map(|q| normalize_query(q.as_ref()))
            .filter(|q| seen.insert(*q))
            .map(str::to_string)
            .collect();

        if cleaned.is_empty() {
            return Ok(0);
        }

        let created = self.store.insert_if_absent(platform, &cleaned).await?;
        debug!(platform, submitted = queries.len(), created, "Seed queries registered");
        Ok(created)
    }

    /// Rank the platform's arms and return up to `limit` queries, best first.
    ///
    /// Never fails: an unknown platform or an unreachable store both mean
    /// there is nothing to crawl yet.
    pub async fn sample_queries(&self, platform: &str, limit: Option<i64>) -> Vec<String> {
        let Some(platform) = normalize_platform(platform) else {
            return Vec::new();
        };
        let limit = clamp_limit(limit, self.config.default_sample_limit);

        let arms = match self.store.arms_for_platform(platform).await {
            Ok(arms) => arms,
            Err(e) => {
                warn!(platform, error = %e, "Failed to load arms, sampling nothing");
                return Vec::new();
            }
        };
        if arms.is_empty() {
            return Vec::new();
        }

        let ranked = scoring::rank(
            &arms,
            self.config.exploration_weight,
            self.config.jitter_ceiling,
            &mut rand::rng(),
        );

        let mut seen = HashSet::new();
        let picked: Vec<String> = ranked
            .iter()
            .map(|scored| scored.arm.query_text.trim())
            .filter(|q| !q.is_empty() && seen.insert(*q))
            .take(limit)
            .map(str::to_string)
            .collect();

        debug!(platform, arms = arms.len(), picked = picked.len(), "Sampled queries");
        picked
    }

    /// Fold one crawl outcome into the arm's belief, creating the arm if needed.
    ///
    /// Returns `false` when the report was skipped for a blank or invalid
    /// platform/query.
    pub async fn report_reward(
        &self,
        platform: &str,
        query: &str,
        reward: f64,
        trials: i64,
    ) -> Result<bool> {
        let (Some(platform), Some(query)) = (normalize_platform(platform), normalize_query(query))
        else {
            return Ok(false);
        };

        let delta = BeliefDelta::from_report(clamp_reward(reward), clamp_trials(trials));
        self.store.apply_reward(platform, query, delta).await?;
        Ok(true)
    }

    /// Apply a batch of reports in order, each independently.
    ///
    /// Stops at the first store failure; reports already applied stay applied.
    /// Returns how many reports were applied.
    pub async fn report_rewards(&self, platform: &str, items: &[RewardReport]) -> Result<usize> {
        let mut applied = 0;
        for item in items {
            if self
                .report_reward(platform, &item.query, item.reward, item.trials)
                .await?
            {
                applied += 1;
            }
        }
        debug!(platform, submitted = items.len(), applied, "Rewards reported");
        Ok(applied)
    }

    /// Most recently updated arms with their current beliefs. No exploration term.
    pub async fn list_top(&self, platform: &str, limit: Option<i64>) -> Result<Vec<ArmSummary>> {
        let Some(platform) = normalize_platform(platform) else {
            return Ok(Vec::new());
        };
        let limit = clamp_limit(limit, self.config.default_list_limit);

        let arms = self.store.recent_arms(platform, limit).await?;
        Ok(arms.into_iter().map(ArmSummary::from).collect())
    }
}
