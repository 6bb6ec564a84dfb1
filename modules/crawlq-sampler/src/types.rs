use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crawlq_store::Arm;

/// One crawl outcome for a query: `trials` items evaluated, `reward` their
/// aggregate success rate. Out-of-range values are clamped when applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardReport {
    pub query: String,
    pub reward: f64,
    pub trials: i64,
}

impl RewardReport {
    pub fn new(query: impl Into<String>, reward: f64, trials: i64) -> Self {
        Self {
            query: query.into(),
            reward,
            trials,
        }
    }
}

/// Informational view of an arm for the top listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmSummary {
    pub platform: String,
    pub query: String,
    pub mean_reward: f64,
    pub alpha: f64,
    pub beta: f64,
    pub last_reward: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

impl From<Arm> for ArmSummary {
    fn from(arm: Arm) -> Self {
        Self {
            mean_reward: arm.mean(),
            platform: arm.platform,
            query: arm.query_text,
            alpha: arm.alpha,
            beta: arm.beta,
            last_reward: arm.last_reward,
            updated_at: arm.updated_at,
        }
    }
}
