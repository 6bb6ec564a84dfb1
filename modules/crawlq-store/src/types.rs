//! Arm rows and the belief delta applied by a reward report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uniform Beta(1, 1) prior: one pseudo-success, one pseudo-failure.
pub const PRIOR_ALPHA: f64 = 1.0;
pub const PRIOR_BETA: f64 = 1.0;

/// A candidate crawl query for a platform, with its Beta-Bernoulli belief.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Arm {
    pub platform: String,
    pub query_text: String,
    pub alpha: f64,
    pub beta: f64,
    pub last_reward: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Arm {
    /// Fresh arm at the neutral prior.
    pub fn seeded(platform: &str, query_text: &str, now: DateTime<Utc>) -> Self {
        Self {
            platform: platform.to_string(),
            query_text: query_text.to_string(),
            alpha: PRIOR_ALPHA,
            beta: PRIOR_BETA,
            last_reward: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Posterior mean success probability.
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta).max(1e-9)
    }

    /// Bernoulli trials absorbed into the posterior (prior mass removed).
    pub fn pulls(&self) -> f64 {
        ((self.alpha - PRIOR_ALPHA) + (self.beta - PRIOR_BETA)).max(0.0)
    }
}

/// Increment produced by one reward report: `trials` Bernoulli draws at
/// empirical success rate `reward`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeliefDelta {
    pub success: f64,
    pub failure: f64,
    pub reward: f64,
}

impl BeliefDelta {
    /// Inputs must already be clamped (`reward` in `[0, 1]`, `trials >= 1`).
    pub fn from_report(reward: f64, trials: u32) -> Self {
        let w = f64::from(trials);
        Self {
            success: reward * w,
            failure: (1.0 - reward) * w,
            reward,
        }
    }

    /// `alpha` for an arm created by this report on top of the prior.
    pub fn initial_alpha(&self) -> f64 {
        PRIOR_ALPHA + self.success
    }

    /// `beta` for an arm created by this report on top of the prior.
    pub fn initial_beta(&self) -> f64 {
        PRIOR_BETA + self.failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_arm_sits_at_neutral_prior() {
        let arm = Arm::seeded("weibo", "coffee", Utc::now());
        assert_eq!(arm.alpha, 1.0);
        assert_eq!(arm.beta, 1.0);
        assert_eq!(arm.pulls(), 0.0);
        assert!((arm.mean() - 0.5).abs() < 1e-12);
        assert!(arm.last_reward.is_none());
    }

    #[test]
    fn delta_splits_trials_by_reward() {
        let d = BeliefDelta::from_report(0.25, 8);
        assert_eq!(d.success, 2.0);
        assert_eq!(d.failure, 6.0);
        assert_eq!(d.success + d.failure, 8.0);
    }

    #[test]
    fn delta_on_fresh_prior_conserves_mass() {
        let d = BeliefDelta::from_report(0.5, 4);
        assert_eq!(d.initial_alpha(), 3.0);
        assert_eq!(d.initial_beta(), 3.0);
        assert_eq!(d.initial_alpha() + d.initial_beta(), 2.0 + 4.0);
    }

    #[test]
    fn pulls_recover_trial_count() {
        let mut arm = Arm::seeded("p", "q", Utc::now());
        arm.alpha += 7.0;
        arm.beta += 3.0;
        assert_eq!(arm.pulls(), 10.0);
        assert!((arm.mean() - 8.0 / 12.0).abs() < 1e-12);
    }
}
