//! UCB-style scoring over Beta-Bernoulli arms.
//!
//! `score = mean + weight * sqrt(ln(t + 1) / (pulls + 1)) + jitter`
//!
//! `t` is the total number of trials absorbed across the platform (at least 1),
//! `pulls` the trials absorbed by the arm itself. Jitter only breaks ties.

use rand::Rng;

use crawlq_store::Arm;

/// Weight of the exploration term.
pub const EXPLORATION_WEIGHT: f64 = 0.35;

/// Upper bound (exclusive) of the uniform tie-breaking jitter.
pub const JITTER_CEILING: f64 = 0.0005;

/// Sum of trials absorbed by every arm, floored at 1.
pub fn total_pulls(arms: &[Arm]) -> f64 {
    arms.iter().map(Arm::pulls).sum::<f64>().max(1.0)
}

/// Exploration bonus for an arm with `pulls` trials out of `t` in total.
pub fn exploration_bonus(t: f64, pulls: f64) -> f64 {
    ((t + 1.0).ln() / (pulls + 1.0)).sqrt()
}

/// Deterministic part of the score.
pub fn ucb_score(arm: &Arm, t: f64, exploration_weight: f64) -> f64 {
    arm.mean() + exploration_weight * exploration_bonus(t, arm.pulls())
}

#[derive(Debug, Clone, Copy)]
pub struct ScoredArm<'a> {
    pub arm: &'a Arm,
    pub score: f64,
}

/// Score every arm and sort highest first.
pub fn rank<'a, R: Rng>(
    arms: &'a [Arm],
    exploration_weight: f64,
    jitter_ceiling: f64,
    rng: &mut R,
) -> Vec<ScoredArm<'a>> {
    let t = total_pulls(arms);

    let mut scored: Vec<ScoredArm<'a>> = arms
        .iter()
        .map(|arm| {
            let jitter = if jitter_ceiling > 0.0 {
                rng.random_range(0.0..jitter_ceiling)
            } else {
                0.0
            };
            ScoredArm {
                arm,
                score: ucb_score(arm, t, exploration_weight) + jitter,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored
}
