//! Adaptive query sampler.
//!
//! Decides which search queries a crawler should try next on a platform and
//! learns from the rewards it reports back. Each query is an arm with a
//! Beta-Bernoulli belief; ranking adds an exploration bonus that shrinks as
//! evidence accumulates.

pub mod sampler;
pub mod scoring;
pub mod types;

pub use sampler::{AdaptiveQuerySampler, SamplerConfig};
pub use types::{ArmSummary, RewardReport};
