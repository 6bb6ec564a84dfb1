//! Persistent belief table for the adaptive query sampler.
//!
//! One row per `(platform, query_text)` arm. The store owns the two
//! primitives the sampler depends on for correctness under concurrency:
//! compare-and-skip insert, and atomic increment-or-create of `alpha`/`beta`.

pub mod memory;
pub mod postgres;
pub mod store;
pub mod types;

pub use memory::MemoryArmStore;
pub use postgres::PgArmStore;
pub use store::ArmStore;
pub use types::{Arm, BeliefDelta, PRIOR_ALPHA, PRIOR_BETA};
