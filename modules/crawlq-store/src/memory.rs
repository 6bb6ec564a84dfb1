//! MemoryArmStore: in-process arm table for local runs and tests.
//!
//! Every read-modify-write happens under a single mutex guard, so concurrent
//! reward reports for the same arm land cumulatively.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crawlq_common::{Result, SamplerError};

use crate::store::ArmStore;
use crate::types::{Arm, BeliefDelta};

type ArmKey = (String, String);

#[derive(Default)]
struct State {
    arms: HashMap<ArmKey, Slot>,
    // Monotonic touch counter; orders updates that share a timestamp.
    clock: u64,
}

struct Slot {
    arm: Arm,
    touched: u64,
}

#[derive(Default)]
pub struct MemoryArmStore {
    state: Mutex<State>,
}

impl MemoryArmStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of arms across all platforms.
    pub fn len(&self) -> usize {
        self.inspect().arms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of one arm, if present.
    pub fn get(&self, platform: &str, query: &str) -> Option<Arm> {
        self.inspect()
            .arms
            .get(&(platform.to_string(), query.to_string()))
            .map(|slot| slot.arm.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| SamplerError::StoreUnavailable("memory store lock poisoned".into()))
    }

    /// Read-only access for inspection. A poisoned lock still yields the data;
    /// store operations keep reporting it as unavailable.
    fn inspect(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ArmStore for MemoryArmStore {
    async fn insert_if_absent(&self, platform: &str, queries: &[String]) -> Result<u64> {
        let mut state = self.lock()?;
        let now = Utc::now();
        let mut created = 0;

        for query in queries {
            let key = (platform.to_string(), query.clone());
            if state.arms.contains_key(&key) {
                continue;
            }
            state.clock += 1;
            let touched = state.clock;
            state.arms.insert(
                key,
                Slot {
                    arm: Arm::seeded(platform, query, now),
                    touched,
                },
            );
            created += 1;
        }

        Ok(created)
    }

    async fn apply_reward(&self, platform: &str, query: &str, delta: BeliefDelta) -> Result<()> {
        let mut state = self.lock()?;
        let now = Utc::now();
        state.clock += 1;
        let touched = state.clock;

        let slot = state
            .arms
            .entry((platform.to_string(), query.to_string()))
            .or_insert_with(|| Slot {
                arm: Arm::seeded(platform, query, now),
                touched,
            });

        slot.arm.alpha += delta.success;
        slot.arm.beta += delta.failure;
        slot.arm.last_reward = Some(delta.reward);
        slot.arm.updated_at = now;
        slot.touched = touched;
        Ok(())
    }

    async fn arms_for_platform(&self, platform: &str) -> Result<Vec<Arm>> {
        let state = self.lock()?;
        Ok(state
            .arms
            .values()
            .filter(|slot| slot.arm.platform == platform)
            .map(|slot| slot.arm.clone())
            .collect())
    }

    async fn recent_arms(&self, platform: &str, limit: usize) -> Result<Vec<Arm>> {
        let state = self.lock()?;
        let mut slots: Vec<&Slot> = state
            .arms
            .values()
            .filter(|slot| slot.arm.platform == platform)
            .collect();
        slots.sort_by(|a, b| b.touched.cmp(&a.touched));
        Ok(slots
            .into_iter()
            .take(limit)
            .map(|slot| slot.arm.clone())
            .collect())
    }
}
