//! The persistent game-state aggregate.
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::VehicleId;
use crate::constants::{START_LEVEL, START_MONEY, START_REPUTATION};
use crate::orders::{CompletedDelivery, FailedDelivery, Order};

fn default_money() -> i64 {
    START_MONEY
}

fn default_level() -> i32 {
    START_LEVEL
}

fn default_reputation() -> f32 {
    START_REPUTATION
}

/// The single mutable aggregate the engines operate on, persisted as one
/// serialized record.
///
/// Every field carries a serde default so that records written by older
/// builds deserialize cleanly, with new fields falling back to their
/// first-boot values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_money")]
    pub money: i64,
    #[serde(default = "default_level")]
    pub level: i32,
    #[serde(default)]
    pub experience: i32,
    /// Progression currency with a hard floor at zero and no ceiling.
    #[serde(default = "default_reputation")]
    pub reputation: f32,
    #[serde(default)]
    pub vehicle: VehicleId,
    /// Deliveries completed this session.
    #[serde(default)]
    pub deliveries: u32,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub total_earnings: i64,
    #[serde(default)]
    pub current_order: Option<Order>,
    /// Append-only; insertion order is completion order.
    #[serde(default)]
    pub completed_deliveries: Vec<CompletedDelivery>,
    #[serde(default)]
    pub failed_deliveries: Vec<FailedDelivery>,
    /// Fastest completion ever recorded, in seconds.
    #[serde(default)]
    pub best_time: Option<f64>,
    /// Current success streak. Reset to zero by any failure.
    #[serde(default)]
    pub consecutive_deliveries: u32,
    #[serde(default)]
    pub is_paused: bool,
    #[serde(skip)]
    pub rng: Option<ChaCha8Rng>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            seed: 0,
            money: default_money(),
            level: default_level(),
            experience: 0,
            reputation: default_reputation(),
            vehicle: VehicleId::Bike,
            deliveries: 0,
            score: 0,
            total_earnings: 0,
            current_order: None,
            completed_deliveries: Vec::new(),
            failed_deliveries: Vec::new(),
            best_time: None,
            consecutive_deliveries: 0,
            is_paused: false,
            rng: None,
        }
    }
}

impl GameState {
    /// Attach a deterministic RNG derived from the given seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.rng = Some(ChaCha8Rng::seed_from_u64(seed));
        self
    }

    /// Re-create the skip-serialized RNG from the stored seed after a load.
    #[must_use]
    pub fn rehydrate(mut self) -> Self {
        self.rng = Some(ChaCha8Rng::seed_from_u64(self.seed));
        self
    }

    #[must_use]
    pub const fn has_active_order(&self) -> bool {
        self.current_order.is_some()
    }

    /// Fold a new completion time into the best-time record.
    /// The stored value only ever moves downward.
    pub fn record_completion_time(&mut self, elapsed: f64) {
        self.best_time = Some(match self.best_time {
            Some(best) if best <= elapsed => best,
            _ => elapsed,
        });
    }
}
