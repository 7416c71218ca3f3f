//! Delivery orders and their completion/failure records.
use serde::{Deserialize, Serialize};

use crate::catalog::{DeliveryKind, Destination};
use crate::constants::TIME_BONUS_RATE;
use crate::numbers;

/// The single in-flight delivery contract. At most one exists at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub kind: DeliveryKind,
    pub destination: Destination,
    /// Base reward in whole dollars.
    pub reward: i64,
    /// Seconds allowed before the time bonus decays to zero.
    pub time_limit: f64,
    pub reputation_gain: f32,
    /// Engine-clock second at which the run started.
    pub started_at: f64,
}

impl Order {
    /// Build an order from its catalog profile.
    #[must_use]
    pub fn new(kind: DeliveryKind, destination: Destination, now: f64) -> Self {
        let profile = kind.profile();
        Self {
            kind,
            destination,
            reward: profile.reward,
            time_limit: profile.time_limit,
            reputation_gain: profile.reputation_gain,
            started_at: now,
        }
    }

    /// Seconds elapsed since the run started.
    #[must_use]
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.started_at).max(0.0)
    }

    /// Seconds left within the time limit. Zero once the limit has passed.
    #[must_use]
    pub fn remaining(&self, now: f64) -> f64 {
        (self.time_limit - self.elapsed(now)).max(0.0)
    }

    #[must_use]
    pub fn is_expired(&self, now: f64) -> bool {
        self.remaining(now) <= 0.0
    }

    /// Bonus dollars for unused time. Zero once the limit has passed;
    /// completion past the limit still pays the base reward.
    #[must_use]
    pub fn time_bonus(&self, elapsed: f64) -> i64 {
        numbers::floor_f64_to_i64((self.time_limit - elapsed).max(0.0) * TIME_BONUS_RATE)
    }

    /// Base reward plus time bonus for the given completion time.
    #[must_use]
    pub fn total_reward(&self, elapsed: f64) -> i64 {
        self.reward + self.time_bonus(elapsed)
    }
}

/// Ledger record of a completed delivery, appended in completion order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletedDelivery {
    pub order: Order,
    /// Seconds the run took.
    pub completion_time: f64,
    pub time_bonus: i64,
    pub total_reward: i64,
    /// Engine-clock second of completion.
    pub completed_at: f64,
}

/// Ledger record of a failed delivery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FailedDelivery {
    pub order: Order,
    /// Engine-clock second of failure.
    pub failed_at: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_order() -> Order {
        Order::new(DeliveryKind::Standard, Destination::DowntownOffice, 0.0)
    }

    #[test]
    fn bonus_decays_linearly_and_clamps_at_zero() {
        let order = standard_order();
        assert_eq!(order.time_bonus(0.0), 600);
        assert_eq!(order.time_bonus(100.0), 400);
        assert_eq!(order.time_bonus(300.0), 0);
        assert_eq!(order.time_bonus(1_000.0), 0);
    }

    #[test]
    fn total_reward_matches_published_example() {
        let order = standard_order();
        assert_eq!(order.total_reward(100.0), 425);
    }

    #[test]
    fn expired_order_still_pays_base_reward() {
        let order = standard_order();
        assert!(order.is_expired(301.0));
        assert_eq!(order.total_reward(301.0), 25);
    }

    #[test]
    fn elapsed_never_runs_backwards() {
        let order = Order::new(DeliveryKind::Urgent, Destination::CityMall, 50.0);
        assert!(order.elapsed(10.0).abs() < f64::EPSILON);
        assert!((order.remaining(10.0) - 180.0).abs() < f64::EPSILON);
        assert!((order.remaining(110.0) - 120.0).abs() < f64::EPSILON);
    }
}
