//! Read-only display projections of the game state.
use serde::Serialize;

use crate::catalog::{DeliveryKind, Destination, VehicleId};
use crate::numbers;
use crate::state::GameState;

/// Active-order card data with the countdown computed at read time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderView {
    pub kind: DeliveryKind,
    pub destination: Destination,
    pub reward: i64,
    pub reputation_gain: f32,
    /// Seconds left within the time limit, clamped at zero.
    pub remaining: f64,
}

/// Everything the HUD needs for one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub money: i64,
    pub level: i32,
    pub reputation: f32,
    pub vehicle: VehicleId,
    pub deliveries: u32,
    pub score: i64,
    pub current_order: Option<OrderView>,
}

impl HudSnapshot {
    #[must_use]
    pub fn from_state(state: &GameState, now: f64) -> Self {
        Self {
            money: state.money,
            level: state.level,
            reputation: state.reputation,
            vehicle: state.vehicle,
            deliveries: state.deliveries,
            score: state.score,
            current_order: state.current_order.map(|order| OrderView {
                kind: order.kind,
                destination: order.destination,
                reward: order.reward,
                reputation_gain: order.reputation_gain,
                remaining: order.remaining(now),
            }),
        }
    }
}

/// Aggregate business statistics for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BusinessStats {
    pub total_deliveries: u32,
    pub total_earnings: i64,
    /// Mean completion time in seconds; zero with no completions.
    pub average_delivery_time: f64,
    /// Completions as a percentage of all finished runs; zero with none.
    pub success_rate_pct: f64,
    pub best_time: Option<f64>,
    pub current_streak: u32,
}

impl BusinessStats {
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let completed = state.completed_deliveries.len();
        let failed = state.failed_deliveries.len();

        let average_delivery_time = if completed == 0 {
            0.0
        } else {
            let total: f64 = state
                .completed_deliveries
                .iter()
                .map(|record| record.completion_time)
                .sum();
            total / numbers::usize_to_f64(completed)
        };

        let success_rate_pct = if completed == 0 {
            0.0
        } else {
            numbers::usize_to_f64(completed) / numbers::usize_to_f64(completed + failed) * 100.0
        };

        Self {
            total_deliveries: state.deliveries,
            total_earnings: state.total_earnings,
            average_delivery_time,
            success_rate_pct,
            best_time: state.best_time,
            current_streak: state.consecutive_deliveries,
        }
    }
}

/// Format whole dollars with thousands separators, e.g. `$1,234`.
#[must_use]
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Format a second count as `m:ss` for the order countdown.
#[must_use]
pub fn format_clock(seconds: f64) -> String {
    let total = numbers::floor_f64_to_i64(seconds.max(0.0));
    format!("{}:{:02}", total / 60, total % 60)
}
