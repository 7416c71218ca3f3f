//! Vehicle-tier upgrades and staff hiring.
use crate::catalog::VehicleId;
use crate::constants::{STAFF_BASE_COST, STAFF_COST_PER_LEVEL, STAFF_REPUTATION_BONUS};
use crate::progression;
use crate::state::GameState;

/// Result of a vehicle upgrade attempt. Finding nothing affordable is a
/// normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeOutcome {
    Upgraded { tier: VehicleId, cost: i64 },
    NoAffordableUpgrade,
}

/// Result of a staff hiring attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HireOutcome {
    Hired { cost: i64 },
    InsufficientFunds { cost: i64 },
}

/// First catalog tier costing more than the current one that the given
/// funds can cover. Relies on `VehicleId::ALL` being in ascending-cost order.
#[must_use]
pub fn next_affordable_tier(current: VehicleId, money: i64) -> Option<VehicleId> {
    let current_cost = current.tier().cost;
    VehicleId::ALL.into_iter().find(|candidate| {
        let tier = candidate.tier();
        tier.cost > current_cost && money >= tier.cost
    })
}

/// Move to the next affordable tier, debiting its full cost.
pub fn upgrade_vehicle(state: &mut GameState) -> UpgradeOutcome {
    match next_affordable_tier(state.vehicle, state.money) {
        Some(tier) => {
            let cost = tier.tier().cost;
            state.money -= cost;
            state.vehicle = tier;
            UpgradeOutcome::Upgraded { tier, cost }
        }
        None => UpgradeOutcome::NoAffordableUpgrade,
    }
}

/// Cost of the next staff hire. Scales with player level.
#[must_use]
pub fn staff_cost(level: i32) -> i64 {
    STAFF_BASE_COST + i64::from(level) * STAFF_COST_PER_LEVEL
}

/// Hire a staff member if funds allow, trading money for reputation.
pub fn hire_staff(state: &mut GameState) -> HireOutcome {
    let cost = staff_cost(state.level);
    if state.money < cost {
        return HireOutcome::InsufficientFunds { cost };
    }
    state.money -= cost;
    progression::gain_reputation(state, STAFF_REPUTATION_BONUS);
    HireOutcome::Hired { cost }
}
