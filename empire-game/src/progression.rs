//! Level and reputation progression.
use crate::constants::{
    LEVEL_MONEY_BONUS_PER_LEVEL, LEVEL_REPUTATION_BONUS, XP_PER_LEVEL, XP_PER_REPUTATION_POINT,
};
use crate::numbers;
use crate::state::GameState;

/// Outcome of a level check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelCheck {
    Unchanged,
    LeveledUp { new_level: i32 },
}

/// Level implied by an experience total.
#[must_use]
pub const fn level_for_experience(experience: i32) -> i32 {
    experience / XP_PER_LEVEL + 1
}

/// Experience granted for a completed run with the given reputation stake.
#[must_use]
pub fn experience_gain(reputation_gain: f32) -> i32 {
    numbers::round_f32_to_i32(reputation_gain * XP_PER_REPUTATION_POINT)
}

/// Promote the player if the experience total crossed a level threshold.
///
/// A large experience jump lands directly on the final computed level and
/// pays out a single bonus; intermediate thresholds are not iterated.
pub fn check_level_up(state: &mut GameState) -> LevelCheck {
    let new_level = level_for_experience(state.experience);
    if new_level <= state.level {
        return LevelCheck::Unchanged;
    }
    state.level = new_level;
    state.money += i64::from(new_level) * LEVEL_MONEY_BONUS_PER_LEVEL;
    gain_reputation(state, LEVEL_REPUTATION_BONUS);
    LevelCheck::LeveledUp { new_level }
}

/// Raise reputation by a non-negative delta.
pub fn gain_reputation(state: &mut GameState, amount: f32) {
    if amount <= 0.0 {
        return;
    }
    state.reputation += amount;
}

/// Lower reputation, clamping at the zero floor.
pub fn lose_reputation(state: &mut GameState, amount: f32) {
    if amount <= 0.0 {
        return;
    }
    state.reputation = (state.reputation - amount).max(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_curve_floors_per_hundred_points() {
        assert_eq!(level_for_experience(0), 1);
        assert_eq!(level_for_experience(99), 1);
        assert_eq!(level_for_experience(100), 2);
        assert_eq!(level_for_experience(250), 3);
    }

    #[test]
    fn multi_threshold_jump_grants_one_bonus() {
        let mut state = GameState::default();
        state.experience = 250;
        let money_before = state.money;
        let reputation_before = state.reputation;

        let check = check_level_up(&mut state);

        assert_eq!(check, LevelCheck::LeveledUp { new_level: 3 });
        assert_eq!(state.level, 3);
        assert_eq!(state.money, money_before + 300);
        assert!((state.reputation - reputation_before - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn check_is_idempotent_between_thresholds() {
        let mut state = GameState::default();
        state.experience = 250;
        assert_ne!(check_level_up(&mut state), LevelCheck::Unchanged);

        let money_after_first = state.money;
        assert_eq!(check_level_up(&mut state), LevelCheck::Unchanged);
        assert_eq!(state.money, money_after_first);
        assert_eq!(state.level, 3);
    }

    #[test]
    fn reputation_floor_holds_under_repeated_losses() {
        let mut state = GameState::default();
        state.reputation = 3.0;
        lose_reputation(&mut state, 2.0);
        assert!((state.reputation - 1.0).abs() < f32::EPSILON);
        lose_reputation(&mut state, 10.0);
        assert!(state.reputation.abs() < f32::EPSILON);
        lose_reputation(&mut state, 1.0);
        assert!(state.reputation >= 0.0);
    }

    #[test]
    fn experience_gain_scales_with_stake() {
        assert_eq!(experience_gain(1.0), 10);
        assert_eq!(experience_gain(3.0), 30);
    }

    #[test]
    fn non_positive_deltas_do_not_change_state() {
        let mut state = GameState::default();
        gain_reputation(&mut state, 0.0);
        lose_reputation(&mut state, -1.0);
        assert!((state.reputation - 50.0).abs() < f32::EPSILON);
    }
}
