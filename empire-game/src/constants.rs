//! Centralized balance and tuning constants for the delivery economy.
//!
//! These values define the deterministic math for the core game loop.
//! Keeping them together ensures that balance can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Persistence ---------------------------------------------------------------
/// Fixed slot name for the single local save.
pub const SAVE_SLOT: &str = "empire.save";
pub(crate) const AUTOSAVE_INTERVAL_SECS: f64 = 30.0;

// Starting state ------------------------------------------------------------
pub(crate) const START_MONEY: i64 = 1_000;
pub(crate) const START_LEVEL: i32 = 1;
pub(crate) const START_REPUTATION: f32 = 50.0;

// Reward tuning -------------------------------------------------------------
/// Bonus dollars per unused second within an order's time limit.
pub(crate) const TIME_BONUS_RATE: f64 = 2.0;

// Progression tuning --------------------------------------------------------
pub(crate) const XP_PER_REPUTATION_POINT: f32 = 10.0;
pub(crate) const XP_PER_LEVEL: i32 = 100;
pub(crate) const LEVEL_MONEY_BONUS_PER_LEVEL: i64 = 100;
pub(crate) const LEVEL_REPUTATION_BONUS: f32 = 5.0;

// Staffing tuning -----------------------------------------------------------
pub(crate) const STAFF_BASE_COST: i64 = 200;
pub(crate) const STAFF_COST_PER_LEVEL: i64 = 50;
pub(crate) const STAFF_REPUTATION_BONUS: f32 = 2.0;

// City plan -----------------------------------------------------------------
/// Interaction radius for pickup and drop-off zones, in world units.
pub(crate) const ZONE_RADIUS: f32 = 50.0;
