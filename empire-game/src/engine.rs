//! Session engine: owns the game state and applies every mutation.
//!
//! All state transitions happen here, synchronously, in response to discrete
//! external events (a zone overlap, a button intent, the per-second tick).
//! Each mutating operation applies its whole field batch before returning,
//! so a reader between two calls never observes a partial update.
use log::{info, warn};

use crate::GameStorage;
use crate::catalog::{DeliveryKind, Destination, uniform_pick};
use crate::constants::{AUTOSAVE_INTERVAL_SECS, SAVE_SLOT};
use crate::notify::{Notification, NotificationQueue};
use crate::orders::{CompletedDelivery, FailedDelivery, Order};
use crate::progression::{self, LevelCheck};
use crate::state::GameState;
use crate::summary::{BusinessStats, HudSnapshot};
use crate::upgrades::{self, HireOutcome, UpgradeOutcome};

/// What [`GameEngine::tick`] does once an active order's time limit has
/// fully elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeoutPolicy {
    /// Keep the order running; the time bonus has already decayed to zero.
    #[default]
    Lenient,
    /// Fail the order on the tick the remaining time reaches zero.
    AutoFail,
}

/// The delivery-business session engine.
///
/// Constructed once per session and handed by reference to the view and UI
/// layers. Time is supplied by the caller as seconds on the render loop's
/// clock; the engine never reads a wall clock.
pub struct GameEngine<S: GameStorage> {
    state: GameState,
    storage: S,
    notifications: NotificationQueue,
    timeout_policy: TimeoutPolicy,
    last_autosave: f64,
}

impl<S: GameStorage> GameEngine<S> {
    /// Start a fresh session with first-boot state.
    #[must_use]
    pub fn new(storage: S, seed: u64) -> Self {
        Self {
            state: GameState::default().with_seed(seed),
            storage,
            notifications: NotificationQueue::new(),
            timeout_policy: TimeoutPolicy::default(),
            last_autosave: 0.0,
        }
    }

    /// Start a session from the saved record if one exists, falling back to
    /// first-boot state. A record that cannot be read is discarded.
    #[must_use]
    pub fn load_or_new(storage: S, seed: u64) -> Self {
        let state = match storage.load(SAVE_SLOT) {
            Ok(Some(saved)) => saved.rehydrate(),
            Ok(None) => GameState::default().with_seed(seed),
            Err(err) => {
                warn!("discarding unreadable save: {err}");
                GameState::default().with_seed(seed)
            }
        };
        Self {
            state,
            storage,
            notifications: NotificationQueue::new(),
            timeout_policy: TimeoutPolicy::default(),
            last_autosave: 0.0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Apply a closure to the mutable game state.
    pub fn with_state_mut<R>(&mut self, f: impl FnOnce(&mut GameState) -> R) -> R {
        f(&mut self.state)
    }

    #[must_use]
    pub const fn timeout_policy(&self) -> TimeoutPolicy {
        self.timeout_policy
    }

    pub fn set_timeout_policy(&mut self, policy: TimeoutPolicy) {
        self.timeout_policy = policy;
    }

    /// Start a new delivery run with a random order type and destination.
    ///
    /// At most one order is in flight at a time; a second start request is
    /// ignored. Returns whether a run was started.
    pub fn start_run(&mut self, now: f64) -> bool {
        if self.state.current_order.is_some() {
            info!("delivery already in progress; start request ignored");
            return false;
        }

        let (kind, destination) = match self.state.rng.as_mut() {
            Some(rng) => (
                uniform_pick(&DeliveryKind::ALL, rng).unwrap_or_default(),
                uniform_pick(&Destination::ALL, rng).unwrap_or_default(),
            ),
            None => (DeliveryKind::default(), Destination::default()),
        };
        let order = Order::new(kind, destination, now);
        self.state.current_order = Some(order);
        self.push(Notification::info(format!(
            "New {kind} delivery to {destination}!"
        )));
        true
    }

    /// Complete the active run, paying the base reward plus the time bonus.
    ///
    /// No-op (with a log line) when no order is active. Returns whether a
    /// delivery was recorded.
    pub fn complete_order(&mut self, now: f64) -> bool {
        let Some(order) = self.state.current_order else {
            info!("no active delivery; complete request ignored");
            return false;
        };

        let elapsed = order.elapsed(now);
        let time_bonus = order.time_bonus(elapsed);
        let total_reward = order.total_reward(elapsed);

        self.state.money += total_reward;
        self.state.deliveries += 1;
        self.state.score += total_reward;
        self.state.total_earnings += total_reward;
        progression::gain_reputation(&mut self.state, order.reputation_gain);
        self.state.consecutive_deliveries += 1;
        self.state.experience += progression::experience_gain(order.reputation_gain);

        if let LevelCheck::LeveledUp { new_level } = progression::check_level_up(&mut self.state) {
            self.push(Notification::success(format!(
                "Level up! You are now level {new_level}!"
            )));
        }

        self.state.completed_deliveries.push(CompletedDelivery {
            order,
            completion_time: elapsed,
            time_bonus,
            total_reward,
            completed_at: now,
        });
        self.state.record_completion_time(elapsed);
        self.state.current_order = None;

        self.save();
        self.push(Notification::success(format!(
            "Delivery completed! +${total_reward}"
        )));
        true
    }

    /// Fail the active run, forfeiting the staked reputation.
    ///
    /// No-op (with a log line) when no order is active. Returns whether a
    /// failure was recorded.
    pub fn fail_order(&mut self, now: f64) -> bool {
        let Some(order) = self.state.current_order else {
            info!("no active delivery; fail request ignored");
            return false;
        };

        progression::lose_reputation(&mut self.state, order.reputation_gain);
        self.state.consecutive_deliveries = 0;
        self.state.failed_deliveries.push(FailedDelivery {
            order,
            failed_at: now,
        });
        self.state.current_order = None;

        self.save();
        self.push(Notification::error("Delivery failed! Reputation decreased."));
        true
    }

    /// Buy the next vehicle tier if one is affordable.
    pub fn upgrade_vehicle(&mut self) -> UpgradeOutcome {
        let outcome = upgrades::upgrade_vehicle(&mut self.state);
        match outcome {
            UpgradeOutcome::Upgraded { tier, .. } => {
                self.save();
                self.push(Notification::success(format!("Upgraded to {tier}!")));
            }
            UpgradeOutcome::NoAffordableUpgrade => {
                self.push(Notification::info("No affordable upgrades available."));
            }
        }
        outcome
    }

    /// Hire a staff member, trading money for reputation.
    pub fn hire_staff(&mut self) -> HireOutcome {
        let outcome = upgrades::hire_staff(&mut self.state);
        match outcome {
            HireOutcome::Hired { .. } => {
                self.save();
                self.push(Notification::success(
                    "Staff member hired! Reputation increased.",
                ));
            }
            HireOutcome::InsufficientFunds { .. } => {
                self.push(Notification::error("Not enough money to hire staff."));
            }
        }
        outcome
    }

    /// Flip the pause flag, returning the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.state.is_paused = !self.state.is_paused;
        self.state.is_paused
    }

    pub fn resume(&mut self) {
        self.state.is_paused = false;
    }

    /// Scene restart: abandon the active order without penalty and unpause.
    /// Not a wipe; money, progression, and the ledgers survive.
    pub fn restart(&mut self) {
        self.state.current_order = None;
        self.state.is_paused = false;
    }

    /// Overwrite everything with first-boot defaults and persist the wipe.
    pub fn reset(&mut self) {
        let seed = self.state.seed;
        self.state = GameState::default().with_seed(seed);
        self.save();
    }

    /// Per-second housekeeping: the timeout hook and the autosave cadence.
    ///
    /// With [`TimeoutPolicy::AutoFail`], an order whose remaining time has
    /// reached zero fails on this tick; the default policy leaves it running
    /// at zero bonus. Autosave is an idempotent snapshot write every
    /// 30 seconds, independent of any manual save.
    pub fn tick(&mut self, now: f64) {
        if self.timeout_policy == TimeoutPolicy::AutoFail
            && !self.state.is_paused
            && let Some(order) = self.state.current_order
            && order.is_expired(now)
        {
            self.fail_order(now);
        }

        if now - self.last_autosave >= AUTOSAVE_INTERVAL_SECS {
            self.last_autosave = now;
            self.save();
        }
    }

    /// Manual snapshot save, e.g. on exit intent.
    pub fn save_now(&mut self) {
        self.save();
    }

    /// Drain pending notifications for the toast layer.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    /// Read-only HUD projection with the order countdown computed at `now`.
    #[must_use]
    pub fn snapshot(&self, now: f64) -> HudSnapshot {
        HudSnapshot::from_state(&self.state, now)
    }

    /// Aggregate business statistics for the dashboard.
    #[must_use]
    pub fn stats(&self) -> BusinessStats {
        BusinessStats::from_state(&self.state)
    }

    fn save(&mut self) {
        // Best-effort: a full storage slot must not end the game.
        if let Err(err) = self.storage.save(SAVE_SLOT, &self.state) {
            warn!("failed to save game state: {err}");
        }
    }

    fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}
