//! Delivery Empire Game Engine
//!
//! Platform-agnostic core logic for the Delivery Empire courier game.
//! This crate provides the delivery-run state machine and economy without
//! UI or platform-specific dependencies: the rendering layer feeds in
//! player positions, zone overlaps, and a per-second tick, and reads back
//! display snapshots and toast notifications.

pub mod catalog;
pub mod constants;
pub mod engine;
pub mod notify;
pub mod numbers;
pub mod orders;
pub mod progression;
pub mod state;
pub mod summary;
pub mod upgrades;
pub mod zones;

// Re-export commonly used types
pub use catalog::{DeliveryKind, DeliveryProfile, Destination, ParseKeyError, VehicleId, VehicleTier};
pub use constants::SAVE_SLOT;
pub use engine::{GameEngine, TimeoutPolicy};
pub use notify::{Notification, NotificationQueue, Severity};
pub use orders::{CompletedDelivery, FailedDelivery, Order};
pub use progression::LevelCheck;
pub use state::GameState;
pub use summary::{BusinessStats, HudSnapshot, OrderView, format_clock, format_currency};
pub use upgrades::{HireOutcome, UpgradeOutcome};
pub use zones::{CityPlan, DropoffZone, PickupZone, WorldPos, ZoneEvent, ZoneTracker};

/// Trait for abstracting save/load operations.
/// Platform-specific implementations should provide this.
pub trait GameStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save a complete snapshot of the game state under the slot name.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    fn save(&self, slot: &str, state: &GameState) -> Result<(), Self::Error>;

    /// Load the snapshot stored under the slot name, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if a record exists but cannot be read.
    fn load(&self, slot: &str) -> Result<Option<GameState>, Self::Error>;

    /// Delete the snapshot stored under the slot name.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be deleted.
    fn delete(&self, slot: &str) -> Result<(), Self::Error>;
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::convert::Infallible;
    use std::rc::Rc;

    use crate::{GameState, GameStorage};

    /// Shared in-memory storage; clones see the same saves.
    #[derive(Clone, Default)]
    pub(crate) struct MemoryStorage {
        saves: Rc<RefCell<HashMap<String, GameState>>>,
    }

    impl MemoryStorage {
        pub(crate) fn slot(&self, slot: &str) -> Option<GameState> {
            self.saves.borrow().get(slot).cloned()
        }
    }

    impl GameStorage for MemoryStorage {
        type Error = Infallible;

        fn save(&self, slot: &str, state: &GameState) -> Result<(), Self::Error> {
            self.saves
                .borrow_mut()
                .insert(slot.to_string(), state.clone());
            Ok(())
        }

        fn load(&self, slot: &str) -> Result<Option<GameState>, Self::Error> {
            Ok(self.saves.borrow().get(slot).cloned())
        }

        fn delete(&self, slot: &str) -> Result<(), Self::Error> {
            self.saves.borrow_mut().remove(slot);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testutil::MemoryStorage;

    #[test]
    fn engine_state_roundtrips_through_storage() {
        let storage = MemoryStorage::default();
        let mut engine = GameEngine::new(storage.clone(), 0xABCD);
        engine.with_state_mut(|state| {
            state.money = 250;
            state.level = 3;
        });
        engine.save_now();

        let saved = storage.slot(SAVE_SLOT).expect("save exists");
        assert_eq!(saved.money, 250);
        assert_eq!(saved.level, 3);
        assert!(storage.slot("missing-slot").is_none());
    }

    #[test]
    fn serialized_state_reproduces_every_persistent_field() {
        let storage = MemoryStorage::default();
        let mut engine = GameEngine::new(storage, 31);
        engine.start_run(0.0);
        engine.complete_order(45.0);
        engine.start_run(60.0);

        let json = serde_json::to_string(engine.state()).unwrap();
        let loaded: GameState = serde_json::from_str(&json).unwrap();
        let loaded = loaded.rehydrate();

        assert_eq!(loaded.money, engine.state().money);
        assert_eq!(loaded.experience, engine.state().experience);
        assert_eq!(loaded.current_order, engine.state().current_order);
        assert_eq!(
            loaded.completed_deliveries.len(),
            engine.state().completed_deliveries.len()
        );
        assert_eq!(loaded.best_time, engine.state().best_time);
        assert_eq!(loaded.seed, engine.state().seed);
    }

    #[test]
    fn delete_clears_the_slot() {
        let storage = MemoryStorage::default();
        storage.save(SAVE_SLOT, &GameState::default()).unwrap();
        storage.delete(SAVE_SLOT).unwrap();
        assert!(storage.load(SAVE_SLOT).unwrap().is_none());
    }
}
