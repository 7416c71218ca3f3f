//! The fixed city plan and the pickup/drop-off interaction bridge.
//!
//! The rendering layer owns movement and collision; this module only
//! receives position samples and turns zone overlaps into engine calls.
use serde::{Deserialize, Serialize};

use crate::GameStorage;
use crate::catalog::Destination;
use crate::constants::ZONE_RADIUS;
use crate::engine::GameEngine;

/// A 2D world position supplied by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A warehouse the player collects packages from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupZone {
    pub name: &'static str,
    pub at: WorldPos,
}

/// A destination zone packages are delivered to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropoffZone {
    pub destination: Destination,
    pub at: WorldPos,
}

/// The fixed city map: four warehouses and four destination zones.
#[derive(Debug, Clone, PartialEq)]
pub struct CityPlan {
    pub pickups: Vec<PickupZone>,
    pub dropoffs: Vec<DropoffZone>,
    /// Interaction radius in world units.
    pub radius: f32,
}

impl CityPlan {
    /// The default 800x600 city layout.
    #[must_use]
    pub fn default_plan() -> Self {
        Self {
            pickups: vec![
                PickupZone {
                    name: "Warehouse A",
                    at: WorldPos::new(75.0, 200.0),
                },
                PickupZone {
                    name: "Warehouse B",
                    at: WorldPos::new(725.0, 200.0),
                },
                PickupZone {
                    name: "Warehouse C",
                    at: WorldPos::new(75.0, 400.0),
                },
                PickupZone {
                    name: "Warehouse D",
                    at: WorldPos::new(725.0, 400.0),
                },
            ],
            dropoffs: vec![
                DropoffZone {
                    destination: Destination::DowntownOffice,
                    at: WorldPos::new(125.0, 125.0),
                },
                DropoffZone {
                    destination: Destination::CityMall,
                    at: WorldPos::new(675.0, 125.0),
                },
                DropoffZone {
                    destination: Destination::IndustrialPark,
                    at: WorldPos::new(125.0, 525.0),
                },
                DropoffZone {
                    destination: Destination::ResidentialArea,
                    at: WorldPos::new(675.0, 525.0),
                },
            ],
            radius: ZONE_RADIUS,
        }
    }

    /// Pickup zone overlapping the given position, if any.
    #[must_use]
    pub fn pickup_at(&self, pos: WorldPos) -> Option<&PickupZone> {
        self.pickups
            .iter()
            .find(|zone| pos.distance_to(zone.at) < self.radius)
    }

    /// Drop-off zone overlapping the given position, if any.
    #[must_use]
    pub fn dropoff_at(&self, pos: WorldPos) -> Option<&DropoffZone> {
        self.dropoffs
            .iter()
            .find(|zone| pos.distance_to(zone.at) < self.radius)
    }
}

/// A state transition produced by a zone overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneEvent {
    PickedUp { warehouse: &'static str },
    Delivered { destination: Destination },
}

/// Tracks whether the player is empty-handed or carrying a package, and
/// gates the order transitions accordingly.
///
/// Held by the view component alongside its engine reference; the carrying
/// flag is deliberately not part of the persisted [`crate::GameState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneTracker {
    carrying: bool,
}

impl ZoneTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn carrying(&self) -> bool {
        self.carrying
    }

    /// Drop any held package without completing or failing the run.
    /// Called on scene restarts.
    pub fn reset(&mut self) {
        self.carrying = false;
    }

    /// Feed one player-position sample into the engine.
    ///
    /// Empty-handed + warehouse overlap picks a package up (seeding a run if
    /// none is active); carrying + overlap with the active order's
    /// destination delivers it. Re-entering a zone in the same state does
    /// nothing.
    pub fn observe<S: GameStorage>(
        &mut self,
        engine: &mut GameEngine<S>,
        plan: &CityPlan,
        pos: WorldPos,
        now: f64,
    ) -> Option<ZoneEvent> {
        if engine.state().is_paused {
            return None;
        }

        if !self.carrying {
            let zone = plan.pickup_at(pos)?;
            if !engine.state().has_active_order() {
                engine.start_run(now);
            }
            self.carrying = true;
            return Some(ZoneEvent::PickedUp {
                warehouse: zone.name,
            });
        }

        let zone = plan.dropoff_at(pos)?;
        let order = engine.state().current_order?;
        if order.destination != zone.destination {
            return None;
        }
        self.carrying = false;
        engine.complete_order(now);
        Some(ZoneEvent::Delivered {
            destination: zone.destination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameEngine;
    use crate::testutil::MemoryStorage;

    fn engine() -> GameEngine<MemoryStorage> {
        GameEngine::new(MemoryStorage::default(), 1337)
    }

    #[test]
    fn overlap_test_respects_the_radius() {
        let plan = CityPlan::default_plan();
        assert!(plan.pickup_at(WorldPos::new(80.0, 210.0)).is_some());
        assert!(plan.pickup_at(WorldPos::new(75.0, 260.0)).is_none());
        assert_eq!(
            plan.dropoff_at(WorldPos::new(670.0, 120.0)).unwrap().destination,
            Destination::CityMall
        );
    }

    #[test]
    fn pickup_is_idempotent_while_carrying() {
        let mut engine = engine();
        let plan = CityPlan::default_plan();
        let mut tracker = ZoneTracker::new();
        let warehouse = plan.pickups[0].at;

        let first = tracker.observe(&mut engine, &plan, warehouse, 0.0);
        assert!(matches!(first, Some(ZoneEvent::PickedUp { .. })));
        assert!(tracker.carrying());
        assert!(engine.state().has_active_order());

        // Still standing in the same zone next tick.
        let second = tracker.observe(&mut engine, &plan, warehouse, 1.0);
        assert_eq!(second, None);
        assert!(tracker.carrying());
    }

    #[test]
    fn delivery_fires_only_at_the_order_destination() {
        let mut engine = engine();
        let plan = CityPlan::default_plan();
        let mut tracker = ZoneTracker::new();

        tracker.observe(&mut engine, &plan, plan.pickups[0].at, 0.0);
        let destination = engine.state().current_order.unwrap().destination;
        let wrong = plan
            .dropoffs
            .iter()
            .find(|zone| zone.destination != destination)
            .unwrap();

        assert_eq!(tracker.observe(&mut engine, &plan, wrong.at, 10.0), None);
        assert!(engine.state().has_active_order());
        assert!(tracker.carrying());

        let right = plan
            .dropoffs
            .iter()
            .find(|zone| zone.destination == destination)
            .unwrap();
        let event = tracker.observe(&mut engine, &plan, right.at, 20.0);
        assert_eq!(event, Some(ZoneEvent::Delivered { destination }));
        assert!(!tracker.carrying());
        assert!(!engine.state().has_active_order());
        assert_eq!(engine.state().deliveries, 1);
    }

    #[test]
    fn nothing_happens_while_paused() {
        let mut engine = engine();
        let plan = CityPlan::default_plan();
        let mut tracker = ZoneTracker::new();
        engine.toggle_pause();

        let event = tracker.observe(&mut engine, &plan, plan.pickups[0].at, 0.0);
        assert_eq!(event, None);
        assert!(!tracker.carrying());
        assert!(!engine.state().has_active_order());
    }

    #[test]
    fn open_road_produces_no_events() {
        let mut engine = engine();
        let plan = CityPlan::default_plan();
        let mut tracker = ZoneTracker::new();
        assert_eq!(
            tracker.observe(&mut engine, &plan, WorldPos::new(400.0, 300.0), 0.0),
            None
        );
    }
}
