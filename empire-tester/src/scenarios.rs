//! Scripted engine scenarios for headless QA runs.
//!
//! Each scenario drives a fresh engine through a deterministic play pattern
//! and checks the invariants the engine promises: non-negative reputation,
//! downward-only best times, catalog-ordered upgrades, and durable saves.
use anyhow::{Result, ensure};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use empire_game::{
    CityPlan, GameEngine, GameStorage, TimeoutPolicy, VehicleId, ZoneEvent, ZoneTracker,
    format_currency,
};

use crate::storage::{FileStorage, MemoryStorage};

/// Inputs shared by every scenario run.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioCtx {
    pub seed: u64,
    pub iterations: usize,
    pub verbose: bool,
}

/// What a scenario observed, for the report.
#[derive(Debug, Clone, Default)]
pub struct ScenarioOutcome {
    pub deliveries: u32,
    pub final_money: i64,
    pub details: Vec<String>,
}

pub type ScenarioFn = fn(&ScenarioCtx) -> Result<ScenarioOutcome>;

const SCENARIOS: &[(&str, &str, ScenarioFn)] = &[
    (
        "smoke",
        "One full pickup-to-drop-off delivery loop",
        run_smoke,
    ),
    (
        "grind",
        "Many deliveries with mixed outcomes; checks economy invariants",
        run_grind,
    ),
    (
        "upgrade-path",
        "Earn through the catalog from bike to truck",
        run_upgrade_path,
    ),
    (
        "timeout",
        "Auto-fail policy fires when an order expires",
        run_timeout,
    ),
    (
        "persistence",
        "Play, reload from disk, and compare",
        run_persistence,
    ),
];

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS
        .iter()
        .map(|(name, desc, _)| (*name, *desc))
        .collect()
}

pub fn get_scenario(name: &str) -> Option<ScenarioFn> {
    SCENARIOS
        .iter()
        .find(|(candidate, _, _)| *candidate == name)
        .map(|(_, _, f)| *f)
}

/// Drive one delivery through the zone bridge, traveling for `travel_time`
/// seconds. Returns the new clock.
fn drive_one<S: empire_game::GameStorage>(
    engine: &mut GameEngine<S>,
    tracker: &mut ZoneTracker,
    plan: &CityPlan,
    now: f64,
    travel_time: f64,
) -> Result<f64> {
    let picked = tracker.observe(engine, plan, plan.pickups[0].at, now);
    ensure!(
        matches!(picked, Some(ZoneEvent::PickedUp { .. })),
        "pickup did not fire"
    );
    let destination = engine
        .state()
        .current_order
        .map(|order| order.destination)
        .expect("order active after pickup");
    let dropoff = plan
        .dropoffs
        .iter()
        .find(|zone| zone.destination == destination)
        .expect("destination exists on the city plan");
    let delivered = tracker.observe(engine, plan, dropoff.at, now + travel_time);
    ensure!(
        matches!(delivered, Some(ZoneEvent::Delivered { .. })),
        "drop-off did not fire"
    );
    Ok(now + travel_time + 5.0)
}

fn run_smoke(ctx: &ScenarioCtx) -> Result<ScenarioOutcome> {
    let mut engine = GameEngine::new(MemoryStorage::default(), ctx.seed);
    let plan = CityPlan::default_plan();
    let mut tracker = ZoneTracker::new();

    drive_one(&mut engine, &mut tracker, &plan, 0.0, 60.0)?;

    let state = engine.state();
    ensure!(state.deliveries == 1, "expected exactly one delivery");
    ensure!(state.money > 1_000, "delivery did not pay out");
    ensure!(
        state.completed_deliveries.len() == 1,
        "completion ledger not appended"
    );

    Ok(ScenarioOutcome {
        deliveries: state.deliveries,
        final_money: state.money,
        details: vec![format!(
            "one delivery, balance {}",
            format_currency(state.money)
        )],
    })
}

fn run_grind(ctx: &ScenarioCtx) -> Result<ScenarioOutcome> {
    let mut engine = GameEngine::new(MemoryStorage::default(), ctx.seed);
    let plan = CityPlan::default_plan();
    let mut tracker = ZoneTracker::new();
    let mut rng = SmallRng::seed_from_u64(ctx.seed);
    let mut now = 0.0;
    let mut best_seen = f64::INFINITY;
    let mut details = Vec::new();

    for round in 0..ctx.iterations.max(1) {
        // Roughly one run in five gets abandoned mid-route.
        if rng.gen_range(0..5) == 0 {
            engine.start_run(now);
            engine.fail_order(now + f64::from(rng.gen_range(10..120)));
            tracker.reset();
            ensure!(
                engine.state().consecutive_deliveries == 0,
                "failure did not reset the streak"
            );
        } else {
            let travel = f64::from(rng.gen_range(20..200));
            now = drive_one(&mut engine, &mut tracker, &plan, now, travel)?;
            let best = engine
                .state()
                .best_time
                .expect("best time set after a completion");
            ensure!(best <= best_seen, "best time moved upward");
            best_seen = best;
        }
        now += 30.0;
        engine.tick(now);

        let state = engine.state();
        ensure!(state.reputation >= 0.0, "reputation went negative");
        ensure!(state.money >= 0, "money went negative");
        if ctx.verbose {
            details.push(format!(
                "round {round}: level {}, {}",
                state.level,
                format_currency(state.money)
            ));
        }
    }

    let state = engine.state();
    details.push(format!(
        "{} completed / {} failed, level {}",
        state.completed_deliveries.len(),
        state.failed_deliveries.len(),
        state.level
    ));
    Ok(ScenarioOutcome {
        deliveries: state.deliveries,
        final_money: state.money,
        details,
    })
}

fn run_upgrade_path(ctx: &ScenarioCtx) -> Result<ScenarioOutcome> {
    let mut engine = GameEngine::new(MemoryStorage::default(), ctx.seed);
    let plan = CityPlan::default_plan();
    let mut tracker = ZoneTracker::new();
    let mut rng = SmallRng::seed_from_u64(ctx.seed ^ 0x5EED);
    let mut now = 0.0;
    let mut tiers_seen = vec![engine.state().vehicle];

    // Deliver fast runs until the truck is in the garage.
    for _ in 0..500 {
        if engine.state().vehicle == VehicleId::Truck {
            break;
        }
        let travel = f64::from(rng.gen_range(10..40));
        now = drive_one(&mut engine, &mut tracker, &plan, now, travel)?;
        let before = engine.state().vehicle;
        engine.upgrade_vehicle();
        let after = engine.state().vehicle;
        if after != before {
            tiers_seen.push(after);
        }
        ensure!(engine.state().money >= 0, "upgrade overdrew the account");
    }

    ensure!(
        engine.state().vehicle == VehicleId::Truck,
        "never reached the top tier"
    );
    ensure!(
        tiers_seen
            == vec![
                VehicleId::Bike,
                VehicleId::Scooter,
                VehicleId::Van,
                VehicleId::Truck
            ],
        "tiers were skipped or reordered: {tiers_seen:?}"
    );

    let state = engine.state();
    Ok(ScenarioOutcome {
        deliveries: state.deliveries,
        final_money: state.money,
        details: vec![format!(
            "reached truck after {} deliveries, balance {}",
            state.deliveries,
            format_currency(state.money)
        )],
    })
}

fn run_timeout(ctx: &ScenarioCtx) -> Result<ScenarioOutcome> {
    let mut engine = GameEngine::new(MemoryStorage::default(), ctx.seed);
    engine.set_timeout_policy(TimeoutPolicy::AutoFail);

    engine.start_run(0.0);
    let limit = engine
        .state()
        .current_order
        .map(|order| order.time_limit)
        .expect("order active");

    let mut now = 0.0;
    while now <= limit + 2.0 {
        engine.tick(now);
        now += 1.0;
    }

    let state = engine.state();
    ensure!(!state.has_active_order(), "expired order was not failed");
    ensure!(
        state.failed_deliveries.len() == 1,
        "failure ledger not appended"
    );
    ensure!(state.reputation >= 0.0, "reputation went negative");

    Ok(ScenarioOutcome {
        deliveries: 0,
        final_money: state.money,
        details: vec![format!("order auto-failed after {limit}s limit")],
    })
}

fn run_persistence(ctx: &ScenarioCtx) -> Result<ScenarioOutcome> {
    let root = std::env::temp_dir().join(format!("empire-tester-{}", ctx.seed));
    let plan = CityPlan::default_plan();

    let mut engine = GameEngine::load_or_new(FileStorage::new(&root), ctx.seed);
    engine.reset();
    let mut tracker = ZoneTracker::new();
    let mut now = 0.0;
    for _ in 0..3 {
        now = drive_one(&mut engine, &mut tracker, &plan, now, 45.0)?;
    }
    let expected_money = engine.state().money;
    let expected_best = engine.state().best_time;
    drop(engine);

    let revived = GameEngine::load_or_new(FileStorage::new(&root), ctx.seed);
    let state = revived.state();
    ensure!(state.deliveries == 3, "delivery count did not survive");
    ensure!(state.money == expected_money, "balance did not survive");
    ensure!(state.best_time == expected_best, "best time did not survive");
    ensure!(state.rng.is_some(), "rng was not rehydrated");

    FileStorage::new(&root).delete(empire_game::SAVE_SLOT)?;

    Ok(ScenarioOutcome {
        deliveries: state.deliveries,
        final_money: state.money,
        details: vec![format!(
            "3 deliveries survived reload at {}",
            root.display()
        )],
    })
}
