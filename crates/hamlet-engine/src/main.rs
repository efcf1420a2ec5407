//! Economy engine binary for the Hamlet simulation.
//!
//! This is the main entry point that wires together the economy session,
//! the starting village, the event log, and the tick driver. It loads
//! configuration, initializes all subsystems, and runs the tick loop
//! until the configured bound is reached.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `hamlet-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the economy session from configuration
//! 4. Register the event log on the notification bus
//! 5. Create the starting village and employ seed villagers
//! 6. Claim the tick driver and run the tick loop
//! 7. Log the result

mod error;
mod event_log;
mod world;

use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hamlet_core::{EconomySession, GameConfig, RunBounds, TickDriver};

use crate::error::EngineError;
use crate::event_log::EventLog;
use crate::world::GameWorld;

/// Application entry point for the economy engine.
///
/// # Errors
///
/// Returns an error if the tick driver cannot be claimed.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. A missing or malformed file degrades to
    //    defaults rather than halting startup.
    let config = GameConfig::load_or_default(Path::new("hamlet-config.yaml"));

    // 2. Initialize structured logging. RUST_LOG wins over the config.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("hamlet-engine starting");
    info!(
        world_name = config.world.name,
        tick_interval_ms = config.world.tick_interval_ms,
        max_ticks = config.world.max_ticks,
        resource_count = config.resources.len(),
        goal_count = config.goals.len(),
        "Configuration loaded"
    );

    // 3. Build the economy session.
    let mut session = EconomySession::from_config(&config);
    info!(
        population = %session.resource(&config.population_resource),
        "Economy session initialized"
    );

    // 4. Register the event log.
    session.subscribe(Box::new(EventLog));

    // 5. Create the starting village and employ seed villagers. The
    //    seed count is the starting population level from the ledger.
    let village = GameWorld::starting_village();
    let seed_count = session
        .resource(&config.population_resource)
        .trunc()
        .to_u64()
        .unwrap_or(0);
    let employed = world::spawn_seed_villagers(&mut session, &village, seed_count);
    info!(
        site_count = village.site_count(),
        seed_count, employed, "Starting village populated"
    );

    // 6. Claim the tick driver and run.
    let mut driver = TickDriver::start().map_err(EngineError::from)?;
    let bounds = RunBounds {
        tick_interval_ms: config.world.tick_interval_ms,
        max_ticks: config.world.max_ticks,
    };
    let outcome = driver.run(&mut session, bounds).await;

    // 7. Log results.
    info!(
        total_ticks = outcome.total_ticks,
        goals_completed = session.completed_goals().len(),
        unlocked_buildings = session.unlocked_buildings().len(),
        "hamlet-engine shutdown complete"
    );
    if let Some(summary) = outcome.final_summary {
        info!(
            workers_active = summary.workers_active,
            workers_idle = summary.workers_idle,
            "Final tick summary"
        );
    }

    Ok(())
}
