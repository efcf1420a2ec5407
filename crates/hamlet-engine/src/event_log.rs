//! Structured-log subscriber for economy events.
//!
//! The engine registers one of these on the session bus so every
//! notification lands in the log stream, giving a readable narrative of
//! the run without any subsystem knowing about logging.

use tracing::{debug, info};

use hamlet_events::{EconomyEvent, EventSink};

/// Sink that emits one log line per published event.
#[derive(Debug, Default)]
pub struct EventLog;

impl EventSink for EventLog {
    fn on_event(&mut self, event: &EconomyEvent) {
        match event {
            EconomyEvent::ResourceChanged {
                resource,
                delta,
                total,
            } => {
                debug!(resource = %resource, %delta, %total, "resource changed");
            }
            EconomyEvent::JobAssigned {
                villager,
                building,
                job,
            } => {
                info!(villager = %villager, building = %building, job = %job, "job assigned");
            }
            EconomyEvent::JobUnassigned { villager } => {
                info!(villager = %villager, "job unassigned");
            }
            EconomyEvent::GoalCompleted { goal } => {
                info!(goal = %goal, "goal completed");
            }
            EconomyEvent::BuildingUnlocked { building } => {
                info!(building = %building, "building unlocked");
            }
        }
    }
}
