//! The tick driver: a fixed-interval loop executing [`run_tick`].
//!
//! The tick heartbeat is a singleton resource: [`TickDriver::start`]
//! claims it, a second claim anywhere in the process fails, and the claim
//! is never released -- the driver is started once at initialization and
//! never restarted.
//!
//! [`run_tick`]: crate::tick::run_tick

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::session::EconomySession;
use crate::tick::{run_tick, TickSummary};

/// Whether a driver has been claimed in this process.
static DRIVER_CLAIMED: AtomicBool = AtomicBool::new(false);

/// Errors that can occur when starting the tick driver.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick driver was already started in this process.
    #[error("tick driver already started in this process; it cannot be restarted")]
    DriverAlreadyStarted,
}

/// Bounds for a driver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunBounds {
    /// Real-time milliseconds between ticks. Zero means no sleep
    /// (useful for tests and headless fast-forward).
    pub tick_interval_ms: u64,
    /// Stop after this many ticks; zero means run until the process
    /// ends.
    pub max_ticks: u64,
}

/// Result of a bounded driver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Total number of ticks executed by this run.
    pub total_ticks: u64,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
}

/// The process-wide tick driver.
#[derive(Debug)]
pub struct TickDriver {
    // Claiming is the only way to construct one.
    _claimed: (),
}

impl TickDriver {
    /// Claim the process's tick driver.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::DriverAlreadyStarted`] if a driver was
    /// already claimed in this process. The claim is never released.
    pub fn start() -> Result<Self, RunnerError> {
        if DRIVER_CLAIMED.swap(true, Ordering::SeqCst) {
            return Err(RunnerError::DriverAlreadyStarted);
        }
        Ok(Self { _claimed: () })
    }

    /// Drive the session's tick loop.
    ///
    /// Executes [`run_tick`] every `tick_interval_ms` until `max_ticks`
    /// is reached (or forever when `max_ticks` is zero). All economy
    /// work happens synchronously inside each tick; the only awaited
    /// operation is the interval sleep.
    pub async fn run(&mut self, session: &mut EconomySession, bounds: RunBounds) -> RunOutcome {
        info!(
            tick_interval_ms = bounds.tick_interval_ms,
            max_ticks = bounds.max_ticks,
            "tick driver running"
        );

        let mut total_ticks: u64 = 0;
        let mut final_summary: Option<TickSummary> = None;

        loop {
            let summary = run_tick(session);
            total_ticks = total_ticks.saturating_add(1);
            final_summary = Some(summary);

            if bounds.max_ticks > 0 && total_ticks >= bounds.max_ticks {
                info!(total_ticks, "tick limit reached");
                return RunOutcome {
                    total_ticks,
                    final_summary,
                };
            }

            if bounds.tick_interval_ms > 0 {
                tokio::time::sleep(tokio::time::Duration::from_millis(bounds.tick_interval_ms))
                    .await;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::config::GameConfig;

    use super::*;

    // A single test covers both the claim semantics and a bounded run:
    // the claim is process-wide and deliberately unreleasable, so
    // splitting these across tests would make them order-dependent.
    #[tokio::test]
    async fn driver_is_a_singleton_and_runs_bounded() {
        let mut driver = TickDriver::start().unwrap();
        assert!(matches!(
            TickDriver::start(),
            Err(RunnerError::DriverAlreadyStarted)
        ));

        let mut session = EconomySession::from_config(&GameConfig::default());
        let outcome = driver
            .run(
                &mut session,
                RunBounds {
                    tick_interval_ms: 0,
                    max_ticks: 3,
                },
            )
            .await;

        assert_eq!(outcome.total_ticks, 3);
        assert_eq!(outcome.final_summary.unwrap().tick, 3);
        assert_eq!(session.ticks_run(), 3);

        // Still claimed after the run ends.
        assert!(TickDriver::start().is_err());
    }
}
