//! One tick of the economy.
//!
//! Each tick walks every active job assignment, applies the production
//! rule for the worker's job (pay upkeep, add output), and then replays
//! the resulting resource-changed events into the goal engine. Within a
//! tick, all production and consumption mutations happen before the goal
//! re-evaluation they trigger; delivery stays inside the same tick.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, info};

use hamlet_types::{GoalId, ResourceId};

use crate::session::EconomySession;

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed (1-based).
    pub tick: u64,
    /// Workers that produced this tick.
    pub workers_active: u32,
    /// Workers that idled: no production rule for their job, or upkeep
    /// could not be paid.
    pub workers_idle: u32,
    /// Gross output added to the ledger this tick, per resource.
    pub produced: BTreeMap<ResourceId, Decimal>,
    /// Goals that completed during this tick, in completion order.
    pub goals_completed: Vec<GoalId>,
}

/// Execute one complete tick of the economy.
///
/// This is the entry point the tick driver calls on its fixed interval;
/// game logic may also call it directly in tests or headless mode.
pub fn run_tick(session: &mut EconomySession) -> TickSummary {
    session.ticks_run = session.ticks_run.saturating_add(1);
    let tick = session.ticks_run;
    let completed_before = session.completed_goals().len();

    let mut produced: BTreeMap<ResourceId, Decimal> = BTreeMap::new();
    let mut workers_active: u32 = 0;
    let mut workers_idle: u32 = 0;

    for assignment in session.workforce.assignments() {
        let Some(rule) = session.production.rule(assignment.job) else {
            workers_idle = workers_idle.saturating_add(1);
            continue;
        };

        if !rule.upkeep.is_empty() && !session.ledger.pay(&rule.upkeep, &mut session.bus) {
            debug!(
                villager = %assignment.villager,
                job = %assignment.job,
                "worker idles, upkeep unaffordable"
            );
            workers_idle = workers_idle.saturating_add(1);
            continue;
        }

        session
            .ledger
            .add(&rule.output, rule.rate_per_worker, &mut session.bus);
        let total = produced.entry(rule.output.clone()).or_insert(Decimal::ZERO);
        *total = total.saturating_add(rule.rate_per_worker);
        workers_active = workers_active.saturating_add(1);
    }

    // Same-tick goal re-evaluation, after all mutations.
    session.dispatch_events();

    let goals_completed: Vec<GoalId> = session
        .completed_goals()
        .into_iter()
        .skip(completed_before)
        .collect();

    info!(
        tick,
        workers_active,
        workers_idle,
        goals_completed = goals_completed.len(),
        "tick complete"
    );

    TickSummary {
        tick,
        workers_active,
        workers_idle,
        produced,
        goals_completed,
    }
}
