//! The [`EconomySession`] composition root.
//!
//! Earlier prototypes kept the ledger, allocator, and progression engine
//! as process-wide autoload singletons. Here they are plain fields of an
//! explicitly constructed session object: whoever composes the game owns
//! the session and passes it where it is needed. No ambient lookup.
//!
//! Every mutating wrapper ends by draining the bus's pending queue into
//! the goal engine, so goal re-evaluation happens in-line with the call
//! that caused the resource change -- never deferred to a later tick.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use hamlet_events::{EconomyEvent, EventBus, EventSink};
use hamlet_ledger::{CostMap, ResourceLedger};
use hamlet_progression::{BuildingCountOracle, GoalEngine, ProgressContext, ResearchOracle};
use hamlet_types::{
    Achievement, BuildingId, BuildingTypeId, Goal, GoalId, JobAssignment, JobType, ResourceId,
    VillagerId,
};
use hamlet_workforce::{WorkerCapacityOracle, WorkforceAllocator};

use crate::config::GameConfig;
use crate::production::ProductionTable;

/// Owns the economy: ledger, workforce, progression, and the bus.
///
/// All access from game logic and UI goes through this type's
/// operations; getters hand out copies, never references into the
/// internal containers.
#[derive(Debug)]
pub struct EconomySession {
    /// Resource quantities and metadata.
    pub(crate) ledger: ResourceLedger,
    /// Job assignments and rosters.
    pub(crate) workforce: WorkforceAllocator,
    /// Goals, achievements, unlocks, favorites.
    pub(crate) progression: GoalEngine,
    /// The notification bus.
    pub(crate) bus: EventBus,
    /// Per-job production rules.
    pub(crate) production: ProductionTable,
    /// The resource read as population by progression checks.
    pub(crate) population_resource: ResourceId,
    /// Ticks executed so far.
    pub(crate) ticks_run: u64,
}

impl EconomySession {
    /// Build a session from configuration: seed the ledger from the
    /// resource table, register goals and achievements, and pre-seed the
    /// unlock set.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            ledger: ResourceLedger::from_definitions(&config.resources),
            workforce: WorkforceAllocator::new(),
            progression: GoalEngine::new(
                config.goals.clone(),
                config.achievements.clone(),
                config.starting_unlocks.iter().cloned(),
            ),
            bus: EventBus::new(),
            production: ProductionTable::new(config.production.clone()),
            population_resource: config.population_resource.clone(),
            ticks_run: 0,
        }
    }

    /// Register an external collaborator on the notification bus.
    pub fn subscribe(&mut self, sink: Box<dyn EventSink + Send>) {
        self.bus.subscribe(sink);
    }

    /// Number of ticks executed so far.
    pub const fn ticks_run(&self) -> u64 {
        self.ticks_run
    }

    // -----------------------------------------------------------------
    // Ledger operations
    // -----------------------------------------------------------------

    /// Current amount of a resource (zero when unknown).
    pub fn resource(&self, resource: &ResourceId) -> Decimal {
        self.ledger.get(resource)
    }

    /// Copy of every stored resource amount.
    pub fn resource_amounts(&self) -> BTreeMap<ResourceId, Decimal> {
        self.ledger.amounts()
    }

    /// Maximum storage capacity of a resource (100 when unmetered).
    pub fn resource_capacity(&self, resource: &ResourceId) -> Decimal {
        self.ledger.capacity(resource)
    }

    /// Overwrite a resource amount. Publishes a change event even for a
    /// zero delta, then re-evaluates resource-driven goals.
    pub fn set_resource(&mut self, resource: &ResourceId, amount: Decimal) {
        self.ledger.set(resource, amount, &mut self.bus);
        self.dispatch_events();
    }

    /// Add to a resource amount (negative subtracts; no capacity clamp).
    pub fn add_resource(&mut self, resource: &ResourceId, amount: Decimal) {
        self.ledger.add(resource, amount, &mut self.bus);
        self.dispatch_events();
    }

    /// Consume a resource amount if available. Returns whether it was.
    pub fn consume_resource(&mut self, resource: &ResourceId, amount: Decimal) -> bool {
        let consumed = self.ledger.consume(resource, amount, &mut self.bus);
        self.dispatch_events();
        consumed
    }

    /// Whether every entry of the cost map is affordable right now.
    pub fn can_afford(&self, costs: &CostMap) -> bool {
        self.ledger.can_afford(costs)
    }

    /// Pay a cost map atomically. Returns whether payment happened.
    pub fn pay(&mut self, costs: &CostMap) -> bool {
        let paid = self.ledger.pay(costs, &mut self.bus);
        self.dispatch_events();
        paid
    }

    // -----------------------------------------------------------------
    // Workforce operations
    // -----------------------------------------------------------------

    /// Assign a villager to a job, consulting the capacity oracle.
    /// Returns `false` exactly when the destination is at capacity.
    pub fn assign_job(
        &mut self,
        villager: &VillagerId,
        building: &BuildingId,
        job: JobType,
        capacity: &dyn WorkerCapacityOracle,
    ) -> bool {
        let assigned = self
            .workforce
            .assign(villager, building, job, capacity, &mut self.bus);
        self.dispatch_events();
        assigned
    }

    /// Release a villager's assignment. `false` when there was none.
    pub fn unassign_job(&mut self, villager: &VillagerId) -> bool {
        let unassigned = self.workforce.unassign(villager, &mut self.bus);
        self.dispatch_events();
        unassigned
    }

    /// Copy of a villager's active assignment, if any.
    pub fn job_assignment(&self, villager: &VillagerId) -> Option<JobAssignment> {
        self.workforce.assignment(villager)
    }

    /// Copy of the worker roster at a building.
    pub fn roster(&self, building: &BuildingId) -> BTreeSet<VillagerId> {
        self.workforce.roster(building)
    }

    // -----------------------------------------------------------------
    // Progression operations
    // -----------------------------------------------------------------

    /// Re-evaluate one goal against the ledger and the external oracles.
    /// Returns whether the goal is completed after the check.
    pub fn check_goal(
        &mut self,
        id: &GoalId,
        buildings: &dyn BuildingCountOracle,
        research: &dyn ResearchOracle,
    ) -> bool {
        let ctx = ProgressContext {
            ledger: &self.ledger,
            buildings,
            research,
            population_resource: &self.population_resource,
        };
        let completed = self.progression.check_goal(id, &ctx, &mut self.bus);
        self.dispatch_events();
        completed
    }

    /// Add a building kind to the unlock set. Returns whether it grew.
    pub fn unlock_building(&mut self, building: &BuildingTypeId) -> bool {
        let grew = self.progression.unlock(building, &mut self.bus);
        self.dispatch_events();
        grew
    }

    /// Whether a building kind is constructible.
    pub fn is_building_unlocked(&self, building: &BuildingTypeId) -> bool {
        self.progression.is_unlocked(building)
    }

    /// Copy of the unlock set.
    pub fn unlocked_buildings(&self) -> BTreeSet<BuildingTypeId> {
        self.progression.unlocked()
    }

    /// Flip a building kind's favorite flag; returns the new state.
    pub fn toggle_favorite(&mut self, building: &BuildingTypeId) -> bool {
        self.progression.toggle_favorite(building)
    }

    /// Whether a building kind is flagged as favorite.
    pub fn is_favorite(&self, building: &BuildingTypeId) -> bool {
        self.progression.is_favorite(building)
    }

    /// Copy of the favorites set.
    pub fn favorites(&self) -> BTreeSet<BuildingTypeId> {
        self.progression.favorites()
    }

    /// Copy of one goal, if registered.
    pub fn goal(&self, id: &GoalId) -> Option<Goal> {
        self.progression.goal(id)
    }

    /// Copy of every goal, ordered by id.
    pub fn goals(&self) -> Vec<Goal> {
        self.progression.goals()
    }

    /// Completed goal ids in completion order.
    pub fn completed_goals(&self) -> Vec<GoalId> {
        self.progression.completed_goals()
    }

    /// Copy of the achievement registry.
    pub fn achievements(&self) -> Vec<Achievement> {
        self.progression.achievements()
    }

    // -----------------------------------------------------------------
    // Event dispatch
    // -----------------------------------------------------------------

    /// Replay queued events into the goal engine until the queue empties.
    ///
    /// Resource changes drive harvest/accumulate/population checks; any
    /// completion they trigger publishes further events, which land at
    /// the back of the queue and are replayed in the same loop -- so the
    /// whole cascade settles before the wrapping operation returns.
    pub(crate) fn dispatch_events(&mut self) {
        while let Some(event) = self.bus.pop_pending() {
            if let EconomyEvent::ResourceChanged { resource, delta, .. } = event {
                self.progression.on_resource_changed(
                    &resource,
                    delta,
                    &self.ledger,
                    &self.population_resource,
                    &mut self.bus,
                );
            }
        }
    }
}
