//! The [`GoalEngine`]: per-kind progress checks, completion, unlocks,
//! and favorites.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use tracing::{debug, info};

use hamlet_events::{EconomyEvent, EventBus};
use hamlet_ledger::ResourceLedger;
use hamlet_types::{
    Achievement, AchievementId, BuildingTypeId, Goal, GoalId, GoalKind, ResourceId,
};

use crate::oracles::{BuildingCountOracle, ResearchOracle};

/// Read-only surroundings for a goal check.
///
/// Bundles the ledger and the external oracles so check call sites stay
/// readable. Resource-driven rechecks (see
/// [`GoalEngine::on_resource_changed`]) need only the ledger and take it
/// directly.
pub struct ProgressContext<'a> {
    /// The resource ledger, for population and accumulate reads.
    pub ledger: &'a ResourceLedger,
    /// Build counts per building kind.
    pub buildings: &'a dyn BuildingCountOracle,
    /// Completed research membership.
    pub research: &'a dyn ResearchOracle,
    /// The resource whose ledger level is the settlement's population.
    pub population_resource: &'a ResourceId,
}

/// Owns goal and achievement registries, unlock state, and favorites.
pub struct GoalEngine {
    /// All goals, keyed by id. Created once at initialization.
    goals: BTreeMap<GoalId, Goal>,
    /// Goal ids in completion order. Append-only.
    completed_order: Vec<GoalId>,
    /// Achievement registry. Completion triggers are not wired upstream;
    /// this is a data surface only.
    achievements: BTreeMap<AchievementId, Achievement>,
    /// Building kinds currently constructible. Grows monotonically.
    unlocked: BTreeSet<BuildingTypeId>,
    /// Building kinds the player has flagged. Toggled membership.
    favorites: BTreeSet<BuildingTypeId>,
}

impl GoalEngine {
    /// Create an engine from the goal and achievement tables, pre-seeding
    /// the unlock set with the base building kinds.
    pub fn new(
        goals: Vec<Goal>,
        achievements: Vec<Achievement>,
        starting_unlocks: impl IntoIterator<Item = BuildingTypeId>,
    ) -> Self {
        let goals = goals.into_iter().map(|g| (g.id.clone(), g)).collect();
        let achievements = achievements
            .into_iter()
            .map(|a| (a.id.clone(), a))
            .collect();
        Self {
            goals,
            completed_order: Vec::new(),
            achievements,
            unlocked: starting_unlocks.into_iter().collect(),
            favorites: BTreeSet::new(),
        }
    }

    // -----------------------------------------------------------------
    // Progress checks
    // -----------------------------------------------------------------

    /// Re-evaluate one goal by id.
    ///
    /// Unknown ids return `false`. Completed goals return `true` without
    /// re-applying the reward. Otherwise the per-kind progress value is
    /// refreshed and the goal completes if it reached its target:
    ///
    /// - build-count: re-read from the building-count oracle.
    /// - harvest: never re-read -- the running counter advanced by
    ///   [`on_resource_changed`] is compared as-is.
    /// - population / accumulate: re-read the current ledger level.
    /// - research: complete on membership in the completed-research set.
    ///
    /// Returns whether the goal is completed after the check.
    ///
    /// [`on_resource_changed`]: GoalEngine::on_resource_changed
    pub fn check_goal(
        &mut self,
        id: &GoalId,
        ctx: &ProgressContext<'_>,
        bus: &mut EventBus,
    ) -> bool {
        let Some(goal) = self.goals.get_mut(id) else {
            debug!(goal = %id, "check for unknown goal ignored");
            return false;
        };
        if goal.completed {
            return true;
        }

        match &goal.kind {
            GoalKind::BuildCount { building } => {
                goal.current = Decimal::from(ctx.buildings.built_count(building));
            }
            GoalKind::HarvestResource { .. } => {}
            GoalKind::ReachPopulation => {
                goal.current = ctx.ledger.get(ctx.population_resource);
            }
            GoalKind::AccumulateResource { resource } => {
                goal.current = ctx.ledger.get(resource);
            }
            GoalKind::CompleteResearch { research } => {
                if ctx.research.is_research_complete(research) {
                    goal.current = goal.target;
                }
            }
        }

        if goal.current >= goal.target {
            self.complete(id, bus);
            true
        } else {
            false
        }
    }

    /// React to a resource change.
    ///
    /// Harvest goals for the changed resource accumulate positive deltas
    /// into their running counter (spending the resource later does not
    /// roll the counter back). Accumulate goals re-read the new stock,
    /// and population goals re-read when the population resource moved.
    /// Any goal reaching its target completes immediately, in goal-id
    /// order.
    pub fn on_resource_changed(
        &mut self,
        resource: &ResourceId,
        delta: Decimal,
        ledger: &ResourceLedger,
        population_resource: &ResourceId,
        bus: &mut EventBus,
    ) {
        let mut reached: Vec<GoalId> = Vec::new();

        for goal in self.goals.values_mut() {
            if goal.completed {
                continue;
            }
            match &goal.kind {
                GoalKind::HarvestResource { resource: tracked } if tracked == resource => {
                    if delta > Decimal::ZERO {
                        goal.current = goal.current.saturating_add(delta);
                    }
                }
                GoalKind::AccumulateResource { resource: tracked } if tracked == resource => {
                    goal.current = ledger.get(resource);
                }
                GoalKind::ReachPopulation if resource == population_resource => {
                    goal.current = ledger.get(resource);
                }
                _ => continue,
            }
            if goal.current >= goal.target {
                reached.push(goal.id.clone());
            }
        }

        for id in &reached {
            self.complete(id, bus);
        }
    }

    /// Transition a goal to completed, apply its reward, and publish.
    ///
    /// Idempotent: a goal already completed is left untouched. The reward
    /// unlock is applied first (publishing `BuildingUnlocked` if the set
    /// grew), then `GoalCompleted` is published.
    fn complete(&mut self, id: &GoalId, bus: &mut EventBus) {
        let Some(goal) = self.goals.get_mut(id) else {
            return;
        };
        if goal.completed {
            return;
        }
        goal.completed = true;
        let unlock = goal.reward.unlock.clone();

        self.completed_order.push(id.clone());
        info!(goal = %id, "goal completed");

        if let Some(building) = unlock {
            let _ = self.unlock(&building, bus);
        }
        bus.publish(EconomyEvent::GoalCompleted { goal: id.clone() });
    }

    // -----------------------------------------------------------------
    // Unlocks and favorites
    // -----------------------------------------------------------------

    /// Add a building kind to the unlock set.
    ///
    /// Returns whether the set actually grew; `BuildingUnlocked` is
    /// published only in that case, so repeated unlocks are silent.
    pub fn unlock(&mut self, building: &BuildingTypeId, bus: &mut EventBus) -> bool {
        let grew = self.unlocked.insert(building.clone());
        if grew {
            info!(building = %building, "building unlocked");
            bus.publish(EconomyEvent::BuildingUnlocked {
                building: building.clone(),
            });
        }
        grew
    }

    /// Whether a building kind is currently constructible.
    pub fn is_unlocked(&self, building: &BuildingTypeId) -> bool {
        self.unlocked.contains(building)
    }

    /// Flip a building kind's membership in the favorites set. Returns
    /// whether the kind is a favorite after the toggle.
    pub fn toggle_favorite(&mut self, building: &BuildingTypeId) -> bool {
        if self.favorites.remove(building) {
            false
        } else {
            self.favorites.insert(building.clone());
            true
        }
    }

    /// Whether the player has flagged a building kind.
    pub fn is_favorite(&self, building: &BuildingTypeId) -> bool {
        self.favorites.contains(building)
    }

    /// Return a copy of the favorites set.
    pub fn favorites(&self) -> BTreeSet<BuildingTypeId> {
        self.favorites.clone()
    }

    /// Return a copy of the unlock set.
    pub fn unlocked(&self) -> BTreeSet<BuildingTypeId> {
        self.unlocked.clone()
    }

    // -----------------------------------------------------------------
    // Registry access
    // -----------------------------------------------------------------

    /// Return a copy of one goal, if registered.
    pub fn goal(&self, id: &GoalId) -> Option<Goal> {
        self.goals.get(id).cloned()
    }

    /// Return a copy of every goal, ordered by id.
    pub fn goals(&self) -> Vec<Goal> {
        self.goals.values().cloned().collect()
    }

    /// Return the completed goal ids in completion order.
    pub fn completed_goals(&self) -> Vec<GoalId> {
        self.completed_order.clone()
    }

    /// Return a copy of the achievement registry, ordered by id.
    pub fn achievements(&self) -> Vec<Achievement> {
        self.achievements.values().cloned().collect()
    }
}

impl core::fmt::Debug for GoalEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GoalEngine")
            .field("goals", &self.goals.len())
            .field("completed", &self.completed_order.len())
            .field("unlocked", &self.unlocked)
            .finish_non_exhaustive()
    }
}
