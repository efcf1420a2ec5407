//! Core data structures for the Hamlet economy.
//!
//! Covers resource metadata, job assignments, progression goals, and
//! achievements. These are plain data carriers; all behavior lives in
//! the owning component crates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::{GoalKind, JobType};
use crate::ids::{AchievementId, BuildingId, BuildingTypeId, GoalId, ResourceId, VillagerId};

// ---------------------------------------------------------------------------
// Resource metadata
// ---------------------------------------------------------------------------

/// Immutable per-resource metadata, loaded once at startup from the game's
/// data tables and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// The resource this definition describes.
    pub id: ResourceId,

    /// Amount seeded into the ledger at session start.
    #[serde(default)]
    pub starting_amount: Decimal,

    /// Maximum storage capacity reported by the ledger. The ledger does
    /// not clamp additions against this value; it is advisory metadata
    /// for UI and construction planning.
    #[serde(default = "default_max_storage")]
    pub max_storage: Decimal,
}

impl ResourceDefinition {
    /// Create a definition with the default storage capacity of 100.
    pub fn new(id: impl Into<ResourceId>, starting_amount: Decimal) -> Self {
        Self {
            id: id.into(),
            starting_amount,
            max_storage: default_max_storage(),
        }
    }
}

const fn default_max_storage() -> Decimal {
    Decimal::ONE_HUNDRED
}

// ---------------------------------------------------------------------------
// Job assignment
// ---------------------------------------------------------------------------

/// A villager's single active work placement.
///
/// A villager holds at most one assignment at any time; the allocator
/// enforces this by unassigning before reassigning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAssignment {
    /// The villager doing the work.
    pub villager: VillagerId,
    /// The building instance the villager works at.
    pub building: BuildingId,
    /// The trade practiced there.
    pub job: JobType,
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

/// The reward granted when a goal completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalReward {
    /// Building kind added to the unlock set, if any.
    #[serde(default)]
    pub unlock: Option<BuildingTypeId>,
}

/// A progression goal.
///
/// Goals are created once at initialization with `completed == false`.
/// The `current` progress value is advanced by tick-driven or
/// event-driven checks, and `completed` transitions exactly once,
/// `false -> true`, never reverting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique goal key.
    pub id: GoalId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Display description.
    #[serde(default)]
    pub description: String,
    /// What the goal measures.
    pub kind: GoalKind,
    /// The value `current` must reach for the goal to complete.
    pub target: Decimal,
    /// Current progress toward `target`.
    #[serde(default)]
    pub current: Decimal,
    /// Whether the goal has completed. Monotonic.
    #[serde(default)]
    pub completed: bool,
    /// Reward applied at the moment of completion.
    #[serde(default)]
    pub reward: GoalReward,
}

impl Goal {
    /// Create a fresh, uncompleted goal with zero progress.
    pub fn new(
        id: impl Into<GoalId>,
        name: impl Into<String>,
        kind: GoalKind,
        target: Decimal,
        reward: GoalReward,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            target,
            current: Decimal::ZERO,
            completed: false,
            reward,
        }
    }
}

// ---------------------------------------------------------------------------
// Achievements
// ---------------------------------------------------------------------------

/// A one-shot achievement.
///
/// The registry is wired into the progression engine but completion
/// triggers are not: the upstream game defines the table without
/// connecting it, so this surface is tracked as data only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Unique achievement key.
    pub id: AchievementId,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Whether the achievement has been earned.
    #[serde(default)]
    pub completed: bool,
}
