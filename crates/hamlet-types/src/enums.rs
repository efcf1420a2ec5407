//! Closed enumeration types for the Hamlet economy.
//!
//! Job types and goal kinds were dictionary keys in earlier prototypes.
//! Here they are closed enums: adding a category is a compile-time event,
//! and display labels exist only at the presentation boundary.

use serde::{Deserialize, Serialize};

use crate::ids::{BuildingTypeId, ResearchId, ResourceId};

// ---------------------------------------------------------------------------
// Job types
// ---------------------------------------------------------------------------

/// The trade a villager practices at their assigned building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    /// Fells trees at a lumber hut.
    Lumberjack,
    /// Gathers berries and roots at a gathering post.
    Forager,
    /// Quarries stone at a mine.
    Miner,
    /// Tends crops at a farm.
    Farmer,
    /// Raises construction sites.
    Builder,
    /// Studies at the research bench.
    Scholar,
}

impl JobType {
    /// Human-readable label for UI display.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lumberjack => "Lumberjack",
            Self::Forager => "Forager",
            Self::Miner => "Miner",
            Self::Farmer => "Farmer",
            Self::Builder => "Builder",
            Self::Scholar => "Scholar",
        }
    }
}

impl core::fmt::Display for JobType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Goal kinds
// ---------------------------------------------------------------------------

/// What a progression goal measures.
///
/// The kind determines both the data source consulted when the goal is
/// re-checked and whether progress is accumulated or re-read:
///
/// - [`BuildCount`] and [`CompleteResearch`] consult external oracles.
/// - [`HarvestResource`] is a running counter fed by positive resource
///   deltas; it never decreases when the resource is later spent.
/// - [`ReachPopulation`] and [`AccumulateResource`] re-read the current
///   ledger level on every check.
///
/// [`BuildCount`]: GoalKind::BuildCount
/// [`CompleteResearch`]: GoalKind::CompleteResearch
/// [`HarvestResource`]: GoalKind::HarvestResource
/// [`ReachPopulation`]: GoalKind::ReachPopulation
/// [`AccumulateResource`]: GoalKind::AccumulateResource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GoalKind {
    /// Construct a number of buildings of one kind.
    BuildCount {
        /// The building kind being counted.
        building: BuildingTypeId,
    },

    /// Harvest a cumulative amount of one resource over the whole game.
    HarvestResource {
        /// The resource whose positive deltas are accumulated.
        resource: ResourceId,
    },

    /// Grow the settlement to a population level.
    ReachPopulation,

    /// Hold a stock of one resource at a single moment.
    AccumulateResource {
        /// The resource whose current stock is compared to the target.
        resource: ResourceId,
    },

    /// Finish a research topic.
    CompleteResearch {
        /// The research topic that must be complete.
        research: ResearchId,
    },
}
