//! External queries the progression engine depends on but does not own.

use hamlet_types::{BuildingTypeId, ResearchId};

/// Query for the number of built instances of a building kind.
///
/// Owned by the construction layer. Unknown kinds should report zero.
pub trait BuildingCountOracle {
    /// Count of placed, completed buildings of the given kind.
    fn built_count(&self, building: &BuildingTypeId) -> u32;
}

/// Query for completed research topics.
///
/// Owned by the research layer; the engine only tests membership.
pub trait ResearchOracle {
    /// Whether the given research topic has been completed.
    fn is_research_complete(&self, research: &ResearchId) -> bool;
}
