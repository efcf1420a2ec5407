//! The starting village and the world-side oracles.
//!
//! The economy core owns resources, jobs, and goals, but deliberately
//! not buildings or research; it consults them through oracle traits.
//! [`GameWorld`] is the engine's implementation of those oracles: a
//! registry of constructed building sites plus the set of finished
//! research.

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use hamlet_core::EconomySession;
use hamlet_progression::{BuildingCountOracle, ResearchOracle};
use hamlet_types::{BuildingId, BuildingTypeId, JobType, ResearchId, VillagerId};
use hamlet_workforce::WorkerCapacityOracle;

/// One constructed building: its kind, the job worked there, and how
/// many workers fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingSite {
    /// The building kind this site was constructed as.
    pub kind: BuildingTypeId,
    /// The job villagers assigned here perform.
    pub job: JobType,
    /// Worker slots at this site.
    pub worker_capacity: u32,
}

/// Building and research state outside the economy core.
#[derive(Debug, Default)]
pub struct GameWorld {
    sites: BTreeMap<BuildingId, BuildingSite>,
    built: BTreeMap<BuildingTypeId, u32>,
    research: BTreeSet<ResearchId>,
}

impl GameWorld {
    /// Create an empty world with no buildings and no research.
    pub const fn new() -> Self {
        Self {
            sites: BTreeMap::new(),
            built: BTreeMap::new(),
            research: BTreeSet::new(),
        }
    }

    /// Create the starting village: a gathering camp and a woodcutter
    /// camp, two worker slots each.
    pub fn starting_village() -> Self {
        let mut world = Self::new();
        world.construct(
            &BuildingId::new("gathering_camp_1"),
            BuildingSite {
                kind: BuildingTypeId::new("gathering_camp"),
                job: JobType::Forager,
                worker_capacity: 2,
            },
        );
        world.construct(
            &BuildingId::new("woodcutter_camp_1"),
            BuildingSite {
                kind: BuildingTypeId::new("woodcutter_camp"),
                job: JobType::Lumberjack,
                worker_capacity: 2,
            },
        );
        world
    }

    /// Register a constructed building site. A site re-registered under
    /// an existing id replaces the old one without recounting its kind.
    pub fn construct(&mut self, id: &BuildingId, site: BuildingSite) {
        let kind = site.kind.clone();
        if self.sites.insert(id.clone(), site).is_none() {
            let count = self.built.entry(kind).or_insert(0);
            *count = count.saturating_add(1);
        }
    }

    /// Mark a research project as finished.
    pub fn finish_research(&mut self, research: &ResearchId) {
        self.research.insert(research.clone());
    }

    /// Number of registered building sites.
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Iterate over the registered sites in id order.
    pub fn sites(&self) -> impl Iterator<Item = (&BuildingId, &BuildingSite)> {
        self.sites.iter()
    }
}

impl WorkerCapacityOracle for GameWorld {
    // Unknown buildings report the oracle's contractual default of one
    // slot, not zero.
    fn worker_capacity(&self, building: &BuildingId) -> u32 {
        self.sites
            .get(building)
            .map_or(1, |site| site.worker_capacity)
    }
}

impl BuildingCountOracle for GameWorld {
    fn built_count(&self, building: &BuildingTypeId) -> u32 {
        self.built.get(building).copied().unwrap_or(0)
    }
}

impl ResearchOracle for GameWorld {
    fn is_research_complete(&self, research: &ResearchId) -> bool {
        self.research.contains(research)
    }
}

/// Assign `count` seed villagers to the world's building sites, filling
/// each site to capacity in id order. Returns how many found work; the
/// rest stay unemployed until more sites exist.
pub fn spawn_seed_villagers(session: &mut EconomySession, world: &GameWorld, count: u64) -> u64 {
    let mut openings: Vec<(BuildingId, JobType, u32)> = world
        .sites()
        .map(|(id, site)| (id.clone(), site.job, site.worker_capacity))
        .collect();

    let mut employed: u64 = 0;
    for index in 1..=count {
        let villager = VillagerId::new(format!("villager_{index}"));
        let placed = openings.iter_mut().find(|(_, _, slots)| *slots > 0);
        let Some((building, job, slots)) = placed else {
            break;
        };
        if session.assign_job(&villager, building, *job, world) {
            *slots = slots.saturating_sub(1);
            employed = employed.saturating_add(1);
            info!(villager = %villager, building = %building, job = %job, "seed villager employed");
        }
    }
    employed
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use hamlet_core::GameConfig;
    use hamlet_types::{Goal, GoalId, GoalKind, GoalReward, ResourceDefinition};

    use super::*;

    #[test]
    fn starting_village_has_two_staffable_sites() {
        let world = GameWorld::starting_village();
        assert_eq!(world.site_count(), 2);
        assert_eq!(
            world.worker_capacity(&BuildingId::new("gathering_camp_1")),
            2
        );
        assert_eq!(world.built_count(&BuildingTypeId::new("woodcutter_camp")), 1);
    }

    #[test]
    fn unknown_building_capacity_defaults_to_one() {
        let world = GameWorld::new();
        assert_eq!(world.worker_capacity(&BuildingId::new("anywhere")), 1);

        // One villager can take the default slot; a second cannot.
        let mut session = EconomySession::from_config(&GameConfig::default());
        let shed = BuildingId::new("mystery_shed");
        assert!(session.assign_job(&VillagerId::new("v1"), &shed, JobType::Forager, &world));
        assert!(!session.assign_job(&VillagerId::new("v2"), &shed, JobType::Forager, &world));
    }

    #[test]
    fn seed_villagers_fill_sites_then_stop() {
        let mut session = EconomySession::from_config(&GameConfig::default());
        let world = GameWorld::starting_village();

        // Four slots total; the fifth villager stays unemployed.
        assert_eq!(spawn_seed_villagers(&mut session, &world, 5), 4);
        assert_eq!(
            session.roster(&BuildingId::new("gathering_camp_1")).len(),
            2
        );
        assert_eq!(
            session.roster(&BuildingId::new("woodcutter_camp_1")).len(),
            2
        );
        assert!(session
            .job_assignment(&VillagerId::new("villager_5"))
            .is_none());
    }

    #[test]
    fn construction_drives_build_count_goals() {
        let config = GameConfig {
            resources: vec![ResourceDefinition::new("wood", Decimal::ZERO)],
            goals: vec![Goal::new(
                "build_a_farm",
                "Breadbasket",
                GoalKind::BuildCount {
                    building: BuildingTypeId::new("farm"),
                },
                Decimal::ONE,
                GoalReward::default(),
            )],
            ..GameConfig::default()
        };
        let mut session = EconomySession::from_config(&config);
        let mut world = GameWorld::new();

        assert!(!session.check_goal(&GoalId::new("build_a_farm"), &world, &world));

        world.construct(
            &BuildingId::new("farm_1"),
            BuildingSite {
                kind: BuildingTypeId::new("farm"),
                job: JobType::Farmer,
                worker_capacity: 3,
            },
        );
        assert!(session.check_goal(&GoalId::new("build_a_farm"), &world, &world));
    }

    #[test]
    fn research_oracle_reports_finished_projects() {
        let mut world = GameWorld::new();
        let irrigation = ResearchId::new("irrigation");
        assert!(!world.is_research_complete(&irrigation));
        world.finish_research(&irrigation);
        assert!(world.is_research_complete(&irrigation));
    }
}
