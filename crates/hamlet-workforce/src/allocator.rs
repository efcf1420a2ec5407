//! The [`WorkforceAllocator`] and the capacity oracle it consults.

use std::collections::{BTreeMap, BTreeSet};

use hamlet_events::{EconomyEvent, EventBus};
use hamlet_types::{BuildingId, JobAssignment, JobType, VillagerId};

/// External query for a building's worker-slot limit.
///
/// Owned by the building/construction layer, not by the allocator.
/// Implementations should return 1 when the building is unknown; the
/// allocator never caches the answer.
pub trait WorkerCapacityOracle {
    /// Number of worker slots at the given building instance.
    fn worker_capacity(&self, building: &BuildingId) -> u32;
}

/// Owns job assignments and per-building worker rosters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkforceAllocator {
    /// Active assignment per villager. At most one entry per villager.
    assignments: BTreeMap<VillagerId, JobAssignment>,
    /// Villagers working at each building. Entries are removed when the
    /// roster empties, so every present roster is non-empty.
    rosters: BTreeMap<BuildingId, BTreeSet<VillagerId>>,
}

impl WorkforceAllocator {
    /// Create an allocator with no assignments.
    pub const fn new() -> Self {
        Self {
            assignments: BTreeMap::new(),
            rosters: BTreeMap::new(),
        }
    }

    /// Assign a villager to a job at a building.
    ///
    /// A villager already holding an assignment is first unassigned (the
    /// re-entrant self-call keeps the one-assignment invariant across
    /// reassignment). The destination's capacity is then read fresh from
    /// the oracle; if the roster is full, nothing further is mutated and
    /// `false` is returned -- note the prior assignment has already been
    /// released at that point (see the crate-level quirk note).
    ///
    /// Publishes a `JobAssigned` event on success.
    pub fn assign(
        &mut self,
        villager: &VillagerId,
        building: &BuildingId,
        job: JobType,
        capacity: &dyn WorkerCapacityOracle,
        bus: &mut EventBus,
    ) -> bool {
        if self.assignments.contains_key(villager) {
            let _ = self.unassign(villager, bus);
        }

        let occupied = self.rosters.get(building).map_or(0, BTreeSet::len);
        let limit = usize::try_from(capacity.worker_capacity(building)).unwrap_or(usize::MAX);
        if occupied >= limit {
            return false;
        }

        self.assignments.insert(
            villager.clone(),
            JobAssignment {
                villager: villager.clone(),
                building: building.clone(),
                job,
            },
        );
        self.rosters
            .entry(building.clone())
            .or_default()
            .insert(villager.clone());

        bus.publish(EconomyEvent::JobAssigned {
            villager: villager.clone(),
            building: building.clone(),
            job,
        });
        true
    }

    /// Release a villager's assignment.
    ///
    /// Returns `false` (publishing nothing) when the villager holds no
    /// assignment; that is a no-op, not an error. Otherwise removes the
    /// assignment record and the roster membership, drops the roster
    /// entry entirely if it became empty, publishes `JobUnassigned`, and
    /// returns `true`.
    pub fn unassign(&mut self, villager: &VillagerId, bus: &mut EventBus) -> bool {
        let Some(assignment) = self.assignments.remove(villager) else {
            return false;
        };

        if let Some(roster) = self.rosters.get_mut(&assignment.building) {
            roster.remove(villager);
            if roster.is_empty() {
                self.rosters.remove(&assignment.building);
            }
        }

        bus.publish(EconomyEvent::JobUnassigned {
            villager: villager.clone(),
        });
        true
    }

    /// Return a copy of the villager's active assignment, if any.
    pub fn assignment(&self, villager: &VillagerId) -> Option<JobAssignment> {
        self.assignments.get(villager).cloned()
    }

    /// Return a copy of the set of villagers working at a building.
    /// Mutating the returned set does not affect the allocator.
    pub fn roster(&self, building: &BuildingId) -> BTreeSet<VillagerId> {
        self.rosters.get(building).cloned().unwrap_or_default()
    }

    /// Return a copy of every active assignment, ordered by villager.
    pub fn assignments(&self) -> Vec<JobAssignment> {
        self.assignments.values().cloned().collect()
    }

    /// Number of villagers currently assigned.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Oracle backed by a fixed table; unknown buildings get 1 slot.
    struct FixedCapacity {
        capacities: BTreeMap<BuildingId, u32>,
    }

    impl FixedCapacity {
        fn new(entries: &[(&str, u32)]) -> Self {
            let capacities = entries
                .iter()
                .map(|(id, cap)| (BuildingId::new(*id), *cap))
                .collect();
            Self { capacities }
        }
    }

    impl WorkerCapacityOracle for FixedCapacity {
        fn worker_capacity(&self, building: &BuildingId) -> u32 {
            self.capacities.get(building).copied().unwrap_or(1)
        }
    }

    fn villager(id: &str) -> VillagerId {
        VillagerId::new(id)
    }

    fn hut() -> BuildingId {
        BuildingId::new("lumber_hut_1")
    }

    #[test]
    fn assign_until_capacity() {
        let mut allocator = WorkforceAllocator::new();
        let mut bus = EventBus::new();
        let oracle = FixedCapacity::new(&[("lumber_hut_1", 2)]);

        assert!(allocator.assign(&villager("v1"), &hut(), JobType::Lumberjack, &oracle, &mut bus));
        assert!(allocator.assign(&villager("v2"), &hut(), JobType::Lumberjack, &oracle, &mut bus));
        assert!(!allocator.assign(&villager("v3"), &hut(), JobType::Lumberjack, &oracle, &mut bus));

        assert_eq!(allocator.roster(&hut()).len(), 2);
        assert!(allocator.assignment(&villager("v3")).is_none());
    }

    #[test]
    fn unknown_building_defaults_to_one_slot() {
        let mut allocator = WorkforceAllocator::new();
        let mut bus = EventBus::new();
        let oracle = FixedCapacity::new(&[]);
        let shed = BuildingId::new("mystery_shed");

        assert!(allocator.assign(&villager("v1"), &shed, JobType::Forager, &oracle, &mut bus));
        assert!(!allocator.assign(&villager("v2"), &shed, JobType::Forager, &oracle, &mut bus));
    }

    #[test]
    fn reassignment_moves_roster_membership() {
        let mut allocator = WorkforceAllocator::new();
        let mut bus = EventBus::new();
        let oracle = FixedCapacity::new(&[("lumber_hut_1", 2), ("mine_1", 2)]);
        let mine = BuildingId::new("mine_1");

        assert!(allocator.assign(&villager("v1"), &hut(), JobType::Lumberjack, &oracle, &mut bus));
        assert!(allocator.assign(&villager("v1"), &mine, JobType::Miner, &oracle, &mut bus));

        assert!(allocator.roster(&hut()).is_empty());
        assert_eq!(allocator.roster(&mine).len(), 1);
        let assignment = allocator.assignment(&villager("v1")).unwrap();
        assert_eq!(assignment.building, mine);
        assert_eq!(assignment.job, JobType::Miner);
        assert_eq!(allocator.assignment_count(), 1);
    }

    #[test]
    fn failed_reassignment_leaves_villager_unemployed() {
        // The documented quirk: the old post is released before the
        // destination's capacity check, so a failed move strands the
        // villager without work instead of reverting.
        let mut allocator = WorkforceAllocator::new();
        let mut bus = EventBus::new();
        let oracle = FixedCapacity::new(&[("lumber_hut_1", 1), ("mine_1", 1)]);
        let mine = BuildingId::new("mine_1");

        assert!(allocator.assign(&villager("v1"), &mine, JobType::Miner, &oracle, &mut bus));
        assert!(allocator.assign(&villager("v2"), &hut(), JobType::Lumberjack, &oracle, &mut bus));

        // v2 tries to move into the full mine.
        assert!(!allocator.assign(&villager("v2"), &mine, JobType::Miner, &oracle, &mut bus));

        assert!(allocator.assignment(&villager("v2")).is_none());
        assert!(allocator.roster(&hut()).is_empty());
        assert_eq!(allocator.roster(&mine).len(), 1);
    }

    #[test]
    fn unassign_unknown_villager_is_a_silent_no_op() {
        let mut allocator = WorkforceAllocator::new();
        let mut bus = EventBus::new();

        assert!(!allocator.unassign(&villager("v_unknown"), &mut bus));
        assert!(!bus.has_pending());
    }

    #[test]
    fn unassign_publishes_and_clears_empty_roster() {
        let mut allocator = WorkforceAllocator::new();
        let mut bus = EventBus::new();
        let oracle = FixedCapacity::new(&[("lumber_hut_1", 2)]);

        let _ = allocator.assign(&villager("v1"), &hut(), JobType::Lumberjack, &oracle, &mut bus);
        while bus.pop_pending().is_some() {}

        assert!(allocator.unassign(&villager("v1"), &mut bus));
        assert_eq!(
            bus.pop_pending(),
            Some(EconomyEvent::JobUnassigned {
                villager: villager("v1")
            })
        );
        assert!(allocator.roster(&hut()).is_empty());
        assert_eq!(allocator.assignment_count(), 0);
    }

    #[test]
    fn capacity_is_requeried_every_assign() {
        /// Oracle whose capacity can be changed between calls.
        struct Adjustable {
            capacity: core::cell::Cell<u32>,
        }
        impl WorkerCapacityOracle for Adjustable {
            fn worker_capacity(&self, _building: &BuildingId) -> u32 {
                self.capacity.get()
            }
        }

        let mut allocator = WorkforceAllocator::new();
        let mut bus = EventBus::new();
        let oracle = Adjustable {
            capacity: core::cell::Cell::new(1),
        };

        assert!(allocator.assign(&villager("v1"), &hut(), JobType::Lumberjack, &oracle, &mut bus));
        assert!(!allocator.assign(&villager("v2"), &hut(), JobType::Lumberjack, &oracle, &mut bus));

        // The building was upgraded: the next assign sees the new limit.
        oracle.capacity.set(2);
        assert!(allocator.assign(&villager("v2"), &hut(), JobType::Lumberjack, &oracle, &mut bus));
    }

    #[test]
    fn roster_is_a_defensive_copy() {
        let mut allocator = WorkforceAllocator::new();
        let mut bus = EventBus::new();
        let oracle = FixedCapacity::new(&[("lumber_hut_1", 2)]);
        let _ = allocator.assign(&villager("v1"), &hut(), JobType::Lumberjack, &oracle, &mut bus);

        let mut copy = allocator.roster(&hut());
        copy.insert(villager("intruder"));
        assert_eq!(allocator.roster(&hut()).len(), 1);
    }
}
