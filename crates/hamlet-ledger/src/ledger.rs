//! The [`ResourceLedger`]: resource quantities and per-resource metadata.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use hamlet_events::{EconomyEvent, EventBus};
use hamlet_types::{ResourceDefinition, ResourceId};

/// A map of required resource amounts, as used by affordability checks
/// and payments.
pub type CostMap = BTreeMap<ResourceId, Decimal>;

/// Storage capacity reported for resources with no definition.
const DEFAULT_MAX_STORAGE: Decimal = Decimal::ONE_HUNDRED;

/// The authoritative store of current resource quantities.
///
/// Amounts may be fractional and are kept non-negative by the consumption
/// rules; `add` with a negative amount can still drive a resource below
/// zero, which is treated as caller misuse rather than guarded against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLedger {
    /// Immutable per-resource metadata, keyed by resource.
    definitions: BTreeMap<ResourceId, ResourceDefinition>,
    /// Current amount per resource. Absence reads as zero.
    amounts: BTreeMap<ResourceId, Decimal>,
}

impl ResourceLedger {
    /// Create an empty ledger with no definitions. Every read returns
    /// zero; this is the degraded mode used when the data source is
    /// missing at startup.
    pub const fn new() -> Self {
        Self {
            definitions: BTreeMap::new(),
            amounts: BTreeMap::new(),
        }
    }

    /// Build a ledger from the resource definitions table, seeding each
    /// resource with its starting amount.
    pub fn from_definitions(definitions: &[ResourceDefinition]) -> Self {
        let mut ledger = Self::new();
        for def in definitions {
            ledger
                .amounts
                .insert(def.id.clone(), def.starting_amount);
            ledger.definitions.insert(def.id.clone(), def.clone());
        }
        ledger
    }

    /// Return the current amount of a resource. Unknown resources read
    /// as zero; this never fails.
    pub fn get(&self, resource: &ResourceId) -> Decimal {
        self.amounts.get(resource).copied().unwrap_or(Decimal::ZERO)
    }

    /// Overwrite the stored amount of a resource.
    ///
    /// Publishes a `ResourceChanged` event carrying the delta against the
    /// previous amount on every call -- including calls where the delta
    /// is zero. Callers must tolerate the spurious notification; the HUD
    /// uses it as a refresh signal.
    pub fn set(&mut self, resource: &ResourceId, amount: Decimal, bus: &mut EventBus) {
        let previous = self.get(resource);
        let delta = amount.saturating_sub(previous);
        self.amounts.insert(resource.clone(), amount);
        bus.publish(EconomyEvent::ResourceChanged {
            resource: resource.clone(),
            delta,
            total: amount,
        });
    }

    /// Add to a resource's amount. Negative amounts subtract.
    ///
    /// Additions are not clamped against `max_storage`: a ledger with
    /// capacity 100 will happily hold 150 wood. Storage limits belong to
    /// the construction layer, not the ledger.
    pub fn add(&mut self, resource: &ResourceId, amount: Decimal, bus: &mut EventBus) {
        let total = self.get(resource).saturating_add(amount);
        self.set(resource, total, bus);
    }

    /// Remove `amount` from a resource if at least that much is stored.
    ///
    /// Returns `false` and leaves the ledger untouched (publishing no
    /// event) when the stored amount is insufficient. A negative `amount`
    /// always "succeeds" and increases the resource; that is caller
    /// misuse, not a guarded condition.
    pub fn consume(&mut self, resource: &ResourceId, amount: Decimal, bus: &mut EventBus) -> bool {
        let stored = self.get(resource);
        if stored < amount {
            return false;
        }
        self.set(resource, stored.saturating_sub(amount), bus);
        true
    }

    /// Whether every entry of the cost map is currently affordable.
    ///
    /// Unknown resources read as zero, so any positive requirement on an
    /// unknown resource fails the check.
    pub fn can_afford(&self, costs: &CostMap) -> bool {
        costs
            .iter()
            .all(|(resource, required)| self.get(resource) >= *required)
    }

    /// Deduct every entry of the cost map, or nothing.
    ///
    /// Re-validates affordability first; when affordable, each individual
    /// `consume` is guaranteed to succeed and one `ResourceChanged` event
    /// is published per entry. Returns `false` without mutating anything
    /// when any entry is unaffordable.
    pub fn pay(&mut self, costs: &CostMap, bus: &mut EventBus) -> bool {
        if !self.can_afford(costs) {
            return false;
        }
        for (resource, required) in costs {
            // Guaranteed by the affordability check above.
            let _ = self.consume(resource, *required, bus);
        }
        true
    }

    /// Return the maximum storage capacity for a resource, defaulting to
    /// 100 for resources with no definition.
    pub fn capacity(&self, resource: &ResourceId) -> Decimal {
        self.definitions
            .get(resource)
            .map_or(DEFAULT_MAX_STORAGE, |def| def.max_storage)
    }

    /// Return a copy of every stored amount.
    pub fn amounts(&self) -> BTreeMap<ResourceId, Decimal> {
        self.amounts.clone()
    }

    /// Return the definition for a resource, if one was loaded.
    pub fn definition(&self, resource: &ResourceId) -> Option<&ResourceDefinition> {
        self.definitions.get(resource)
    }

    /// Number of resources with loaded definitions.
    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }
}
