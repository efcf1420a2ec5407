//! Per-job production rules.
//!
//! Each tick, every assigned worker applies the rule for their job:
//! pay the upkeep costs, then add the output resource to the ledger.
//! Jobs without a rule (builders, scholars) produce nothing through
//! the ledger; their effects live in other subsystems.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use hamlet_ledger::CostMap;
use hamlet_types::{JobType, ResourceId};

/// What one worker of a job produces and consumes per tick.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductionRule {
    /// The job this rule applies to.
    pub job: JobType,

    /// The resource added to the ledger.
    pub output: ResourceId,

    /// Amount of `output` added per worker per tick.
    #[serde(default = "default_rate")]
    pub rate_per_worker: Decimal,

    /// Resources consumed per worker per tick before producing. A worker
    /// whose upkeep cannot be paid idles for the tick.
    #[serde(default)]
    pub upkeep: CostMap,
}

const fn default_rate() -> Decimal {
    Decimal::ONE
}

/// Lookup table from job type to its production rule.
///
/// Built once from configuration; a duplicate rule for a job replaces
/// the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductionTable {
    rules: BTreeMap<JobType, ProductionRule>,
}

impl ProductionTable {
    /// Build the table from the configured rule list.
    pub fn new(rules: Vec<ProductionRule>) -> Self {
        let rules = rules.into_iter().map(|rule| (rule.job, rule)).collect();
        Self { rules }
    }

    /// Return the rule for a job, if one is configured.
    pub fn rule(&self, job: JobType) -> Option<&ProductionRule> {
        self.rules.get(&job)
    }

    /// Whether no rules are configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
