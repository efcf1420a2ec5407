//! Shared data types for the Hamlet economy core.
//!
//! This crate defines the vocabulary every other crate speaks:
//!
//! - [`ids`] -- String-keyed identifier newtypes (resources, villagers,
//!   buildings, goals, research, achievements).
//! - [`enums`] -- Closed enumerations for job types and goal kinds. No
//!   stringly-typed categories cross a crate boundary.
//! - [`structs`] -- Resource definitions, job assignments, goals, and
//!   achievements.
//!
//! The crate is intentionally leaf-level: it depends on nothing but
//! `serde` and `rust_decimal`.

pub mod enums;
pub mod ids;
pub mod structs;

pub use enums::{GoalKind, JobType};
pub use ids::{
    AchievementId, BuildingId, BuildingTypeId, GoalId, ResearchId, ResourceId, VillagerId,
};
pub use structs::{Achievement, Goal, GoalReward, JobAssignment, ResourceDefinition};
