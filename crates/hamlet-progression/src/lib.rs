//! Goal and achievement progression for the Hamlet economy.
//!
//! The [`GoalEngine`] owns the goal and achievement registries, the
//! monotone set of unlocked building kinds, and the player's favorites.
//! It reacts to resource changes (harvest and accumulate goals), reads
//! population directly from the ledger, and consults external oracles
//! for build counts and research state.
//!
//! # State machine
//!
//! Each goal moves `pending -> completed` exactly once and never back.
//! The reward (currently: one building unlock) is applied at most once,
//! at the transition. Re-checking a completed goal is an idempotent
//! no-op: no re-reward, no duplicate entry in the completion order.
//!
//! # Modules
//!
//! - [`engine`] -- The [`GoalEngine`] and its per-kind check algorithms.
//! - [`oracles`] -- External queries the engine depends on but does not
//!   own: build counts and research completion.

pub mod engine;
pub mod oracles;

pub use engine::{GoalEngine, ProgressContext};
pub use oracles::{BuildingCountOracle, ResearchOracle};
