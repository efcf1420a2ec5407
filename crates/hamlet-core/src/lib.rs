//! Economy session, configuration, tick cycle, and runner for Hamlet.
//!
//! This crate composes the leaf components -- ledger, workforce
//! allocator, progression engine, and event bus -- into a single
//! explicitly-constructed [`EconomySession`] service object. There are
//! no process-wide singletons for game state: whoever owns the session
//! owns the economy.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration loading into strongly-typed
//!   structs, with a degraded loader that falls back to defaults.
//! - [`production`] -- Per-job production rules (output rate and upkeep).
//! - [`session`] -- The [`EconomySession`] composition root and its
//!   event dispatch loop.
//! - [`tick`] -- One tick of production/consumption plus the goal
//!   re-evaluation it triggers.
//! - [`runner`] -- The bounded async tick driver (a process-wide
//!   singleton; a second claim fails).
//!
//! [`EconomySession`]: session::EconomySession

pub mod config;
pub mod production;
pub mod runner;
pub mod session;
pub mod tick;

pub use config::{ConfigError, GameConfig};
pub use production::{ProductionRule, ProductionTable};
pub use runner::{RunBounds, RunOutcome, RunnerError, TickDriver};
pub use session::EconomySession;
pub use tick::{run_tick, TickSummary};
