//! Workforce allocation for the Hamlet economy.
//!
//! The [`WorkforceAllocator`] owns job assignments and per-building worker
//! rosters. Building capacity is not owned here: it is re-queried from a
//! [`WorkerCapacityOracle`] on every assignment, so capacity changes from
//! building upgrades take effect immediately.
//!
//! # Invariants
//!
//! - A villager holds at most one assignment at any time. Every villager
//!   in the assignment map appears in exactly one roster, and vice versa.
//! - `roster(b).len() <= capacity(b)` after every operation.
//!
//! # A deliberate quirk
//!
//! [`assign`] releases a villager's prior assignment *before* checking the
//! destination's capacity. When the destination is full, the reassignment
//! fails and the villager ends up unemployed rather than back at their old
//! post. The upstream game behaves this way and callers depend on the
//! roster slot being freed, so the behavior is kept and covered by a test.
//!
//! [`assign`]: WorkforceAllocator::assign

mod allocator;

pub use allocator::{WorkerCapacityOracle, WorkforceAllocator};
