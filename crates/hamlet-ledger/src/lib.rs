//! Resource ledger for the Hamlet economy.
//!
//! The [`ResourceLedger`] is the authoritative store of current resource
//! quantities. All mutation passes through its operations, and every write
//! publishes a [`ResourceChanged`] event on the bus -- unconditionally,
//! even when the delta is zero.
//!
//! # Design
//!
//! - **Total liveness**: no operation fails. Unknown resources read as
//!   zero, insufficient amounts are boolean failures, and a missing
//!   definitions table leaves the ledger usably empty.
//! - **Uncapped addition**: `add` does not clamp against `max_storage`;
//!   storage capacity is advisory metadata (see [`ResourceLedger::capacity`]).
//! - **Atomic payment**: [`ResourceLedger::pay`] deducts either every
//!   entry of a cost map or nothing.
//! - **Precision**: all quantities use [`Decimal`] -- no floating point.
//!
//! [`ResourceChanged`]: hamlet_events::EconomyEvent::ResourceChanged
//! [`Decimal`]: rust_decimal::Decimal

mod ledger;

pub use ledger::{CostMap, ResourceLedger};
