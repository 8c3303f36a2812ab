#![forbid(unsafe_code)]
//! riffle: operator lifting with fusion negotiation for a pull-based,
//! backpressure-aware streaming pipeline.
//!
//! The workspace splits into protocol contracts (`riffle-core`) and the
//! lift core itself (`riffle-operators`); this crate re-exports the
//! surface of both for integration tests and downstream convenience.

pub use riffle_core::prelude::*;
pub use riffle_operators::{negotiate, KeyedLiftedStream, LiftDescriptor, StageReport, SuppressFusion};
