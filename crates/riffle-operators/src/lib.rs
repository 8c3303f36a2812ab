#![forbid(unsafe_code)]
//! riffle-operators: operator lifting with fusion negotiation.
//!
//! Design intent:
//! - A lift is attached at subscribe time; no intermediate stage is
//!   materialized early.
//! - Pipeline correctness never depends on a lift author handling the
//!   fusion fast path: capability mismatches are fenced off with a
//!   suppression shim at negotiation time.
//! - Everything here is synchronous on the subscribing thread and
//!   stateless between subscriptions.

pub mod descriptor;
pub mod fusion;
pub mod lifted;
pub mod report;

pub use descriptor::LiftDescriptor;
pub use fusion::{negotiate, SuppressFusion};
pub use lifted::KeyedLiftedStream;
pub use report::StageReport;
