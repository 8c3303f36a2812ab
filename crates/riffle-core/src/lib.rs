#![forbid(unsafe_code)]
//! riffle-core: protocol contracts for the riffle streaming pipeline.
//!
//! Design intent:
//! - Pure contracts and small value types; no I/O, no runtime, no threads.
//! - Fusion capability is a constructor-time property of a consumer, never
//!   discovered by probing a subscriber for a richer interface.
//! - Demand accounting, scheduling, and the fast-path queue itself live in
//!   other layers; this crate only defines what they must look like.

pub mod consumer;
pub mod error;
pub mod introspect;
pub mod prelude;
pub mod stream;
pub mod subscription;
pub mod testing;

pub use consumer::{Consumer, FusableSubscriber, FusionCapability, FusionMode, Subscriber};
pub use error::{Error, Result, StreamError};
pub use introspect::{AttrValue, Introspect, RunStyle, StageAttr};
pub use stream::KeyedStream;
pub use subscription::Subscription;
