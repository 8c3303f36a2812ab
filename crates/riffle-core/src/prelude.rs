//! Convenient re-exports for downstream crates.

pub use crate::consumer::{Consumer, FusableSubscriber, FusionCapability, FusionMode, Subscriber};
pub use crate::error::{Error, Result, StreamError};
pub use crate::introspect::{AsAny, AttrValue, Introspect, RunStyle, StageAttr};
pub use crate::stream::KeyedStream;
pub use crate::subscription::Subscription;
