//! Keyed stream contract.

use crate::consumer::Consumer;
use crate::error::Result;
use crate::introspect::{AsAny, Introspect};

/// One keyed partition of a grouped source.
///
/// Subscription runs synchronously on the calling thread; this contract
/// introduces no threads or queues of its own. Whether an instance
/// accepts more than one subscription is up to the implementation; the
/// lift core assumes one subscription per instance and does not enforce
/// it (implementations that do can answer `Error::AlreadySubscribed`).
pub trait KeyedStream<K, T>: AsAny + Send + Sync {
    /// Identity key this partition was grouped under.
    fn key(&self) -> &K;

    /// Prefetch hint for downstream buffering. Advisory.
    fn prefetch_hint(&self) -> usize;

    /// Attach `consumer` and start the flow.
    fn subscribe(&self, consumer: Consumer<T>) -> Result<()>;

    /// Optional reflection facet for diagnostics.
    fn introspect(&self) -> Option<&dyn Introspect> {
        None
    }
}
