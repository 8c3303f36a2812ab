//! Demand handle for the baseline push/pull protocol.

/// Handle a source gives its consumer when the flow is attached.
///
/// Demand arithmetic and cancellation semantics live entirely in the
/// source; this crate only defines the contract.
pub trait Subscription: Send {
    /// Request `n` more elements.
    fn request(&mut self, n: u64);

    /// Stop the flow. Safe to call more than once.
    fn cancel(&mut self);
}
