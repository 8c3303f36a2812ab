//! Fusion negotiation at subscribe time.
//!
//! A lift author writes an ordinary consumer. When the downstream
//! consumer declares the fast path but the adapted consumer does not,
//! the adapted consumer is hidden behind [`SuppressFusion`] so the pair
//! only ever speaks the baseline protocol. A both-fusable pair is
//! trusted as-is: that trust boundary is documented, not verified.

use riffle_core::prelude::{Consumer, FusionCapability, StreamError, Subscriber, Subscription};

/// Decide the consumer the source will be subscribed with.
///
/// Pure decision; the only possible side effect is allocating the shim.
/// `downstream` is the capability the downstream consumer declared
/// before it was handed to the lifter.
pub fn negotiate<T: 'static>(downstream: FusionCapability, adapted: Consumer<T>) -> Consumer<T> {
    match (downstream, adapted.capability()) {
        (FusionCapability::Fusable, FusionCapability::Plain) => {
            Consumer::Plain(Box::new(SuppressFusion::new(adapted)))
        }
        // Fusion is irrelevant, or the lift author produced a fusable
        // adapter and is trusted to honor the fast path.
        _ => adapted,
    }
}

/// Baseline-only shim around an adapted consumer.
///
/// Deliberately implements [`Subscriber`] and nothing more: as far as
/// the downstream stage can observe, the fast path does not exist, so it
/// can never invoke buffered-pull operations the adapter would not
/// service.
pub struct SuppressFusion<T> {
    inner: Consumer<T>,
}

impl<T> SuppressFusion<T> {
    pub fn new(inner: Consumer<T>) -> Self {
        Self { inner }
    }
}

impl<T> Subscriber<T> for SuppressFusion<T> {
    fn on_subscribe(&mut self, subscription: Box<dyn Subscription>) {
        self.inner.on_subscribe(subscription);
    }

    fn on_next(&mut self, element: T) {
        self.inner.on_next(element);
    }

    fn on_error(&mut self, error: StreamError) {
        self.inner.on_error(error);
    }

    fn on_complete(&mut self) {
        self.inner.on_complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riffle_core::consumer::{FusableSubscriber, FusionMode};
    use riffle_core::testing::{
        FusableRecorder, NoopSubscription, RecordingSubscriber, SubscriberEvent,
    };

    fn consumer_addr<T>(consumer: &Consumer<T>) -> usize {
        match consumer {
            Consumer::Plain(s) => &**s as *const dyn Subscriber<T> as *const () as usize,
            Consumer::Fusable(s) => &**s as *const dyn FusableSubscriber<T> as *const () as usize,
        }
    }

    #[test]
    fn plain_downstream_never_wraps() {
        let (adapted, _) = RecordingSubscriber::<i32>::new();
        let adapted = Consumer::Plain(Box::new(adapted));
        let before = consumer_addr(&adapted);

        let negotiated = negotiate(FusionCapability::Plain, adapted);
        assert_eq!(consumer_addr(&negotiated), before);
    }

    #[test]
    fn matching_fusable_pair_never_wraps() {
        let (adapted, _) = FusableRecorder::<i32>::new(FusionMode::Sync);
        let adapted = Consumer::Fusable(Box::new(adapted));
        let before = consumer_addr(&adapted);

        let negotiated = negotiate(FusionCapability::Fusable, adapted);
        assert!(negotiated.is_fusable());
        assert_eq!(consumer_addr(&negotiated), before);
    }

    #[test]
    fn mismatch_wraps_in_a_plain_shim() {
        let (adapted, _) = RecordingSubscriber::<i32>::new();
        let adapted = Consumer::Plain(Box::new(adapted));
        let before = consumer_addr(&adapted);

        let negotiated = negotiate(FusionCapability::Fusable, adapted);
        assert!(!negotiated.is_fusable());
        assert_ne!(consumer_addr(&negotiated), before);
    }

    #[test]
    fn shim_forwards_every_baseline_call_in_order() {
        let (adapted, log) = RecordingSubscriber::new();
        let adapted = Consumer::Plain(Box::new(adapted));

        let mut negotiated = negotiate(FusionCapability::Fusable, adapted);
        negotiated.on_subscribe(Box::new(NoopSubscription));
        negotiated.on_next(1);
        negotiated.on_next(2);
        negotiated.on_complete();

        assert_eq!(
            log.snapshot(),
            vec![
                SubscriberEvent::Subscribed,
                SubscriberEvent::Next(1),
                SubscriberEvent::Next(2),
                SubscriberEvent::Complete,
            ]
        );
    }

    #[test]
    fn shim_forwards_terminal_errors_untouched() {
        let (adapted, log) = RecordingSubscriber::<i32>::new();
        let adapted = Consumer::Plain(Box::new(adapted));

        let mut negotiated = negotiate(FusionCapability::Fusable, adapted);
        negotiated.on_error(StreamError::Transform("bad element".to_string()));

        assert_eq!(
            log.snapshot(),
            vec![SubscriberEvent::Error(StreamError::Transform(
                "bad element".to_string()
            ))]
        );
    }
}
