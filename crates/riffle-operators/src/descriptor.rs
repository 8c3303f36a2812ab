//! Named lift descriptors.
//!
//! A lift is attached at subscription time: given the upstream stream and
//! the downstream consumer, the lifter returns the consumer the source
//! should be subscribed with. The transformation a lifter applies is
//! arbitrary and user-defined; this crate only carries it and names it.

use std::fmt;

use riffle_core::prelude::{Consumer, KeyedStream, StreamError, Subscriber, Subscription};

/// Adapter function a lift carries.
///
/// Must return `Some` for live inputs; answering `None` is a contract
/// violation reported synchronously at subscribe time. Each invocation
/// must be independent, since one lifter may serve many stream instances.
pub type Lifter<K, I, O> =
    dyn Fn(&dyn KeyedStream<K, I>, Consumer<O>) -> Option<Consumer<I>> + Send + Sync;

/// Immutable, named transformation descriptor.
pub struct LiftDescriptor<K, I, O> {
    name: String,
    lifter: Box<Lifter<K, I, O>>,
}

impl<K, I, O> LiftDescriptor<K, I, O>
where
    K: 'static,
    I: 'static,
    O: 'static,
{
    pub fn new<F>(name: impl Into<String>, lifter: F) -> Self
    where
        F: Fn(&dyn KeyedStream<K, I>, Consumer<O>) -> Option<Consumer<I>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            lifter: Box::new(lifter),
        }
    }

    /// Element-mapping lift: adapts `downstream` with a plain consumer
    /// that applies `f` to every element and forwards everything else.
    pub fn map<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(I) -> O + Clone + Send + Sync + 'static,
        I: Send,
        O: Send,
    {
        Self::new(name, move |_source, downstream| {
            Some(Consumer::Plain(Box::new(MapAdapter {
                downstream,
                f: f.clone(),
            })))
        })
    }

    /// Diagnostic name of this lift.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the lifter for one subscription.
    pub fn apply(
        &self,
        source: &dyn KeyedStream<K, I>,
        downstream: Consumer<O>,
    ) -> Option<Consumer<I>> {
        (self.lifter)(source, downstream)
    }
}

impl<K, I, O> fmt::Debug for LiftDescriptor<K, I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiftDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Plain adapter produced by `LiftDescriptor::map`.
struct MapAdapter<O, F> {
    downstream: Consumer<O>,
    f: F,
}

impl<I, O, F> Subscriber<I> for MapAdapter<O, F>
where
    F: Fn(I) -> O + Send,
{
    fn on_subscribe(&mut self, subscription: Box<dyn Subscription>) {
        self.downstream.on_subscribe(subscription);
    }

    fn on_next(&mut self, element: I) {
        self.downstream.on_next((self.f)(element));
    }

    fn on_error(&mut self, error: StreamError) {
        self.downstream.on_error(error);
    }

    fn on_complete(&mut self) {
        self.downstream.on_complete();
    }
}
