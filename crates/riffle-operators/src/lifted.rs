//! Publisher-facing lifted stream wrapper.

use std::sync::Arc;

use riffle_core::prelude::{
    AsAny, AttrValue, Consumer, Error, Introspect, KeyedStream, Result, StageAttr,
};

use crate::descriptor::LiftDescriptor;
use crate::fusion::negotiate;

/// Step name used when the source exposes no introspection of its own.
const FALLBACK_STEP_NAME: &str = "keyed-lift";

/// Keyed stream with a lift applied at subscription time.
///
/// Holds shared references to its source and descriptor; constructed
/// fresh per composition step and immutable afterwards. Its only
/// interesting lifecycle event is a single `subscribe` call; any state
/// retained beyond that lives in the adapted consumer, not here.
/// Subscribing twice to the same instance is undefined at this layer;
/// sources typically reject it.
pub struct KeyedLiftedStream<K, I, O> {
    source: Arc<dyn KeyedStream<K, I>>,
    lift: Arc<LiftDescriptor<K, I, O>>,
}

impl<K, I, O> KeyedLiftedStream<K, I, O> {
    pub fn new(source: Arc<dyn KeyedStream<K, I>>, lift: Arc<LiftDescriptor<K, I, O>>) -> Self {
        Self { source, lift }
    }
}

impl<K, I, O> KeyedStream<K, O> for KeyedLiftedStream<K, I, O>
where
    K: 'static,
    I: 'static,
    O: 'static,
{
    fn key(&self) -> &K {
        self.source.key()
    }

    fn prefetch_hint(&self) -> usize {
        self.source.prefetch_hint()
    }

    fn subscribe(&self, downstream: Consumer<O>) -> Result<()> {
        // Capability must be read before the lifter consumes `downstream`.
        let downstream_capability = downstream.capability();

        let adapted = self
            .lift
            .apply(self.source.as_ref(), downstream)
            .ok_or_else(|| {
                Error::Contract(format!(
                    "lifter '{}' returned no adapted consumer",
                    self.lift.name()
                ))
            })?;

        let negotiated = negotiate(downstream_capability, adapted);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            lifter = %self.lift.name(),
            downstream = ?downstream_capability,
            forwarded = ?negotiated.capability(),
            "subscribing lifted stream"
        );

        self.source.subscribe(negotiated)
    }

    fn introspect(&self) -> Option<&dyn Introspect> {
        Some(self)
    }
}

impl<K, I, O> Introspect for KeyedLiftedStream<K, I, O>
where
    K: 'static,
    I: 'static,
    O: 'static,
{
    fn query(&self, attr: StageAttr) -> Option<AttrValue<'_>> {
        match attr {
            // Dispatch through the trait object so the erased value is
            // the source stage itself, not the shared handle around it.
            StageAttr::Parent => Some(AttrValue::Parent(self.source.as_ref().as_any())),
            StageAttr::Prefetch => Some(AttrValue::Prefetch(self.source.prefetch_hint())),
            // A lift does not change how elements execute; the run style
            // is whatever the source reports, if it reports one.
            StageAttr::RunStyle => self.source.introspect()?.query(StageAttr::RunStyle),
            StageAttr::LifterName => Some(AttrValue::LifterName(self.lift.name())),
            StageAttr::InternalProducer => Some(AttrValue::InternalProducer(true)),
        }
    }

    fn step_name(&self) -> String {
        match self.source.introspect() {
            Some(facet) => facet.step_name(),
            None => FALLBACK_STEP_NAME.to_string(),
        }
    }
}
