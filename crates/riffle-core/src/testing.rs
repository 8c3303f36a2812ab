//! Test doubles for the stream protocol.
//!
//! Provides a scripted keyed source and recording subscribers so tests
//! can exercise subscription paths without a real grouped source.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::consumer::{Consumer, FusableSubscriber, FusionMode, Subscriber};
use crate::error::{Error, Result, StreamError};
use crate::introspect::{AttrValue, Introspect, RunStyle, StageAttr};
use crate::stream::KeyedStream;
use crate::subscription::Subscription;

/// Subscription that accepts demand and cancellation and does nothing.
#[derive(Debug, Default)]
pub struct NoopSubscription;

impl Subscription for NoopSubscription {
    fn request(&mut self, _n: u64) {}

    fn cancel(&mut self) {}
}

/// Optional reflection data a `TestSource` can be configured with.
struct TestFacet {
    step_name: String,
    run_style: Option<RunStyle>,
}

/// Scripted keyed source that records what it is subscribed with.
pub struct TestSource<K, T> {
    key: K,
    prefetch: usize,
    facet: Option<TestFacet>,
    reject_resubscription: bool,
    subscriptions: AtomicUsize,
    received: Mutex<Option<Consumer<T>>>,
}

impl<K, T> TestSource<K, T> {
    pub fn new(key: K, prefetch: usize) -> Self {
        Self {
            key,
            prefetch,
            facet: None,
            reject_resubscription: false,
            subscriptions: AtomicUsize::new(0),
            received: Mutex::new(None),
        }
    }

    /// Expose a reflection facet with the given step name and run style.
    pub fn with_facet(mut self, step_name: impl Into<String>, run_style: Option<RunStyle>) -> Self {
        self.facet = Some(TestFacet {
            step_name: step_name.into(),
            run_style,
        });
        self
    }

    /// Make the second and later subscriptions fail.
    pub fn rejecting_resubscription(mut self) -> Self {
        self.reject_resubscription = true;
        self
    }

    /// Number of `subscribe` calls observed so far.
    pub fn subscribe_count(&self) -> usize {
        self.subscriptions.load(Ordering::SeqCst)
    }

    /// Remove and return the most recently received consumer, so a test
    /// can drive it by hand.
    pub fn take_consumer(&self) -> Option<Consumer<T>> {
        self.received.lock().unwrap().take()
    }
}

impl<K, T> KeyedStream<K, T> for TestSource<K, T>
where
    K: Send + Sync + 'static,
    T: Send + 'static,
{
    fn key(&self) -> &K {
        &self.key
    }

    fn prefetch_hint(&self) -> usize {
        self.prefetch
    }

    fn subscribe(&self, consumer: Consumer<T>) -> Result<()> {
        let previous = self.subscriptions.fetch_add(1, Ordering::SeqCst);
        if previous > 0 && self.reject_resubscription {
            return Err(Error::AlreadySubscribed(
                "test source allows a single subscription".to_string(),
            ));
        }
        *self.received.lock().unwrap() = Some(consumer);
        Ok(())
    }

    fn introspect(&self) -> Option<&dyn Introspect> {
        self.facet.as_ref().map(|_| self as &dyn Introspect)
    }
}

impl<K, T> Introspect for TestSource<K, T> {
    fn query(&self, attr: StageAttr) -> Option<AttrValue<'_>> {
        let facet = self.facet.as_ref()?;
        match attr {
            StageAttr::Prefetch => Some(AttrValue::Prefetch(self.prefetch)),
            StageAttr::RunStyle => facet.run_style.map(AttrValue::RunStyle),
            _ => None,
        }
    }

    fn step_name(&self) -> String {
        match &self.facet {
            Some(facet) => facet.step_name.clone(),
            None => "test-source".to_string(),
        }
    }
}

/// Events observed by a recording subscriber, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriberEvent<T> {
    Subscribed,
    Next(T),
    Error(StreamError),
    Complete,
}

/// Shared, cloneable view over a recorder's event log.
pub struct EventLog<T> {
    events: Arc<Mutex<Vec<SubscriberEvent<T>>>>,
}

// The log is shared by handle; cloning must not require `T: Clone`.
impl<T> Clone for EventLog<T> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<T> EventLog<T> {
    fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn push(&self, event: SubscriberEvent<T>) {
        self.events.lock().unwrap().push(event);
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> EventLog<T> {
    pub fn snapshot(&self) -> Vec<SubscriberEvent<T>> {
        self.events.lock().unwrap().clone()
    }
}

/// Plain-protocol recorder.
pub struct RecordingSubscriber<T> {
    log: EventLog<T>,
}

impl<T> RecordingSubscriber<T> {
    pub fn new() -> (Self, EventLog<T>) {
        let log = EventLog::new();
        (Self { log: log.clone() }, log)
    }
}

impl<T: Send> Subscriber<T> for RecordingSubscriber<T> {
    fn on_subscribe(&mut self, _subscription: Box<dyn Subscription>) {
        self.log.push(SubscriberEvent::Subscribed);
    }

    fn on_next(&mut self, element: T) {
        self.log.push(SubscriberEvent::Next(element));
    }

    fn on_error(&mut self, error: StreamError) {
        self.log.push(SubscriberEvent::Error(error));
    }

    fn on_complete(&mut self) {
        self.log.push(SubscriberEvent::Complete);
    }
}

/// Fusion-capable recorder with a scripted negotiation answer and an
/// optional pollable queue.
pub struct FusableRecorder<T> {
    log: EventLog<T>,
    queue: VecDeque<T>,
    mode: FusionMode,
}

impl<T> FusableRecorder<T> {
    /// `mode` is the answer returned from every `request_fusion` call,
    /// regardless of what was requested.
    pub fn new(mode: FusionMode) -> (Self, EventLog<T>) {
        let log = EventLog::new();
        (
            Self {
                log: log.clone(),
                queue: VecDeque::new(),
                mode,
            },
            log,
        )
    }

    /// Pre-fill the poll queue.
    pub fn with_queue(mut self, elements: Vec<T>) -> Self {
        self.queue = elements.into();
        self
    }
}

impl<T: Send> Subscriber<T> for FusableRecorder<T> {
    fn on_subscribe(&mut self, _subscription: Box<dyn Subscription>) {
        self.log.push(SubscriberEvent::Subscribed);
    }

    fn on_next(&mut self, element: T) {
        self.log.push(SubscriberEvent::Next(element));
    }

    fn on_error(&mut self, error: StreamError) {
        self.log.push(SubscriberEvent::Error(error));
    }

    fn on_complete(&mut self) {
        self.log.push(SubscriberEvent::Complete);
    }
}

impl<T: Send> FusableSubscriber<T> for FusableRecorder<T> {
    fn request_fusion(&mut self, _requested: FusionMode) -> FusionMode {
        self.mode
    }

    fn poll(&mut self) -> Option<T> {
        self.queue.pop_front()
    }
}
