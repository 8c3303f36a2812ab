//! Subscriber protocols and the `Consumer` sum type.
//!
//! A consumer's fusion capability is declared when it is constructed, by
//! picking the `Consumer` variant. Nothing in this crate probes a
//! subscriber at runtime to discover whether it happens to implement a
//! richer interface.

use serde::{Deserialize, Serialize};

use crate::error::StreamError;
use crate::subscription::Subscription;

/// Baseline push protocol every consumer speaks.
///
/// Call order: `on_subscribe` once, any number of `on_next`, then at most
/// one terminal (`on_error` or `on_complete`). Enforcing that order is
/// the producer's job.
pub trait Subscriber<T>: Send {
    /// Called once when the source attaches, before any element.
    fn on_subscribe(&mut self, subscription: Box<dyn Subscription>);

    /// One element notification.
    fn on_next(&mut self, element: T);

    /// Terminal failure. No further calls after this.
    fn on_error(&mut self, error: StreamError);

    /// Terminal completion. No further calls after this.
    fn on_complete(&mut self);
}

/// Fast-path (fusion) surface: buffered element polling plus a declared
/// run mode.
///
/// A stage must negotiate via `request_fusion` before polling; a consumer
/// that answered `FusionMode::None` must never be polled.
pub trait FusableSubscriber<T>: Subscriber<T> {
    /// Negotiate the fast path. Returning `FusionMode::None` declines it.
    fn request_fusion(&mut self, requested: FusionMode) -> FusionMode;

    /// Pull one buffered element, if one is ready.
    fn poll(&mut self) -> Option<T>;
}

/// Declared fusion capability of a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FusionCapability {
    /// Baseline push protocol only.
    Plain,
    /// Baseline protocol plus the buffered fast path.
    Fusable,
}

/// Fast-path run mode agreed between adjacent stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FusionMode {
    /// Fast path declined; stages fall back to push with demand counting.
    None,
    /// Elements are polled on the producing thread.
    Sync,
    /// Elements are polled after an availability signal.
    Async,
}

/// A consumer with its fusion capability decided at construction.
pub enum Consumer<T> {
    Plain(Box<dyn Subscriber<T>>),
    Fusable(Box<dyn FusableSubscriber<T>>),
}

impl<T> Consumer<T> {
    /// The capability this consumer was constructed with.
    pub fn capability(&self) -> FusionCapability {
        match self {
            Self::Plain(_) => FusionCapability::Plain,
            Self::Fusable(_) => FusionCapability::Fusable,
        }
    }

    pub fn is_fusable(&self) -> bool {
        matches!(self, Self::Fusable(_))
    }

    // Baseline forwarding; both variants speak the push protocol.

    pub fn on_subscribe(&mut self, subscription: Box<dyn Subscription>) {
        match self {
            Self::Plain(s) => s.on_subscribe(subscription),
            Self::Fusable(s) => s.on_subscribe(subscription),
        }
    }

    pub fn on_next(&mut self, element: T) {
        match self {
            Self::Plain(s) => s.on_next(element),
            Self::Fusable(s) => s.on_next(element),
        }
    }

    pub fn on_error(&mut self, error: StreamError) {
        match self {
            Self::Plain(s) => s.on_error(error),
            Self::Fusable(s) => s.on_error(error),
        }
    }

    pub fn on_complete(&mut self) {
        match self {
            Self::Plain(s) => s.on_complete(),
            Self::Fusable(s) => s.on_complete(),
        }
    }
}
