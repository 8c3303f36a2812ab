use thiserror::Error;

/// Canonical result for protocol operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced synchronously at the `subscribe` call site.
///
/// These indicate a programming mistake by the pipeline assembler or a
/// lift author. They are never delivered as a terminal signal to the
/// downstream consumer: when one is raised, the consumer was never
/// attached in the first place.
#[derive(Debug, Error)]
pub enum Error {
    #[error("contract violation: {0}")]
    Contract(String),

    // This crate does not enforce single-subscription, but source
    // implementations that do can reject re-subscription with this.
    #[error("stream already subscribed: {0}")]
    AlreadySubscribed(String),
}

/// Terminal failure delivered through `Subscriber::on_error` after a
/// successful subscription. These belong to the source and the adapted
/// consumer; the lift core forwards them untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("source error: {0}")]
    Source(String),

    #[error("transform error: {0}")]
    Transform(String),
}
