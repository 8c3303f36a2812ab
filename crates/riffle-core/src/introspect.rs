//! Reflection surface for pipeline diagnostics.
//!
//! Attributes form a closed enumeration matched exhaustively: adding one
//! is a compile-checked change, never a string lookup. The surface is
//! in-process only; it is not a wire protocol.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Erased self-reference, used to expose upstream stages by identity.
///
/// Blanket-implemented for every `'static` type so stream implementors
/// get it for free. Smart pointers satisfy the blanket too, so when a
/// stage is held through `Arc` or `Box`, call `as_any` on the
/// dereferenced trait object (`source.as_ref().as_any()`); calling it
/// on the handle erases the handle, not the stage.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Closed set of queryable stage attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageAttr {
    /// Direct upstream stage (a reference, not ownership).
    Parent,
    /// Prefetch hint of the stage.
    Prefetch,
    /// How the stage executes elements on the fast path.
    RunStyle,
    /// Diagnostic name of the lift applied at this stage.
    LifterName,
    /// Marker classifying the stage as engine-internal.
    InternalProducer,
}

/// Execution style a stage reports for fast-path diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStyle {
    Sync,
    Async,
    Unknown,
}

/// Value answered for one attribute query.
pub enum AttrValue<'a> {
    Parent(&'a dyn Any),
    Prefetch(usize),
    RunStyle(RunStyle),
    LifterName(&'a str),
    InternalProducer(bool),
}

impl fmt::Debug for AttrValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent(_) => f.write_str("Parent(..)"),
            Self::Prefetch(n) => write!(f, "Prefetch({n})"),
            Self::RunStyle(style) => write!(f, "RunStyle({style:?})"),
            Self::LifterName(name) => write!(f, "LifterName({name:?})"),
            Self::InternalProducer(flag) => write!(f, "InternalProducer({flag})"),
        }
    }
}

/// Reflection contract a pipeline stage may expose for diagnostics.
pub trait Introspect {
    /// Answer one attribute, or `None` when the stage has no value for it.
    /// Total over `StageAttr`; never panics.
    fn query(&self, attr: StageAttr) -> Option<AttrValue<'_>>;

    /// Human-readable step name for pipeline traces.
    fn step_name(&self) -> String;
}
