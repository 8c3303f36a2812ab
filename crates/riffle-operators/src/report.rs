//! Serializable diagnostic snapshot of a pipeline stage.
//!
//! The closed attribute enumeration keeps the capture total: every
//! attribute the protocol defines is sampled exactly once, so tracing
//! tooling can export a stage without knowing what kind of stage it is.

use riffle_core::prelude::{AttrValue, Introspect, RunStyle, StageAttr};
use serde::{Deserialize, Serialize};

/// One stage's attribute answers, in a form diagnostic tooling can
/// render or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    pub step_name: String,
    pub lifter: Option<String>,
    pub prefetch: Option<usize>,
    pub run_style: Option<RunStyle>,
    pub internal_producer: bool,
    /// Whether the stage exposed an upstream reference. The reference
    /// itself is identity-only and is not exported.
    pub has_parent: bool,
}

impl StageReport {
    /// Sample every attribute of `stage` once.
    pub fn capture(stage: &dyn Introspect) -> Self {
        let mut report = Self {
            step_name: stage.step_name(),
            lifter: None,
            prefetch: None,
            run_style: None,
            internal_producer: false,
            has_parent: false,
        };
        for attr in [
            StageAttr::Parent,
            StageAttr::Prefetch,
            StageAttr::RunStyle,
            StageAttr::LifterName,
            StageAttr::InternalProducer,
        ] {
            match stage.query(attr) {
                Some(AttrValue::Parent(_)) => report.has_parent = true,
                Some(AttrValue::Prefetch(n)) => report.prefetch = Some(n),
                Some(AttrValue::RunStyle(style)) => report.run_style = Some(style),
                Some(AttrValue::LifterName(name)) => report.lifter = Some(name.to_string()),
                Some(AttrValue::InternalProducer(flag)) => report.internal_producer = flag,
                None => {}
            }
        }
        report
    }
}
