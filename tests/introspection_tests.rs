//! Attribute queries and step names on lifted keyed streams.

use std::sync::Arc;

use riffle_core::introspect::{AttrValue, Introspect, RunStyle, StageAttr};
use riffle_core::stream::KeyedStream;
use riffle_core::testing::TestSource;
use riffle_operators::{KeyedLiftedStream, LiftDescriptor, StageReport};

fn map_lift() -> Arc<LiftDescriptor<String, i64, i64>> {
    Arc::new(LiftDescriptor::map("mapLift", |v: i64| v * 2))
}

#[test]
fn queries_answer_every_defined_attribute() {
    let source = Arc::new(
        TestSource::<String, i64>::new("k1".to_string(), 32)
            .with_facet("groupBy(k1)", Some(RunStyle::Sync)),
    );
    let stream = KeyedLiftedStream::new(
        source.clone() as Arc<dyn KeyedStream<String, i64>>,
        map_lift(),
    );

    match stream.query(StageAttr::Parent) {
        Some(AttrValue::Parent(parent)) => {
            let parent = parent
                .downcast_ref::<TestSource<String, i64>>()
                .expect("parent is the concrete source");
            assert!(std::ptr::eq(parent, source.as_ref()));
        }
        other => panic!("expected a parent reference, got {other:?}"),
    }

    assert!(matches!(
        stream.query(StageAttr::Prefetch),
        Some(AttrValue::Prefetch(32))
    ));
    assert!(matches!(
        stream.query(StageAttr::RunStyle),
        Some(AttrValue::RunStyle(RunStyle::Sync))
    ));
    assert!(matches!(
        stream.query(StageAttr::LifterName),
        Some(AttrValue::LifterName("mapLift"))
    ));
    assert!(matches!(
        stream.query(StageAttr::InternalProducer),
        Some(AttrValue::InternalProducer(true))
    ));
}

#[test]
fn run_style_is_absent_when_the_source_has_no_facet() {
    let source: Arc<dyn KeyedStream<String, i64>> =
        Arc::new(TestSource::new("k1".to_string(), 32));
    let stream = KeyedLiftedStream::new(source, map_lift());

    assert!(stream.query(StageAttr::RunStyle).is_none());
}

#[test]
fn step_name_delegates_to_the_source_facet() {
    let source: Arc<dyn KeyedStream<String, i64>> = Arc::new(
        TestSource::new("k1".to_string(), 32).with_facet("groupBy(k1)", None),
    );
    let stream = KeyedLiftedStream::new(source, map_lift());

    assert_eq!(stream.step_name(), "groupBy(k1)");
}

#[test]
fn step_name_falls_back_to_a_generic_default() {
    let source: Arc<dyn KeyedStream<String, i64>> =
        Arc::new(TestSource::new("k1".to_string(), 32));
    let stream = KeyedLiftedStream::new(source, map_lift());

    assert_eq!(stream.step_name(), "keyed-lift");
}

#[test]
fn lift_over_lift_delegates_through_the_chain() {
    let source: Arc<dyn KeyedStream<String, i64>> = Arc::new(
        TestSource::new("k1".to_string(), 16)
            .with_facet("groupBy(k1)", Some(RunStyle::Async)),
    );
    let inner = KeyedLiftedStream::new(source, map_lift());
    let outer = KeyedLiftedStream::new(
        Arc::new(inner) as Arc<dyn KeyedStream<String, i64>>,
        Arc::new(LiftDescriptor::map("outerLift", |v: i64| v + 1)),
    );

    assert_eq!(outer.key(), "k1");
    assert_eq!(outer.prefetch_hint(), 16);
    assert_eq!(outer.step_name(), "groupBy(k1)");
    assert!(matches!(
        outer.query(StageAttr::RunStyle),
        Some(AttrValue::RunStyle(RunStyle::Async))
    ));
    assert!(matches!(
        outer.query(StageAttr::LifterName),
        Some(AttrValue::LifterName("outerLift"))
    ));
}

#[test]
fn a_report_captures_the_lifted_stage_for_export() {
    let source: Arc<dyn KeyedStream<String, i64>> = Arc::new(
        TestSource::new("k1".to_string(), 32)
            .with_facet("groupBy(k1)", Some(RunStyle::Sync)),
    );
    let stream = KeyedLiftedStream::new(source, map_lift());

    let report = StageReport::capture(&stream);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["step_name"], "groupBy(k1)");
    assert_eq!(json["lifter"], "mapLift");
    assert_eq!(json["prefetch"], 32);
    assert_eq!(json["internal_producer"], true);
}
