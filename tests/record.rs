//! Tests for the immutable record builder.

use reqlog::{Engine, Level, Logger, RequestContext};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

fn logger() -> Logger {
    Logger::from_engine(Engine::builder().build())
}

#[test]
fn level_methods_set_level_and_message() {
    let logger = logger();
    let cases = [
        (logger.debug("d"), Level::Debug, "d"),
        (logger.info("i"), Level::Info, "i"),
        (logger.warn("w"), Level::Warn, "w"),
        (logger.error("e"), Level::Error, "e"),
        (logger.fatal("f"), Level::Fatal, "f"),
        (logger.panic("p"), Level::Panic, "p"),
    ];

    for (record, level, message) in cases {
        assert_eq!(record.level(), Some(level));
        assert_eq!(record.message(), message);
        assert!(!record.has_fields());
    }
}

#[test]
fn fresh_record_has_no_level() {
    let record = logger().data("k", 1);
    assert_eq!(record.level(), None);
    assert_eq!(record.message(), "");
}

#[test]
fn data_appends_in_order() {
    let record = logger().info("test").data("a", 1).data("b", 2);

    assert!(record.has_fields());
    assert_eq!(
        record.fields(),
        &[("a".to_string(), json!(1)), ("b".to_string(), json!(2))]
    );
}

#[test]
fn data_accepts_any_serializable_value() {
    let mut tags = BTreeMap::new();
    tags.insert("env", "prod");

    let record = logger()
        .info("values")
        .data("str", "text")
        .data("float", 1.5)
        .data("list", vec![1, 2, 3])
        .data("map", &tags)
        .data("none", Option::<u8>::None);

    let values: Vec<_> = record.fields().iter().map(|(_, v)| v.clone()).collect();
    assert_eq!(
        values,
        vec![
            json!("text"),
            json!(1.5),
            json!([1, 2, 3]),
            json!({"env": "prod"}),
            json!(null),
        ]
    );
}

#[test]
fn unserializable_value_becomes_error_field() {
    let mut bad = BTreeMap::new();
    bad.insert((1u8, 2u8), 3u8);

    let record = logger().info("bad").data("pairs", bad);

    let (key, value) = &record.fields()[0];
    assert_eq!(key, "pairsError");
    assert!(value.is_string());
}

#[test]
fn branches_do_not_share_fields() {
    let base = logger().info("branch").data("a", 1);
    let left = base.data("b", 2);
    let right = base.data("c", 3).data("d", 4);

    assert_eq!(base.fields().len(), 1);
    assert_eq!(left.fields().len(), 2);
    assert_eq!(right.fields().len(), 3);
    assert_eq!(left.fields()[1].0, "b");
    assert_eq!(right.fields()[1].0, "c");
    assert!(!right.fields().iter().any(|(k, _)| k == "b"));
}

#[test]
fn level_change_keeps_fields() {
    let record = logger().info("first").data("k", "v").error("second");
    assert_eq!(record.level(), Some(Level::Error));
    assert_eq!(record.message(), "second");
    assert_eq!(record.fields().len(), 1);
}

#[test]
fn error_data_appends_error_message() {
    let err = std::io::Error::other("test error");
    let record = logger().info("test").error_data(Some(&err));

    assert!(record.has_fields());
    assert_eq!(
        record.fields(),
        &[("error".to_string(), json!("test error"))]
    );
}

#[test]
fn error_data_none_is_noop() {
    let record = logger().info("test").data("k", 1);
    let after = record.error_data(None::<&std::io::Error>);

    assert_eq!(after.fields(), record.fields());
    assert_eq!(after.has_fields(), record.has_fields());

    let empty = logger().info("test").error_data(None::<&dyn std::error::Error>);
    assert!(!empty.has_fields());
    assert!(empty.fields().is_empty());
}

#[test]
fn error_data_from_result() {
    let failed: Result<(), std::io::Error> = Err(std::io::Error::other("nope"));
    let fine: Result<(), std::io::Error> = Ok(());

    assert_eq!(
        logger().error("x").error_data(failed.as_ref().err()).fields().len(),
        1
    );
    assert!(logger().error("x").error_data(fine.as_ref().err()).fields().is_empty());
}

#[test]
fn with_context_resets_chain_but_keeps_settings() {
    let logger = logger().with_request_id_key("trace_id").with_show_caller(false);
    let ctx = RequestContext::background().with_request_id("abc");

    let record = logger.info("x").data("k", "v").with_context(&ctx);

    assert_eq!(record.level(), None);
    assert_eq!(record.message(), "");
    assert!(record.fields().is_empty());
    assert!(!record.has_fields());
    assert_eq!(record.request_id_key(), "trace_id");
    assert!(!record.show_caller());
    assert!(Arc::ptr_eq(record.engine(), logger.engine()));
    assert_eq!(record.context().request_id(), "abc");
}

#[test]
fn chain_after_with_context_keeps_context() {
    let ctx = RequestContext::background().with_request_id("test-request");

    let record = logger()
        .with_context(&ctx)
        .info("Processing request")
        .data("user_id", 123)
        .data("action", "login")
        .data("ip", "192.168.1.1");

    assert_eq!(record.level(), Some(Level::Info));
    assert_eq!(record.fields().len(), 3);
    assert_eq!(record.context().request_id(), "test-request");
}

#[test]
fn empty_request_id_key_falls_back_to_default() {
    let record = logger().with_request_id_key("").info("x");
    assert_eq!(record.request_id_key(), "request-id");
}
