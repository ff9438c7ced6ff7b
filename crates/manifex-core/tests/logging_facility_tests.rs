#![allow(clippy::unwrap_used, clippy::expect_used)]

use manifex_core::errors::{MxError, MxErrorKind};
use manifex_core::logging_facility::test_capture::init_test_capture;
use manifex_core::{log_op_end, log_op_error, log_op_start};
use manifex_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let events = capture.events();
    let start_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START))
        .collect();

    assert!(
        !start_events.is_empty(),
        "Should have captured at least one start event"
    );
}

#[test]
fn test_log_op_start_with_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_2";

    log_op_start!(op_name, dir = "/work/pkg", dry_run = true);

    let events = capture.events();
    let event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("start event should be captured");

    assert_eq!(event.fields.get("dir"), Some(&"/work/pkg".to_string()));
    assert_eq!(event.fields.get("dry_run"), Some(&"true".to_string()));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_3";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");

    let end_event = end_events[0];
    assert_eq!(end_event.fields.get("duration_ms"), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    let err = MxError::new(MxErrorKind::InvalidManifest).with_op(op_name);
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| {
            e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR)
        })
        .expect("error event should be captured");

    assert_eq!(
        error_event.fields.get("err_code"),
        Some(&"ERR_INVALID_MANIFEST".to_string())
    );
    assert_eq!(
        error_event.fields.get("err_kind"),
        Some(&"InvalidManifest".to_string())
    );

    // The error is still usable after logging
    assert_eq!(err.kind(), MxErrorKind::InvalidManifest);
}

#[test]
fn test_component_records_module_path() {
    let capture = init_test_capture();
    let op_name = "test_component_unique_5";

    log_op_start!(op_name);

    let events = capture.events();
    let event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("start event should be captured");

    assert!(event
        .component
        .as_deref()
        .unwrap_or_default()
        .contains("logging_facility_tests"));
}
