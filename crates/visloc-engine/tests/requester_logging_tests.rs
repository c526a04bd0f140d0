#![allow(clippy::unwrap_used, clippy::expect_used)]

use visloc_core::logging_facility::test_capture::{init_test_capture, CapturedEvent};
use visloc_core::model::QueueKeys;
use visloc_core::ops::MemoryStore;
use visloc_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND,
    FIELD_KEY, FIELD_QUEUE_LEN, FIELD_REQUEST_ID, FIELD_THING, FIELD_TRACE_ID, OP_CLEAR_COMMANDS,
    OP_GET_LOCATION, OP_LOCATE, OP_PENDING_COMMANDS,
};
use visloc_core_types::TraceId;
use visloc_engine::LocationRequester;

// Tests share one global subscriber; each test uses its own key names and
// only looks at events carrying them (or their request ids).
fn requester(prefix: &str) -> (MemoryStore, LocationRequester<MemoryStore>) {
    let store = MemoryStore::new();
    let keys = QueueKeys::new(format!("{}:cmds", prefix), format!("{}:loc", prefix)).unwrap();
    let requester = LocationRequester::with_keys(store.clone(), keys).unwrap();
    (store, requester)
}

fn lifecycle(events: &[CapturedEvent], op: &str, key: &str) -> Vec<CapturedEvent> {
    let request_ids: Vec<String> = events
        .iter()
        .filter(|e| {
            e.op.as_deref() == Some(op)
                && e.event.as_deref() == Some(EVENT_START)
                && e.field(FIELD_KEY) == Some(key)
        })
        .filter_map(|e| e.field(FIELD_REQUEST_ID).map(str::to_string))
        .collect();

    events
        .iter()
        .filter(|e| {
            e.op.as_deref() == Some(op)
                && e.field(FIELD_REQUEST_ID)
                    .map(|id| request_ids.iter().any(|r| r == id))
                    .unwrap_or(false)
        })
        .cloned()
        .collect()
}

fn event_names(events: &[CapturedEvent]) -> Vec<&str> {
    events.iter().filter_map(|e| e.event.as_deref()).collect()
}

#[test]
fn test_locate_emits_start_and_end() {
    let capture = init_test_capture();
    let (_store, mut requester) = requester("log_locate");

    requester.locate("ball").unwrap();

    let events = lifecycle(&capture.events(), OP_LOCATE, "log_locate:cmds");
    assert_eq!(event_names(&events), vec![EVENT_START, EVENT_END]);
    assert_eq!(events[0].field(FIELD_THING), Some("ball"));
    assert_eq!(events[1].field(FIELD_QUEUE_LEN), Some("1"));
    assert!(events[1].field(FIELD_DURATION_MS).is_some());
}

#[test]
fn test_clear_and_pending_emit_lifecycle() {
    let capture = init_test_capture();
    let (_store, mut requester) = requester("log_clear");

    requester.clear_commands().unwrap();
    requester.pending_commands().unwrap();

    let events = capture.events();
    let clear = lifecycle(&events, OP_CLEAR_COMMANDS, "log_clear:cmds");
    assert_eq!(event_names(&clear), vec![EVENT_START, EVENT_END]);
    assert_eq!(clear[1].field("removed"), Some("0"));

    let pending = lifecycle(&events, OP_PENDING_COMMANDS, "log_clear:cmds");
    assert_eq!(event_names(&pending), vec![EVENT_START, EVENT_END]);
    assert_eq!(pending[1].field(FIELD_QUEUE_LEN), Some("0"));
}

#[test]
fn test_get_location_absent_logs_not_present() {
    let capture = init_test_capture();
    let (_store, mut requester) = requester("log_absent");

    assert!(requester.get_location().unwrap().is_none());

    let events = lifecycle(&capture.events(), OP_GET_LOCATION, "log_absent:loc");
    assert_eq!(event_names(&events), vec![EVENT_START, EVENT_END]);
    assert_eq!(events[1].field("present"), Some("false"));
}

#[test]
fn test_malformed_location_emits_end_error() {
    let capture = init_test_capture();
    let (store, mut requester) = requester("log_malformed");
    store.set_value("log_malformed:loc", "{broken").unwrap();

    let err = requester.get_location().unwrap_err();

    let events = lifecycle(&capture.events(), OP_GET_LOCATION, "log_malformed:loc");
    assert_eq!(event_names(&events), vec![EVENT_START, EVENT_END_ERROR]);
    assert_eq!(events[1].field(FIELD_ERR_CODE), Some(err.code()));
    assert_eq!(events[1].field(FIELD_ERR_KIND), Some("Serialization"));

    // The request id on the error finds the same two events.
    let request_id = err.request_id().expect("error carries request id");
    let by_request = capture.events_for_request(request_id.as_str());
    assert_eq!(event_names(&by_request), vec![EVENT_START, EVENT_END_ERROR]);
}

#[test]
fn test_trace_id_tags_start_event() {
    let capture = init_test_capture();
    let (_store, requester) = requester("log_trace");
    let mut requester = requester.with_trace_id(TraceId::from_string("match-7".to_string()));

    requester.locate("cube").unwrap();

    let events = lifecycle(&capture.events(), OP_LOCATE, "log_trace:cmds");
    assert_eq!(event_names(&events), vec![EVENT_START, EVENT_END]);
    assert_eq!(events[0].field(FIELD_TRACE_ID), Some("match-7"));
}
