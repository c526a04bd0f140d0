// Requester behaviour against the in-memory store.

use std::thread;

use visloc_core::errors::ExErrorKind;
use visloc_core::model::{Command, Location, QueueKeys, DEFAULT_COMMAND_KEY, DEFAULT_LOCATION_KEY};
use visloc_core::ops::MemoryStore;
use visloc_engine::LocationRequester;

fn setup() -> (MemoryStore, LocationRequester<MemoryStore>) {
    let store = MemoryStore::new();
    let requester = LocationRequester::new(store.clone());
    (store, requester)
}

fn queued_things(store: &MemoryStore) -> Vec<String> {
    store
        .list(DEFAULT_COMMAND_KEY)
        .unwrap()
        .iter()
        .map(|raw| serde_json::from_str::<Command>(raw).unwrap().locate)
        .collect()
}

#[test]
fn test_locate_appends_exactly_one_entry() {
    let (store, mut requester) = setup();

    for (i, thing) in ["ball", "goal", "cube"].iter().enumerate() {
        let before = requester.pending_commands().unwrap();
        let len = requester.locate(thing).unwrap();

        assert_eq!(len, before + 1);
        assert_eq!(len, (i + 1) as u64);
    }

    assert_eq!(queued_things(&store), vec!["ball", "goal", "cube"]);
}

#[test]
fn test_locate_entry_is_text_encoded_command() {
    let (store, mut requester) = setup();

    requester.locate("power cell").unwrap();

    let raw = store.list(DEFAULT_COMMAND_KEY).unwrap();
    assert_eq!(raw.len(), 1);
    let value: serde_json::Value = serde_json::from_str(&raw[0]).unwrap();
    assert_eq!(value, serde_json::json!({ "locate": "power cell" }));
}

#[test]
fn test_locate_does_not_validate_thing() {
    let (store, mut requester) = setup();

    requester.locate("").unwrap();
    requester.locate("definitely-not-a-target \"quoted\"").unwrap();

    assert_eq!(
        queued_things(&store),
        vec!["", "definitely-not-a-target \"quoted\""]
    );
}

#[test]
fn test_clear_commands_empties_queue() {
    let (store, mut requester) = setup();
    requester.locate("ball").unwrap();
    requester.locate("goal").unwrap();

    assert_eq!(requester.clear_commands().unwrap(), 1);

    assert_eq!(requester.pending_commands().unwrap(), 0);
    assert!(!store.contains_key(DEFAULT_COMMAND_KEY).unwrap());
}

#[test]
fn test_clear_commands_on_empty_queue_succeeds() {
    let (_store, mut requester) = setup();

    assert_eq!(requester.clear_commands().unwrap(), 0);
    assert_eq!(requester.clear_commands().unwrap(), 0);
    assert_eq!(requester.pending_commands().unwrap(), 0);
}

#[test]
fn test_clear_commands_leaves_location() {
    let (store, mut requester) = setup();
    store
        .set_value(DEFAULT_LOCATION_KEY, r#"{"azimuth": 1.5, "altitude": 30}"#)
        .unwrap();
    requester.locate("ball").unwrap();

    requester.clear_commands().unwrap();

    assert!(requester.get_location().unwrap().is_some());
}

#[test]
fn test_get_location_parses_stored_value() {
    let (store, mut requester) = setup();
    store
        .set_value(DEFAULT_LOCATION_KEY, r#"{"azimuth": 1.5, "altitude": 30}"#)
        .unwrap();

    let location = requester.get_location().unwrap();

    assert_eq!(location, Some(Location::new(1.5, 30.0)));
}

#[test]
fn test_get_location_absent_is_none() {
    let (_store, mut requester) = setup();

    assert_eq!(requester.get_location().unwrap(), None);
}

#[test]
fn test_get_location_malformed_is_error_not_none() {
    let (store, mut requester) = setup();

    for bad in ["", "not json", "null", "42", r#"{"azimuth": "left"}"#] {
        store.set_value(DEFAULT_LOCATION_KEY, bad).unwrap();

        let err = requester.get_location().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Serialization, "input {:?}", bad);
        assert_eq!(err.key(), Some(DEFAULT_LOCATION_KEY));
        assert!(err.request_id().is_some());
    }
}

#[test]
fn test_get_location_last_write_wins() {
    let (store, mut requester) = setup();
    store
        .set_value(DEFAULT_LOCATION_KEY, r#"{"azimuth": 1, "altitude": 2}"#)
        .unwrap();
    store
        .set_value(DEFAULT_LOCATION_KEY, r#"{"azimuth": 3, "altitude": 4}"#)
        .unwrap();

    assert_eq!(
        requester.get_location().unwrap(),
        Some(Location::new(3.0, 4.0))
    );
}

#[test]
fn test_get_location_does_not_consume() {
    let (store, mut requester) = setup();
    store
        .set_value(DEFAULT_LOCATION_KEY, r#"{"azimuth": 9.5, "altitude": -1}"#)
        .unwrap();

    let first = requester.get_location().unwrap();
    let second = requester.get_location().unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_locate_into_wrong_type_key_fails() {
    let (store, mut requester) = setup();
    store.set_value(DEFAULT_COMMAND_KEY, "oops").unwrap();

    let err = requester.locate("ball").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::WrongType);
    assert_eq!(err.key(), Some(DEFAULT_COMMAND_KEY));
}

#[test]
fn test_custom_keys_are_used() {
    let store = MemoryStore::new();
    let keys = QueueKeys::new("robot:cmds", "robot:target").unwrap();
    let mut requester = LocationRequester::with_keys(store.clone(), keys).unwrap();

    requester.locate("hatch").unwrap();
    store
        .set_value("robot:target", r#"{"azimuth": 0, "altitude": 0}"#)
        .unwrap();

    assert_eq!(store.list("robot:cmds").unwrap().len(), 1);
    assert!(!store.contains_key(DEFAULT_COMMAND_KEY).unwrap());
    assert_eq!(
        requester.get_location().unwrap(),
        Some(Location::new(0.0, 0.0))
    );
}

#[test]
fn test_concurrent_instances_lose_no_entries() {
    const PER_THREAD: usize = 200;
    let store = MemoryStore::new();

    let handles: Vec<_> = ["left", "right"]
        .into_iter()
        .map(|side| {
            let mut requester = LocationRequester::new(store.clone());
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    requester.locate(&format!("{}-{}", side, i)).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let mut things = queued_things(&store);
    assert_eq!(things.len(), 2 * PER_THREAD);

    things.sort();
    things.dedup();
    assert_eq!(things.len(), 2 * PER_THREAD, "every entry must be distinct");

    // Each producer's own entries stay in push order.
    let left: Vec<_> = queued_things(&store)
        .into_iter()
        .filter(|t| t.starts_with("left-"))
        .collect();
    let expected: Vec<_> = (0..PER_THREAD).map(|i| format!("left-{}", i)).collect();
    assert_eq!(left, expected);
}

#[test]
fn test_requester_works_with_borrowed_store() {
    let mut store = MemoryStore::new();
    {
        let mut requester = LocationRequester::new(&mut store);
        requester.locate("ball").unwrap();
    }
    assert_eq!(store.list(DEFAULT_COMMAND_KEY).unwrap().len(), 1);
}
