use pill_core::ReminderStore;
use pill_types::{Reminder, ReminderTime, Slot};

fn reminder(id: &str, name: &str) -> Reminder {
    Reminder::with_id(id, name, "1", ReminderTime::new(9, 0).unwrap(), None)
}

fn ids(store: &ReminderStore) -> Vec<String> {
    store.snapshot().iter().map(|r| r.id.clone()).collect()
}

#[test]
fn add_preserves_insertion_order() {
    let store = ReminderStore::new();
    assert!(store.is_empty());

    for (i, name) in ["Aspirin", "Insulin", "Warfarin", "Losartan"].iter().enumerate() {
        store.add(reminder(&i.to_string(), name)).unwrap();
    }

    assert_eq!(store.len(), 4);
    assert_eq!(ids(&store), vec!["0", "1", "2", "3"]);
    let names: Vec<_> = store.snapshot().iter().map(|r| r.name.clone()).collect();
    assert_eq!(names, vec!["Aspirin", "Insulin", "Warfarin", "Losartan"]);
}

#[test]
fn remove_unknown_id_is_noop() {
    let store = ReminderStore::new();
    store.add(reminder("a", "Aspirin")).unwrap();
    store.add(reminder("b", "Insulin")).unwrap();

    assert!(store.remove("zzz").is_none());
    assert_eq!(ids(&store), vec!["a", "b"]);
}

#[test]
fn remove_keeps_relative_order() {
    let store = ReminderStore::new();
    for id in ["a", "b", "c", "d"] {
        store.add(reminder(id, "Aspirin")).unwrap();
    }

    let removed = store.remove("b").unwrap();
    assert_eq!(removed.id, "b");
    assert_eq!(ids(&store), vec!["a", "c", "d"]);
}

#[test]
fn remove_twice_same_as_once() {
    let store = ReminderStore::new();
    store.add(reminder("a", "Aspirin")).unwrap();
    store.add(reminder("b", "Insulin")).unwrap();

    assert!(store.remove("a").is_some());
    let after_first = ids(&store);
    assert!(store.remove("a").is_none());
    assert_eq!(ids(&store), after_first);
}

#[test]
fn snapshot_is_unaffected_by_later_changes() {
    let store = ReminderStore::new();
    store.add(reminder("a", "Aspirin")).unwrap();

    let before = store.snapshot();
    store.add(reminder("b", "Insulin")).unwrap();
    store.remove("a");

    assert_eq!(before.len(), 1);
    assert_eq!(before[0].id, "a");
}

#[test]
fn add_then_remove_scenario() {
    let store = ReminderStore::new();
    let aspirin = Reminder::with_id(
        "1",
        "Aspirin",
        "1",
        "09:00 AM".parse().unwrap(),
        Some(Slot::One),
    );

    store.add(aspirin.clone()).unwrap();
    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0], aspirin);

    store.remove("1");
    assert!(store.snapshot().is_empty());
}
