use chrono::NaiveDate;

use cellar::{
    core::store::{CellarStore, InsertOutcome, Mutation, StoreError, StoreSnapshot},
    entry::{Entry, EntryDraft},
    types::EntryKey,
};

fn draft(name: &str, date: &str, count: i64) -> EntryDraft {
    EntryDraft {
        name: name.to_string(),
        date: date.to_string(),
        count,
        country: "UK".to_string(),
        style: "Stout".to_string(),
        abv: 6.0,
        volume: 33.0,
    }
}

#[test]
fn create_then_remove_all_drops_the_entry() {
    let mut store = CellarStore::new();
    store.create(draft("Stout", "01/01/2099", 12)).unwrap();
    assert!(store.exists("Stout", "01/01/2099"));

    let outcome = store.remove_bottles("Stout", "01/01/2099", 12).unwrap();
    assert_eq!(outcome, Mutation::Removed);
    assert!(!store.exists("Stout", "01/01/2099"));
    assert!(store.is_empty());
}

#[test]
fn second_create_on_same_key_is_rejected() {
    let mut store = CellarStore::new();
    store.create(draft("Stout", "01/01/2099", 12)).unwrap();

    let err = store.create(draft("Stout", "1/1/2099", 3)).unwrap_err();
    let key = EntryKey::parse("Stout", "01/01/2099").unwrap();
    assert_eq!(err, StoreError::DuplicateEntry(key));
    assert_eq!(store.get("Stout", "01/01/2099").unwrap().count, 12);
}

#[test]
fn create_rejects_unparseable_date() {
    let mut store = CellarStore::new();
    let err = store.create(draft("Stout", "2099-01-01", 1)).unwrap_err();
    assert_eq!(err, StoreError::InvalidDate("2099-01-01".to_string()));
    assert!(store.is_empty());
}

#[test]
fn same_name_different_dates_are_independent() {
    let mut store = CellarStore::new();
    store.create(draft("IPA", "01/06/2025", 4)).unwrap();
    store.create(draft("IPA", "01/07/2025", 6)).unwrap();
    assert_eq!(store.len(), 2);

    store.remove_bottles("IPA", "01/06/2025", 4).unwrap();
    assert!(!store.exists("IPA", "01/06/2025"));
    assert_eq!(store.get("IPA", "01/07/2025").unwrap().count, 6);
}

#[test]
fn add_and_partial_remove_adjust_count_only() {
    let mut store = CellarStore::new();
    store.create(draft("Porter", "15/03/2030", 5)).unwrap();

    assert_eq!(
        store.add_bottles("Porter", "15/03/2030", 7).unwrap(),
        Mutation::Remaining(12)
    );
    assert_eq!(
        store.remove_bottles("Porter", "15/03/2030", 2).unwrap(),
        Mutation::Remaining(10)
    );

    let entry = store.get("Porter", "15/03/2030").unwrap();
    assert_eq!(entry.count, 10);
    assert_eq!(entry.country, "UK");
    assert_eq!(entry.abv, 6.0);
}

#[test]
fn removing_more_than_on_hand_drops_the_entry() {
    let mut store = CellarStore::new();
    store.create(draft("Porter", "15/03/2030", 5)).unwrap();
    assert_eq!(
        store.remove_bottles("Porter", "15/03/2030", 9).unwrap(),
        Mutation::Removed
    );
    assert!(!store.exists("Porter", "15/03/2030"));
}

#[test]
fn negative_add_that_empties_the_entry_drops_it() {
    let mut store = CellarStore::new();
    store.create(draft("Porter", "15/03/2030", 5)).unwrap();
    assert_eq!(
        store.add_bottles("Porter", "15/03/2030", -5).unwrap(),
        Mutation::Removed
    );
    assert!(store.is_empty());
}

#[test]
fn mutating_missing_keys_reports_not_found() {
    let mut store = CellarStore::new();
    let key = EntryKey::parse("Ghost", "01/01/2030").unwrap();

    assert_eq!(
        store.add_bottles("Ghost", "01/01/2030", 1),
        Err(StoreError::NotFound(key.clone()))
    );
    assert_eq!(
        store.remove_bottles("Ghost", "01/01/2030", 1),
        Err(StoreError::NotFound(key))
    );
    assert!(matches!(
        store.remove_bottles("Ghost", "not a date", 1),
        Err(StoreError::InvalidDate(_))
    ));
    assert!(!store.exists("Ghost", "not a date"));
}

#[test]
fn surrounding_whitespace_does_not_make_a_new_key() {
    let mut store = CellarStore::new();
    store.create(draft("Stout", "01/01/2099", 12)).unwrap();

    let err = store.create(draft(" Stout", "01/01/2099", 1)).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEntry(_)));
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.add_bottles("Stout ", "01/01/2099", 1).unwrap(),
        Mutation::Remaining(13)
    );
}

#[test]
fn overflowing_mutations_leave_the_count() {
    let mut store = CellarStore::new();
    store.create(draft("Stout", "01/01/2099", i64::MAX)).unwrap();
    let key = EntryKey::parse("Stout", "01/01/2099").unwrap();

    assert_eq!(
        store.add_bottles("Stout", "01/01/2099", 1),
        Err(StoreError::CountOverflow(key.clone()))
    );
    assert_eq!(store.get("Stout", "01/01/2099").unwrap().count, i64::MAX);

    store.remove_bottles("Stout", "01/01/2099", i64::MAX - 1).unwrap();
    assert_eq!(
        store.remove_bottles("Stout", "01/01/2099", i64::MIN),
        Err(StoreError::CountOverflow(key))
    );
    assert_eq!(store.get("Stout", "01/01/2099").unwrap().count, 1);
}

#[test]
fn snapshot_rebuilds_the_store() {
    let mut store = CellarStore::new();
    store.create(draft("Stout", "01/01/2099", 12)).unwrap();
    store.create(draft("Porter", "15/03/2030", 5)).unwrap();

    let rebuilt = CellarStore::from_snapshot(store.export_snapshot()).unwrap();
    assert_eq!(rebuilt.export_snapshot(), store.export_snapshot());
    assert_eq!(rebuilt.len(), 2);
}

#[test]
fn snapshot_with_repeated_keys_merges() {
    let expires = NaiveDate::from_ymd_opt(2030, 3, 15).unwrap();
    let snapshot = StoreSnapshot {
        entries: vec![
            Entry::new("Porter", "UK", "Porter", expires, 5.0, 50.0, 5),
            Entry::new("Porter", "IE", "Stout", expires, 4.0, 33.0, 2),
            Entry::new("Mild", "UK", "Mild", expires, 3.5, 50.0, 0),
        ],
    };

    let store = CellarStore::from_snapshot(snapshot).unwrap();
    assert_eq!(store.len(), 1);
    let porter = store.get("Porter", "15/03/2030").unwrap();
    assert_eq!((porter.count, porter.country.as_str()), (7, "UK"));
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut store = CellarStore::new();
    store.create(draft("Stout", "01/01/2099", 12)).unwrap();
    store.create(draft("IPA", "01/06/2025", 4)).unwrap();

    let snapshot = store.export_snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: StoreSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, snapshot);

    let rebuilt = CellarStore::from_snapshot(decoded).unwrap();
    assert_eq!(rebuilt.get("Stout", "01/01/2099").unwrap().count, 12);
}

#[test]
fn insert_entry_reports_each_outcome() {
    let expires = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    let entry = |count| Entry::new("Orval", "BE", "Trappist", expires, 6.2, 33.0, count);
    let mut store = CellarStore::new();

    assert_eq!(store.insert_entry(entry(0)), Ok(InsertOutcome::Discarded));
    assert_eq!(store.insert_entry(entry(4)), Ok(InsertOutcome::Inserted));
    assert_eq!(
        store.insert_entry(entry(2)),
        Ok(InsertOutcome::Merged(Mutation::Remaining(6)))
    );
    assert_eq!(
        store.insert_entry(entry(-6)),
        Ok(InsertOutcome::Merged(Mutation::Removed))
    );
    assert!(store.is_empty());
}
