use recordstore_core::{
    FieldValue, Fields, InMemoryRecordRepository, Record, RecordListQuery, RecordRepository,
    GenerateError, RecordService, RepoError, SequentialKeys, UuidKeys,
};
use std::collections::HashSet;

fn person(id: i64, name: &str) -> Record<i64> {
    Record::new(id).with_field("name", name)
}

#[test]
fn create_and_read_roundtrip() {
    let mut repo = InMemoryRecordRepository::new();

    let record = person(1, "Alice").with_field("age", 30);
    let id = repo.create(record.clone()).unwrap();

    assert_eq!(id, 1);
    assert_eq!(repo.read(&id).unwrap(), record);
}

#[test]
fn crud_lifecycle_scenario() {
    let mut repo = InMemoryRecordRepository::new();

    repo.create(person(1, "Alice")).unwrap();
    assert_eq!(repo.read(&1).unwrap(), person(1, "Alice"));

    repo.update(person(1, "Alicia")).unwrap();
    assert_eq!(repo.read(&1).unwrap(), person(1, "Alicia"));

    repo.delete(&1).unwrap();
    assert_eq!(repo.read(&1).unwrap_err(), RepoError::NotFound(1));
    assert!(repo.find_all().is_empty());
}

#[test]
fn create_rejects_duplicate_key_and_keeps_original() {
    let mut repo = InMemoryRecordRepository::new();
    repo.create(person(7, "first")).unwrap();

    let err = repo.create(person(7, "second")).unwrap_err();
    assert_eq!(err, RepoError::DuplicateKey(7));
    assert_eq!(repo.read(&7).unwrap().text("name"), Some("first"));
    assert_eq!(repo.count(), 1);
}

#[test]
fn save_inserts_then_overwrites() {
    let mut repo = InMemoryRecordRepository::new();

    repo.save(person(3, "draft")).unwrap();
    repo.save(person(3, "final")).unwrap();

    assert_eq!(repo.count(), 1);
    assert_eq!(repo.read(&3).unwrap().text("name"), Some("final"));
}

#[test]
fn update_not_found_returns_not_found() {
    let mut repo = InMemoryRecordRepository::<i64>::new();

    let err = repo.update(person(42, "ghost")).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
    assert!(!repo.exists(&42));
}

#[test]
fn delete_missing_returns_not_found() {
    let mut repo = InMemoryRecordRepository::new();
    repo.create(person(1, "Alice")).unwrap();
    repo.delete(&1).unwrap();

    assert_eq!(repo.delete(&1).unwrap_err(), RepoError::NotFound(1));
}

#[test]
fn find_all_returns_every_record_in_insertion_order() {
    let mut repo = InMemoryRecordRepository::new();
    let created = vec![
        person(30, "Carol").with_field("age", 52).with_field("active", true),
        person(10, "Alice").with_field("age", 30).with_field("score", 4.5),
        person(20, "Bob").with_field("age", 41).with_field("team", "blue"),
    ];
    for record in &created {
        repo.create(record.clone()).unwrap();
    }

    assert_eq!(repo.find_all(), created);
}

#[test]
fn find_all_reflects_updates_in_place_and_deletes() {
    let mut repo = InMemoryRecordRepository::new();
    for (id, name) in [(30, "c"), (10, "a"), (20, "b")] {
        repo.create(person(id, name)).unwrap();
    }
    let renamed = person(10, "a2").with_field("age", 7);
    repo.update(renamed.clone()).unwrap();
    repo.delete(&30).unwrap();
    repo.create(person(40, "d")).unwrap();

    assert_eq!(
        repo.find_all(),
        vec![renamed, person(20, "b"), person(40, "d")]
    );
}

#[test]
fn list_filters_by_field_value() {
    let mut repo = InMemoryRecordRepository::new();
    repo.create(Record::new("a".to_string()).with_field("team", "red"))
        .unwrap();
    repo.create(Record::new("b".to_string()).with_field("team", "blue"))
        .unwrap();
    repo.create(Record::new("c".to_string()).with_field("team", "red"))
        .unwrap();
    repo.create(Record::new("d".to_string())).unwrap();

    let red = repo.list(&RecordListQuery::by_field("team", "red"));
    let ids: Vec<&str> = red.iter().map(|record| record.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);

    let none = repo.list(&RecordListQuery::by_field("team", FieldValue::Integer(1)));
    assert!(none.is_empty());
}

#[test]
fn list_pagination_with_limit_and_offset_is_stable() {
    let mut repo = InMemoryRecordRepository::new();
    for id in 1..=5 {
        repo.create(person(id, "p")).unwrap();
    }

    let query = RecordListQuery {
        limit: Some(2),
        offset: 1,
        ..RecordListQuery::default()
    };
    let page: Vec<i64> = repo.list(&query).into_iter().map(|r| r.id).collect();
    assert_eq!(page, vec![2, 3]);

    let offset_only = RecordListQuery {
        offset: 3,
        ..RecordListQuery::default()
    };
    let tail: Vec<i64> = repo.list(&offset_only).into_iter().map(|r| r.id).collect();
    assert_eq!(tail, vec![4, 5]);
}

#[test]
fn service_wraps_repository_calls() {
    let mut service = RecordService::new(InMemoryRecordRepository::new(), SequentialKeys::new());

    let id = service.create(person(1, "from service")).unwrap();
    let fetched = service.read(&id).unwrap();
    assert_eq!(fetched.text("name"), Some("from service"));

    let ids: HashSet<_> = service
        .find_all()
        .into_iter()
        .map(|record| record.id)
        .collect();
    assert!(ids.contains(&id));
}

#[test]
fn generated_keys_skip_caller_chosen_ids() {
    let mut service = RecordService::new(InMemoryRecordRepository::new(), SequentialKeys::new());
    service.create(person(1, "manual one")).unwrap();
    service.create(person(2, "manual two")).unwrap();

    let generated = service
        .create_generated(Fields::from([("name".to_string(), FieldValue::from("auto"))]))
        .unwrap();

    assert_eq!(generated, 3);
    assert_eq!(service.count(), 3);
    assert_eq!(service.read(&3).unwrap().text("name"), Some("auto"));
}

#[test]
fn uuid_keyed_store_assigns_distinct_ids() {
    let mut service = RecordService::new(InMemoryRecordRepository::new(), UuidKeys);

    let first = service
        .create_generated(Fields::from([("n".to_string(), FieldValue::from(1))]))
        .unwrap();
    let second = service
        .create_generated(Fields::from([("n".to_string(), FieldValue::from(2))]))
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(service.get(&second).unwrap().integer("n"), Some(2));
}

#[test]
fn generated_keys_stop_at_i64_max_without_wrapping() {
    let mut service = RecordService::new(
        InMemoryRecordRepository::new(),
        SequentialKeys::starting_at(i64::MAX),
    );

    let last = service
        .create_generated(Fields::from([("n".to_string(), FieldValue::from("last"))]))
        .unwrap();
    assert_eq!(last, i64::MAX);

    let err = service
        .create_generated(Fields::from([("n".to_string(), FieldValue::from("extra"))]))
        .unwrap_err();
    assert_eq!(err, GenerateError::KeysExhausted);
    assert_eq!(service.count(), 1);
}
