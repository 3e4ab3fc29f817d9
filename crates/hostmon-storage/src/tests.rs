use crate::engine::SqliteSampleStore;
use crate::{SampleStore, StorageError, RECENT_LIMIT};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use hostmon_common::types::Sample;
use tempfile::TempDir;

fn setup() -> (TempDir, SqliteSampleStore) {
    let dir = TempDir::new().unwrap();
    let store = SqliteSampleStore::open(&dir.path().join("server_data.db")).unwrap();
    (dir, store)
}

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 5, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn make_sample(secs_after: i64, cpu: f64) -> Sample {
    Sample {
        timestamp: base_time() + Duration::seconds(secs_after),
        cpu_percent: cpu,
        memory_percent: 50.0,
        disk_percent: 40.0,
        bytes_sent_mb: 10.5,
        bytes_recv_mb: 20.25,
    }
}

#[test]
fn newest_sample_is_returned_first() {
    let (_dir, store) = setup();
    store.insert(&make_sample(0, 10.0)).unwrap();
    store.insert(&make_sample(120, 30.0)).unwrap();
    store.insert(&make_sample(60, 20.0)).unwrap();

    let rows = store.recent(RECENT_LIMIT).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], make_sample(120, 30.0));
    assert_eq!(rows[1].cpu_percent, 20.0);
    assert_eq!(rows[2].cpu_percent, 10.0);
}

#[test]
fn recent_respects_limit() {
    let (_dir, store) = setup();
    for i in 0..150 {
        store.insert(&make_sample(i, i as f64 % 100.0)).unwrap();
    }
    let rows = store.recent(RECENT_LIMIT).unwrap();
    assert_eq!(rows.len(), 100);
    assert_eq!(rows[0].timestamp, base_time() + Duration::seconds(149));
    assert_eq!(rows[99].timestamp, base_time() + Duration::seconds(50));
    assert_eq!(store.count().unwrap(), 150);
}

#[test]
fn same_second_rows_keep_insertion_order() {
    let (_dir, store) = setup();
    store.insert(&make_sample(0, 1.0)).unwrap();
    store.insert(&make_sample(0, 2.0)).unwrap();
    let rows = store.recent(1).unwrap();
    assert_eq!(rows[0].cpu_percent, 2.0);
}

#[test]
fn schema_creation_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("server_data.db");
    {
        let store = SqliteSampleStore::open(&path).unwrap();
        store.insert(&make_sample(0, 5.0)).unwrap();
    }
    let reopened = SqliteSampleStore::open(&path).unwrap();
    assert_eq!(reopened.count().unwrap(), 1);
}

#[test]
fn existing_open_sees_writer_rows() {
    let (dir, store) = setup();
    store.insert(&make_sample(0, 42.0)).unwrap();

    let reader = SqliteSampleStore::open_existing(&dir.path().join("server_data.db")).unwrap();
    let rows = reader.recent(RECENT_LIMIT).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].cpu_percent, 42.0);
}

#[test]
fn existing_open_after_writer_closed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("server_data.db");
    {
        let store = SqliteSampleStore::open(&path).unwrap();
        store.insert(&make_sample(0, 7.0)).unwrap();
    }
    let reader = SqliteSampleStore::open_existing(&path).unwrap();
    assert_eq!(reader.recent(RECENT_LIMIT).unwrap()[0].cpu_percent, 7.0);
}

#[test]
fn existing_open_of_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let err = SqliteSampleStore::open_existing(&dir.path().join("absent.db"))
        .err()
        .unwrap();
    assert!(matches!(err, StorageError::Missing { .. }));
}
