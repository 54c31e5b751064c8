use chrono::{Duration, NaiveDate, TimeZone, Utc};
use gig_core::{CoreError, RecordSource};
use gig_domain::{DateRange, EarningRecord, ExpenseCategory, ExpenseRecord, Platform};
use gig_storage_json::{load_document, JsonRecordSource, RecordDocument};
use std::fs;
use tempfile::tempdir;
use uuid::Uuid;

fn earning(user: Uuid, day: u32) -> EarningRecord {
    let start = Utc.with_ymd_and_hms(2024, 8, day, 18, 0, 0).unwrap();
    EarningRecord::new(
        user,
        Platform::UberEats,
        start.date_naive(),
        start,
        start + Duration::hours(3),
        42.0,
        8.0,
        5.0,
    )
    .with_deliveries(6)
    .with_miles(31.5)
}

#[test]
fn json_storage_saves_and_reloads_records() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("records.json");
    let user = Uuid::new_v4();

    let mut source = JsonRecordSource::open_or_default(&path).expect("empty source");
    source.push_earning(earning(user, 1));
    source.push_expense(
        ExpenseRecord::new(
            user,
            NaiveDate::from_ymd_opt(2024, 8, 2).unwrap(),
            ExpenseCategory::VehiclePayment,
            310.0,
        )
        .with_description("August lease"),
    );
    source.save().expect("save records");
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());

    let reloaded = JsonRecordSource::open(&path).expect("reload");
    assert_eq!(reloaded.document(), source.document());
    let earnings = reloaded.earnings(user, None).expect("earnings");
    assert_eq!(earnings[0].total_earning, 55.0);
    assert_eq!(earnings[0].delivery_count, 6);
}

#[test]
fn json_storage_filters_by_user_and_inclusive_range() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("records.json");
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let document = RecordDocument {
        earnings: vec![earning(alice, 1), earning(alice, 10), earning(bob, 5)],
        expenses: Vec::new(),
    };
    JsonRecordSource::with_document(&path, document)
        .save()
        .expect("save");

    let source = JsonRecordSource::open(&path).expect("open");
    let range = DateRange::from_dates(
        NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 8, 5).unwrap(),
    )
    .unwrap();
    assert_eq!(source.earnings(alice, Some(&range)).unwrap().len(), 1);
    assert_eq!(source.earnings(bob, Some(&range)).unwrap().len(), 1);
    assert_eq!(source.document().users().len(), 2);
}

#[test]
fn json_storage_reads_documents_with_optional_fields_missing() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("records.json");
    let user = Uuid::new_v4();
    let raw = format!(
        r#"{{
  "earnings": [{{
    "id": "{id}",
    "user_id": "{user}",
    "platform": "DoorDash",
    "date": "2024-08-03",
    "start_time": "2024-08-03T11:00:00Z",
    "end_time": "2024-08-03T13:30:00Z",
    "base_earning": 20.0,
    "tips": 10.0,
    "total_earning": 30.0
  }}]
}}"#,
        id = Uuid::new_v4(),
        user = user
    );
    fs::write(&path, raw).expect("write");

    let source = JsonRecordSource::open(&path).expect("open");
    let earnings = source.earnings(user, None).unwrap();
    assert_eq!(earnings.len(), 1);
    assert_eq!(earnings[0].bonuses, 0.0);
    assert_eq!(earnings[0].delivery_count, 1);
    assert_eq!(earnings[0].hours(), 2.5);
    assert!(source.expenses(user, None).unwrap().is_empty());
    assert!(source.document().warnings().is_empty());
}

#[test]
fn json_storage_reports_missing_and_malformed_files() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("absent.json");
    assert!(matches!(
        load_document(&missing),
        Err(CoreError::Storage(_))
    ));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ \"earnings\": [ ").expect("write");
    assert!(matches!(
        JsonRecordSource::open(&broken),
        Err(CoreError::Serde(_))
    ));
}
