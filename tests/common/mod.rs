#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use gig_insights::{
    domain::{EarningRecord, ExpenseCategory, ExpenseRecord, Platform},
    storage::{JsonRecordSource, RecordDocument},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fixed owner of every generated record.
pub const USER: Uuid = Uuid::from_u128(0x6a1f_0c2e_9b7d_4e11_a3c5_1234_5678_9abc);

/// Isolated directory for config and records.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn shift(
    platform: Platform,
    date: NaiveDate,
    start_hour: u32,
    hours: i64,
    base: f64,
    tips: f64,
) -> EarningRecord {
    let time = date.and_hms_opt(start_hour, 0, 0).expect("valid time");
    let start = Utc.from_utc_datetime(&time);
    EarningRecord::new(
        USER,
        platform,
        date,
        start,
        start + Duration::hours(hours),
        base,
        tips,
        0.0,
    )
    .with_deliveries(hours as u32 * 2)
    .with_miles(hours as f64 * 10.0)
}

/// Six weeks from Monday 2024-09-02: weekday lunches on UberEats, Saturday
/// dinners on DoorDash, and a weekly fuel stop.
pub fn six_weeks() -> RecordDocument {
    let mut document = RecordDocument::default();
    for week in 0..6 {
        let monday = ymd(2024, 9, 2) + Duration::weeks(week);
        for day in 0..3 {
            document.earnings.push(shift(
                Platform::UberEats,
                monday + Duration::days(day),
                11,
                2,
                24.0,
                6.0,
            ));
        }
        document.earnings.push(shift(
            Platform::DoorDash,
            monday + Duration::days(5),
            18,
            4,
            70.0,
            30.0,
        ));
        document.expenses.push(ExpenseRecord::new(
            USER,
            monday + Duration::days(2),
            ExpenseCategory::Fuel,
            35.0,
        ));
    }
    document
}

/// Writes `document` under a fresh temp home and returns the file path.
pub fn write_records(document: RecordDocument) -> PathBuf {
    let path = temp_home().join("records.json");
    JsonRecordSource::with_document(&path, document)
        .save()
        .expect("save records");
    path
}
