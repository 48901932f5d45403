use chrono::{Duration, TimeZone, Utc};
use punchclock::core::shift::{ShiftDuration, ShiftTracker};
use punchclock::models::time_entry::TimeEntry;

mod common;

fn entry(id: i64, duration: Option<i64>) -> TimeEntry {
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    TimeEntry {
        id,
        employee_id: 1,
        clock_in: start,
        clock_out: duration.map(|d| start + Duration::seconds(d)),
        duration,
        location_in: None,
        location_out: None,
        created_at: start.to_rfc3339(),
    }
}

#[test]
fn test_duration_is_floored_whole_seconds() {
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    let end = start + Duration::seconds(3600) + Duration::milliseconds(900);

    assert_eq!(
        ShiftTracker::compute_duration(start, Some(end)),
        ShiftDuration::Completed(3600)
    );
}

#[test]
fn test_duration_of_open_shift_is_in_progress() {
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    assert_eq!(
        ShiftTracker::compute_duration(start, None),
        ShiftDuration::InProgress
    );
}

#[test]
fn test_negative_interval_clamps_to_zero() {
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    let end = start - Duration::seconds(30);

    assert_eq!(
        ShiftTracker::compute_duration(start, Some(end)),
        ShiftDuration::Completed(0)
    );
}

#[test]
fn test_aggregate_sums_completed_entries_only() {
    let entries = vec![entry(1, Some(3600)), entry(2, Some(1800)), entry(3, None)];

    let summary = ShiftTracker::aggregate(&entries);
    assert_eq!(summary.total_seconds, 5400);
    assert_eq!(summary.completed_count, 2);
    assert!(summary.is_active);
}

#[test]
fn test_aggregate_is_order_independent() {
    let a = vec![entry(1, Some(3600)), entry(2, Some(1800)), entry(3, None)];
    let b = vec![entry(3, None), entry(2, Some(1800)), entry(1, Some(3600))];

    let sa = ShiftTracker::aggregate(&a);
    let sb = ShiftTracker::aggregate(&b);
    assert_eq!(sa.total_seconds, sb.total_seconds);
    assert_eq!(sa.completed_count, sb.completed_count);
    assert_eq!(sa.is_active, sb.is_active);
}

#[test]
fn test_aggregate_of_nothing_is_zero() {
    let summary = ShiftTracker::aggregate(&[]);
    assert_eq!(summary.total_seconds, 0);
    assert_eq!(summary.completed_count, 0);
    assert!(!summary.is_active);
}

#[test]
fn test_clock_out_twice_reports_already_closed() {
    let db = common::setup_test_db("already_closed_lib");
    let session = common::setup_session_file("already_closed_lib");
    common::init_with_admin(&db, &session);

    let mut pool = punchclock::db::pool::DbPool::new(&db).expect("open pool");
    let open = ShiftTracker::clock_in(&mut pool, 1, None).expect("clock in");

    ShiftTracker::clock_out(&mut pool, open.id, None).expect("first clock out");
    let err = ShiftTracker::clock_out(&mut pool, open.id, None).unwrap_err();

    assert!(matches!(
        err,
        punchclock::errors::AppError::AlreadyClosed(id) if id == open.id
    ));
}

#[test]
fn test_store_allows_one_open_entry_per_employee() {
    let db = common::setup_test_db("one_open_entry");
    let session = common::setup_session_file("one_open_entry");
    common::init_with_admin(&db, &session);

    let conn = rusqlite::Connection::open(&db).expect("open db");
    let now = Utc::now();

    punchclock::db::entries::insert_open_entry(&conn, 1, now, None).expect("first open entry");

    // A second open row for the same employee violates the partial index
    let dup = punchclock::db::entries::insert_open_entry(&conn, 1, now, None);
    assert!(dup.is_err());
}
