//! Shift lifecycle: clock-in, clock-out, active-entry lookup and the pure
//! duration/aggregation math behind every report in the application.

use crate::db::entries;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::geo::GeoPoint;
use crate::models::time_entry::TimeEntry;
use chrono::{DateTime, Utc};

/// Outcome of a duration computation for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDuration {
    /// Whole seconds between clock-in and clock-out (floored).
    Completed(i64),
    /// The shift has not closed yet.
    InProgress,
}

/// Pure fold over one employee's entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShiftSummary {
    pub total_seconds: i64,
    pub completed_count: usize,
    pub is_active: bool,
}

pub struct ShiftTracker;

impl ShiftTracker {
    /// The at-most-one open entry for an employee.
    pub fn active_entry(pool: &mut DbPool, employee_id: i64) -> AppResult<Option<TimeEntry>> {
        entries::active_entry(&pool.conn, employee_id)
    }

    /// Open a shift. Calling this while a shift is already open returns the
    /// existing entry unchanged, so a double tap on a kiosk is harmless.
    pub fn clock_in(
        pool: &mut DbPool,
        employee_id: i64,
        location: Option<GeoPoint>,
    ) -> AppResult<TimeEntry> {
        if let Some(open) = entries::active_entry(&pool.conn, employee_id)? {
            return Ok(open);
        }

        let now = Utc::now();
        match entries::insert_open_entry(&pool.conn, employee_id, now, location) {
            Ok(id) => entries::load_entry(&pool.conn, id),
            // A concurrent clock-in from another terminal won the race:
            // the partial unique index rejected our insert, so the open
            // entry it created is the one to return.
            Err(e) if crate::db::employees::is_unique_violation(&e) => {
                entries::active_entry(&pool.conn, employee_id)?.ok_or_else(|| {
                    AppError::Other(format!(
                        "open entry for employee {} disappeared during clock-in",
                        employee_id
                    ))
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Close a shift. Fails with NotFound for an unknown id and with
    /// AlreadyClosed when the entry was clocked out before: a closed entry
    /// is immutable and its duration is never recomputed.
    pub fn clock_out(
        pool: &mut DbPool,
        entry_id: i64,
        location: Option<GeoPoint>,
    ) -> AppResult<TimeEntry> {
        let entry = entries::load_entry(&pool.conn, entry_id)?;
        if !entry.is_open() {
            return Err(AppError::AlreadyClosed(entry_id));
        }

        let now = Utc::now();
        let secs = match Self::compute_duration(entry.clock_in, Some(now)) {
            ShiftDuration::Completed(s) => s,
            ShiftDuration::InProgress => unreachable!("end was supplied"),
        };

        let changed = entries::close_entry(&pool.conn, entry_id, now, secs, location)?;
        if changed == 0 {
            // Lost a race with another clock-out between the read and the
            // guarded update.
            return Err(AppError::AlreadyClosed(entry_id));
        }

        entries::load_entry(&pool.conn, entry_id)
    }

    /// Whole seconds worked between start and end, floored; clock_in is
    /// never after clock_out by construction, but a negative interval
    /// still clamps to zero rather than going negative.
    pub fn compute_duration(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> ShiftDuration {
        match end {
            Some(end) => ShiftDuration::Completed((end - start).num_seconds().max(0)),
            None => ShiftDuration::InProgress,
        }
    }

    /// Order-independent fold: sums persisted durations of completed
    /// entries only, counts them, and flags whether any entry is open.
    pub fn aggregate<'a, I>(entries: I) -> ShiftSummary
    where
        I: IntoIterator<Item = &'a TimeEntry>,
    {
        let mut summary = ShiftSummary::default();
        for entry in entries {
            match entry.clock_out {
                Some(_) => {
                    summary.total_seconds += entry.duration.unwrap_or(0);
                    summary.completed_count += 1;
                }
                None => summary.is_active = true,
            }
        }
        summary
    }
}
