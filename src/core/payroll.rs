//! Payroll and dashboard arithmetic: totals over completed entries.

use crate::config::Config;
use crate::core::shift::ShiftTracker;
use crate::db::pool::DbPool;
use crate::db::{employees, entries};
use crate::errors::AppResult;
use crate::models::employee::Employee;
use crate::models::time_entry::TimeEntry;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct PayrollReport {
    pub employee: Employee,
    pub entries: Vec<TimeEntry>, // completed only
    pub total_seconds: i64,
    pub total_hours: f64,
    pub hourly_rate: f64,
    pub total_pay: f64,
}

/// Per-employee roll-up for the dashboard listing.
#[derive(Debug, Clone)]
pub struct EmployeeStats {
    pub employee: Employee,
    pub total_seconds: i64,
    pub completed_count: usize,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct DailyStats {
    pub total_seconds: i64,
    pub active_employees: usize,
    pub total_employees: i64,
}

#[derive(Debug, Clone)]
pub struct DayBreakdown {
    pub date: NaiveDate,
    pub total_seconds: i64,
    pub entry_count: usize,
}

#[derive(Debug, Clone)]
pub struct WeeklyStats {
    pub total_seconds: i64,
    pub completed_count: usize,
    pub days: Vec<DayBreakdown>, // Sunday..Saturday
}

pub struct PayrollLogic;

impl PayrollLogic {
    /// Sum an employee's completed time over [from, to] and price it at
    /// the employee's hourly rate (config default when none is set).
    pub fn calculate(
        pool: &mut DbPool,
        cfg: &Config,
        employee_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<PayrollReport> {
        let employee = employees::load_employee(&pool.conn, employee_id)?;
        let all = entries::entries_in_range(&pool.conn, employee_id, from, to)?;

        let summary = ShiftTracker::aggregate(&all);
        let completed: Vec<TimeEntry> = all.into_iter().filter(|e| !e.is_open()).collect();

        let total_hours = summary.total_seconds as f64 / 3600.0;
        let hourly_rate = employee.hourly_rate.unwrap_or(cfg.default_hourly_rate);

        Ok(PayrollReport {
            total_pay: total_hours * hourly_rate,
            total_hours,
            total_seconds: summary.total_seconds,
            hourly_rate,
            entries: completed,
            employee,
        })
    }

    /// One roll-up row per employee, for the whole history.
    pub fn employee_stats(pool: &mut DbPool) -> AppResult<Vec<EmployeeStats>> {
        let staff = employees::load_employees(&pool.conn)?;

        let mut out = Vec::with_capacity(staff.len());
        for employee in staff {
            let all = entries::entries_for_employee(&pool.conn, employee.id)?;
            let summary = ShiftTracker::aggregate(&all);
            out.push(EmployeeStats {
                employee,
                total_seconds: summary.total_seconds,
                completed_count: summary.completed_count,
                is_active: summary.is_active,
            });
        }
        Ok(out)
    }

    /// Today's picture: completed time since local midnight, how many
    /// employees are on shift right now, and the headcount.
    pub fn daily_stats(pool: &mut DbPool) -> AppResult<DailyStats> {
        let midnight = local_midnight(Local::now().date_naive());
        let today = entries::entries_since(&pool.conn, midnight)?;

        let total_seconds = ShiftTracker::aggregate(&today).total_seconds;
        let active: HashSet<i64> = today
            .iter()
            .filter(|e| e.is_open())
            .map(|e| e.employee_id)
            .collect();

        Ok(DailyStats {
            total_seconds,
            active_employees: active.len(),
            total_employees: employees::count_employees(&pool.conn)?,
        })
    }

    /// This week's picture, Sunday-based, with a per-day breakdown of
    /// completed time.
    pub fn weekly_stats(pool: &mut DbPool) -> AppResult<WeeklyStats> {
        let today = Local::now().date_naive();
        let sunday = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
        let week = entries::entries_since(&pool.conn, local_midnight(sunday))?;

        let summary = ShiftTracker::aggregate(&week);

        let mut days = Vec::with_capacity(7);
        for i in 0..7 {
            let date = sunday + Duration::days(i);
            let day_entries: Vec<&TimeEntry> = week
                .iter()
                .filter(|e| !e.is_open())
                .filter(|e| e.clock_in.with_timezone(&Local).date_naive() == date)
                .collect();
            days.push(DayBreakdown {
                date,
                total_seconds: day_entries.iter().map(|e| e.duration.unwrap_or(0)).sum(),
                entry_count: day_entries.len(),
            });
        }

        Ok(WeeklyStats {
            total_seconds: summary.total_seconds,
            completed_count: summary.completed_count,
            days,
        })
    }
}

fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    match naive.and_local_timezone(Local) {
        chrono::LocalResult::Single(dt) => dt.with_timezone(&Utc),
        // DST edge: fall back to interpreting midnight as UTC
        _ => DateTime::from_naive_utc_and_offset(naive, Utc),
    }
}
