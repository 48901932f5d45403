// src/export/model.rs

use crate::models::time_entry::TimeEntry;
use serde::Serialize;

/// Flat row for time-entry exports.
#[derive(Serialize, Clone, Debug)]
pub struct EntryExport {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub clock_in: String,
    pub clock_out: String,
    pub duration_seconds: i64,
    pub status: String,
}

impl EntryExport {
    pub fn from_entry(entry: &TimeEntry, employee_name: &str) -> Self {
        Self {
            id: entry.id,
            employee_id: entry.employee_id,
            employee_name: employee_name.to_string(),
            clock_in: entry.clock_in_str(),
            clock_out: entry.clock_out_str(),
            duration_seconds: entry.duration.unwrap_or(0),
            status: if entry.is_open() { "open" } else { "closed" }.to_string(),
        }
    }
}

/// Flat row for payroll exports: one line per employee over the range.
#[derive(Serialize, Clone, Debug)]
pub struct PayrollExport {
    pub employee_id: i64,
    pub employee_name: String,
    pub completed_shifts: usize,
    pub total_hours: f64,
    pub hourly_rate: f64,
    pub total_pay: f64,
}

pub(crate) fn entry_headers() -> Vec<&'static str> {
    vec![
        "id",
        "employee_id",
        "employee_name",
        "clock_in",
        "clock_out",
        "duration_seconds",
        "status",
    ]
}

pub(crate) fn entry_to_row(e: &EntryExport) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.employee_id.to_string(),
        e.employee_name.clone(),
        e.clock_in.clone(),
        e.clock_out.clone(),
        e.duration_seconds.to_string(),
        e.status.clone(),
    ]
}

pub(crate) fn payroll_headers() -> Vec<&'static str> {
    vec![
        "employee_id",
        "employee_name",
        "completed_shifts",
        "total_hours",
        "hourly_rate",
        "total_pay",
    ]
}

pub(crate) fn payroll_to_row(p: &PayrollExport) -> Vec<String> {
    vec![
        p.employee_id.to_string(),
        p.employee_name.clone(),
        p.completed_shifts.to_string(),
        format!("{:.2}", p.total_hours),
        format!("{:.2}", p.hourly_rate),
        format!("{:.2}", p.total_pay),
    ]
}
