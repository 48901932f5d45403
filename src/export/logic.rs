// src/export/logic.rs

use crate::config::Config;
use crate::core::payroll::PayrollLogic;
use crate::db::pool::DbPool;
use crate::db::{employees, entries};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::model::{
    EntryExport, PayrollExport, entry_headers, entry_to_row, payroll_headers, payroll_to_row,
};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use crate::utils::date::range_bounds;
use crate::utils::path::expand_tilde;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::io;

/// What gets exported: raw time entries or the per-employee payroll totals.
pub enum ExportKind {
    Entries,
    Payroll,
}

/// High-level export flow.
pub struct ExportLogic;

impl ExportLogic {
    /// Export time entries or payroll rows.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or an expression like:
    ///   - `YYYY`
    ///   - `YYYY-MM`
    ///   - `YYYY-MM-DD`
    ///   - `A:B` where each side is one of the above
    pub fn export(
        pool: &mut DbPool,
        cfg: &Config,
        kind: ExportKind,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<()> {
        let path = expand_tilde(file);
        let path = path.as_path();

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        ensure_writable(path, force)?;

        let date_bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(range_bounds(r)?),
        };

        match kind {
            ExportKind::Entries => {
                let rows = load_entry_rows(pool, date_bounds)?;
                if rows.is_empty() {
                    warning("No time entries matched the requested range.");
                }
                match format {
                    ExportFormat::Csv => export_csv(&rows, path),
                    ExportFormat::Json => export_json(&rows, path),
                    ExportFormat::Xlsx => {
                        let table: Vec<Vec<String>> = rows.iter().map(entry_to_row).collect();
                        export_xlsx(&entry_headers(), &table, path)
                    }
                }
            }
            ExportKind::Payroll => {
                let rows = load_payroll_rows(pool, cfg, date_bounds)?;
                match format {
                    ExportFormat::Csv => export_csv(&rows, path),
                    ExportFormat::Json => export_json(&rows, path),
                    ExportFormat::Xlsx => {
                        let table: Vec<Vec<String>> = rows.iter().map(payroll_to_row).collect();
                        export_xlsx(&payroll_headers(), &table, path)
                    }
                }
            }
        }
    }
}

fn utc_bounds(bounds: (NaiveDate, NaiveDate)) -> (DateTime<Utc>, DateTime<Utc>) {
    let (from, to) = bounds;
    let start = DateTime::from_naive_utc_and_offset(
        from.and_hms_opt(0, 0, 0).unwrap_or_default(),
        Utc,
    );
    let end = DateTime::from_naive_utc_and_offset(
        to.and_hms_opt(23, 59, 59).unwrap_or_default(),
        Utc,
    );
    (start, end)
}

fn load_entry_rows(
    pool: &mut DbPool,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<EntryExport>> {
    let names: HashMap<i64, String> = employees::load_employees(&pool.conn)?
        .into_iter()
        .map(|e| (e.id, e.name))
        .collect();

    let all = match bounds {
        Some(b) => {
            let (start, end) = utc_bounds(b);
            let mut filtered = entries::entries_since(&pool.conn, start)?;
            filtered.retain(|e| e.clock_in <= end);
            filtered
        }
        None => entries::entries_since(&pool.conn, DateTime::<Utc>::MIN_UTC)?,
    };

    Ok(all
        .iter()
        .map(|e| {
            EntryExport::from_entry(
                e,
                names.get(&e.employee_id).map(String::as_str).unwrap_or("?"),
            )
        })
        .collect())
}

fn load_payroll_rows(
    pool: &mut DbPool,
    cfg: &Config,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<PayrollExport>> {
    let (start, end) = match bounds {
        Some(b) => utc_bounds(b),
        None => (DateTime::<Utc>::MIN_UTC, Utc::now()),
    };

    let staff = employees::load_employees(&pool.conn)?;

    let mut out = Vec::with_capacity(staff.len());
    for employee in staff {
        let report = PayrollLogic::calculate(pool, cfg, employee.id, start, end)?;
        out.push(PayrollExport {
            employee_id: report.employee.id,
            employee_name: report.employee.name.clone(),
            completed_shifts: report.entries.len(),
            total_hours: report.total_hours,
            hourly_rate: report.hourly_rate,
            total_pay: report.total_pay,
        });
    }
    Ok(out)
}
