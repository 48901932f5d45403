use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Expand a single period expression into inclusive date bounds.
///
/// Accepted forms: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`.
pub fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&format!("{}-01", p), "%Y-%m-%d") {
        return Ok((first, last_day_of_month(first.year(), first.month())));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
        && let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        )
    {
        return Ok((first, last));
    }

    Err(AppError::InvalidDate(p.to_string()))
}

/// Parse a range expression: a single period or `start:end` where each side
/// is a period. Bounds are inclusive.
pub fn range_bounds(expr: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match expr.split_once(':') {
        Some((a, b)) => {
            let (start, _) = period_bounds(a.trim())?;
            let (_, end) = period_bounds(b.trim())?;
            if end < start {
                return Err(AppError::InvalidDate(format!(
                    "range end before start: {}",
                    expr
                )));
            }
            Ok((start, end))
        }
        None => period_bounds(expr.trim()),
    }
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap_or_default())
}
