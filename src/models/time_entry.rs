use super::geo::GeoPoint;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One shift attempt. Created open (clock_out = NULL) and closed exactly
/// once; a closed entry is never mutated again.
#[derive(Debug, Clone, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub employee_id: i64,                 // ⇔ time_entries.employee_id
    pub clock_in: DateTime<Utc>,          // ⇔ time_entries.clock_in (TEXT, RFC3339)
    pub clock_out: Option<DateTime<Utc>>, // NULL while the shift is open
    pub duration: Option<i64>,            // whole seconds, set at clock-out
    pub location_in: Option<GeoPoint>,
    pub location_out: Option<GeoPoint>,
    pub created_at: String, // ⇔ time_entries.created_at (TEXT, ISO8601)
}

impl TimeEntry {
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    pub fn clock_in_str(&self) -> String {
        self.clock_in.to_rfc3339()
    }

    pub fn clock_out_str(&self) -> String {
        self.clock_out
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "--".to_string())
    }
}
