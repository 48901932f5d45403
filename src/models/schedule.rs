use chrono::NaiveTime;
use serde::Serialize;

pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A recurring weekly slot for one employee. Planning data only: nothing
/// checks actual clock events against it.
#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    pub id: i64,
    pub employee_id: i64,
    pub day_of_week: u8,      // 0 = Sunday .. 6 = Saturday
    pub start_time: NaiveTime, // ⇔ schedules.start_time (TEXT "HH:MM")
    pub end_time: NaiveTime,   // ⇔ schedules.end_time (TEXT "HH:MM")
    pub created_at: String,
}

impl Schedule {
    pub fn day_name(&self) -> &'static str {
        WEEKDAY_NAMES[(self.day_of_week as usize).min(6)]
    }

    pub fn start_str(&self) -> String {
        self.start_time.format("%H:%M").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end_time.format("%H:%M").to_string()
    }
}
