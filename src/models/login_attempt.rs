use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-IP failed login counter backing the lockout policy.
/// One row per ip_address, upserted on every failure.
#[derive(Debug, Clone, Serialize)]
pub struct LoginAttempt {
    pub id: i64,
    pub ip_address: String,
    pub attempt_count: i64,
    pub is_locked: bool,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_attempt: DateTime<Utc>,
}

impl LoginAttempt {
    /// True while the lock window has not elapsed yet.
    pub fn is_locked_now(&self, now: DateTime<Utc>) -> bool {
        self.is_locked && self.locked_until.map(|t| t > now).unwrap_or(false)
    }
}
