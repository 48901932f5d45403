use chrono::Utc;
use serde::{Deserialize, Serialize};

/// An ephemeral admin session. Held client-side only (serialized to the
/// session file), never persisted in the database. A session has a hard
/// lifetime: there is no renewal or refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    pub id: String, // random uuid token
    pub user_id: i64,
    pub user_name: String,
    pub role: String,
    pub created_at: i64, // unix seconds
    pub expires_at: i64, // created_at + configured lifetime
}

impl AdminSession {
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now().timestamp()
    }

    /// Remaining lifetime in seconds (0 when expired).
    pub fn remaining_secs(&self) -> i64 {
        (self.expires_at - Utc::now().timestamp()).max(0)
    }
}
