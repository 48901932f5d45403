//! Admin session issuance and the guesswork rate limiter.
//!
//! A shared admin code, once verified, becomes a short-lived session token
//! held by this terminal only. All session reads funnel through
//! `current_session()`; nothing else touches the session store.

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{attempts, audit, employees};
use crate::errors::{AppError, AppResult};
use crate::models::session::AdminSession;
use crate::store::SessionStore;
use crate::ui::messages::warning;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

/// What a login attempt tells the caller. The message is user-facing and
/// never says which admin code exists or failed.
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    pub success: bool,
    pub message: String,
}

impl VerifyOutcome {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

pub struct SessionGuard<'a> {
    store: &'a dyn SessionStore,
    session_secs: i64,
    max_attempts: i64,
    lockout_secs: i64,
}

impl<'a> SessionGuard<'a> {
    pub fn new(store: &'a dyn SessionStore, cfg: &Config) -> Self {
        Self {
            store,
            session_secs: cfg.session_hours * 3600,
            max_attempts: cfg.max_failed_attempts,
            lockout_secs: cfg.lockout_minutes * 60,
        }
    }

    /// Verify a shared admin code coming from `ip` and mint a session on
    /// success. Failed attempts are counted per IP; reaching the threshold
    /// locks the IP for the configured window, and attempts made while
    /// locked are rejected before the code is even looked at.
    pub fn verify_code(&self, pool: &mut DbPool, code: &str, ip: &str) -> AppResult<VerifyOutcome> {
        if code.trim().is_empty() {
            return Err(AppError::Validation("admin code must not be empty".into()));
        }

        let now = Utc::now();

        attempts::clear_expired_lock(&pool.conn, ip, now)?;
        if let Some(attempt) = attempts::attempt_for_ip(&pool.conn, ip)?
            && attempt.is_locked_now(now)
        {
            return Ok(VerifyOutcome::failure(
                "Too many failed attempts. Please try again later.",
            ));
        }

        if !code_exists(&pool.conn, code)? {
            // The threshold attempt still reports a bad code; the lock it
            // set applies from the next attempt on.
            attempts::record_failure(&pool.conn, ip, now, self.max_attempts, self.lockout_secs)?;
            return Ok(VerifyOutcome::failure(
                "Invalid admin code. Please try again.",
            ));
        }

        let Some(admin) = employees::designated_admin(&pool.conn)? else {
            return Ok(VerifyOutcome::failure(
                "No admin user found. Please contact your administrator.",
            ));
        };

        attempts::reset_attempts(&pool.conn, ip)?;

        let issued = now.timestamp();
        let session = AdminSession {
            id: Uuid::new_v4().to_string(),
            user_id: admin.id,
            user_name: admin.name.clone(),
            role: admin.role.to_db_str().to_string(),
            created_at: issued,
            expires_at: issued + self.session_secs,
        };

        let serialized =
            serde_json::to_string(&session).map_err(|e| AppError::Other(e.to_string()))?;
        self.store.write(&serialized)?;

        self.audit(
            &pool.conn,
            "login",
            &format!("Admin login successful from {}", ip),
            Some(admin.id),
            Some(ip),
        );

        Ok(VerifyOutcome {
            success: true,
            message: "Authentication successful".to_string(),
        })
    }

    /// The current session, if one exists and has not expired. An expired
    /// or unreadable session is removed on this read (lazy expiry; there
    /// is no background sweep).
    pub fn current_session(&self) -> AppResult<Option<AdminSession>> {
        let Some(raw) = self.store.read()? else {
            return Ok(None);
        };

        let session: AdminSession = match serde_json::from_str(&raw) {
            Ok(s) => s,
            Err(_) => {
                self.store.clear()?;
                return Ok(None);
            }
        };

        if session.is_expired() {
            self.store.clear()?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Guard for every protected operation.
    pub fn require_session(&self) -> AppResult<AdminSession> {
        self.current_session()?.ok_or(AppError::Unauthenticated)
    }

    /// Drop the session. Idempotent; the logout audit row is best-effort.
    pub fn end_session(&self, pool: &mut DbPool) -> AppResult<()> {
        if let Some(session) = self.current_session()? {
            self.audit(
                &pool.conn,
                "logout",
                "Admin logout",
                Some(session.user_id),
                None,
            );
        }
        self.store.clear()
    }

    /// Append an audit record. Errors are swallowed: logging must never
    /// block the user-facing action that triggered it.
    pub fn audit(
        &self,
        conn: &Connection,
        action: &str,
        details: &str,
        user_id: Option<i64>,
        ip: Option<&str>,
    ) {
        if let Err(e) = audit::append(conn, action, details, user_id, ip) {
            warning(format!("audit log write failed: {}", e));
        }
    }
}

fn code_exists(conn: &Connection, code: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM admin_codes WHERE code = ?1")?;
    Ok(stmt
        .query_row([code], |_| Ok(()))
        .optional()?
        .is_some())
}

/// Register a new admin code. Guarded by the caller; `init` uses it to
/// seed the first code before any session can exist.
pub fn add_admin_code(pool: &mut DbPool, code: &str) -> AppResult<()> {
    if code.trim().is_empty() {
        return Err(AppError::Validation("admin code must not be empty".into()));
    }
    let res = pool.conn.execute(
        "INSERT INTO admin_codes (code, created_at) VALUES (?1, ?2)",
        rusqlite::params![code, Utc::now().to_rfc3339()],
    );
    match res {
        Ok(_) => Ok(()),
        Err(e) if employees::is_unique_violation(&e) => Err(AppError::Validation(
            "this admin code is already registered".into(),
        )),
        Err(e) => Err(e.into()),
    }
}

pub fn count_admin_codes(pool: &mut DbPool) -> AppResult<i64> {
    Ok(pool
        .conn
        .query_row("SELECT COUNT(*) FROM admin_codes", [], |row| row.get(0))?)
}
