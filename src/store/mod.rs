//! Client-held key-value storage for the admin session.
//!
//! The session is deliberately NOT a database row: it belongs to the
//! terminal that logged in, the way a browser session belongs to its
//! origin. The trait keeps callers independent of where the bytes live;
//! the binary uses the file-backed store in the config dir, tests point
//! it at a temp path.

use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::PathBuf;

pub trait SessionStore {
    fn read(&self) -> AppResult<Option<String>>;
    fn write(&self, value: &str) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}

pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStore for FileSessionStore {
    fn read(&self) -> AppResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(s) if s.trim().is_empty() => Ok(None),
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    fn write(&self, value: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, value)?;
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}
