// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable client-side session storage.
//!
//! The session is a single JSON file: written on login, read once at
//! startup, deleted on logout. A file that cannot be read or parsed is
//! discarded and the client starts logged out; corruption must never crash
//! startup.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{AssessmentKind, UserProfile};

/// The authenticated session. Either fully populated or absent entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: UserProfile,
    /// Most recent upload in this session, required by the daily report flow.
    #[serde(default)]
    pub last_upload: Option<UploadRef>,
}

/// Reference to the last uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRef {
    pub kind: AssessmentKind,
    pub file_id: String,
    pub file_name: String,
}

/// File-backed session store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Establish a session for the given user and persist it.
    pub fn establish(&self, user: UserProfile) -> Result<Session> {
        let session = Session {
            user,
            last_upload: None,
        };
        self.persist(&session)?;
        Ok(session)
    }

    /// Read any persisted session at startup.
    ///
    /// A missing file means logged out. An unreadable or unparseable file is
    /// discarded with a warning and also means logged out; this path never
    /// returns an error.
    pub fn restore_on_startup(&self) -> Option<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "Failed to read session file");
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => {
                tracing::debug!(email = %session.user.email, "Session restored");
                Some(session)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding corrupt session file");
                let _ = fs::remove_file(&self.path);
                None
            }
        }
    }

    /// Write the session back to disk (used after login and after uploads).
    pub fn persist(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Session(format!("create {}: {}", parent.display(), e)))?;
        }
        let raw = serde_json::to_string_pretty(session)
            .map_err(|e| AppError::Session(e.to_string()))?;
        fs::write(&self.path, raw)
            .map_err(|e| AppError::Session(format!("write {}: {}", self.path.display(), e)))
    }

    /// Remove the persisted session (logout). Missing file is fine.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Session(format!(
                "remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_profile() -> UserProfile {
        UserProfile {
            email: "teacher@agastya.org".to_string(),
            name: "Teacher".to_string(),
            user_id: "AIF1767225600000_dGVhY2hl".to_string(),
            member_since: "2026-01-01T00:00:00".to_string(),
        }
    }

    #[test]
    fn test_establish_then_restore_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        store.establish(test_profile()).unwrap();

        let restored = store.restore_on_startup().expect("session restored");
        assert_eq!(restored.user, test_profile());
        assert!(restored.last_upload.is_none());
    }

    #[test]
    fn test_restore_missing_file_is_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert!(store.restore_on_startup().is_none());
    }

    #[test]
    fn test_restore_corrupt_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json at all").unwrap();

        let store = SessionStore::new(path.clone());
        assert!(store.restore_on_startup().is_none());
        // Corrupt file is deleted so the next startup takes the fast path.
        assert!(!path.exists());
    }

    #[test]
    fn test_restore_partial_session_is_discarded() {
        // A session with missing fields violates the all-or-nothing
        // invariant and is treated the same as corruption.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"user": {"email": "teacher@agastya.org"}}"#).unwrap();

        let store = SessionStore::new(path);
        assert!(store.restore_on_startup().is_none());
    }

    #[test]
    fn test_persist_records_last_upload() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        let mut session = store.establish(test_profile()).unwrap();
        session.last_upload = Some(UploadRef {
            kind: AssessmentKind::Daily,
            file_id: "AIF20260042".to_string(),
            file_name: "scores.xlsx".to_string(),
        });
        store.persist(&session).unwrap();

        let restored = store.restore_on_startup().unwrap();
        let upload = restored.last_upload.expect("upload recorded");
        assert_eq!(upload.file_id, "AIF20260042");
        assert_eq!(upload.kind, AssessmentKind::Daily);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        store.establish(test_profile()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.restore_on_startup().is_none());
    }
}
