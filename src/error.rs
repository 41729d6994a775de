// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types shared by the library and the CLI.

/// Application error type.
///
/// Every failure path surfaces one of these and returns control to the
/// caller; nothing here is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Upload a file before requesting a report")]
    UploadRequired,

    #[error("Report service error: {0}")]
    Api(String),

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for errors that are rejected locally, before any network call.
    pub fn is_local_rejection(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::NotLoggedIn | AppError::UploadRequired
        )
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
