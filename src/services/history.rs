// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! History synchronization: mirror completed activities to the remote log
//! and fetch them back for display.

use crate::error::{AppError, Result};
use crate::models::{ActivityRecord, NewActivity};
use crate::services::ApiClient;

/// Mirrors activity records to the remote history log.
pub struct HistorySync {
    api: ApiClient,
}

impl HistorySync {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fire-and-forget append. A failed mirror never fails the operation
    /// that produced the record; it is logged and dropped.
    pub async fn append_remote(&self, entry: &NewActivity) {
        if let Err(e) = self.api.append_history(entry).await {
            tracing::warn!(
                error = %e,
                activity = entry.activity_type.as_str(),
                "Failed to mirror activity to history log"
            );
        }
    }

    /// Fetch the full history for a user. The returned list replaces any
    /// previous view wholesale, in whatever order the server sent.
    pub async fn fetch_all(&self, user_id: &str) -> Result<Vec<ActivityRecord>> {
        let records = self.api.fetch_history(user_id).await?;
        tracing::debug!(user_id, count = records.len(), "History fetched");
        Ok(records)
    }
}

const COLUMNS: &str = "WHEN                 ACTIVITY                      FILE / REPORT";

/// Render history records as a plain text table.
///
/// An empty list renders exactly one "no records" row under the header.
pub fn render_table(records: &[ActivityRecord]) -> String {
    let mut out = String::from(COLUMNS);

    if records.is_empty() {
        out.push_str("\n-                    No activity recorded yet");
        return out;
    }

    for record in records {
        let when = record.created_at.as_deref().unwrap_or("-");
        let reference = match (&record.report_id, &record.file_name) {
            (Some(report_id), _) => report_id.as_str(),
            (None, Some(file_name)) => file_name.as_str(),
            (None, None) => record.file_id.as_str(),
        };
        out.push_str(&format!(
            "\n{:<20} {:<29} {}",
            when, record.activity_type, reference
        ));
    }
    out
}

/// Render a fetch failure as a single inline error row, keeping the table
/// frame so the display stays consistent instead of crashing.
pub fn render_fetch_error(error: &AppError) -> String {
    format!("{}\n-                    Could not load history: {}", COLUMNS, error)
}
