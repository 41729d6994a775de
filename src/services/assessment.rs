// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Upload and report-generation workflows.
//!
//! Both assessment flows share one implementation parameterized by
//! `AssessmentKind`. Each operation is one-shot: a failure is surfaced to
//! the caller with nothing recorded, and a repeated call creates a new
//! server-side artifact (no idempotency beyond the correlation ids).

use crate::error::{AppError, Result};
use crate::ids;
use crate::models::{AssessmentKind, FilterSelection, NewActivity};
use crate::services::api::ReportRequest;
use crate::services::{ApiClient, HistorySync};
use crate::session::{Session, SessionStore, UploadRef};

/// High-level assessment operations over the API client.
pub struct AssessmentService {
    api: ApiClient,
    history: HistorySync,
}

impl AssessmentService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            history: HistorySync::new(api.clone()),
            api,
        }
    }

    /// Upload an assessment file.
    ///
    /// Generates a correlation file id, sends the multipart request, then
    /// takes the server-assigned id as authoritative. On success the upload
    /// is recorded in the session (for the daily report flow) and mirrored
    /// to the history log. On failure nothing is recorded.
    pub async fn upload_file(
        &self,
        session: &mut Session,
        store: &SessionStore,
        kind: AssessmentKind,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let correlation_id = ids::file_correlation_id();
        tracing::info!(
            file_name,
            correlation_id = %correlation_id,
            kind = kind.path_segment(),
            "Uploading assessment file"
        );

        let response = self
            .api
            .upload_assessment(
                kind,
                &session.user.user_id,
                &correlation_id,
                file_name,
                bytes,
            )
            .await?;

        // Server-assigned id wins; the client id was only a correlation hint.
        let file_id = if response.file_id.is_empty() {
            correlation_id
        } else {
            response.file_id
        };

        session.last_upload = Some(UploadRef {
            kind,
            file_id: file_id.clone(),
            file_name: file_name.to_string(),
        });
        store.persist(session)?;

        self.history
            .append_remote(&NewActivity {
                user_id: session.user.user_id.clone(),
                activity_type: kind.upload_kind(),
                file_id: file_id.clone(),
                file_name: Some(file_name.to_string()),
                report_id: None,
                filters: None,
            })
            .await;

        Ok(file_id)
    }

    /// Request report generation with the given filter selection.
    ///
    /// The daily flow requires a daily upload earlier in this session and
    /// references its file id; the impact flow has no file reference. The
    /// prior-upload check happens before any network call.
    pub async fn generate_report(
        &self,
        session: &Session,
        kind: AssessmentKind,
        filters: FilterSelection,
    ) -> Result<String> {
        let file_id = match kind {
            AssessmentKind::Daily => match &session.last_upload {
                Some(upload) if upload.kind == AssessmentKind::Daily => {
                    Some(upload.file_id.clone())
                }
                _ => return Err(AppError::UploadRequired),
            },
            AssessmentKind::Impact => None,
        };

        let correlation_id = ids::report_correlation_id();
        tracing::info!(
            correlation_id = %correlation_id,
            kind = kind.path_segment(),
            "Requesting report generation"
        );

        let request = ReportRequest {
            user_id: session.user.user_id.clone(),
            filters: filters.clone(),
            report_id: correlation_id.clone(),
            file_id: file_id.clone(),
        };

        let response = self.api.generate_report(kind, &request).await?;

        let report_id = if response.report_id.is_empty() {
            correlation_id
        } else {
            response.report_id
        };

        self.history
            .append_remote(&NewActivity {
                user_id: session.user.user_id.clone(),
                activity_type: kind.report_kind(),
                // Report id doubles as placeholder when there is no source file.
                file_id: file_id.unwrap_or_else(|| report_id.clone()),
                file_name: None,
                report_id: Some(report_id.clone()),
                filters: Some(filters),
            })
            .await;

        Ok(report_id)
    }
}
