// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the report generation API.
//!
//! Handles:
//! - OTP request and verification
//! - Multipart assessment uploads
//! - Report generation requests
//! - History log reads and writes
//!
//! Every call is one-shot: no retries, no timeouts beyond the transport
//! defaults. Non-2xx responses surface as `AppError::Api`.

use reqwest::multipart;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{ActivityRecord, AssessmentKind, FilterSelection, NewActivity, UserProfile};

/// Report generation API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client for the given base URL (trailing slash tolerated).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    // ─── Login / OTP ─────────────────────────────────────────────────────────

    /// Request a one-time code for the given email.
    pub async fn request_otp(&self, email: &str) -> Result<()> {
        let url = format!("{}/api/login", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;

        self.check_response(response).await
    }

    /// Verify a one-time code. The server-returned profile is authoritative;
    /// `user_id` is only a client correlation hint for first-time logins.
    pub async fn verify_otp(&self, email: &str, otp: &str, user_id: &str) -> Result<UserProfile> {
        let url = format!("{}/api/verify-otp", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "email": email,
                "otp": otp,
                "userId": user_id,
            }))
            .send()
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;

        self.check_response_json(response).await
    }

    // ─── Uploads and reports ─────────────────────────────────────────────────

    /// Upload an assessment file as a multipart form binding the file, the
    /// session's user identifier and a client correlation file identifier.
    pub async fn upload_assessment(
        &self,
        kind: AssessmentKind,
        user_id: &str,
        file_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse> {
        let url = format!("{}/api/{}/upload", self.base_url, kind.path_segment());

        let file_part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new()
            .part("file", file_part)
            .text("userId", user_id.to_string())
            .text("fileId", file_id.to_string());

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Request report generation with the current filter selection.
    pub async fn generate_report(
        &self,
        kind: AssessmentKind,
        request: &ReportRequest,
    ) -> Result<ReportResponse> {
        let url = format!("{}/api/{}/report", self.base_url, kind.path_segment());

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;

        self.check_response_json(response).await
    }

    // ─── History log ─────────────────────────────────────────────────────────

    /// Append an activity entry to the remote history log.
    pub async fn append_history(&self, entry: &NewActivity) -> Result<()> {
        let url = format!("{}/api/history/", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(entry)
            .send()
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;

        self.check_response(response).await
    }

    /// Fetch the full history list for a user, in server order.
    pub async fn fetch_history(&self, user_id: &str) -> Result<Vec<ActivityRecord>> {
        let url = format!(
            "{}/api/history/{}",
            self.base_url,
            urlencoding::encode(user_id)
        );
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Api(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response status and return error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Api(format!("HTTP {}: {}", status, body)))
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Api(format!("JSON parse error: {}", e)))
    }
}

/// Upload endpoint response. `file_id` is the authoritative identifier.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Report endpoint request body. The daily flow includes the source file
/// identifier; the impact flow omits it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub user_id: String,
    pub filters: FilterSelection,
    pub report_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
}

/// Report endpoint response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub report_id: String,
    #[serde(default)]
    pub generated_at: Option<String>,
}
