// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity history records mirrored to the remote log.

use serde::{Deserialize, Serialize};

use crate::models::FilterSelection;

/// The two assessment flows. They are structurally identical; only the
/// endpoints and activity type names differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    Daily,
    Impact,
}

impl AssessmentKind {
    /// URL path segment for this assessment's endpoints.
    pub fn path_segment(&self) -> &'static str {
        match self {
            AssessmentKind::Daily => "daily-assessment",
            AssessmentKind::Impact => "impact-assessment",
        }
    }

    /// Activity type recorded for an upload in this flow.
    pub fn upload_kind(&self) -> ActivityKind {
        match self {
            AssessmentKind::Daily => ActivityKind::DailyUpload,
            AssessmentKind::Impact => ActivityKind::ImpactUpload,
        }
    }

    /// Activity type recorded for a report generation in this flow.
    pub fn report_kind(&self) -> ActivityKind {
        match self {
            AssessmentKind::Daily => ActivityKind::DailyReport,
            AssessmentKind::Impact => ActivityKind::ImpactReport,
        }
    }
}

/// Activity type names on the wire match what the history service stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    #[serde(rename = "daily_assessment_upload")]
    DailyUpload,
    #[serde(rename = "daily_assessment_report")]
    DailyReport,
    #[serde(rename = "impact_assessment")]
    ImpactUpload,
    #[serde(rename = "impact_assessment_report")]
    ImpactReport,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::DailyUpload => "daily_assessment_upload",
            ActivityKind::DailyReport => "daily_assessment_report",
            ActivityKind::ImpactUpload => "impact_assessment",
            ActivityKind::ImpactReport => "impact_assessment_report",
        }
    }
}

/// New activity entry posted to the remote history log.
///
/// An upload entry carries a file identifier and no report identifier; a
/// report entry carries a report identifier and the file identifier it was
/// derived from (or the report identifier as placeholder when the flow has
/// no file reference).
#[derive(Debug, Clone, Serialize)]
pub struct NewActivity {
    pub user_id: String,
    pub activity_type: ActivityKind,
    pub file_id: String,
    pub file_name: Option<String>,
    pub report_id: Option<String>,
    pub filters: Option<FilterSelection>,
}

/// Activity entry as returned by the history service.
///
/// `activity_type` stays a plain string so an unknown type added on the
/// server side does not fail the whole fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub activity_type: String,
    pub file_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub report_id: Option<String>,
    #[serde(default)]
    pub filters: Option<FilterSelection>,
    #[serde(default)]
    pub created_at: Option<String>,
}
