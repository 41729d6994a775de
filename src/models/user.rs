//! User profile returned by OTP verification.

use serde::{Deserialize, Serialize};

/// Authenticated user profile, as returned by the verify-otp endpoint and
/// persisted in the session file. Either all fields are present or there is
/// no session at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Login email (organizational domain)
    pub email: String,
    /// Display name
    pub name: String,
    /// Server-assigned user identifier
    pub user_id: String,
    /// When the user first logged in (ISO 8601)
    pub member_since: String,
}
