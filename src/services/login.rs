// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Two-step OTP login flow.
//!
//! State machine: `Idle -> OtpRequested -> Authenticated`. Emails outside
//! the organizational domain are rejected locally, before any network call.
//! A rejected code keeps the flow in `OtpRequested` so the user can retry;
//! there is no attempt limit or expiry of the pending state.

use validator::Validate;

use crate::error::{AppError, Result};
use crate::ids;
use crate::models::UserProfile;
use crate::services::ApiClient;

/// Login flow state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    Idle,
    OtpRequested { email: String },
    Authenticated,
}

/// Login form input, validated before anything is sent.
#[derive(Debug, Validate)]
struct LoginForm {
    #[validate(email)]
    email: String,
}

/// Drives the OTP login exchange against the API.
pub struct LoginFlow {
    api: ApiClient,
    /// Required email domain, without the leading `@`.
    domain: String,
    state: LoginState,
}

impl LoginFlow {
    pub fn new(api: ApiClient, domain: String) -> Self {
        Self {
            api,
            domain,
            state: LoginState::Idle,
        }
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    /// Request a one-time code for `email`.
    ///
    /// Moves to `OtpRequested` on success. Validation failures and network
    /// failures both leave the state unchanged.
    pub async fn request_code(&mut self, email: &str) -> Result<()> {
        let form = LoginForm {
            email: email.trim().to_string(),
        };
        if form.validate().is_err() {
            return Err(AppError::Validation(format!(
                "'{}' is not a valid email address",
                form.email
            )));
        }

        let suffix = format!("@{}", self.domain);
        if !form.email.ends_with(&suffix) {
            return Err(AppError::Validation(format!(
                "Email must end with {}",
                suffix
            )));
        }

        self.api.request_otp(&form.email).await?;

        tracing::info!(email = %form.email, "One-time code requested");
        self.state = LoginState::OtpRequested { email: form.email };
        Ok(())
    }

    /// Submit the received code for verification.
    ///
    /// On acceptance the server-returned profile is handed back for session
    /// establishment and the flow moves to `Authenticated`. On rejection the
    /// flow stays in `OtpRequested`.
    pub async fn verify_code(&mut self, otp: &str) -> Result<UserProfile> {
        let email = match &self.state {
            LoginState::OtpRequested { email } => email.clone(),
            _ => {
                return Err(AppError::Validation(
                    "Request a code before verifying".to_string(),
                ))
            }
        };

        let correlation_id = ids::user_id_from_email(&email);
        let profile = self.api.verify_otp(&email, otp.trim(), &correlation_id).await?;

        tracing::info!(email = %profile.email, user_id = %profile.user_id, "Login verified");
        self.state = LoginState::Authenticated;
        Ok(profile)
    }
}
