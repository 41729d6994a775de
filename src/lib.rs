// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Agastya Reports: client for the automated report generation service.
//!
//! This crate implements the client-side workflows: OTP login with a
//! durable session, assessment file uploads, report generation requests,
//! and the activity history view.

pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod services;
pub mod session;

use config::Config;
use error::{AppError, Result};
use models::{ActivityRecord, AssessmentKind, FilterSelection, UserProfile};
use services::{ApiClient, AssessmentService, HistorySync, LoginFlow};
use session::{Session, SessionStore};

/// Application controller.
///
/// Owns the configuration, the session store and the service handles, and
/// is the only writer of session state. Handlers borrow it instead of
/// touching globals.
pub struct App {
    pub config: Config,
    api: ApiClient,
    store: SessionStore,
    session: Option<Session>,
    assessments: AssessmentService,
    history: HistorySync,
}

impl App {
    /// Build the controller and restore any persisted session. A corrupt
    /// session file degrades to logged out; this never fails.
    pub fn new(config: Config) -> Self {
        let api = ApiClient::new(config.api_base_url.clone());
        let store = SessionStore::new(config.session_path.clone());
        let session = store.restore_on_startup();

        Self {
            assessments: AssessmentService::new(api.clone()),
            history: HistorySync::new(api.clone()),
            api,
            store,
            session,
            config,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Start a fresh login flow against the configured API.
    pub fn login_flow(&self) -> LoginFlow {
        LoginFlow::new(self.api.clone(), self.config.email_domain.clone())
    }

    /// Establish a session for a verified user profile and persist it.
    pub fn establish(&mut self, user: UserProfile) -> Result<Session> {
        let session = self.store.establish(user)?;
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Drop the session and delete the persisted file.
    pub fn logout(&mut self) -> Result<()> {
        self.store.clear()?;
        self.session = None;
        Ok(())
    }

    /// Upload an assessment file; returns the server-assigned file id.
    pub async fn upload(
        &mut self,
        kind: AssessmentKind,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let session = self.session.as_mut().ok_or(AppError::NotLoggedIn)?;
        self.assessments
            .upload_file(session, &self.store, kind, file_name, bytes)
            .await
    }

    /// Request report generation; returns the report id.
    pub async fn report(&self, kind: AssessmentKind, filters: FilterSelection) -> Result<String> {
        let session = self.session.as_ref().ok_or(AppError::NotLoggedIn)?;
        self.assessments
            .generate_report(session, kind, filters)
            .await
    }

    /// Fetch the full activity history for the logged-in user.
    pub async fn history(&self) -> Result<Vec<ActivityRecord>> {
        let session = self.session.as_ref().ok_or(AppError::NotLoggedIn)?;
        self.history.fetch_all(&session.user.user_id).await
    }
}
