// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - client workflows over the report generation API.

pub mod api;
pub mod assessment;
pub mod history;
pub mod login;

pub use api::ApiClient;
pub use assessment::AssessmentService;
pub use history::HistorySync;
pub use login::{LoginFlow, LoginState};
