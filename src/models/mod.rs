// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod filters;
pub mod user;

pub use activity::{ActivityKind, ActivityRecord, AssessmentKind, NewActivity};
pub use filters::FilterSelection;
pub use user::UserProfile;
