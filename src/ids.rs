// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side correlation identifiers.
//!
//! These are correlation hints only: unique enough to tie a client-initiated
//! action to its server-side counterpart, with no collision guarantee. The
//! server-assigned identifier is authoritative wherever the server returns
//! one.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Datelike, Utc};
use rand::Rng;

/// Fixed prefix for all generated identifiers.
const ID_PREFIX: &str = "AIF";

/// Maximum length of the email-derived token in a user identifier.
const EMAIL_TOKEN_LEN: usize = 8;

/// Correlation identifier for a file upload: prefix, current year and a
/// zero-padded 4-digit random suffix (e.g. `AIF20260042`).
pub fn file_correlation_id() -> String {
    let year = Utc::now().year();
    let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("{}{}{:04}", ID_PREFIX, year, suffix)
}

/// Correlation identifier for a report request. Same shape as a file
/// identifier with an `RPT` infix so the two are distinguishable in logs.
pub fn report_correlation_id() -> String {
    let year = Utc::now().year();
    let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("{}RPT{}{:04}", ID_PREFIX, year, suffix)
}

/// User identifier derived from the login email: prefix, current unix
/// millis, then the base64 of the email stripped to alphanumerics and
/// truncated to 8 characters (e.g. `AIF1767225600000_dGVhY2hl`).
pub fn user_id_from_email(email: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let token: String = STANDARD
        .encode(email.as_bytes())
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(EMAIL_TOKEN_LEN)
        .collect();
    format!("{}{}_{}", ID_PREFIX, millis, token)
}
