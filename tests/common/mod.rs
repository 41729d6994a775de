// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process stub of the report generation API for integration tests.
//!
//! Runs a small axum router on an ephemeral port, mirroring the real
//! service's endpoints: fixed OTP `1234`, in-memory history log, and knobs
//! to force upload failures or override the assigned file id.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

#[allow(dead_code)]
pub const STUB_OTP: &str = "1234";

#[derive(Clone, Default)]
pub struct Stub {
    inner: Arc<Mutex<StubInner>>,
}

#[derive(Default)]
struct StubInner {
    login_requests: u32,
    verify_requests: u32,
    upload_requests: u32,
    report_requests: u32,
    history: Vec<Value>,
    fail_uploads: bool,
    server_file_id: Option<String>,
}

#[allow(dead_code)]
impl Stub {
    pub fn login_requests(&self) -> u32 {
        self.inner.lock().unwrap().login_requests
    }

    pub fn verify_requests(&self) -> u32 {
        self.inner.lock().unwrap().verify_requests
    }

    pub fn upload_requests(&self) -> u32 {
        self.inner.lock().unwrap().upload_requests
    }

    pub fn report_requests(&self) -> u32 {
        self.inner.lock().unwrap().report_requests
    }

    pub fn history(&self) -> Vec<Value> {
        self.inner.lock().unwrap().history.clone()
    }

    /// Make every upload respond with HTTP 500.
    pub fn fail_uploads(&self) {
        self.inner.lock().unwrap().fail_uploads = true;
    }

    /// Respond to uploads with this file id instead of echoing the client's.
    pub fn assign_file_id(&self, file_id: &str) {
        self.inner.lock().unwrap().server_file_id = Some(file_id.to_string());
    }
}

/// Spawn the stub server; returns its base URL and control handle.
#[allow(dead_code)]
pub async fn spawn_stub() -> (String, Stub) {
    let stub = Stub::default();

    let app = Router::new()
        .route("/api/login", post(login))
        .route("/api/verify-otp", post(verify_otp))
        .route("/api/daily-assessment/upload", post(upload))
        .route("/api/impact-assessment/upload", post(upload))
        .route("/api/daily-assessment/report", post(report))
        .route("/api/impact-assessment/report", post(report))
        .route("/api/history/", post(append_history))
        .route("/api/history/{user_id}", get(get_history))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    (format!("http://{}", addr), stub)
}

async fn login(State(stub): State<Stub>, Json(body): Json<Value>) -> impl IntoResponse {
    stub.inner.lock().unwrap().login_requests += 1;

    let email = body["email"].as_str().unwrap_or_default();
    if !email.ends_with("@agastya.org") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Invalid email domain"})),
        );
    }
    (StatusCode::OK, Json(json!({"message": "OTP sent successfully"})))
}

async fn verify_otp(State(stub): State<Stub>, Json(body): Json<Value>) -> impl IntoResponse {
    stub.inner.lock().unwrap().verify_requests += 1;

    if body["otp"].as_str() != Some(STUB_OTP) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Invalid OTP"})),
        );
    }

    let email = body["email"].as_str().unwrap_or_default().to_string();
    let name = email
        .split('@')
        .next()
        .unwrap_or_default()
        .to_uppercase();

    (
        StatusCode::OK,
        Json(json!({
            "email": email,
            "name": name,
            "userId": body["userId"],
            "memberSince": "2026-01-01T00:00:00",
        })),
    )
}

async fn upload(State(stub): State<Stub>, mut multipart: Multipart) -> impl IntoResponse {
    {
        let mut inner = stub.inner.lock().unwrap();
        inner.upload_requests += 1;
        if inner.fail_uploads {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": "Failed to upload file"})),
            );
        }
    }

    let mut client_file_id = String::new();
    let mut file_name = String::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("fileId") => client_file_id = field.text().await.expect("fileId text"),
            Some("file") => {
                file_name = field.file_name().unwrap_or_default().to_string();
                let _ = field.bytes().await.expect("file bytes");
            }
            _ => {
                let _ = field.bytes().await.expect("field bytes");
            }
        }
    }

    let file_id = stub
        .inner
        .lock()
        .unwrap()
        .server_file_id
        .clone()
        .unwrap_or(client_file_id);

    (
        StatusCode::OK,
        Json(json!({
            "message": "File uploaded successfully",
            "fileId": file_id,
            "fileName": file_name,
        })),
    )
}

async fn report(State(stub): State<Stub>, Json(body): Json<Value>) -> impl IntoResponse {
    stub.inner.lock().unwrap().report_requests += 1;

    (
        StatusCode::OK,
        Json(json!({
            "message": "Report generated successfully",
            "reportId": body["reportId"],
            "generatedAt": "2026-08-30T10:00:00",
        })),
    )
}

async fn append_history(State(stub): State<Stub>, Json(body): Json<Value>) -> impl IntoResponse {
    stub.inner.lock().unwrap().history.push(body);
    (StatusCode::OK, Json(json!({"message": "ok"})))
}

async fn get_history(
    State(stub): State<Stub>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let entries: Vec<Value> = stub
        .inner
        .lock()
        .unwrap()
        .history
        .iter()
        .filter(|e| e["user_id"].as_str() == Some(user_id.as_str()))
        .enumerate()
        .map(|(i, e)| {
            let mut entry = e.clone();
            entry["id"] = json!(format!("{}", i + 1));
            entry["created_at"] = json!("2026-08-30T10:00:00");
            entry
        })
        .collect();

    (StatusCode::OK, Json(json!(entries)))
}
