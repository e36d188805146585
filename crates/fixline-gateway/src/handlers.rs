// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the report REST API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use fixline_core::traits::NewReport;
use fixline_core::types::{
    Identity, IssueReport, ReportId, ReportStatus, WorkerProfile, WorkerRef,
};
use fixline_core::FixlineError;

use crate::server::GatewayState;

/// Request body for POST /v1/reports.
#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    /// Reporter's email address.
    pub reporter: String,
    /// Worker-field classification, e.g. "plumbing".
    pub category: String,
    /// Short descriptive label.
    pub label: String,
    pub address: String,
    pub phone: String,
}

/// Request body for PATCH /v1/reports/{id}.
///
/// `status: in_progress` requires `assigned_to` and dispatches to accept;
/// `status: resolved` dispatches to complete.
#[derive(Debug, Deserialize)]
pub struct PatchReportRequest {
    pub status: ReportStatus,
    /// Worker reference: an email is taken as an identity, anything else
    /// as a display name to resolve through the directory.
    #[serde(default)]
    pub assigned_to: Option<String>,
}

/// Request body for POST /v1/workers.
#[derive(Debug, Deserialize)]
pub struct RegisterWorkerRequest {
    pub email: String,
    pub name: String,
    /// Trade field, matched against report categories.
    pub field: String,
    pub phone: String,
}

/// A report annotated with the assigned worker's display name, when the
/// worker has a directory profile.
#[derive(Debug, Serialize)]
pub struct ReportView {
    #[serde(flatten)]
    pub report: IssueReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_name: Option<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Response body for GET /v1/presence.
#[derive(Debug, Serialize)]
pub struct PresenceResponse {
    pub connected: Vec<Identity>,
}

/// Error response body; `kind` is the machine-readable discriminator.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
}

fn error_response(err: &FixlineError) -> Response {
    let status = match err {
        FixlineError::ReportNotFound { .. } | FixlineError::WorkerNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        FixlineError::InvalidTransition { .. } | FixlineError::AlreadyAssigned { .. } => {
            StatusCode::CONFLICT
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            kind: err.kind(),
        }),
    )
        .into_response()
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
            kind: "invalid_request",
        }),
    )
        .into_response()
}

/// GET /health
///
/// Public liveness probe, served without auth.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

/// GET /v1/reports
///
/// All reports, newest first, annotated with the assigned worker's
/// display name where one is on file.
pub async fn list_reports(State(state): State<GatewayState>) -> Response {
    let reports = match state.store.list().await {
        Ok(reports) => reports,
        Err(e) => return error_response(&e),
    };

    let mut views = Vec::with_capacity(reports.len());
    for report in reports {
        let view = match annotate(&state, report).await {
            Ok(view) => view,
            Err(e) => return error_response(&e),
        };
        views.push(view);
    }
    (StatusCode::OK, Json(views)).into_response()
}

async fn annotate(state: &GatewayState, report: IssueReport) -> Result<ReportView, FixlineError> {
    let assigned_to_name = match report.assigned_to {
        Some(ref worker) => state
            .directory
            .find_by_identity(worker)
            .await?
            .map(|profile| profile.name),
        None => None,
    };
    Ok(ReportView {
        report,
        assigned_to_name,
    })
}

/// POST /v1/reports
pub async fn create_report(
    State(state): State<GatewayState>,
    Json(body): Json<CreateReportRequest>,
) -> Response {
    let Some(reporter) = Identity::parse(&body.reporter) else {
        return bad_request(format!("malformed reporter email: {}", body.reporter));
    };
    if body.category.trim().is_empty() || body.label.trim().is_empty() {
        return bad_request("category and label must be non-empty");
    }

    let new_report = NewReport {
        reporter,
        category: body.category,
        label: body.label,
        address: body.address,
        phone: body.phone,
    };
    match state.store.create(new_report).await {
        Ok(report) => (StatusCode::CREATED, Json(report)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// PATCH /v1/reports/{id}
///
/// Dispatches on the requested status: `in_progress` is a worker
/// accepting the report, `resolved` marks it complete.
pub async fn patch_report(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<PatchReportRequest>,
) -> Response {
    let id = ReportId(id);
    let result = match body.status {
        ReportStatus::InProgress => {
            let Some(raw_worker) = body.assigned_to else {
                return bad_request("assigned_to is required when accepting a report");
            };
            if raw_worker.trim().is_empty() {
                return bad_request("assigned_to must be non-empty");
            }
            state
                .assignments
                .accept(&id, WorkerRef::parse(&raw_worker))
                .await
        }
        ReportStatus::Resolved => state.assignments.complete(&id).await,
        ReportStatus::Unassigned => {
            return bad_request("reports cannot be moved back to unassigned");
        }
    };

    match result {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /v1/reports/assigned/{identity}
pub async fn list_assigned_reports(
    State(state): State<GatewayState>,
    Path(identity): Path<String>,
) -> Response {
    let Some(worker) = Identity::parse(&identity) else {
        return bad_request(format!("malformed worker email: {identity}"));
    };
    match state.assignments.assigned_to(&worker).await {
        Ok(reports) => (StatusCode::OK, Json(reports)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST /v1/workers
///
/// Seeds the worker directory so display-name references can resolve.
pub async fn register_worker(
    State(state): State<GatewayState>,
    Json(body): Json<RegisterWorkerRequest>,
) -> Response {
    let Some(identity) = Identity::parse(&body.email) else {
        return bad_request(format!("malformed worker email: {}", body.email));
    };
    if body.name.trim().is_empty() {
        return bad_request("name must be non-empty");
    }

    let profile = WorkerProfile {
        identity,
        name: body.name.trim().to_string(),
        field: body.field,
        phone: body.phone,
    };
    match state.directory.upsert(profile.clone()).await {
        Ok(()) => (StatusCode::CREATED, Json(profile)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /v1/presence
///
/// Identities with a live chat connection right now.
pub async fn get_presence(State(state): State<GatewayState>) -> Json<PresenceResponse> {
    Json(PresenceResponse {
        connected: state.registry.connected(),
    })
}
