//! Endpoint handlers.
//!
//! Each handler validates its payload, runs one tracking operation, and
//! returns the new counter value as a small JSON object. Field presence
//! is checked by hand so a missing field is a 400, matching the error
//! contract of the tracking API.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::tracking::JobStats;

#[derive(Debug, Deserialize)]
pub struct TrackViewRequest {
    pub content_type: Option<String>,
    pub content_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrackViewResponse {
    pub success: bool,
    pub views: u64,
}

#[derive(Debug, Deserialize)]
pub struct TrackApplicationRequest {
    #[serde(rename = "jobId")]
    pub job_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrackApplicationResponse {
    pub success: bool,
    pub applicants: u64,
}

#[derive(Debug, Deserialize)]
pub struct TrackExamViewRequest {
    #[serde(rename = "examId")]
    pub exam_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrackExamViewResponse {
    pub success: bool,
    pub participants: u64,
}

#[derive(Debug, Deserialize)]
pub struct JobStatsQuery {
    #[serde(rename = "jobId")]
    pub job_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub version: &'static str,
    pub status: &'static str,
}

fn required<T>(field: Option<T>, name: &str) -> Result<T, ApiError> {
    field.ok_or_else(|| ApiError::Validation(format!("missing field: {name}")))
}

fn payload<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

/// `POST /track-view` — count one view of a piece of content.
///
/// Only `content_type = "job"` is tracked here; exam views go through
/// the dedicated endpoint.
pub async fn track_view(
    State(state): State<AppState>,
    body: Result<Json<TrackViewRequest>, JsonRejection>,
) -> Result<Json<TrackViewResponse>, ApiError> {
    let request = payload(body)?;
    let content_type = required(request.content_type, "content_type")?;
    let content_id = required(request.content_id, "content_id")?;

    if content_type != "job" {
        return Err(ApiError::Validation(format!(
            "unsupported content_type: {content_type}"
        )));
    }

    let views = state.tracking.record_job_view(&content_id).await?;
    Ok(Json(TrackViewResponse {
        success: true,
        views,
    }))
}

/// `POST /track-application` — count one application to a job.
pub async fn track_application(
    State(state): State<AppState>,
    body: Result<Json<TrackApplicationRequest>, JsonRejection>,
) -> Result<Json<TrackApplicationResponse>, ApiError> {
    let request = payload(body)?;
    let job_id = required(request.job_id, "jobId")?;

    let applicants = state.tracking.record_application(&job_id).await?;
    Ok(Json(TrackApplicationResponse {
        success: true,
        applicants,
    }))
}

/// `POST /track-exam-view` — count one exam participant.
pub async fn track_exam_view(
    State(state): State<AppState>,
    body: Result<Json<TrackExamViewRequest>, JsonRejection>,
) -> Result<Json<TrackExamViewResponse>, ApiError> {
    let request = payload(body)?;
    let exam_id = required(request.exam_id, "examId")?;

    let participants = state.tracking.record_exam_view(&exam_id).await?;
    Ok(Json(TrackExamViewResponse {
        success: true,
        participants,
    }))
}

/// `GET /job-stats?jobId=...` — current applicant count for a job.
pub async fn job_stats(
    State(state): State<AppState>,
    Query(query): Query<JobStatsQuery>,
) -> Result<Json<JobStats>, ApiError> {
    let job_id = required(query.job_id, "jobId")?;
    let stats = state.tracking.job_stats(&job_id).await?;
    Ok(Json(stats))
}

/// `GET /health` — liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}
