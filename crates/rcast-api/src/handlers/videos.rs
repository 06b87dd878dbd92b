//! Video job handlers: start, poll, approve.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::info;

use rcast_models::{JobId, JobRecord};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Response to a job creation request.
#[derive(Debug, Serialize)]
pub struct CreateVideoResponse {
    pub job_id: String,
}

/// Response to a successful approval.
#[derive(Debug, Serialize)]
pub struct ApproveVideoResponse {
    pub job_id: String,
    pub video_id: String,
    pub video_url: String,
}

/// POST /api/videos
///
/// Fire-and-forget launch of the create pipeline. Returns 202 immediately;
/// the caller polls the status endpoint for progress.
pub async fn create_video(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateVideoResponse>) {
    let job_id = state.jobs.start_job();
    info!(job_id = %job_id, "create_video accepted");
    (
        StatusCode::ACCEPTED,
        Json(CreateVideoResponse {
            job_id: job_id.to_string(),
        }),
    )
}

/// GET /api/videos/:job_id/status
///
/// Poll the current job record. 404 means the job was never accepted,
/// which is distinct from a record with status `error`.
pub async fn get_video_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<JobRecord>> {
    if job_id.trim().is_empty() {
        return Err(ApiError::bad_request("Empty job ID"));
    }

    let record = state
        .jobs
        .get_status(&JobId::from_string(job_id))
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    Ok(Json(record))
}

/// POST /api/videos/:job_id/approve
///
/// Approve a ready job and publish it. Awaited: precondition and publish
/// failures are returned to the caller as well as recorded on the job.
pub async fn approve_video(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<ApproveVideoResponse>> {
    let job_id = JobId::from_string(job_id);
    info!(job_id = %job_id, "approve_video requested");

    let receipt = state.jobs.approve(&job_id).await?;

    Ok(Json(ApproveVideoResponse {
        job_id: job_id.to_string(),
        video_id: receipt.video_id,
        video_url: receipt.video_url,
    }))
}
