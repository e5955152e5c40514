use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use tracing::error;

use crate::{
    dto::{job_dto::CreateJobPayload, list_dto::JobListResponse},
    error::Result,
    models::{identity::Identity, job::JobPosting},
    utils::degrade::or_empty,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    responses(
        (status = 200, description = "Every posted job", body = Json<JobListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(State(state): State<AppState>) -> Json<JobListResponse> {
    Json(or_empty(state.job_service.list_all().await, "jobs").into())
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job posted", body = Json<JobPosting>),
        (status = 400, description = "Missing field or past deadline")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.create(&identity, payload).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/mine",
    responses(
        (status = 200, description = "Jobs posted by the signed-in employer, newest first", body = Json<JobListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn my_jobs(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Json<JobListResponse> {
    let jobs = state.job_service.list_for_employer(identity.uid()).await;
    Json(or_empty(jobs, "jobs").into())
}

#[utoipa::path(
    get,
    path = "/api/jobs/matched",
    responses(
        (status = 200, description = "Jobs whose title matches one of the candidate's skills", body = Json<JobListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn matched_jobs(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Json<JobListResponse> {
    let skills = match state.profile_service.get(identity.uid()).await {
        Ok(profile) => profile.map(|p| p.skills).unwrap_or_default(),
        Err(e) => {
            error!("Error fetching profile for {}: {}", identity, e);
            Vec::new()
        }
    };
    let jobs = state.job_service.matched_for(&skills).await;
    Json(or_empty(jobs, "jobs").into())
}
