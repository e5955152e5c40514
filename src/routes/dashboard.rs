use axum::{extract::State, response::Json, Extension};

use crate::{
    dto::dashboard_dto::{AdminDashboard, CandidateDashboard, EmployerDashboard},
    models::identity::Identity,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/dashboard/candidate",
    responses(
        (status = 200, description = "Greeting and matched jobs", body = Json<CandidateDashboard>)
    )
)]
#[axum::debug_handler]
pub async fn candidate_dashboard(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Json<CandidateDashboard> {
    Json(state.dashboard_service.candidate(&identity).await)
}

#[utoipa::path(
    get,
    path = "/api/dashboard/employer",
    responses(
        (status = 200, description = "Own postings and live statistics", body = Json<EmployerDashboard>)
    )
)]
#[axum::debug_handler]
pub async fn employer_dashboard(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Json<EmployerDashboard> {
    Json(state.dashboard_service.employer(&identity).await)
}

#[utoipa::path(
    get,
    path = "/api/dashboard/admin",
    responses(
        (status = 200, description = "Placement, job and alumni overview", body = Json<AdminDashboard>)
    )
)]
#[axum::debug_handler]
pub async fn admin_dashboard(State(state): State<AppState>) -> Json<AdminDashboard> {
    Json(state.dashboard_service.admin().await)
}
