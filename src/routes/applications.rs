use axum::{extract::State, response::Json, Extension};

use crate::{
    dto::list_dto::ApplicationListResponse,
    models::identity::Identity,
    utils::degrade::or_empty,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/applications",
    responses(
        (status = 200, description = "All applications", body = Json<ApplicationListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_applications(State(state): State<AppState>) -> Json<ApplicationListResponse> {
    Json(or_empty(state.applications.list_all().await, "applications").into())
}

#[utoipa::path(
    get,
    path = "/api/applications/mine",
    responses(
        (status = 200, description = "The candidate's applications, most recent first", body = Json<ApplicationListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn my_applications(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Json<ApplicationListResponse> {
    let applications = state.applications.list_for_user(identity.uid()).await;
    Json(or_empty(applications, "applications").into())
}
