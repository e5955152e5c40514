use axum::{extract::State, response::Json, Extension};

use crate::{
    dto::list_dto::ScheduleListResponse,
    models::identity::Identity,
    utils::degrade::or_empty,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/schedule",
    responses(
        (status = 200, description = "Upcoming schedule entries, soonest first", body = Json<ScheduleListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn my_schedule(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Json<ScheduleListResponse> {
    let entries = state.schedules.list_for_user(identity.uid()).await;
    Json(or_empty(entries, "schedule").into())
}
