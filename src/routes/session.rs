use axum::{extract::State, response::Json, Extension};

use crate::{dto::auth_dto::RouteResponse, models::identity::Identity, AppState};

#[utoipa::path(
    get,
    path = "/api/session/route",
    responses(
        (status = 200, description = "Dashboard for the signed-in identity", body = Json<RouteResponse>),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn current_route(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Json<RouteResponse> {
    let route = state.role_router.route_for(Some(&identity)).await;
    Json(RouteResponse { route })
}
