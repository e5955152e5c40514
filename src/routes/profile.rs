use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::profile_dto::{ProfileResponse, UpdateProfilePayload},
    error::{Error, Result},
    models::identity::Identity,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Profile of the signed-in identity", body = Json<ProfileResponse>),
        (status = 404, description = "No profile document")
    )
)]
#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse> {
    let profile = state
        .profile_service
        .get(identity.uid())
        .await?
        .ok_or_else(|| Error::NotFound("Profile not found".into()))?;
    Ok(Json(ProfileResponse::from(profile)))
}

#[utoipa::path(
    patch,
    path = "/api/profile",
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Profile updated", body = Json<ProfileResponse>),
        (status = 400, description = "All fields are required"),
        (status = 404, description = "No profile document")
    )
)]
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    let profile = state
        .profile_service
        .update(identity.uid(), payload)
        .await?;
    Ok(Json(ProfileResponse::from(profile)))
}
