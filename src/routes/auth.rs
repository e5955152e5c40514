use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use tracing::{debug, info};
use validator::Validate;

use crate::{
    dto::auth_dto::{
        ForgotPasswordPayload, LoginPayload, LoginResponse, MessageResponse, RegisterPayload,
        RegisterResponse, ResetPasswordPayload, VerifyEmailPayload,
    },
    error::Result,
    models::{identity::Identity, profile::Profile},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Account created, email verification pending", body = Json<RegisterResponse>),
        (status = 400, description = "Form rule or provider validation failed"),
        (status = 409, description = "Email already in use")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    let role = payload.check()?;
    let name = payload.name.trim().to_string();
    let surname = payload.surname.trim().to_string();

    let signup = state
        .auth_service
        .sign_up(&payload.email, &payload.password, &format!("{} {}", name, surname))
        .await?;
    let uid = signup.identity.uid().to_string();
    debug!("Verification token for {}: {}", uid, signup.verification_token);

    if let Some(role) = role {
        let profile = Profile {
            id: uid.clone(),
            name,
            surname,
            role: Some(role.as_str().to_string()),
            company: None,
            skills: Vec::new(),
            email: Some(payload.email.trim().to_lowercase()),
        };
        state.profile_service.create(&uid, &profile).await?;
    }

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: uid,
            verification_pending: true,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Signed in; route resolved from the profile role", body = Json<LoginResponse>),
        (status = 401, description = "Invalid email or password")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let signed_in = state
        .auth_service
        .sign_in(&payload.email, &payload.password)
        .await?;
    let route = state.role_router.route_for(Some(&signed_in.identity)).await;
    info!("{} signed in, routed to {:?}", signed_in.identity, route);

    Ok(Json(LoginResponse {
        token: signed_in.token,
        expires_at: signed_in.expires_at,
        identity: signed_in.identity.uid().to_string(),
        route,
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Every outstanding token for the identity is revoked", body = Json<MessageResponse>),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn logout(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse> {
    state.auth_service.sign_out(&identity).await?;
    Ok(Json(MessageResponse {
        message: "Signed out.".into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = ForgotPasswordPayload,
    responses(
        (status = 200, description = "Accepted whether or not the account exists", body = Json<MessageResponse>)
    )
)]
#[axum::debug_handler]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    if let Some(token) = state
        .auth_service
        .request_password_reset(&payload.email)
        .await?
    {
        debug!("Password reset token issued: {}", token);
    }
    Ok(Json(MessageResponse {
        message: "If an account exists for this email, a reset link has been sent.".into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordPayload,
    responses(
        (status = 200, description = "Password changed; existing sessions revoked", body = Json<MessageResponse>),
        (status = 400, description = "Password is too weak"),
        (status = 401, description = "Invalid or expired reset token")
    )
)]
#[axum::debug_handler]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state
        .auth_service
        .reset_password(&payload.token, &payload.new_password)
        .await?;
    Ok(Json(MessageResponse {
        message: "Password updated.".into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/verify-email",
    request_body = VerifyEmailPayload,
    responses(
        (status = 200, description = "Email verified", body = Json<MessageResponse>),
        (status = 401, description = "Invalid verification token")
    )
)]
#[axum::debug_handler]
pub async fn verify_email(
    State(state): State<AppState>,
    Json(payload): Json<VerifyEmailPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let identity = state.auth_service.verify_email(&payload.token).await?;
    info!("Email verified for {}", identity);
    Ok(Json(MessageResponse {
        message: "Email verified.".into(),
    }))
}
