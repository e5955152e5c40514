use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::error::{AuthError, Error};
use crate::AppState;

fn reject(code: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response()
}

/// Resolves the bearer token to an [`Identity`](crate::models::identity::Identity)
/// and makes it available to handlers as a request extension.
pub async fn require_session(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(auth_header) = req.headers().get(AUTHORIZATION) else {
        return reject("missing_authorization");
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return reject("bad_authorization");
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return reject("unsupported_scheme");
    };

    match state.auth_service.authenticate(token.trim()).await {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(AuthError::InvalidToken | AuthError::SessionRevoked) => reject("invalid_token"),
        Err(e) => Error::Auth(e).into_response(),
    }
}
