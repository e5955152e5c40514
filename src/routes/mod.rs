pub mod applications;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod jobs;
pub mod profile;
pub mod schedule;
pub mod session;

use axum::{
    routing::{get, post},
    Router,
};

use crate::middleware::{
    auth::require_session,
    rate_limit::{rps_middleware, RateLimiter},
};
use crate::AppState;

/// All portal routes with their auth and rate-limit layers.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let base_routes = Router::new().route("/health", get(health::health));

    let auth_api = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .route("/api/auth/verify-email", post(auth::verify_email))
        .layer(axum::middleware::from_fn_with_state(
            RateLimiter::new("auth", config.public_rps),
            rps_middleware,
        ));

    let session_api = Router::new()
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/session/route", get(session::current_route))
        .route(
            "/api/profile",
            get(profile::get_profile).patch(profile::update_profile),
        )
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/jobs/mine", get(jobs::my_jobs))
        .route("/api/jobs/matched", get(jobs::matched_jobs))
        .route("/api/applications", get(applications::list_applications))
        .route("/api/applications/mine", get(applications::my_applications))
        .route("/api/schedule", get(schedule::my_schedule))
        .route("/api/dashboard/candidate", get(dashboard::candidate_dashboard))
        .route("/api/dashboard/employer", get(dashboard::employer_dashboard))
        .route("/api/dashboard/admin", get(dashboard::admin_dashboard))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ))
        .layer(axum::middleware::from_fn_with_state(
            RateLimiter::new("api", config.api_rps),
            rps_middleware,
        ));

    base_routes
        .merge(auth_api)
        .merge(session_api)
        .with_state(state)
}
