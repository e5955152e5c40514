pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::database::store::DocumentStore;
use crate::services::{
    auth_service::AuthService,
    dashboard_service::DashboardService,
    job_service::JobService,
    ledger::{ApplicationLedger, ScheduleLedger},
    profile_service::ProfileService,
    role_router::RoleRouter,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub profile_service: ProfileService,
    pub job_service: JobService,
    pub applications: ApplicationLedger,
    pub schedules: ScheduleLedger,
    pub dashboard_service: DashboardService,
    pub role_router: RoleRouter,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        let auth_service = AuthService::new(
            store.clone(),
            &config.jwt_secret,
            config.session_ttl_minutes,
        );
        let profile_service = ProfileService::new(store.clone());
        let job_service = JobService::new(store.clone(), config.require_job_deadline);
        let applications = ApplicationLedger::new(store.clone());
        let schedules = ScheduleLedger::new(store.clone());
        let dashboard_service = DashboardService::new(
            store,
            profile_service.clone(),
            job_service.clone(),
            config.employer_live_stats,
        );
        let role_router = RoleRouter::new(profile_service.clone());

        Self {
            config: Arc::new(config),
            auth_service,
            profile_service,
            job_service,
            applications,
            schedules,
            dashboard_service,
            role_router,
        }
    }
}
