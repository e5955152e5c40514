pub mod auth_service;
pub mod dashboard_service;
pub mod job_service;
pub mod ledger;
pub mod matching;
pub mod profile_service;
pub mod role_router;
pub mod session;
