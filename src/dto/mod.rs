pub mod auth_dto;
pub mod dashboard_dto;
pub mod job_dto;
pub mod list_dto;
pub mod profile_dto;
