use serde::{Deserialize, Serialize};

use crate::models::{job::JobPosting, job::JobStatus, placement::Alumnus};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Greeting {
    pub name: String,
    pub surname: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDashboard {
    pub greeting: Option<Greeting>,
    pub matched_jobs: Vec<JobPosting>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobActivity {
    pub id: String,
    pub title: String,
    pub applicants: u32,
    pub status: Option<JobStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerStats {
    pub active_jobs: usize,
    pub applicants: u64,
    pub interviews: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerDashboard {
    pub greeting: Option<Greeting>,
    pub recent_activity: Vec<JobActivity>,
    /// Absent when live statistics are switched off.
    pub stats: Option<EmployerStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementStats {
    pub placed: usize,
    pub unplaced: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobStats {
    pub total: usize,
    pub filled: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub placements: PlacementStats,
    pub jobs: JobStats,
    pub alumni: Vec<Alumnus>,
}
