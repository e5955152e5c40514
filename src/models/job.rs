use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Open,
    Interviewing,
    Filled,
    Other(String),
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Open" | "open" => JobStatus::Open,
            "Interviewing" | "interviewing" => JobStatus::Interviewing,
            "Filled" | "filled" | "Closed" | "closed" => JobStatus::Filled,
            _ => JobStatus::Other(raw),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Open => "Open".to_string(),
            JobStatus::Interviewing => "Interviewing".to_string(),
            JobStatus::Filled => "Filled".to_string(),
            JobStatus::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub job_type: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub salary: String,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub employer_id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub applicants_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl JobPosting {
    pub fn has_status(&self, status: &JobStatus) -> bool {
        self.status.as_ref() == Some(status)
    }
}
