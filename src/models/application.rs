use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

fn default_status() -> String {
    "submitted".to_string()
}

fn status_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_status))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub candidate_id: String,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub job_title: String,
    #[serde(default = "default_status", deserialize_with = "status_or_default")]
    pub status: String,
    #[serde(default)]
    pub applied_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
