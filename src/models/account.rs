use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credential record owned by the auth service; never returned over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub verification_token_hash: Option<String>,
    #[serde(default)]
    pub reset_token_hash: Option<String>,
    #[serde(default)]
    pub reset_expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub session_epoch: i64,
    pub created_at: DateTime<Utc>,
}
