use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::profile::Profile;

/// Edit-Profile form; every field is required.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1, message = "All fields are required"))]
    pub name: String,
    #[validate(length(min = 1, message = "All fields are required"))]
    pub surname: String,
    #[validate(length(min = 1, message = "All fields are required"))]
    pub company: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub skills: Vec<String>,
}

impl From<Profile> for ProfileResponse {
    fn from(value: Profile) -> Self {
        Self {
            id: value.id,
            name: value.name,
            surname: value.surname,
            role: value.role,
            company: value.company,
            skills: value.skills,
        }
    }
}
