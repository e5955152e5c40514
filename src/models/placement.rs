use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub id: String,
    #[serde(default)]
    pub candidate_id: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: String,
}

impl Placement {
    pub fn is_placed(&self) -> bool {
        self.status == "placed"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alumnus {
    pub id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub position: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub company: String,
    #[serde(default)]
    pub graduation_year: Option<serde_json::Value>,
}
