use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Candidate,
    /// Stored as "Employee" by the portal's registration flow.
    #[serde(rename = "Employee")]
    Employer,
    Admin,
}

impl Role {
    /// Exact match on the stored value; anything else is not a role.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Candidate" => Some(Role::Candidate),
            "Employee" => Some(Role::Employer),
            "Admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "Candidate",
            Role::Employer => "Employee",
            Role::Admin => "Admin",
        }
    }
}
