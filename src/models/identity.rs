use serde::{Deserialize, Serialize};
use std::fmt;

/// Authenticated session handle; equal to the profile document id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    pub fn uid(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
