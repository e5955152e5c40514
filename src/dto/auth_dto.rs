use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::role::Role;
use crate::services::role_router::Route;
use crate::utils::validation::{is_strong_password, is_valid_email};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub surname: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1))]
    pub confirm_password: String,
    /// Self-service roles only; admin profiles are provisioned out of band.
    #[serde(default)]
    pub role: Option<String>,
}

impl RegisterPayload {
    /// Applies the registration form rules in the order the form reports
    /// them and returns the requested self-service role, if any.
    pub fn check(&self) -> Result<Option<Role>> {
        if self.validate().is_err() {
            return Err(Error::BadRequest("Please fill in all fields.".into()));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(Error::BadRequest(
                "Please enter a valid email address.".into(),
            ));
        }
        if self.password != self.confirm_password {
            return Err(Error::BadRequest("Passwords do not match.".into()));
        }
        if !is_strong_password(&self.password) {
            return Err(Error::BadRequest(
                "Password must include letters, numbers, and a special character (min 6 characters)."
                    .into(),
            ));
        }
        match self.role.as_deref() {
            None => Ok(None),
            Some(raw) => match Role::parse(raw) {
                Some(role @ (Role::Candidate | Role::Employer)) => Ok(Some(role)),
                _ => Err(Error::BadRequest(
                    "Role must be Candidate or Employee.".into(),
                )),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub id: String,
    pub verification_pending: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub identity: String,
    pub route: Route,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordPayload {
    #[validate(length(min = 1))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordPayload {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 1))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailPayload {
    #[validate(length(min = 1))]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub route: Route,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> RegisterPayload {
        RegisterPayload {
            name: "Ayanda".into(),
            surname: "Khumalo".into(),
            email: "ayanda@example.com".into(),
            password: "abc12!".into(),
            confirm_password: "abc12!".into(),
            role: Some("Candidate".into()),
        }
    }

    fn message(result: Result<Option<Role>>) -> String {
        match result {
            Err(Error::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn form_rules_report_in_order() {
        assert_eq!(payload().check().unwrap(), Some(Role::Candidate));

        let mut p = payload();
        p.surname.clear();
        p.email = "broken".into();
        assert_eq!(message(p.check()), "Please fill in all fields.");

        let mut p = payload();
        p.email = "broken".into();
        p.confirm_password = "nope".into();
        assert_eq!(message(p.check()), "Please enter a valid email address.");

        let mut p = payload();
        p.confirm_password = "abc12?".into();
        assert_eq!(message(p.check()), "Passwords do not match.");

        let mut p = payload();
        p.password = "abcdef".into();
        p.confirm_password = "abcdef".into();
        assert!(message(p.check()).starts_with("Password must include"));
    }

    #[test]
    fn admin_cannot_self_register() {
        let mut p = payload();
        p.role = Some("Admin".into());
        assert_eq!(message(p.check()), "Role must be Candidate or Employee.");

        p.role = Some("Employee".into());
        assert_eq!(p.check().unwrap(), Some(Role::Employer));

        p.role = None;
        assert_eq!(p.check().unwrap(), None);
    }
}
