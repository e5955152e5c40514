pub mod account;
pub mod application;
pub mod identity;
pub mod job;
pub mod placement;
pub mod profile;
pub mod role;
pub mod schedule;

use serde::{Deserialize, Deserializer};

/// Documents written outside the portal may carry explicit nulls; read
/// them the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::{application::Application, job::JobPosting, profile::Profile};
    use serde_json::json;

    #[test]
    fn explicit_nulls_read_as_defaults() {
        let profile: Profile = serde_json::from_value(json!({
            "id": "u1", "name": null, "surname": "Khoza", "role": "Admin", "skills": null
        }))
        .unwrap();
        assert_eq!(profile.name, "");
        assert!(profile.skills.is_empty());

        let job: JobPosting = serde_json::from_value(json!({
            "id": "j1", "title": "Analyst", "salary": null, "applicantsCount": null
        }))
        .unwrap();
        assert_eq!(job.applicants_count, 0);
        assert_eq!(job.salary, "");

        let application: Application = serde_json::from_value(json!({
            "id": "a1", "candidateId": "u1", "jobTitle": null, "status": null
        }))
        .unwrap();
        assert_eq!(application.status, "submitted");
        assert_eq!(application.job_title, "");
    }
}
