use std::cmp::Ordering;
use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::database::store::{to_fields, Collection, DocumentStore, StoreResult};
use crate::dto::job_dto::CreateJobPayload;
use crate::error::{Error, Result};
use crate::models::identity::Identity;
use crate::models::job::{JobPosting, JobStatus};
use crate::services::ledger::Ledger;
use crate::services::matching::match_jobs;
use crate::utils::time;

#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn DocumentStore>,
    catalog: Ledger<JobPosting>,
    require_deadline: bool,
}

impl JobService {
    pub fn new(store: Arc<dyn DocumentStore>, require_deadline: bool) -> Self {
        Self {
            catalog: Ledger::new(store.clone()),
            store,
            require_deadline,
        }
    }

    fn check(&self, payload: &CreateJobPayload) -> Result<()> {
        let missing_deadline = self.require_deadline && payload.deadline.is_none();
        if payload.validate().is_err() || missing_deadline {
            let msg = if self.require_deadline {
                "Please fill in all fields including deadline."
            } else {
                "Please fill in all fields."
            };
            return Err(Error::BadRequest(msg.into()));
        }
        if let Some(deadline) = payload.deadline {
            if !time::is_today_or_later(deadline, time::now()) {
                return Err(Error::BadRequest("Deadline cannot be in the past.".into()));
            }
        }
        Ok(())
    }

    /// Posts a new job owned by `employer`; it starts `Open` with no applicants.
    pub async fn create(&self, employer: &Identity, payload: CreateJobPayload) -> Result<JobPosting> {
        self.check(&payload)?;

        let mut job = JobPosting {
            id: String::new(),
            title: payload.title,
            description: payload.description,
            location: payload.location,
            job_type: payload.job_type,
            salary: payload.salary,
            deadline: payload.deadline,
            status: Some(JobStatus::Open),
            employer_id: employer.uid().to_string(),
            applicants_count: 0,
            created_at: Some(time::now()),
        };
        job.id = self.store.create(Collection::Jobs, to_fields(&job)?).await?;

        info!("Job {} posted by {}", job.id, employer);
        Ok(job)
    }

    pub async fn list_all(&self) -> StoreResult<Vec<JobPosting>> {
        self.catalog.list_all().await
    }

    /// The employer's postings, newest first. Postings without `createdAt`
    /// come last in id order.
    pub async fn list_for_employer(&self, employer_id: &str) -> StoreResult<Vec<JobPosting>> {
        let mut jobs = self.catalog.list_owned(employer_id).await?;
        jobs.sort_by(|a, b| match (a.created_at, b.created_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        Ok(jobs)
    }

    pub async fn matched_for(&self, skills: &[String]) -> StoreResult<Vec<JobPosting>> {
        let jobs = self.list_all().await?;
        Ok(match_jobs(skills, &jobs).into_iter().cloned().collect())
    }
}
