use std::sync::Arc;

use tracing::error;

use crate::database::store::{Collection, DocumentStore};
use crate::dto::dashboard_dto::{
    AdminDashboard, CandidateDashboard, EmployerDashboard, EmployerStats, Greeting, JobActivity,
    JobStats, PlacementStats,
};
use crate::models::identity::Identity;
use crate::models::job::{JobPosting, JobStatus};
use crate::models::placement::{Alumnus, Placement};
use crate::models::profile::Profile;
use crate::services::job_service::JobService;
use crate::services::ledger::list_collection;
use crate::services::matching::match_jobs;
use crate::services::profile_service::ProfileService;
use crate::utils::degrade::or_empty;

/// Read models behind the three role dashboards. Every fetch degrades to
/// an empty list on failure.
#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn DocumentStore>,
    profiles: ProfileService,
    jobs: JobService,
    live_stats: bool,
}

impl DashboardService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        profiles: ProfileService,
        jobs: JobService,
        live_stats: bool,
    ) -> Self {
        Self {
            store,
            profiles,
            jobs,
            live_stats,
        }
    }

    async fn profile(&self, identity: &Identity) -> Option<Profile> {
        match self.profiles.get(identity.uid()).await {
            Ok(profile) => profile,
            Err(e) => {
                error!("Error fetching profile for {}: {}", identity, e);
                None
            }
        }
    }

    pub async fn candidate(&self, identity: &Identity) -> CandidateDashboard {
        let profile = self.profile(identity).await;
        let jobs = or_empty(self.jobs.list_all().await, "jobs");
        let skills = profile.as_ref().map(|p| p.skills.as_slice()).unwrap_or(&[]);
        let matched_jobs = match_jobs(skills, &jobs).into_iter().cloned().collect();

        CandidateDashboard {
            greeting: profile.map(greeting),
            matched_jobs,
        }
    }

    pub async fn employer(&self, identity: &Identity) -> EmployerDashboard {
        let profile = self.profile(identity).await;
        let own = or_empty(self.jobs.list_for_employer(identity.uid()).await, "jobs");

        let stats = self.live_stats.then(|| employer_stats(&own));
        let recent_activity = own
            .into_iter()
            .map(|job| JobActivity {
                id: job.id,
                title: job.title,
                applicants: job.applicants_count,
                status: job.status,
            })
            .collect();

        EmployerDashboard {
            greeting: profile.map(greeting),
            recent_activity,
            stats,
        }
    }

    pub async fn admin(&self) -> AdminDashboard {
        let placements: Vec<Placement> = or_empty(
            list_collection(self.store.as_ref(), Collection::Placements).await,
            "placements",
        );
        let jobs = or_empty(self.jobs.list_all().await, "jobs");
        let alumni: Vec<Alumnus> = or_empty(
            list_collection(self.store.as_ref(), Collection::Alumni).await,
            "alumni",
        );

        let placed = placements.iter().filter(|p| p.is_placed()).count();
        AdminDashboard {
            placements: PlacementStats {
                placed,
                unplaced: placements.len() - placed,
            },
            jobs: JobStats {
                total: jobs.len(),
                filled: jobs.iter().filter(|j| j.has_status(&JobStatus::Filled)).count(),
            },
            alumni,
        }
    }
}

fn greeting(profile: Profile) -> Greeting {
    Greeting {
        name: profile.name,
        surname: profile.surname,
    }
}

fn employer_stats(jobs: &[JobPosting]) -> EmployerStats {
    EmployerStats {
        active_jobs: jobs.iter().filter(|j| j.has_status(&JobStatus::Open)).count(),
        applicants: jobs.iter().map(|j| u64::from(j.applicants_count)).sum(),
        interviews: jobs
            .iter()
            .filter(|j| j.has_status(&JobStatus::Interviewing))
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::database::store::{MockDocumentStore, StoreError};
    use serde_json::{json, Value as JsonValue};

    async fn seed(store: &MemoryStore, collection: Collection, id: &str, value: JsonValue) {
        let JsonValue::Object(fields) = value else {
            unreachable!()
        };
        store.set(collection, id, fields).await.unwrap();
    }

    fn service(store: Arc<dyn DocumentStore>, live_stats: bool) -> DashboardService {
        let profiles = ProfileService::new(store.clone());
        let jobs = JobService::new(store.clone(), true);
        DashboardService::new(store, profiles, jobs, live_stats)
    }

    async fn seeded() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        seed(&store, Collection::Users, "emp", json!({"name": "Zanele", "surname": "Ndlovu", "role": "Employee"})).await;
        seed(&store, Collection::Users, "cand", json!({"name": "Kabelo", "surname": "Mahlangu", "role": "Candidate", "skills": ["analyst"]})).await;
        seed(&store, Collection::Jobs, "j1", json!({"title": "Data Analyst", "employerId": "emp", "status": "Open", "applicantsCount": 4})).await;
        seed(&store, Collection::Jobs, "j2", json!({"title": "Support Engineer", "employerId": "emp", "status": "Interviewing", "applicantsCount": 2})).await;
        seed(&store, Collection::Jobs, "j3", json!({"title": "Financial Analyst", "employerId": "other", "status": "Filled", "applicantsCount": 9})).await;
        seed(&store, Collection::Placements, "p1", json!({"candidateId": "cand", "status": "placed"})).await;
        seed(&store, Collection::Placements, "p2", json!({"candidateId": "x", "status": "pending"})).await;
        seed(&store, Collection::Alumni, "a1", json!({"name": "Musa", "position": "Developer", "company": "Acme", "graduationYear": 2021})).await;
        store
    }

    #[tokio::test]
    async fn candidate_sees_matched_jobs() {
        let dash = service(seeded().await, true)
            .candidate(&Identity::new("cand"))
            .await;
        assert_eq!(dash.greeting.unwrap().name, "Kabelo");
        let titles: Vec<&str> = dash.matched_jobs.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Data Analyst", "Financial Analyst"]);
    }

    #[tokio::test]
    async fn employer_stats_cover_own_jobs_only() {
        let store = seeded().await;
        let dash = service(store.clone(), true).employer(&Identity::new("emp")).await;
        assert_eq!(dash.recent_activity.len(), 2);
        assert_eq!(
            dash.stats,
            Some(EmployerStats {
                active_jobs: 1,
                applicants: 6,
                interviews: 1,
            })
        );

        let plain = service(store, false).employer(&Identity::new("emp")).await;
        assert!(plain.stats.is_none());
        assert_eq!(plain.recent_activity.len(), 2);
    }

    #[tokio::test]
    async fn admin_counts() {
        let dash = service(seeded().await, true).admin().await;
        assert_eq!(dash.placements, PlacementStats { placed: 1, unplaced: 1 });
        assert_eq!(dash.jobs, JobStats { total: 3, filled: 1 });
        assert_eq!(dash.alumni.len(), 1);
    }

    #[tokio::test]
    async fn store_failures_degrade_to_empty() {
        let mut store = MockDocumentStore::new();
        store.expect_get().returning(|_, _| Err(StoreError::NotAnObject));
        store.expect_list().returning(|_| Err(StoreError::NotAnObject));
        store
            .expect_query()
            .returning(|_, _| Err(StoreError::NotAnObject));
        let svc = service(Arc::new(store), true);

        let admin = svc.admin().await;
        assert_eq!(admin.placements, PlacementStats::default());
        assert_eq!(admin.jobs, JobStats::default());
        assert!(admin.alumni.is_empty());

        let employer = svc.employer(&Identity::new("emp")).await;
        assert!(employer.greeting.is_none());
        assert!(employer.recent_activity.is_empty());
        assert_eq!(employer.stats, Some(EmployerStats::default()));

        let candidate = svc.candidate(&Identity::new("cand")).await;
        assert!(candidate.matched_jobs.is_empty());
    }
}
