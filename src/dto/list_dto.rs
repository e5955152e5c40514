use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}

pub type JobListResponse = ListResponse<crate::models::job::JobPosting>;
pub type ApplicationListResponse = ListResponse<crate::models::application::Application>;
pub type ScheduleListResponse = ListResponse<crate::models::schedule::ScheduleEntry>;
