use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::database::store::{Collection, Document, DocumentStore, Query, SortDirection, StoreResult};
use crate::models::{application::Application, job::JobPosting, schedule::ScheduleEntry};

/// A read-only collection scoped to an owning user and listed in a fixed order.
pub trait LedgerRecord: DeserializeOwned + Send {
    const COLLECTION: Collection;
    /// Field holding the owner's identity.
    const OWNER_FIELD: &'static str;
    const ORDER_FIELD: &'static str;
    const DIRECTION: SortDirection;
}

impl LedgerRecord for Application {
    const COLLECTION: Collection = Collection::Applications;
    const OWNER_FIELD: &'static str = "candidateId";
    const ORDER_FIELD: &'static str = "appliedAt";
    const DIRECTION: SortDirection = SortDirection::Descending;
}

impl LedgerRecord for ScheduleEntry {
    const COLLECTION: Collection = Collection::Schedules;
    const OWNER_FIELD: &'static str = "userId";
    const ORDER_FIELD: &'static str = "date";
    const DIRECTION: SortDirection = SortDirection::Ascending;
}

impl LedgerRecord for JobPosting {
    const COLLECTION: Collection = Collection::Jobs;
    const OWNER_FIELD: &'static str = "employerId";
    const ORDER_FIELD: &'static str = "createdAt";
    const DIRECTION: SortDirection = SortDirection::Descending;
}

pub struct Ledger<T> {
    store: Arc<dyn DocumentStore>,
    _record: PhantomData<fn() -> T>,
}

// Derived Clone would require `T: Clone`.
impl<T> Clone for Ledger<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _record: PhantomData,
        }
    }
}

pub type ApplicationLedger = Ledger<Application>;
pub type ScheduleLedger = Ledger<ScheduleEntry>;

impl<T: LedgerRecord> Ledger<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Every record in id order.
    pub async fn list_all(&self) -> StoreResult<Vec<T>> {
        let docs = self.store.list(T::COLLECTION).await?;
        Ok(decode_all(T::COLLECTION, docs))
    }

    /// Records owned by `user_id`, ordered by the record's declared field.
    /// Records lacking that field are left out.
    pub async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<T>> {
        let query = Query::new()
            .where_eq(T::OWNER_FIELD, user_id)
            .order_by(T::ORDER_FIELD, T::DIRECTION);
        let docs = self.store.query(T::COLLECTION, &query).await?;
        Ok(decode_all(T::COLLECTION, docs))
    }

    /// Every record owned by `user_id` in id order, including those that
    /// lack the declared order field.
    pub async fn list_owned(&self, user_id: &str) -> StoreResult<Vec<T>> {
        let query = Query::new().where_eq(T::OWNER_FIELD, user_id);
        let docs = self.store.query(T::COLLECTION, &query).await?;
        Ok(decode_all(T::COLLECTION, docs))
    }
}

/// Lists a whole collection as typed records, skipping malformed documents.
pub async fn list_collection<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
) -> StoreResult<Vec<T>> {
    let docs = store.list(collection).await?;
    Ok(decode_all(collection, docs))
}

fn decode_all<T: DeserializeOwned>(collection: Collection, docs: Vec<Document>) -> Vec<T> {
    docs.iter()
        .filter_map(|doc| match doc.decode() {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed {} document {}: {}", collection, doc.id, e);
                None
            }
        })
        .collect()
}
