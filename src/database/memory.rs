use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{Collection, Document, DocumentStore, Fields, Query, StoreError, StoreResult};

/// In-process document store used by tests and when no database is configured.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, BTreeMap<String, Fields>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: Collection, id: &str) -> StoreResult<Option<Document>> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id, fields.clone())))
    }

    async fn list(&self, collection: Collection) -> StoreResult<Vec<Document>> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn query(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Document>> {
        let docs = self.list(collection).await?;
        Ok(query.apply(docs))
    }

    async fn create(&self, collection: Collection, fields: Fields) -> StoreResult<String> {
        let id = Uuid::new_v4().to_string();
        let mut guard = self.collections.write().await;
        guard.entry(collection).or_default().insert(id.clone(), fields);
        Ok(id)
    }

    async fn set(&self, collection: Collection, id: &str, fields: Fields) -> StoreResult<()> {
        let mut guard = self.collections.write().await;
        guard
            .entry(collection)
            .or_default()
            .insert(id.to_string(), fields);
        Ok(())
    }

    async fn update(&self, collection: Collection, id: &str, fields: Fields) -> StoreResult<()> {
        let mut guard = self.collections.write().await;
        let existing = guard
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection,
                id: id.to_string(),
            })?;
        existing.extend(fields);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn create_then_get_and_list() {
        let store = MemoryStore::new();
        let id = store
            .create(Collection::Jobs, fields(json!({"title": "Data Analyst"})))
            .await
            .unwrap();

        let doc = store.get(Collection::Jobs, &id).await.unwrap().unwrap();
        assert_eq!(doc.get("title"), Some(&json!("Data Analyst")));
        assert_eq!(store.list(Collection::Jobs).await.unwrap().len(), 1);
        assert!(store.list(Collection::Schedules).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_merges_fields_and_rejects_missing_documents() {
        let store = MemoryStore::new();
        store
            .set(
                Collection::Users,
                "u1",
                fields(json!({"name": "Thandi", "role": "Candidate"})),
            )
            .await
            .unwrap();
        store
            .update(Collection::Users, "u1", fields(json!({"company": "Acme"})))
            .await
            .unwrap();

        let doc = store.get(Collection::Users, "u1").await.unwrap().unwrap();
        assert_eq!(doc.get("role"), Some(&json!("Candidate")));
        assert_eq!(doc.get("company"), Some(&json!("Acme")));

        let err = store
            .update(Collection::Users, "ghost", fields(json!({"name": "x"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
