use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::{postgres::PgRow, types::Json, PgPool, Row};
use uuid::Uuid;

use super::store::{Collection, Document, DocumentStore, Fields, Query, StoreError, StoreResult};

/// Document store backed by a single JSONB table, see `migrations/`.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_document(row: &PgRow) -> StoreResult<Document> {
    let id: String = row.try_get("id")?;
    let Json(data): Json<JsonValue> = row.try_get("data")?;
    match data {
        JsonValue::Object(fields) => Ok(Document::new(id, fields)),
        _ => Err(StoreError::NotAnObject),
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, collection: Collection, id: &str) -> StoreResult<Option<Document>> {
        let row = sqlx::query("SELECT id, data FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_document).transpose()
    }

    async fn list(&self, collection: Collection) -> StoreResult<Vec<Document>> {
        let rows = sqlx::query("SELECT id, data FROM documents WHERE collection = $1 ORDER BY id")
            .bind(collection.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_document).collect()
    }

    async fn query(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Document>> {
        let rows = match &query.filter {
            Some((field, value)) => {
                sqlx::query(
                    "SELECT id, data FROM documents WHERE collection = $1 AND data -> $2 = $3 ORDER BY id",
                )
                .bind(collection.as_str())
                .bind(field)
                .bind(Json(value))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query("SELECT id, data FROM documents WHERE collection = $1 ORDER BY id")
                    .bind(collection.as_str())
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        let docs = rows
            .iter()
            .map(row_to_document)
            .collect::<StoreResult<Vec<_>>>()?;
        // Ordering stays in Rust so both backends share one comparison rule.
        Ok(query.apply(docs))
    }

    async fn create(&self, collection: Collection, fields: Fields) -> StoreResult<String> {
        let id = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)")
            .bind(collection.as_str())
            .bind(&id)
            .bind(Json(JsonValue::Object(fields)))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn set(&self, collection: Collection, id: &str, fields: Fields) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(Json(JsonValue::Object(fields)))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, collection: Collection, id: &str, fields: Fields) -> StoreResult<()> {
        let res = sqlx::query(
            "UPDATE documents SET data = data || $3, updated_at = NOW() WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(Json(JsonValue::Object(fields)))
        .execute(&self.pool)
        .await?;

        if res.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
