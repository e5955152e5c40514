use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::cmp::Ordering;
use std::fmt;

pub type Fields = Map<String, JsonValue>;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{collection} document {id} not found")]
    NotFound { collection: Collection, id: String },

    #[error("Document is not a JSON object")]
    NotAnObject,

    #[error("Document codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Users,
    Jobs,
    Applications,
    Schedules,
    Placements,
    Alumni,
    Accounts,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Jobs => "jobs",
            Collection::Applications => "applications",
            Collection::Schedules => "schedules",
            Collection::Placements => "placements",
            Collection::Alumni => "alumni",
            Collection::Accounts => "accounts",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored document: its generated id plus the JSON fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.fields.get(field)
    }

    /// Decodes the document into a typed record; the id is exposed as the `id` field.
    pub fn decode<T: DeserializeOwned>(&self) -> StoreResult<T> {
        let mut fields = self.fields.clone();
        fields.insert("id".to_string(), JsonValue::String(self.id.clone()));
        Ok(serde_json::from_value(JsonValue::Object(fields))?)
    }
}

/// Serializes a record into storable fields, dropping the `id` key.
pub fn to_fields<T: Serialize>(record: &T) -> StoreResult<Fields> {
    match serde_json::to_value(record)? {
        JsonValue::Object(mut fields) => {
            fields.remove("id");
            Ok(fields)
        }
        _ => Err(StoreError::NotAnObject),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

/// Equality filter plus optional sort, the only query shape the portal needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filter: Option<(String, JsonValue)>,
    pub order: Option<OrderBy>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.filter = Some((field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn matches(&self, doc: &Document) -> bool {
        match &self.filter {
            Some((field, value)) => doc.get(field) == Some(value),
            None => true,
        }
    }

    /// Filters and orders `docs` in place of a backend that cannot sort itself.
    ///
    /// Documents lacking the sort field are dropped from a sorted result, and
    /// ties always fall back to ascending id so repeated reads agree.
    pub fn apply(&self, docs: Vec<Document>) -> Vec<Document> {
        let mut docs: Vec<Document> = docs.into_iter().filter(|d| self.matches(d)).collect();
        match &self.order {
            Some(order) => {
                docs.retain(|d| d.get(&order.field).map_or(false, |v| !v.is_null()));
                docs.sort_by(|a, b| {
                    let ord = compare_values(&a.fields[&order.field], &b.fields[&order.field]);
                    let ord = match order.direction {
                        SortDirection::Ascending => ord,
                        SortDirection::Descending => ord.reverse(),
                    };
                    ord.then_with(|| a.id.cmp(&b.id))
                })
            }
            None => docs.sort_by(|a, b| a.id.cmp(&b.id)),
        }
        docs
    }
}

fn parse_timestamp(value: &JsonValue) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn compare_values(a: &JsonValue, b: &JsonValue) -> Ordering {
    if let (Some(x), Some(y)) = (parse_timestamp(a), parse_timestamp(b)) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    match (a, b) {
        (JsonValue::String(x), JsonValue::String(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: Collection, id: &str) -> StoreResult<Option<Document>>;

    /// All documents of a collection in id order.
    async fn list(&self, collection: Collection) -> StoreResult<Vec<Document>>;

    async fn query(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Document>>;

    /// Inserts under a freshly generated id and returns it.
    async fn create(&self, collection: Collection, fields: Fields) -> StoreResult<String>;

    /// Creates or replaces the document stored at `id`.
    async fn set(&self, collection: Collection, id: &str, fields: Fields) -> StoreResult<()>;

    /// Merges `fields` into an existing document.
    async fn update(&self, collection: Collection, id: &str, fields: Fields) -> StoreResult<()>;
}
