use std::sync::Arc;

use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::database::store::{to_fields, Collection, DocumentStore, Fields};
use crate::dto::profile_dto::UpdateProfilePayload;
use crate::error::{Error, Result};
use crate::models::profile::Profile;

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn DocumentStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: &str) -> Result<Option<Profile>> {
        match self.store.get(Collection::Users, id).await? {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    /// Writes the profile document under the identity's uid.
    pub async fn create(&self, id: &str, profile: &Profile) -> Result<()> {
        self.store
            .set(Collection::Users, id, to_fields(profile)?)
            .await?;
        info!("Profile {} created", id);
        Ok(())
    }

    /// Updates name, surname and company. Nothing is written unless all
    /// three are present, and a missing profile is `NotFound`.
    pub async fn update(&self, id: &str, payload: UpdateProfilePayload) -> Result<Profile> {
        payload.validate()?;

        let mut fields = Fields::new();
        fields.insert("name".into(), json!(payload.name));
        fields.insert("surname".into(), json!(payload.surname));
        fields.insert("company".into(), json!(payload.company));
        self.store.update(Collection::Users, id, fields).await?;

        let doc = self
            .store
            .get(Collection::Users, id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("users document {} not found", id)))?;
        Ok(doc.decode()?)
    }
}
