//! Record access for the `projects` table.
//!
//! The table is exposed through a PostgREST-style interface: the whole
//! query surface used here is select-all-with-ordering, insert-one, and
//! delete-by-id. No pagination -- the views fetch the entire table.

use async_trait::async_trait;
use uuid::Uuid;

use lightwave_core::project::{NewProject, Project};

use crate::config::{http_client, StoreConfig};
use crate::error::{error_from_response, StoreError};

/// Logical table holding project records.
pub const PROJECTS_TABLE: &str = "projects";

/// Read/write/delete access to project records.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// All records, ordered by `event_date` descending.
    async fn list(&self) -> Result<Vec<Project>, StoreError>;

    /// Insert one record, returning it with store-assigned fields.
    async fn insert(&self, record: &NewProject) -> Result<Project, StoreError>;

    /// Delete by id. Idempotent: deleting an id with no matching row
    /// succeeds.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// HTTP implementation of [`ProjectStore`] against the hosted platform.
pub struct ProjectRecords {
    client: reqwest::Client,
    config: StoreConfig,
    bearer: String,
}

impl ProjectRecords {
    pub fn new(config: StoreConfig) -> Self {
        let bearer = config.api_key.clone();
        Self {
            client: http_client(),
            config,
            bearer,
        }
    }

    /// Use a signed-in user's access token for subsequent writes.
    ///
    /// Reads work with the anon key alone; inserts and deletes are
    /// restricted to authenticated sessions by the store's row-level
    /// policies.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.bearer = token.into();
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{PROJECTS_TABLE}", self.config.base_url)
    }
}

#[async_trait]
impl ProjectStore for ProjectRecords {
    async fn list(&self) -> Result<Vec<Project>, StoreError> {
        let response = self
            .client
            .get(self.table_url())
            .query(&[("select", "*"), ("order", "event_date.desc")])
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.bearer)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.json().await?)
    }

    async fn insert(&self, record: &NewProject) -> Result<Project, StoreError> {
        let response = self
            .client
            .post(self.table_url())
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.bearer)
            .header("Prefer", "return=representation")
            .json(&[record])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        // The store echoes inserted rows back as an array.
        let mut rows: Vec<Project> = response.json().await?;
        rows.pop()
            .ok_or_else(|| StoreError::Unexpected("insert returned no rows".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.table_url())
            .query(&[("id", format!("eq.{id}"))])
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.bearer)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }
}
