//! Auth endpoint client: password sign-in, sign-out, session lookup,
//! and the service-role admin user creation used by the setup binary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{http_client, StoreConfig};
use crate::error::{error_from_response, StoreError};

/// The signed-in user, as reported by the auth endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub email: String,
}

/// A live remote session: the bearer token plus who it belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: UserIdentity,
}

/// Remote auth operations used by the session flows.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Password sign-in. A rejection carries the server's error message
    /// verbatim in [`StoreError::Api`].
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, StoreError>;

    /// Revoke the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), StoreError>;

    /// Who the token belongs to, or `None` if the session is no longer
    /// valid.
    async fn current_user(&self, access_token: &str) -> Result<Option<UserIdentity>, StoreError>;
}

/// HTTP implementation of [`AuthApi`] against the hosted platform.
pub struct AuthClient {
    client: reqwest::Client,
    config: StoreConfig,
}

impl AuthClient {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: http_client(),
            config,
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.config.base_url)
    }

    /// Create a confirmed user via the admin endpoint.
    ///
    /// Requires the service-role key; only the one-off setup binary
    /// calls this.
    pub async fn admin_create_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserIdentity, StoreError> {
        let response = self
            .client
            .post(self.auth_url("admin/users"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "email_confirm": true,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, StoreError> {
        let response = self
            .client
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.config.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.json().await?)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.auth_url("logout"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<UserIdentity>, StoreError> {
        let response = self
            .client
            .get(self.auth_url("user"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        // An invalid or expired token is "signed out", not an error.
        if response.status() == reqwest::StatusCode::UNAUTHORIZED
            || response.status() == reqwest::StatusCode::FORBIDDEN
        {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(Some(response.json().await?))
    }
}
