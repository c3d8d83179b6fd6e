//! Connection configuration for the hosted platform.

use std::time::Duration;

use crate::error::StoreError;

/// HTTP request timeout for every remote call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Base URL and API key for the hosted platform.
///
/// The same shape serves both the public client (anon key) and the
/// setup binary (service-role key); the key is simply sent as both the
/// `apikey` header and the default bearer token.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Platform base URL, e.g. `https://abc.supabase.co`. No trailing slash.
    pub base_url: String,
    /// API key sent with every request.
    pub api_key: String,
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Load the public-client configuration from the environment.
    ///
    /// | Env Var             | Required |
    /// |---------------------|----------|
    /// | `SUPABASE_URL`      | **yes**  |
    /// | `SUPABASE_ANON_KEY` | **yes**  |
    pub fn from_env() -> Result<Self, StoreError> {
        let base_url =
            std::env::var("SUPABASE_URL").map_err(|_| StoreError::MissingEnv("SUPABASE_URL"))?;
        let api_key = std::env::var("SUPABASE_ANON_KEY")
            .map_err(|_| StoreError::MissingEnv("SUPABASE_ANON_KEY"))?;
        Ok(Self::new(base_url, api_key))
    }
}

/// Build the shared HTTP client used by every store client.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to build reqwest HTTP client")
}
