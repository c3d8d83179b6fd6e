//! One-off environment setup: verifies store connectivity and creates
//! the admin account.
//!
//! Run once against a fresh project, with the service-role key:
//!
//! ```text
//! SUPABASE_URL=... SUPABASE_SERVICE_ROLE_KEY=... \
//! ADMIN_EMAIL=... ADMIN_PASSWORD=... lightwave-setup
//! ```
//!
//! Safe to re-run: an already-existing admin account is reported and
//! skipped, not treated as a failure.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lightwave_store::{AuthClient, ProjectRecords, ProjectStore, StoreConfig, StoreError};

fn env_var(name: &'static str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("Missing required environment variable {name}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lightwave_setup=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url = env_var("SUPABASE_URL")?;
    let service_key = env_var("SUPABASE_SERVICE_ROLE_KEY")?;
    let admin_email = env_var("ADMIN_EMAIL")?;
    let admin_password = env_var("ADMIN_PASSWORD")?;

    let config = StoreConfig::new(base_url, service_key);

    // A plain table read proves the URL, the key, and the schema are all
    // in place before touching the auth admin endpoint.
    tracing::info!("Checking store connectivity");
    let records = ProjectRecords::new(config.clone());
    let projects = records
        .list()
        .await
        .context("Store connectivity check failed")?;
    tracing::info!(count = projects.len(), "Projects table reachable");

    tracing::info!(email = %admin_email, "Creating admin account");
    let auth = AuthClient::new(config);
    match auth.admin_create_user(&admin_email, &admin_password).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "Admin account created");
        }
        Err(StoreError::Api { status, message })
            if status == 422 || message.to_lowercase().contains("already") =>
        {
            tracing::warn!(%message, "Admin account already exists, skipping");
        }
        Err(err) => return Err(err).context("Admin account creation failed"),
    }

    tracing::info!("Setup complete");
    Ok(())
}
