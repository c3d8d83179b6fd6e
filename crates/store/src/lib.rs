//! Thin client for the hosted backend platform.
//!
//! One logical table (`projects`), one storage bucket, and the auth
//! endpoints -- everything the application touches remotely goes
//! through here. The clients are deliberately dumb: no retries, no
//! caching, no local mutation. Trait seams ([`ProjectStore`],
//! [`ObjectStore`], [`AuthApi`]) let the flows in `lightwave-app` run
//! against in-memory fakes in tests.

pub mod auth;
pub mod config;
pub mod error;
pub mod records;
pub mod storage;

pub use auth::{AuthApi, AuthClient, AuthSession, UserIdentity};
pub use config::StoreConfig;
pub use error::StoreError;
pub use records::{ProjectRecords, ProjectStore};
pub use storage::{ObjectStorage, ObjectStore, STORAGE_BUCKET};
