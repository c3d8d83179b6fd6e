//! Application flows for the LightWave portfolio platform.
//!
//! Combines the pure domain logic from `lightwave-core` with the remote
//! clients from `lightwave-store` into the three flows with a contract:
//! the session gate guarding the admin area, the upload pipeline, and
//! the gallery / admin list views.

pub mod gallery;
pub mod session;
pub mod upload;
