//! Domain logic for the LightWave portfolio platform.
//!
//! Everything in this crate is pure: the project model and its catalogs,
//! form validation, derived fields, gallery filtering, lightbox
//! navigation, share-message building, and pre-upload image compression.
//! All I/O (remote store, object storage, auth) lives in
//! `lightwave-store`; the flows that combine the two live in
//! `lightwave-app`.

pub mod catalog;
pub mod contact;
pub mod filter;
pub mod lightbox;
pub mod media;
pub mod project;
pub mod validation;
