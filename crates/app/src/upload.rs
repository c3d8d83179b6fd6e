//! The upload pipeline: validated form in, persisted project out.
//!
//! Order of operations is fixed: validate (no network on failure),
//! compress and upload all images, then a single record insert strictly
//! after every upload has completed. The upload-then-insert pair is not
//! atomic; on insert failure the pipeline compensates by best-effort
//! removal of the objects it just uploaded.

use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join_all;

use lightwave_core::media::{compress_image, random_suffix, storage_path, CompressionResult};
use lightwave_core::project::Project;
use lightwave_core::validation::{FieldErrors, ProjectForm};
use lightwave_store::{ObjectStore, ProjectStore, StoreError};

/// Storage folder for main gallery images.
pub const MAIN_IMAGE_FOLDER: &str = "projects";
/// Storage folder for before/after comparison images.
pub const BEFORE_AFTER_FOLDER: &str = "before-after";

/// A local image file attached to the submission.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Why a submission failed.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Field-level failures; nothing was sent over the network.
    #[error("{0}")]
    Validation(FieldErrors),

    /// An image upload failed; no record was written. Objects uploaded
    /// before the failure are orphaned by contract.
    #[error("Failed to upload project images")]
    Upload(#[source] StoreError),

    /// The record insert failed; uploaded objects were compensated
    /// with best-effort removal.
    #[error("Failed to save project")]
    Insert(#[source] StoreError),
}

impl UploadError {
    /// The per-field errors, when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            UploadError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// One successfully stored object.
struct Uploaded {
    path: String,
    url: String,
}

/// End-to-end flow from form submission to persisted record.
pub struct UploadPipeline {
    records: Arc<dyn ProjectStore>,
    objects: Arc<dyn ObjectStore>,
}

impl UploadPipeline {
    pub fn new(records: Arc<dyn ProjectStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { records, objects }
    }

    /// Submit a project.
    ///
    /// On success the returned record carries one URL per accepted
    /// image and the `is_new` snapshot for today. The caller refreshes
    /// its list from the store afterwards; nothing is updated locally.
    pub async fn submit(
        &self,
        form: ProjectForm,
        images: Vec<ImageFile>,
        before: Option<ImageFile>,
        after: Option<ImageFile>,
    ) -> Result<Project, UploadError> {
        form.validate(images.len())
            .map_err(UploadError::Validation)?;

        // All main images upload concurrently; one failure fails the
        // whole join.
        let mains = try_join_all(
            images
                .into_iter()
                .map(|file| self.upload_one(file, MAIN_IMAGE_FOLDER)),
        )
        .await
        .map_err(UploadError::Upload)?;

        // Before/after are concurrent with each other; the insert below
        // is strictly ordered after every upload has finished.
        let (before_uploaded, after_uploaded) = tokio::try_join!(
            self.upload_optional(before, BEFORE_AFTER_FOLDER),
            self.upload_optional(after, BEFORE_AFTER_FOLDER),
        )
        .map_err(UploadError::Upload)?;

        let mut uploaded_paths: Vec<String> = mains.iter().map(|u| u.path.clone()).collect();
        let image_urls = mains.into_iter().map(|u| u.url).collect();

        let before_url = before_uploaded.map(|u| {
            uploaded_paths.push(u.path);
            u.url
        });
        let after_url = after_uploaded.map(|u| {
            uploaded_paths.push(u.path);
            u.url
        });

        let submitted_on = Utc::now().date_naive();
        let record = form.into_new_project(image_urls, before_url, after_url, submitted_on);

        match self.records.insert(&record).await {
            Ok(project) => {
                tracing::info!(
                    project_id = %project.id,
                    images = project.images.len(),
                    "project uploaded"
                );
                Ok(project)
            }
            Err(e) => {
                self.compensate(&uploaded_paths).await;
                Err(UploadError::Insert(e))
            }
        }
    }

    /// Compress and upload one file, returning its storage path and
    /// public URL.
    async fn upload_one(&self, file: ImageFile, folder: &str) -> Result<Uploaded, StoreError> {
        let (bytes, content_type) = match compress_image(&file.bytes) {
            CompressionResult::Compressed(out) => (out, "image/jpeg".to_string()),
            CompressionResult::Unmodified => (file.bytes, file.content_type),
        };

        let path = storage_path(
            folder,
            &file.file_name,
            Utc::now().timestamp_millis(),
            &random_suffix(),
        );
        let url = self.objects.upload(&path, bytes, &content_type).await?;
        Ok(Uploaded { path, url })
    }

    async fn upload_optional(
        &self,
        file: Option<ImageFile>,
        folder: &str,
    ) -> Result<Option<Uploaded>, StoreError> {
        match file {
            Some(file) => Ok(Some(self.upload_one(file, folder).await?)),
            None => Ok(None),
        }
    }

    /// Best-effort removal of objects uploaded before a failed insert.
    /// Removal failures are logged and otherwise ignored; they do not
    /// change the error reported to the caller.
    async fn compensate(&self, paths: &[String]) {
        for path in paths {
            match self.objects.remove(path).await {
                Ok(()) => tracing::debug!(path = %path, "removed orphaned upload"),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "failed to remove orphaned upload");
                }
            }
        }
    }
}
