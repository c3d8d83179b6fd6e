//! Form validation for project submissions.
//!
//! Validation runs before any network traffic: a submission that fails
//! here never uploads a file or writes a record. Failures are collected
//! per field so the caller can annotate individual inputs.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use url::Url;

use crate::catalog;
use crate::project::NewProject;

/// Minimum length for the event title.
pub const MIN_TITLE_LEN: usize = 3;
/// Minimum length for the event location.
pub const MIN_LOCATION_LEN: usize = 3;
/// Minimum length for the short description.
pub const MIN_DESCRIPTION_LEN: usize = 10;

// ---------------------------------------------------------------------------
// FieldErrors
// ---------------------------------------------------------------------------

/// Per-field validation failures, keyed by form field name.
///
/// Iteration order is stable (sorted by field name) so error summaries
/// are deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        // First error per field wins; later checks don't overwrite it.
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ProjectForm
// ---------------------------------------------------------------------------

/// Raw form payload for a project submission, before validation.
///
/// Optional free-text fields arrive as empty strings when left blank
/// (as an HTML form submits them) and are mapped to `None` on conversion.
#[derive(Debug, Clone, Default)]
pub struct ProjectForm {
    pub event_title: String,
    pub event_type: String,
    pub event_location: String,
    pub event_date: Option<NaiveDate>,
    pub guest_count: Option<i32>,
    pub services_used: Vec<String>,
    pub short_description: String,
    pub highlight_or_challenge: String,
    pub instagram_reel_url: String,
    pub is_featured: bool,
}

impl ProjectForm {
    /// Validate the form plus the count of attached main images.
    ///
    /// Collects every failing field rather than stopping at the first,
    /// so the caller can report all of them at once.
    pub fn validate(&self, image_count: usize) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        // Lengths are counted in characters, matching the messages.
        if self.event_title.trim().chars().count() < MIN_TITLE_LEN {
            errors.push(
                "event_title",
                format!("Title must be at least {MIN_TITLE_LEN} characters"),
            );
        }

        if self.event_type.is_empty() {
            errors.push("event_type", "Please select an event type");
        } else if !catalog::is_event_type(&self.event_type) {
            errors.push(
                "event_type",
                format!("Unknown event type: {}", self.event_type),
            );
        }

        if self.event_location.trim().chars().count() < MIN_LOCATION_LEN {
            errors.push(
                "event_location",
                format!("Location must be at least {MIN_LOCATION_LEN} characters"),
            );
        }

        if self.event_date.is_none() {
            errors.push("event_date", "Event date is required");
        }

        if self.services_used.is_empty() {
            errors.push("services_used", "Select at least one service");
        } else {
            for service in &self.services_used {
                if !catalog::is_service(service) {
                    errors.push("services_used", format!("Unknown service: {service}"));
                }
            }
            let mut seen = Vec::with_capacity(self.services_used.len());
            for service in &self.services_used {
                if seen.contains(&service) {
                    errors.push("services_used", format!("Duplicate service: {service}"));
                }
                seen.push(service);
            }
        }

        if self.short_description.trim().chars().count() < MIN_DESCRIPTION_LEN {
            errors.push(
                "short_description",
                format!("Description must be at least {MIN_DESCRIPTION_LEN} characters"),
            );
        }

        if !self.instagram_reel_url.is_empty() && Url::parse(&self.instagram_reel_url).is_err() {
            errors.push("instagram_reel_url", "Instagram link must be a valid URL");
        }

        if image_count == 0 {
            errors.push("images", "Please upload at least one project image");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Assemble the insert DTO from a validated form and the uploaded
    /// media URLs. `is_new` is the snapshot for `submitted_on`.
    ///
    /// Callers must have run [`ProjectForm::validate`] first; the
    /// `event_date` unwrap-via-default here assumes it.
    pub fn into_new_project(
        self,
        images: Vec<String>,
        before_image_url: Option<String>,
        after_image_url: Option<String>,
        submitted_on: NaiveDate,
    ) -> NewProject {
        let event_date = self.event_date.unwrap_or(submitted_on);
        let is_new = crate::project::is_new_on(event_date, submitted_on);

        NewProject {
            event_title: self.event_title,
            event_type: self.event_type,
            event_location: self.event_location,
            event_date,
            guest_count: self.guest_count,
            services_used: self.services_used,
            short_description: self.short_description,
            highlight_or_challenge: none_if_empty(self.highlight_or_challenge),
            images,
            videos: None,
            before_image_url,
            after_image_url,
            instagram_reel_url: none_if_empty(self.instagram_reel_url),
            is_featured: self.is_featured,
            is_new,
            display_order: 0,
        }
    }
}

fn none_if_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
