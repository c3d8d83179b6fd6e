//! Project entity model and the `is_new` derivation.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Number of days after the event date during which a project counts as
/// "new". The flag is a snapshot taken at submission time; it is never
/// re-derived afterwards, so the badge freezes at whatever was computed
/// on creation.
pub const NEW_BADGE_WINDOW_DAYS: i64 = 30;

/// A project row from the `projects` table.
///
/// One portfolio entry describing a past event and its media. `images`
/// is never empty for a record that went through the upload pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub created_at: Timestamp,
    pub event_title: String,
    pub event_type: String,
    pub event_location: String,
    pub event_date: NaiveDate,
    pub guest_count: Option<i32>,
    pub services_used: Vec<String>,
    pub short_description: String,
    pub highlight_or_challenge: Option<String>,
    pub images: Vec<String>,
    pub videos: Option<Vec<String>>,
    pub before_image_url: Option<String>,
    pub after_image_url: Option<String>,
    pub instagram_reel_url: Option<String>,
    pub is_featured: bool,
    pub is_new: bool,
    pub display_order: i32,
}

impl Project {
    /// The before/after image pair, or `None` unless both are present.
    ///
    /// The two URLs are conceptually paired but the store does not
    /// enforce it, so views only show the comparison when both exist.
    pub fn before_after(&self) -> Option<(&str, &str)> {
        match (&self.before_image_url, &self.after_image_url) {
            (Some(before), Some(after)) => Some((before.as_str(), after.as_str())),
            _ => None,
        }
    }
}

/// DTO for inserting a new project. `id` and `created_at` are assigned
/// by the store; `is_new` is computed once at submission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub event_title: String,
    pub event_type: String,
    pub event_location: String,
    pub event_date: NaiveDate,
    pub guest_count: Option<i32>,
    pub services_used: Vec<String>,
    pub short_description: String,
    pub highlight_or_challenge: Option<String>,
    pub images: Vec<String>,
    pub videos: Option<Vec<String>>,
    pub before_image_url: Option<String>,
    pub after_image_url: Option<String>,
    pub instagram_reel_url: Option<String>,
    pub is_featured: bool,
    pub is_new: bool,
    pub display_order: i32,
}

/// Compute the `is_new` snapshot for a submission made on `submitted_on`.
///
/// True iff the event date falls within the last
/// [`NEW_BADGE_WINDOW_DAYS`] days (inclusive). Future event dates also
/// count as new.
pub fn is_new_on(event_date: NaiveDate, submitted_on: NaiveDate) -> bool {
    event_date >= submitted_on - Duration::days(NEW_BADGE_WINDOW_DAYS)
}
