//! Client-side gallery filtering.
//!
//! The gallery fetches the whole table and filters in memory; there is
//! no server-side query beyond the initial ordered select.

use crate::catalog::ALL_EVENTS;
use crate::project::Project;

/// A single-select predicate over `event_type`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventFilter {
    /// The synthetic "All Events" selection; matches everything.
    #[default]
    All,
    /// Match projects whose `event_type` equals this value exactly.
    Type(String),
}

impl EventFilter {
    /// Build a filter from a UI label. `"All Events"` maps to
    /// [`EventFilter::All`]; anything else is an exact-match filter.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_EVENTS {
            EventFilter::All
        } else {
            EventFilter::Type(label.to_string())
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Type(ty) => project.event_type == *ty,
        }
    }
}

/// Apply `filter` over an already-fetched set, preserving order.
pub fn apply<'a>(filter: &EventFilter, projects: &'a [Project]) -> Vec<&'a Project> {
    projects.iter().filter(|p| filter.matches(p)).collect()
}

/// The featured subset, used by the home-page portfolio strip.
pub fn featured(projects: &[Project]) -> Vec<&Project> {
    projects.iter().filter(|p| p.is_featured).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn project(event_type: &str, featured: bool) -> Project {
        Project {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            event_title: format!("{event_type} show"),
            event_type: event_type.to_string(),
            event_location: "Chennai".into(),
            event_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            guest_count: None,
            services_used: vec!["Lighting".into()],
            short_description: "Ten characters at least".into(),
            highlight_or_challenge: None,
            images: vec!["https://cdn.example/1.jpg".into()],
            videos: None,
            before_image_url: None,
            after_image_url: None,
            instagram_reel_url: None,
            is_featured: featured,
            is_new: false,
            display_order: 0,
        }
    }

    #[test]
    fn all_events_label_maps_to_all() {
        assert_eq!(EventFilter::from_label("All Events"), EventFilter::All);
        assert_eq!(
            EventFilter::from_label("Weddings"),
            EventFilter::Type("Weddings".into())
        );
    }

    #[test]
    fn all_filter_returns_full_set() {
        let projects = vec![project("Weddings", false), project("Corporate", false)];
        assert_eq!(apply(&EventFilter::All, &projects).len(), 2);
    }

    #[test]
    fn type_filter_returns_exact_subset() {
        let projects = vec![
            project("Weddings", false),
            project("Corporate", false),
            project("Weddings", false),
        ];
        let filtered = apply(&EventFilter::from_label("Weddings"), &projects);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|p| p.event_type == "Weddings"));
    }

    #[test]
    fn type_filter_preserves_fetch_order() {
        let mut projects = vec![project("DJ Nights", false), project("DJ Nights", false)];
        projects[0].event_title = "first".into();
        projects[1].event_title = "second".into();
        let filtered = apply(&EventFilter::from_label("DJ Nights"), &projects);
        assert_eq!(filtered[0].event_title, "first");
        assert_eq!(filtered[1].event_title, "second");
    }

    #[test]
    fn featured_selects_flagged_projects_only() {
        let projects = vec![
            project("Weddings", true),
            project("Corporate", false),
            project("Live Shows", true),
        ];
        let strip = featured(&projects);
        assert_eq!(strip.len(), 2);
        assert!(strip.iter().all(|p| p.is_featured));
    }
}
