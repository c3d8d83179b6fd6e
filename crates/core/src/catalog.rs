//! Fixed catalogs for event types and services.
//!
//! Both sets are closed: a project record may only carry values listed
//! here, and validation rejects anything else. [`ALL_EVENTS`] is a
//! synthetic filter-only value -- it is valid as a gallery filter
//! selection but never valid on a record.

/// Synthetic filter value matching every event type. Never stored.
pub const ALL_EVENTS: &str = "All Events";

/// Recognized event types a project record may carry.
pub const EVENT_TYPES: [&str; 6] = [
    "Weddings",
    "Corporate",
    "Cultural Events",
    "College Events",
    "DJ Nights",
    "Live Shows",
];

/// Recognized services a project record may list under `services_used`.
pub const AVAILABLE_SERVICES: [&str; 8] = [
    "Sound System",
    "Lighting",
    "LED Wall",
    "Stage Production",
    "DJ Services",
    "Video Production",
    "Photography",
    "Live Streaming",
];

/// Whether `value` is a recognized event type (excludes [`ALL_EVENTS`]).
pub fn is_event_type(value: &str) -> bool {
    EVENT_TYPES.contains(&value)
}

/// Whether `value` is a recognized service.
pub fn is_service(value: &str) -> bool {
    AVAILABLE_SERVICES.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_every_cataloged_event_type() {
        for ty in EVENT_TYPES {
            assert!(is_event_type(ty), "{ty} should be recognized");
        }
    }

    #[test]
    fn all_events_is_not_a_record_event_type() {
        assert!(!is_event_type(ALL_EVENTS));
    }

    #[test]
    fn rejects_unknown_event_type() {
        assert!(!is_event_type("Birthday Parties"));
    }

    #[test]
    fn recognizes_every_cataloged_service() {
        for svc in AVAILABLE_SERVICES {
            assert!(is_service(svc), "{svc} should be recognized");
        }
    }

    #[test]
    fn rejects_unknown_service() {
        assert!(!is_service("Catering"));
    }
}
