//! Observability for centrus
//!
//! Structured JSON log lines for store and loader activity. The schema
//! codec itself never logs; callers log its outcomes.
//!
//! # Usage
//!
//! ```ignore
//! use centrus::observability::{log_event_with_fields, Event, Logger};
//!
//! Logger::init_from_env();
//! log_event_with_fields(Event::TableRead, &[("path", "contacts.csv")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log an event with fields at the event's severity.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Only checks that logging does not panic
        log_event(Event::ConfigLoaded);
        log_event_with_fields(Event::TableRead, &[("path", "/tmp/test.csv")]);
    }

    #[test]
    fn test_failure_events() {
        assert!(Event::TableDecodeFailed.is_failure());
        assert!(Event::TableEncodeFailed.is_failure());
        assert!(!Event::TableWritten.is_failure());
        assert_eq!(Event::RowAppended.to_string(), "ROW_APPENDED");
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::TableDecodeFailed.severity(), Severity::Error);
        assert_eq!(Event::TableValidationError.severity(), Severity::Warn);
        assert_eq!(Event::TableValidationError.as_str(), "TABLE_VALIDATION_ERROR");
        assert!(!Event::TableValidationError.is_failure());
        assert_eq!(Event::TableWritten.severity(), Severity::Info);
    }
}
