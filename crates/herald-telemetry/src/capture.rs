//! In-memory event capture.
//!
//! [`EventCapture`] is a `tracing-subscriber` layer that records every event
//! it sees, so tests can assert on what was logged and with which fields.
//!
//! ```rust
//! use herald_telemetry::capture::EventCapture;
//! use tracing::Level;
//!
//! let capture = EventCapture::new();
//! {
//!     let _guard = capture.set_default();
//!     tracing::error!(task = "reindex", "background task panicked");
//! }
//!
//! assert_eq!(capture.count(Level::ERROR), 1);
//! assert_eq!(capture.events()[0].field("task"), Some("reindex"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    /// Event level.
    pub level: Level,
    /// Module path that emitted the event.
    pub target: String,
    /// Every field, including `message`, rendered as text.
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    /// Value of a field, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The event message.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }
}

/// Layer that keeps every event in memory.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    /// Creates an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a registry with this layer as the current thread's default
    /// subscriber until the guard drops.
    #[must_use]
    pub fn set_default(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::set_default(subscriber)
    }

    /// Snapshot of the recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded events at exactly `level`.
    #[must_use]
    pub fn count(&self, level: Level) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.level == level)
            .count()
    }
}

impl<S: Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: visitor.0,
        };

        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(captured);
    }
}

#[derive(Default)]
struct FieldVisitor(BTreeMap<String, String>);

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_level_and_fields() {
        let capture = EventCapture::new();
        {
            let _guard = capture.set_default();
            tracing::warn!(attempt = 3, reason = "timeout", "retrying");
            tracing::info!("started");
        }

        let events = capture.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].level, Level::WARN);
        assert_eq!(events[0].message(), Some("retrying"));
        assert_eq!(events[0].field("attempt"), Some("3"));
        assert_eq!(events[0].field("reason"), Some("timeout"));
        assert_eq!(capture.count(Level::INFO), 1);
        assert_eq!(capture.count(Level::ERROR), 0);
    }

    #[test]
    fn test_nothing_recorded_after_guard_drops() {
        let capture = EventCapture::new();
        drop(capture.set_default());

        tracing::error!("unobserved");
        assert!(capture.events().is_empty());
    }

    #[test]
    fn test_display_fields_are_rendered_as_text() {
        let capture = EventCapture::new();
        let _guard = capture.set_default();

        let uri = "/v1/movies?page=2";
        tracing::error!(http.uri = %uri, "request failed");

        assert_eq!(capture.events()[0].field("http.uri"), Some("/v1/movies?page=2"));
    }
}
