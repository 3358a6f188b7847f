//! Error reporting hook

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Sink for error-level log entries
///
/// Implementations forward entries to an external tracking service. They
/// run inline with the logging call and must not block for long.
pub trait ErrorReporter: Send + Sync + 'static {
    fn report(&self, entry: &LogEntry);
}

/// A structured log entry handed to an [`ErrorReporter`]
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

/// Layer forwarding `ERROR` events to a reporter
pub struct ReportingLayer {
    reporter: Arc<dyn ErrorReporter>,
}

impl ReportingLayer {
    pub fn new(reporter: Arc<dyn ErrorReporter>) -> Self {
        Self { reporter }
    }
}

impl fmt::Debug for ReportingLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportingLayer").finish_non_exhaustive()
    }
}

impl<S: Subscriber> Layer<S> for ReportingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        if level != Level::ERROR {
            return;
        }

        let mut visitor = EntryVisitor::default();
        event.record(&mut visitor);

        let entry = LogEntry {
            level: level.to_string(),
            message: visitor.message,
            context: visitor.context,
            // Logger records data as its JSON text
            data: visitor
                .data
                .map(|raw| serde_json::from_str(&raw).unwrap_or(Value::String(raw))),
            timestamp: Utc::now(),
        };

        self.reporter.report(&entry);
    }
}

#[derive(Default)]
struct EntryVisitor {
    message: String,
    context: Option<String>,
    data: Option<String>,
}

impl Visit for EntryVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "context" => self.context = Some(value.to_string()),
            "data" => self.data = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "context" => self.context = Some(format!("{value:?}")),
            "data" => self.data = Some(format!("{value:?}")),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tracing_subscriber::prelude::*;

    #[derive(Default)]
    struct Collect(Mutex<Vec<LogEntry>>);

    impl ErrorReporter for Collect {
        fn report(&self, entry: &LogEntry) {
            self.0.lock().unwrap().push(entry.clone());
        }
    }

    #[test]
    fn test_only_errors_reported() {
        let sink = Arc::new(Collect::default());
        let sub = tracing_subscriber::registry()
            .with(ReportingLayer::new(sink.clone() as Arc<dyn ErrorReporter>));

        tracing::subscriber::with_default(sub, || {
            tracing::warn!("ignored");
            tracing::error!(context = "Bookings", data = %serde_json::json!({"id": "b1"}), "Failed to load");
            tracing::error!("plain");
        });

        let entries = sink.0.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, "ERROR");
        assert_eq!(entries[0].message, "Failed to load");
        assert_eq!(entries[0].context.as_deref(), Some("Bookings"));
        assert_eq!(entries[0].data, Some(serde_json::json!({"id": "b1"})));
        assert_eq!(entries[1].message, "plain");
        assert!(entries[1].context.is_none());
    }

    #[test]
    fn test_entry_serialization_skips_empty_fields() {
        let entry = LogEntry {
            level: "ERROR".into(),
            message: "boom".into(),
            context: None,
            data: None,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("context").is_none());
        assert_eq!(json["message"], "boom");
    }
}
