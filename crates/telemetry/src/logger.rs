//! Context-tagged logger and the environment level gate

use serde_json::Value;
use spinovo_core::Environment;
use tracing::{Level, Metadata};
use tracing_subscriber::filter::{FilterFn, filter_fn};

/// Which levels emit in a given environment
///
/// Development emits everything. Elsewhere only `ERROR` and `WARN` emit,
/// plus `DEBUG` when `debug_enabled` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPolicy {
    pub environment: Environment,
    pub debug_enabled: bool,
}

impl LogPolicy {
    /// Whether an event at `level` should be emitted
    pub fn allows(&self, level: &Level) -> bool {
        if self.environment.is_development() {
            return true;
        }
        match *level {
            Level::ERROR | Level::WARN => true,
            Level::DEBUG => self.debug_enabled,
            _ => false,
        }
    }
}

/// Global `tracing` filter applying a [`LogPolicy`]
pub fn level_gate(policy: LogPolicy) -> FilterFn<impl Fn(&Metadata<'_>) -> bool> {
    filter_fn(move |metadata| policy.allows(metadata.level()))
}

/// Logger tagging every event with a fixed context
///
/// Events go through `tracing`, so the installed subscriber decides
/// whether they are shown and whether errors are reported.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    context: &'static str,
}

impl Logger {
    /// Create a logger for a component
    pub const fn new(context: &'static str) -> Self {
        Self { context }
    }

    /// Component name attached to each event
    pub fn context(&self) -> &'static str {
        self.context
    }

    pub fn error(&self, message: &str, data: Option<Value>) {
        match data {
            Some(data) => tracing::error!(context = self.context, data = %data, "{message}"),
            None => tracing::error!(context = self.context, "{message}"),
        }
    }

    pub fn warn(&self, message: &str, data: Option<Value>) {
        match data {
            Some(data) => tracing::warn!(context = self.context, data = %data, "{message}"),
            None => tracing::warn!(context = self.context, "{message}"),
        }
    }

    pub fn info(&self, message: &str, data: Option<Value>) {
        match data {
            Some(data) => tracing::info!(context = self.context, data = %data, "{message}"),
            None => tracing::info!(context = self.context, "{message}"),
        }
    }

    pub fn debug(&self, message: &str, data: Option<Value>) {
        match data {
            Some(data) => tracing::debug!(context = self.context, data = %data, "{message}"),
            None => tracing::debug!(context = self.context, "{message}"),
        }
    }
}
