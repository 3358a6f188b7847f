//! Shared command context

use crate::output::{OutputFormat, Status};
use anyhow::Result;
use serde::Serialize;
use spinovo_api_client::{ApiEnvelope, ClientConfig, SpinovoClient};
use spinovo_telemetry::TelemetryConfig;
use std::path::Path;

/// Client plus output settings, built once per invocation
pub struct App {
    pub client: SpinovoClient,
    pub format: OutputFormat,
}

impl App {
    /// Build the client from a TOML file or the environment
    pub fn new(config_path: Option<&Path>, format: OutputFormat) -> Result<Self> {
        let config = match config_path {
            Some(path) => ClientConfig::from_toml_file(path)?,
            None => ClientConfig::from_env()?,
        };
        let client = SpinovoClient::with_file_session(config)?.with_session_expired_hook(|| {
            Status::warning("Session expired. Run `spinovo-admin login` to sign in again.");
        });

        Ok(Self { client, format })
    }

    /// Logging setup for the loaded environment; `verbose` forces debug output
    pub fn telemetry(&self, verbose: bool) -> TelemetryConfig {
        let config = self.client.config();
        TelemetryConfig::for_environment(config.environment).with_debug(verbose || config.debug)
    }

    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// In JSON mode print the whole envelope and return `None`;
    /// otherwise hand back the payload for text rendering
    pub fn render<T: Serialize>(&self, envelope: ApiEnvelope<T>) -> Result<Option<T>> {
        if self.json() {
            crate::output::print_json(&envelope)?;
            return Ok(None);
        }
        Ok(Some(envelope.into_data()?))
    }

    /// Report the outcome of a write call
    pub fn acknowledge<T: Serialize>(&self, envelope: &ApiEnvelope<T>, fallback: &str) -> Result<()> {
        if self.json() {
            return crate::output::print_json(envelope);
        }
        let message = if envelope.msg.is_empty() {
            fallback
        } else {
            envelope.msg.as_str()
        };
        Status::success(message);
        Ok(())
    }
}
