//! Core downloader implementation split into focused submodules.
//!
//! The `ModelDownloader` struct and its methods are organized by domain:
//! - [`download`] - Download orchestration (validate, run, report, clean up)
//! - [`folders`] - Directory listing, folder creation, existence checks
//! - [`naming`] - Target file name resolution
//! - [`probe`] - HEAD reachability check
//! - [`progress`] - wget output line parser
//! - [`wget`] - wget subprocess wrapper

mod download;
mod folders;
mod naming;
mod probe;
pub mod progress;
pub mod wget;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use download::COMPLETION_MESSAGE;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::EventSink;
use crate::types::Event;
use std::sync::Arc;

/// Main downloader instance (cloneable - all fields are Arc-wrapped)
///
/// The event sink is supplied by the host; the downloader never reaches for
/// a global server instance.
#[derive(Clone)]
pub struct ModelDownloader {
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// Host-owned event channel
    pub(crate) events: Arc<dyn EventSink>,
    /// HTTP client for the HEAD probe
    pub(crate) http: reqwest::Client,
}

impl ModelDownloader {
    /// Create a new downloader
    ///
    /// Validates the configuration and builds the HTTP client used for the
    /// URL probe. Nothing on disk is touched.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use model_dl::{Config, EventBus, ModelDownloader};
    /// use std::sync::Arc;
    ///
    /// # fn example() -> model_dl::Result<()> {
    /// let bus = EventBus::new();
    /// let downloader = ModelDownloader::new(Config::default(), Arc::new(bus.clone()))?;
    /// let mut events = bus.subscribe();
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: Config, events: Arc<dyn EventSink>) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.tools.probe_timeout())
            .user_agent(concat!("model-dl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config: Arc::new(config),
            events,
            http,
        })
    }

    /// Get the current configuration
    pub fn get_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Push an event to the host's subscribers
    pub(crate) fn emit_event(&self, event: Event) {
        self.events.send(event);
    }
}
