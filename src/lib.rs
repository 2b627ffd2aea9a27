//! # model-dl
//!
//! Model file manager for image-generation hosts: lists and creates folders
//! under a models directory, checks whether a model file already exists, and
//! downloads models with `wget` while pushing live progress events.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - The host owns the HTTP server and the push channel;
//!   this crate hands it a [`Router`](axum::Router) and takes an [`EventSink`]
//! - **Fail fast** - Requests are validated before anything touches the disk
//! - **No leftovers** - A failed download never leaves a partial file behind
//!
//! ## Quick Start
//!
//! ```no_run
//! use model_dl::{Config, DownloadRequest, EventBus, ModelDownloader};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bus = EventBus::new();
//!     let downloader = ModelDownloader::new(Config::default(), Arc::new(bus.clone()))?;
//!
//!     // Subscribe to events
//!     let mut events = bus.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("{}: {:?}", event.kind(), event);
//!         }
//!     });
//!
//!     let done = downloader
//!         .download(DownloadRequest {
//!             url: Some("https://example.com/files/detail.safetensors".into()),
//!             model_name: Some("detail".into()),
//!             save_path: Some("loras".into()),
//!         })
//!         .await?;
//!     println!("saved to {}", done.relative_path);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// Model directory enumeration
pub mod directories;
/// Core downloader implementation (decomposed into focused submodules)
pub mod downloader;
/// Error types
pub mod error;
/// Event push channel
pub mod events;
/// Core types and events
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::{ApiConfig, Config, ModelsConfig, ToolsConfig};
pub use downloader::{COMPLETION_MESSAGE, ModelDownloader};
pub use error::{ApiError, DownloadError, Error, Result, ToHttpStatus, ValidationError};
pub use events::{EventBus, EventSink};
pub use types::{
    CheckFileRequest, CompletedDownload, CreateFolderRequest, DownloadProgress, DownloadRequest,
    Event, FileCheck, ModelDirectory,
};

/// Wait for a termination signal.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
#[cfg(unix)]
pub(crate) async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
pub(crate) async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
