//! Application state for the API server

use crate::ModelDownloader;
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// This struct is cloned for each request (cheap Arc clone).
#[derive(Clone)]
pub struct AppState {
    /// The downloader handling every plugin operation
    pub downloader: Arc<ModelDownloader>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(downloader: Arc<ModelDownloader>) -> Self {
        Self { downloader }
    }
}
