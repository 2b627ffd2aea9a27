//! Core types and events

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use utoipa::ToSchema;

/// A directory under the models directory, as shown in the folder picker
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ModelDirectory {
    /// Path relative to the models directory, `/`-separated (`""` is the root)
    pub path: String,
    /// Display label (`"models"` for the root, otherwise the folder name)
    pub name: String,
    /// Whether this is one of the well-known folders listed first
    pub special: bool,
}

/// Request body for POST /download
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct DownloadRequest {
    /// URL of the model file
    #[serde(default)]
    pub url: Option<String>,
    /// Desired model name, with or without an extension
    #[serde(default)]
    pub model_name: Option<String>,
    /// Target subdirectory relative to the models directory (default: "loras")
    #[serde(default)]
    pub save_path: Option<String>,
}

/// Request body for POST /check-file
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CheckFileRequest {
    /// Desired model name, with or without an extension
    #[serde(default)]
    pub model_name: Option<String>,
    /// Target subdirectory relative to the models directory (default: "loras")
    #[serde(default)]
    pub save_path: Option<String>,
    /// Extension appended when the model name has none (e.g. ".safetensors")
    #[serde(default)]
    pub extension: Option<String>,
}

/// Request body for POST /create-folder
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateFolderRequest {
    /// Parent path relative to the models directory (default: the root)
    #[serde(default)]
    pub parent_path: Option<String>,
    /// Name of the folder to create
    #[serde(default)]
    pub folder_name: Option<String>,
}

/// Partial or terminal progress update for a running download
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DownloadProgress {
    /// Completion percentage (0 to 100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<u8>,
    /// Total size, e.g. "12.3MB"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Transfer rate as printed by the tool, e.g. "1.2MB/s"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
    /// Human-readable status line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DownloadProgress {
    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        self.percent.is_none()
            && self.size.is_none()
            && self.speed.is_none()
            && self.message.is_none()
    }
}

/// Result of an existence check
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileCheck {
    /// Whether a file is already at the resolved path
    pub exists: bool,
    /// Resolved path relative to the models directory, `/`-separated
    pub file_path: String,
}

/// A finished download
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletedDownload {
    /// Absolute or models-dir-joined path of the written file
    pub path: PathBuf,
    /// Path relative to the models directory, `/`-separated
    pub relative_path: String,
    /// Final size in bytes
    pub size_bytes: u64,
}

/// Event pushed to subscribers while a download runs
///
/// Serializes to the payload only; the wire name comes from [`Event::kind`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Event {
    /// The tool is about to start (payload `{}`)
    DownloadStart {},

    /// Parsed progress or the terminal completion update
    DownloadProgress(DownloadProgress),

    /// The download failed after it had started
    DownloadError {
        /// Error message
        error: String,
    },
}

impl Event {
    /// Wire name of the event
    pub fn kind(&self) -> &'static str {
        match self {
            Event::DownloadStart {} => "download-start",
            Event::DownloadProgress(_) => "download-progress",
            Event::DownloadError { .. } => "download-error",
        }
    }
}
