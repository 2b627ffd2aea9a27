//! Configuration types for model-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf, time::Duration};

/// Model storage layout (base directory, well-known folders, extensions)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Base models directory (default: "models")
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// Subdirectory used when a request omits `save_path` (default: "loras")
    #[serde(default = "default_save_path")]
    pub default_save_path: String,

    /// Well-known subdirectories listed first, in this order
    #[serde(default = "default_special_dirs")]
    pub special_dirs: Vec<String>,

    /// Allow-listed model file extensions, with leading dot
    #[serde(default = "default_supported_extensions")]
    pub supported_extensions: Vec<String>,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            models_dir: default_models_dir(),
            default_save_path: default_save_path(),
            special_dirs: default_special_dirs(),
            supported_extensions: default_supported_extensions(),
        }
    }
}

/// Download tool settings
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to wget executable (auto-detected if None)
    #[serde(default)]
    pub wget_path: Option<PathBuf>,

    /// Whether to search PATH for wget if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,

    /// Arguments placed before the standard wget arguments
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Timeout for the HEAD reachability probe in seconds (default: 30)
    ///
    /// The wget run itself has no timeout.
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            wget_path: None,
            search_path: true,
            extra_args: Vec::new(),
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

impl ToolsConfig {
    /// HEAD probe timeout as a [`Duration`]
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// HTTP surface configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address the standalone server binds to (default: 127.0.0.1:8188)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Path prefix the plugin routes are mounted under
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            route_prefix: default_route_prefix(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

/// Main configuration for [`ModelDownloader`](crate::ModelDownloader)
///
/// Sub-configs are flattened, so the serialized form has no nesting apart
/// from the `api` table.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Model storage layout
    #[serde(flatten)]
    pub models: ModelsConfig,

    /// Download tool settings
    #[serde(flatten)]
    pub tools: ToolsConfig,

    /// HTTP surface
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Base models directory
    pub fn models_dir(&self) -> &PathBuf {
        &self.models.models_dir
    }

    /// Comma-separated allow-list, as shown in error messages
    pub fn supported_extensions_display(&self) -> String {
        self.models.supported_extensions.join(", ")
    }

    /// Whether `extension` (with leading dot) is allow-listed, ignoring case
    pub fn is_supported_extension(&self, extension: &str) -> bool {
        self.models
            .supported_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }

    /// Check the configuration for values the downloader cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.models.supported_extensions.is_empty() {
            return Err(Error::Config {
                message: "at least one supported extension is required".into(),
                key: Some("supported_extensions".into()),
            });
        }

        if let Some(bad) = self
            .models
            .supported_extensions
            .iter()
            .find(|e| !e.starts_with('.') || e.len() < 2)
        {
            return Err(Error::Config {
                message: format!("extension {bad:?} must start with a dot"),
                key: Some("supported_extensions".into()),
            });
        }

        if crate::utils::checked_relative(&self.models.default_save_path).is_err() {
            return Err(Error::Config {
                message: format!(
                    "default save path {:?} must be relative to the models directory",
                    self.models.default_save_path
                ),
                key: Some("default_save_path".into()),
            });
        }

        if !self.api.route_prefix.starts_with('/') {
            return Err(Error::Config {
                message: format!("route prefix {:?} must start with '/'", self.api.route_prefix),
                key: Some("route_prefix".into()),
            });
        }

        Ok(())
    }
}

// Default value functions
fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_save_path() -> String {
    "loras".to_string()
}

fn default_special_dirs() -> Vec<String> {
    vec![
        "loras".into(),
        "checkpoints".into(),
        "diffusion_models".into(),
    ]
}

fn default_supported_extensions() -> Vec<String> {
    vec![
        ".safetensors".into(),
        ".pt".into(),
        ".ckpt".into(),
        ".bin".into(),
    ]
}

fn default_true() -> bool {
    true
}

fn default_probe_timeout_secs() -> u64 {
    30
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8188))
}

fn default_route_prefix() -> String {
    "/simple-model-downloader".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}
