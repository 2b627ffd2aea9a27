//! Download orchestration: validate, run wget, report, clean up

use super::ModelDownloader;
use super::naming::{ExtensionPolicy, model_file_name};
use super::probe::probe_url;
use super::progress::parse_progress_line;
use super::wget::WgetCommand;
use crate::error::{DownloadError, Error, Result, ValidationError};
use crate::types::{CompletedDownload, DownloadProgress, DownloadRequest, Event};
use crate::utils::{checked_relative, format_mebibytes, to_posix, url_extension};
use std::path::Path;

/// Message carried by the terminal progress event
pub const COMPLETION_MESSAGE: &str = "Download completed successfully!";

impl ModelDownloader {
    /// Download a model file into the models directory
    ///
    /// Validation runs first and fails fast: missing fields, the HEAD probe,
    /// the URL extension, the save path, then the model name's extension.
    /// None of these touch the filesystem or emit events.
    ///
    /// Once the destination is known the download is announced with
    /// `download-start`, wget output is forwarded as `download-progress`, and
    /// success ends with a progress event at 100%. Any failure from that
    /// point removes the destination file and emits `download-error` before
    /// the error is returned.
    ///
    /// Concurrent downloads to the same destination are not serialized.
    pub async fn download(&self, request: DownloadRequest) -> Result<CompletedDownload> {
        let (url, model_name) = match (
            non_empty(request.url),
            non_empty(request.model_name),
        ) {
            (Some(url), Some(model_name)) => (url, model_name),
            _ => return Err(ValidationError::MissingUrlOrModelName.into()),
        };
        let save_path = request
            .save_path
            .unwrap_or_else(|| self.config.models.default_save_path.clone());

        probe_url(&self.http, &url).await?;

        let url_ext = url_extension(&url)?.ok_or(ValidationError::NoExtension)?;
        if !self.config.is_supported_extension(&url_ext) {
            return Err(ValidationError::UnsupportedExtension {
                extension: url_ext,
                supported: self.config.supported_extensions_display(),
            }
            .into());
        }
        let save_dir = checked_relative(&save_path)?;

        let file_name = model_file_name(
            &self.config,
            &model_name,
            &url_ext,
            ExtensionPolicy::MatchReference,
        )?;
        let relative = save_dir.join(file_name);
        let destination = self.config.models_dir().join(&relative);

        tracing::info!(url = %url, destination = %destination.display(), "starting model download");

        match self.fetch(&url, &destination).await {
            Ok(size_bytes) => {
                let size = format_mebibytes(size_bytes);
                self.emit_event(Event::DownloadProgress(DownloadProgress {
                    percent: Some(100),
                    size: Some(size.clone()),
                    message: Some(COMPLETION_MESSAGE.to_string()),
                    ..Default::default()
                }));
                tracing::info!(
                    path = %destination.display(),
                    size = %size,
                    "download completed"
                );

                Ok(CompletedDownload {
                    path: destination,
                    relative_path: to_posix(&relative),
                    size_bytes,
                })
            }
            Err(e) => {
                remove_partial(&destination).await;
                let error = e.to_string();
                tracing::warn!(url = %url, error = %error, "download failed");
                self.emit_event(Event::DownloadError { error });
                Err(e)
            }
        }
    }

    /// Run wget into `destination` and return the written size
    async fn fetch(&self, url: &str, destination: &Path) -> Result<u64> {
        self.emit_event(Event::DownloadStart {});

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let wget = WgetCommand::from_config(&self.config.tools)?;

        let status = wget
            .run(destination, url, |line| self.handle_tool_line(line))
            .await?;

        if !status.success() {
            return Err(Error::Download(DownloadError::ToolFailed {
                status: status.to_string(),
            }));
        }

        Ok(tokio::fs::metadata(destination).await?.len())
    }

    fn handle_tool_line(&self, line: &str) {
        tracing::debug!(target: "model_dl::wget", "{}", line);

        if let Some(progress) = parse_progress_line(line) {
            self.emit_event(Event::DownloadProgress(progress));
        }
    }
}

/// Delete whatever wget left at `path`
async fn remove_partial(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "removed partial download"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to remove partial download")
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
