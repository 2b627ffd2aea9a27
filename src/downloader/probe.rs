//! Remote reachability check run before anything touches the disk

use crate::error::{DownloadError, Result};

/// Send a HEAD request to `url` and require a success status
///
/// Redirects are followed, so the status checked is the final one.
pub(crate) async fn probe_url(client: &reqwest::Client, url: &str) -> Result<()> {
    let response = client.head(url).send().await.map_err(|e| {
        let reason = if e.is_timeout() {
            format!("timed out probing '{}'", url)
        } else {
            e.to_string()
        };
        DownloadError::Unreachable { reason }
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!(url = %url, status = %status, "URL probe rejected");
        return Err(DownloadError::BadStatus {
            status: status.as_u16(),
        }
        .into());
    }

    Ok(())
}
