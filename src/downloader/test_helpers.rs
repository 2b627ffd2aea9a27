//! Shared test helpers for creating ModelDownloader instances in tests.

use crate::config::Config;
use crate::downloader::ModelDownloader;
use crate::events::EventBus;
use crate::types::Event;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::tempdir;
use tokio::sync::broadcast;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// wget stand-in that prints a realistic progress sequence and writes the file.
///
/// Arguments arrive as: `--progress=bar:force -O <destination> <url>`.
pub(crate) const SUCCESS_SCRIPT: &str = r#"
echo "--2024-05-01 10:00:00--  $4"
echo "Length: 104857600 (100M) [application/octet-stream]" >&2
printf ' 50%%[=====>      ]  50.00M  12.3MB/s    eta 4s\r' >&2
printf 'model-bytes' > "$3"
printf '100%%[===========>] 100.00M  12.5MB/s    in 8s\n' >&2
exit 0
"#;

/// wget stand-in that writes part of the file and then fails like a network error.
pub(crate) const FAILURE_SCRIPT: &str = r#"
printf 'partial' > "$3"
echo "Length: 2048 (2.0K)" >&2
echo "Read error at byte 7/2048 (Connection reset by peer)." >&2
exit 4
"#;

/// wget stand-in that records being run; used to prove it never was.
pub(crate) const MARKER_SCRIPT: &str = r#"
touch "$(dirname "$0")/tool-ran"
printf 'x' > "$3"
exit 0
"#;

/// A downloader rooted in a temp dir, with its event bus.
pub(crate) struct TestDownloader {
    pub downloader: ModelDownloader,
    pub bus: EventBus,
    pub temp_dir: tempfile::TempDir,
}

impl TestDownloader {
    /// The models directory of this instance
    pub fn models_dir(&self) -> PathBuf {
        self.downloader.config.models_dir().clone()
    }

    /// Where a script-run tool leaves its marker file
    pub fn marker_path(&self) -> PathBuf {
        self.temp_dir.path().join("tool-ran")
    }
}

/// Helper to create a test downloader whose "wget" runs `script` through /bin/sh.
pub(crate) fn create_test_downloader_with_script(script: &str) -> TestDownloader {
    let temp_dir = tempdir().unwrap();
    let script_path = temp_dir.path().join("fake-wget.sh");
    std::fs::write(&script_path, script).unwrap();

    let mut config = Config::default();
    config.models.models_dir = temp_dir.path().join("models");
    config.tools.wget_path = Some(PathBuf::from("/bin/sh"));
    config.tools.search_path = false;
    config.tools.extra_args = vec![script_path.to_string_lossy().into_owned()];
    config.tools.probe_timeout_secs = 5;

    std::fs::create_dir_all(&config.models.models_dir).unwrap();

    let bus = EventBus::new();
    let downloader = ModelDownloader::new(config, Arc::new(bus.clone())).unwrap();

    TestDownloader {
        downloader,
        bus,
        temp_dir,
    }
}

/// Helper to create a test downloader with the successful fake tool.
pub(crate) fn create_test_downloader() -> TestDownloader {
    create_test_downloader_with_script(SUCCESS_SCRIPT)
}

/// Start a mock server answering HEAD `file_path` with `status`.
pub(crate) async fn mock_model_server(file_path: &str, status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path(file_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

/// Collect every event already sitting in the receiver.
pub(crate) fn drain_events(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Recursive list of every entry under `root`, for before/after comparisons.
pub(crate) fn snapshot(root: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.path().to_path_buf())
        .collect();
    entries.sort();
    entries
}
