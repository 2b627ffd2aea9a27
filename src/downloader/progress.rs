//! Parser for wget progress output
//!
//! wget is run with `--progress=bar:force`, so its output (both streams) is a
//! header block followed by bar redraws such as
//! `model.safetensors  45%[=====>      ]  45.12M  12.3MB/s    eta 5s`.
//! Each line is parsed on its own; nothing is carried between lines.

use crate::types::DownloadProgress;
use crate::utils::format_mebibytes;
use regex::Regex;
use std::sync::LazyLock;

// Patterns are literals; a failure here is a programming error.
#[allow(clippy::expect_used)]
static LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Length: (\d+)").expect("valid length pattern"));
#[allow(clippy::expect_used)]
static PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)%").expect("valid percent pattern"));
#[allow(clippy::expect_used)]
static SPEED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*[KMG]B/s)").expect("valid speed pattern"));

/// Parse one line of wget output into a progress update
///
/// - `Length: <bytes>` yields `size` in mebibytes and `percent = 0`, and
///   nothing else from that line.
/// - A bar line (`[`, `]` and `<digits>%`) yields `percent`, capped at 100.
/// - A rate token like `12.3MB/s` yields `speed`.
///
/// Percent and speed found on the same line land in the same update.
/// Returns `None` when the line carries none of these.
pub fn parse_progress_line(line: &str) -> Option<DownloadProgress> {
    if let Some(bytes) = LENGTH
        .captures(line)
        .and_then(|c| c[1].parse::<u64>().ok())
    {
        return Some(DownloadProgress {
            percent: Some(0),
            size: Some(format_mebibytes(bytes)),
            ..Default::default()
        });
    }

    let mut progress = DownloadProgress::default();

    if line.contains('[')
        && line.contains(']')
        && let Some(percent) = PERCENT
            .captures(line)
            .and_then(|c| c[1].parse::<u32>().ok())
    {
        progress.percent = Some(percent.min(100) as u8);
    }

    if let Some(speed) = SPEED.captures(line) {
        progress.speed = Some(speed[1].to_string());
    }

    (!progress.is_empty()).then_some(progress)
}
