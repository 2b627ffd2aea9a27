//! wget subprocess wrapper

use crate::config::ToolsConfig;
use crate::error::{Error, Result};
use bytes::BytesMut;
use futures::StreamExt;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncRead;
use tokio::process::Command;
use tokio_util::codec::{Decoder, FramedRead};

/// Longest run of bytes without a line break before it is cut into a line
const MAX_LINE_BYTES: usize = 64 * 1024;

/// External wget binary plus any extra leading arguments
///
/// The download is run as
/// `wget [extra_args..] --progress=bar:force -O <destination> <url>`.
#[derive(Debug, Clone)]
pub struct WgetCommand {
    binary_path: PathBuf,
    extra_args: Vec<String>,
}

impl WgetCommand {
    /// Create a command with an explicit binary path
    pub fn new(binary_path: PathBuf, extra_args: Vec<String>) -> Self {
        Self {
            binary_path,
            extra_args,
        }
    }

    /// Attempt to find wget in PATH
    pub fn from_path() -> Option<Self> {
        which::which("wget")
            .ok()
            .map(|path| Self::new(path, Vec::new()))
    }

    /// Resolve the binary from configuration, falling back to a PATH search
    pub fn from_config(tools: &ToolsConfig) -> Result<Self> {
        let binary_path = match &tools.wget_path {
            Some(path) => path.clone(),
            None if tools.search_path => which::which("wget")
                .map_err(|e| Error::ExternalTool(format!("wget not found in PATH: {}", e)))?,
            None => {
                return Err(Error::ExternalTool(
                    "wget path not configured and PATH search is disabled".into(),
                ));
            }
        };

        Ok(Self::new(binary_path, tools.extra_args.clone()))
    }

    /// Path of the binary that will be executed
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Full argument list for one download
    pub fn args(&self, destination: &Path, url: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.extra_args.iter().map(OsString::from).collect();
        args.push("--progress=bar:force".into());
        args.push("-O".into());
        args.push(destination.as_os_str().to_owned());
        args.push(url.into());
        args
    }

    /// Run wget to completion, handing every non-empty output line to `on_line`
    ///
    /// stdout and stderr are drained concurrently so neither pipe can fill
    /// up and stall the child. Returns the exit status once both streams are
    /// closed and the process has exited.
    pub async fn run<F>(&self, destination: &Path, url: &str, on_line: F) -> Result<ExitStatus>
    where
        F: Fn(&str),
    {
        let mut child = Command::new(&self.binary_path)
            .args(self.args(destination, url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::ExternalTool(format!("Failed to execute wget: {}", e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::ExternalTool("wget stdout was not captured".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::ExternalTool("wget stderr was not captured".into()))?;

        let (out, err) = tokio::join!(drain(stdout, &on_line), drain(stderr, &on_line));
        out?;
        err?;

        Ok(child.wait().await?)
    }
}

async fn drain<R, F>(reader: R, on_line: &F) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    F: Fn(&str),
{
    let mut lines = FramedRead::new(reader, ProgressLineCodec::default());
    while let Some(line) = lines.next().await {
        let line = line?;
        if !line.is_empty() {
            on_line(&line);
        }
    }
    Ok(())
}

/// Splits tool output on `\n` and on `\r`
///
/// wget redraws its progress bar in place with carriage returns, so a
/// newline-only split would hold back every bar update until the end.
/// Frames are trimmed and decoded lossily.
#[derive(Debug, Default)]
pub struct ProgressLineCodec {
    next_index: usize,
}

impl ProgressLineCodec {
    fn take_frame(&mut self, buf: &mut BytesMut, len: usize, consumed: usize) -> String {
        self.next_index = 0;
        let frame = buf.split_to(consumed);
        String::from_utf8_lossy(&frame[..len]).trim().to_string()
    }
}

impl Decoder for ProgressLineCodec {
    type Item = String;
    type Error = io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> io::Result<Option<String>> {
        let found = buf[self.next_index..]
            .iter()
            .position(|b| *b == b'\n' || *b == b'\r');

        match found {
            Some(offset) => {
                let end = self.next_index + offset;
                Ok(Some(self.take_frame(buf, end, end + 1)))
            }
            None if buf.len() >= MAX_LINE_BYTES => {
                let len = buf.len();
                Ok(Some(self.take_frame(buf, len, len)))
            }
            None => {
                self.next_index = buf.len();
                Ok(None)
            }
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> io::Result<Option<String>> {
        if let Some(line) = self.decode(buf)? {
            return Ok(Some(line));
        }
        if buf.is_empty() {
            return Ok(None);
        }
        let len = buf.len();
        Ok(Some(self.take_frame(buf, len, len)))
    }
}
