use super::model::VideoMetadata;
use async_trait::async_trait;
use std::{io, process::Stdio, time::Duration};
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

pub const PROCESS_FAILED: &str = "Failed to process the video URL.";
pub const PARSE_FAILED: &str = "Failed to parse video information.";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to start extractor: {0}")]
    Spawn(#[source] io::Error),
    #[error("extractor exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("extractor did not finish within {0:?}")]
    TimedOut(Duration),
    #[error("extractor output is not valid metadata: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ExtractError {
    /// Message reported to the API caller.
    pub fn client_message(&self) -> String {
        match self {
            ExtractError::Failed { stderr, .. } if !stderr.trim().is_empty() => stderr.clone(),
            ExtractError::Parse(_) => PARSE_FAILED.to_string(),
            _ => PROCESS_FAILED.to_string(),
        }
    }
}

/// Source of video metadata for a page URL.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<VideoMetadata, ExtractError>;
}

/// Runs the `yt-dlp` executable and reads its `--dump-json` output.
pub struct YtDlp {
    program: String,
    timeout: Option<Duration>,
}

impl YtDlp {
    pub fn new(program: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn command(&self, url: &str) -> Command {
        let mut command = Command::new(&self.program);
        // No shell in between; `--` stops option parsing so the URL stays a single operand.
        command
            .arg("--dump-json")
            .arg("--no-warnings")
            .arg("--")
            .arg(url)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        command
    }
}

#[async_trait]
impl Extractor for YtDlp {
    async fn extract(&self, url: &str) -> Result<VideoMetadata, ExtractError> {
        debug!(url = %url, program = %self.program, "Running extractor");

        let run = self.command(url).output();
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, run)
                .await
                .map_err(|_| ExtractError::TimedOut(limit))?,
            None => run.await,
        }
        .map_err(ExtractError::Spawn)?;

        if !output.status.success() {
            return Err(ExtractError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}
