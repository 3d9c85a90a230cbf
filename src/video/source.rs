//! Source video fetching via the `yt-dlp` CLI.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::info;

use crate::errors::AgentError;

/// Reference to a downloaded source video. Immutable once produced; later
/// stages read it but never modify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceVideo {
    pub id: String,
    pub path: PathBuf,
    pub title: String,
    pub duration_seconds: u64,
}

/// Fetch capability: resolve a source URL into a local video file.
#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<SourceVideo, AgentError>;
}

/// `yt-dlp` backed source. Downloads the full video into the configured
/// directory; any length ceiling is applied by the compose stage, not here.
pub struct YtDlpSource {
    binary: String,
    download_dir: PathBuf,
}

impl YtDlpSource {
    #[must_use]
    pub fn new(binary: String, download_dir: PathBuf) -> Self {
        Self {
            binary,
            download_dir,
        }
    }
}

#[async_trait]
impl VideoSource for YtDlpSource {
    async fn fetch(&self, url: &str) -> Result<SourceVideo, AgentError> {
        tokio::fs::create_dir_all(&self.download_dir)
            .await
            .map_err(|e| {
                AgentError::Fetch(format!(
                    "Failed to create download dir {}: {e}",
                    self.download_dir.display()
                ))
            })?;

        let template = self.download_dir.join("%(id)s.%(ext)s");
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--no-playlist");
        cmd.arg("--no-simulate"); // Download; --dump-single-json alone only simulates
        cmd.arg("--dump-single-json");
        cmd.arg("-f").arg("best[ext=mp4]/best");
        cmd.arg("-o").arg(&template);
        cmd.arg(url);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd
            .output()
            .await
            .map_err(|e| AgentError::Fetch(format!("Failed to run yt-dlp: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AgentError::Fetch(format!("yt-dlp failed: {stderr}")));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let video = parse_source(&stdout, &self.download_dir)?;
        info!(
            video_id = %video.id,
            title = %video.title,
            path = %video.path.display(),
            "Fetched source video"
        );
        Ok(video)
    }
}

#[derive(Debug, Deserialize)]
struct YtDlpMetadata {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    requested_downloads: Vec<YtDlpDownload>,
}

#[derive(Debug, Deserialize)]
struct YtDlpDownload {
    #[serde(default)]
    filepath: Option<String>,
    #[serde(rename = "_filename", default)]
    filename: Option<String>,
}

fn parse_source(stdout: &str, download_dir: &Path) -> Result<SourceVideo, AgentError> {
    let meta: YtDlpMetadata = serde_json::from_str(stdout)
        .map_err(|e| AgentError::Fetch(format!("Failed to parse yt-dlp output: {e}")))?;

    let path = meta
        .requested_downloads
        .iter()
        .find_map(|d| d.filepath.as_ref().or(d.filename.as_ref()))
        .map(PathBuf::from)
        .unwrap_or_else(|| download_dir.join(format!("{}.mp4", meta.id)));

    let title = if meta.title.trim().is_empty() {
        meta.id.clone()
    } else {
        meta.title
    };

    Ok(SourceVideo {
        id: meta.id,
        path,
        title,
        duration_seconds: meta.duration.map(|d| d as u64).unwrap_or(0),
    })
}
