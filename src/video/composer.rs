//! Short-clip rendering via the `ffmpeg` CLI.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use super::source::SourceVideo;
use crate::errors::AgentError;

/// Rendered output produced by the compose stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub path: PathBuf,
}

/// Compose capability: overlay a caption on the opening seconds of a source
/// video and render the result.
#[async_trait]
pub trait VideoComposer: Send + Sync {
    async fn render(
        &self,
        source: &SourceVideo,
        caption: &str,
        max_seconds: u32,
    ) -> Result<OutputArtifact, AgentError>;
}

/// `ffmpeg` backed composer. Trims to `max_seconds` and draws the caption
/// bottom-centered in a translucent box.
pub struct FfmpegComposer {
    binary: String,
    output_dir: PathBuf,
}

impl FfmpegComposer {
    #[must_use]
    pub fn new(binary: String, output_dir: PathBuf) -> Self {
        Self { binary, output_dir }
    }

    fn output_path(&self, source: &SourceVideo) -> PathBuf {
        let stem = slug(&source.title);
        let stem = if stem.is_empty() {
            source.id.clone()
        } else {
            stem
        };
        self.output_dir.join(format!("short_{stem}.mp4"))
    }
}

#[async_trait]
impl VideoComposer for FfmpegComposer {
    async fn render(
        &self,
        source: &SourceVideo,
        caption: &str,
        max_seconds: u32,
    ) -> Result<OutputArtifact, AgentError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                AgentError::Compose(format!(
                    "Failed to create output dir {}: {e}",
                    self.output_dir.display()
                ))
            })?;

        let output_path = self.output_path(source);
        let filter = caption_filter(caption);

        let mut cmd = Command::new(&self.binary);
        cmd.arg("-y");
        cmd.arg("-i").arg(&source.path);
        cmd.arg("-t").arg(max_seconds.to_string());
        cmd.arg("-vf").arg(&filter);
        cmd.arg("-codec:a").arg("copy");
        cmd.arg(&output_path);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd
            .output()
            .await
            .map_err(|e| AgentError::Compose(format!("Failed to run ffmpeg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AgentError::Compose(format!("ffmpeg failed: {stderr}")));
        }

        info!(
            video_id = %source.id,
            path = %output_path.display(),
            "Rendered captioned clip"
        );
        Ok(OutputArtifact { path: output_path })
    }
}

fn caption_filter(caption: &str) -> String {
    format!(
        "drawtext=expansion=none:text='{}':fontcolor=white:fontsize=36:\
         box=1:boxcolor=black@0.5:boxborderw=12:x=(w-text_w)/2:y=h-text_h-48",
        escape_drawtext(caption)
    )
}

/// Escapes caption text for a single-quoted drawtext value. Quoted sections
/// concatenate in the filter grammar, so a literal quote becomes `'\''`.
fn escape_drawtext(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str(r"\\"),
            '\'' => escaped.push_str(r"'\''"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_sep = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }
    slug.trim_end_matches('_').to_string()
}
