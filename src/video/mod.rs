//! Video fetching and clip composition

pub mod composer;
pub mod source;

// Re-export main types for convenience
pub use composer::{FfmpegComposer, OutputArtifact, VideoComposer};
pub use source::{SourceVideo, VideoSource, YtDlpSource};
