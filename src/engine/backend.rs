//! Codec engine trait and shared types.
//!
//! The [`CodecEngine`] trait is the seam between request decoding and
//! pixel work: the decoder never touches image data, and engines never see
//! raw parameters. An engine opens one [`TransformJob`] per source image;
//! [`apply`] drives the job from a decoded request, invoking only the
//! operations for fields the request populated.
//!
//! The production implementation is
//! [`ImageEngine`](super::image_engine::ImageEngine), pure Rust on the
//! `image` crate. Tests use the recording mock in this module.

use crate::request::{FormatName, FormatOptions, ResizeSpec, TransformRequest};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(&'static str),
}

/// One transform over a single source image.
///
/// Operations queue on the job; `into_bytes` runs them and returns the
/// encoded result.
pub trait TransformJob {
    /// Queue a resize. A spec with one side unset scales by aspect ratio.
    fn resize(&mut self, spec: &ResizeSpec);

    /// Queue re-encoding to the given format.
    fn set_output_format(&mut self, format: FormatName, options: Option<FormatOptions>);

    /// Execute the queued operations and encode.
    fn into_bytes(self) -> Result<Vec<u8>, EngineError>;
}

/// Factory for transform jobs.
///
/// Engines hold no per-request state and are safe to share across
/// concurrent requests; each request gets its own job.
pub trait CodecEngine: Sync {
    type Job: TransformJob;

    /// Start a job from encoded source bytes.
    fn open(&self, source: Vec<u8>) -> Result<Self::Job, EngineError>;
}

/// Drive a job from a decoded request.
///
/// Only the operations for fields present in the request are invoked. An
/// output format with no name applies as jpeg.
pub fn apply<J: TransformJob>(job: &mut J, request: &TransformRequest) {
    if let Some(resize) = &request.resize {
        job.resize(resize);
    }
    if let Some(format) = &request.format {
        job.set_output_format(format.name.unwrap_or(FormatName::Jpeg), format.options);
    }
}
