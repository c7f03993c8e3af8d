//! Request serving pipeline.
//!
//! Ties the collaborators together for one request: decode parameters,
//! overlay configured defaults, resolve and read the source image, run the
//! codec job, return the encoded bytes. The caller (an HTTP layer, the
//! CLI) owns transport concerns; this module never writes a response.

use crate::config::HandlerOptions;
use crate::decode::{self, DecodeError, ParamSource};
use crate::defaults;
use crate::engine::{CodecEngine, EngineError, TransformJob, apply};
use crate::resolve::resolve_source;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The resolved source image does not exist. Kept distinct from other
    /// IO failures so callers can answer "not found" rather than "broken".
    #[error("image not found: {}", .0.display())]
    ImageNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Serve one request.
///
/// `filename` is the request's target image (extension optional, see
/// [`resolve_source`]); `source` carries the transform parameters per the
/// configured mode (see [`HandlerOptions::param_source`]).
pub fn render(
    options: &HandlerOptions,
    engine: &impl CodecEngine,
    filename: &str,
    source: &ParamSource,
) -> Result<Vec<u8>, PipelineError> {
    let mut request = decode::decode(source)?;
    defaults::overlay(&mut request, &options.defaults);

    let path = resolve_source(&options.dir, filename, &options.ext);
    let bytes = fs::read(&path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PipelineError::ImageNotFound(path.clone()),
        _ => PipelineError::Io(e),
    })?;

    let mut job = engine.open(bytes)?;
    apply(&mut job, &request);
    Ok(job.into_bytes()?)
}
