//! Compact parameter decoding.
//!
//! Turns a URL-embeddable parameter encoding into a normalized
//! [`TransformRequest`] through three stages, each its own module:
//!
//! | Stage | Module | Role |
//! |-------|--------|------|
//! | 1. Tokenize | `scan` | compact string or key/value map → ordered raw tokens |
//! | 2. Reduce | `reduce` | first occurrence wins per key |
//! | 3. Dispatch | `dispatch` | validated per-field setters with explicit update policies |
//!
//! The grammar packs a whole transform into one path segment:
//!
//! ```text
//! /S300x200Fw/photo.jpg   →  resize 300x200, encode as webp
//! /H15W20Q90/photo.jpg    →  resize 20x15, quality 90
//! ```
//!
//! The same decoder accepts flat query-style maps (`?f=w&q=90`), normalized
//! to the identical token shape, so both URL styles decode through one code
//! path. Decoding is pure and allocates everything per call; it is safe to
//! run concurrently with no coordination.
//!
//! Malformed values degrade gracefully: a field that fails validation is
//! left unset and the rest of the input still applies. Unknown keys are a
//! hard error, since they indicate an unsupported or garbled encoding.
//!
//! # Example
//!
//! ```
//! use imgpress::decode::{decode, ParamSource};
//! use imgpress::request::FormatName;
//!
//! let request = decode(&ParamSource::Route("S300x200Fw".to_string())).unwrap();
//! let resize = request.resize.unwrap();
//! assert_eq!(resize.width, Some(300));
//! assert_eq!(resize.height, Some(200));
//! assert_eq!(request.format.unwrap().name, Some(FormatName::Webp));
//! ```

mod dispatch;
mod reduce;
mod scan;

use crate::request::TransformRequest;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// A parameter key has no registered setter. Fatal for the decode:
    /// silently ignoring it would mask garbled encodings.
    #[error("unknown parameter key: {key:?}")]
    UnknownKey { key: String },
}

/// Where transform parameters come from for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamSource {
    /// A single path segment carrying the compact encoding.
    Route(String),
    /// Flat key/value pairs (e.g. query parameters), in insertion order.
    Query(Vec<(String, String)>),
    /// No parameters; only configured defaults apply.
    None,
}

/// Decode a parameter source into a transform request.
///
/// The result may be partially populated (or empty); overlaying configured
/// defaults is the caller's next step, see [`crate::defaults::overlay`].
pub fn decode(source: &ParamSource) -> Result<TransformRequest, DecodeError> {
    let tokens = scan::tokenize(source);
    let reduced = reduce::reduce(tokens);
    dispatch::dispatch(reduced)
}
