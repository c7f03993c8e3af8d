//! Configured transform defaults.
//!
//! Defaults fill in only what decoding left *entirely* unset: the overlay
//! is all-or-nothing per top-level field, never a per-leaf merge. A request
//! that set only `resize.width` keeps its half-filled resize exactly as
//! decoded and receives no default height.

use crate::request::{OutputFormat, ResizeSpec, TransformRequest};
use serde::{Deserialize, Serialize};

/// Fallback transform settings supplied by configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ResizeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

impl TransformDefaults {
    pub fn is_empty(&self) -> bool {
        self.size.is_none() && self.format.is_none()
    }
}

/// Overlay defaults onto a decoded request.
pub fn overlay(request: &mut TransformRequest, defaults: &TransformDefaults) {
    if request.resize.is_none() {
        request.resize = defaults.size;
    }
    if request.format.is_none() {
        request.format = defaults.format;
    }
}
