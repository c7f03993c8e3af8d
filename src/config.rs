//! Handler configuration.
//!
//! Loading and validating the handler options file. All keys are optional;
//! user config files need only specify the values they want to override.
//! Unknown keys are rejected to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! ext = ".jpg"       # Extension for request filenames that lack one
//! dir = "./images"   # Directory resolved against request filenames
//! params = "route"   # Parameter source: "route", "query" or "none"
//!
//! # Transform defaults, applied per top-level field only when a request
//! # left that field entirely unset
//! [defaults.size]
//! width = 800
//! height = 600
//!
//! [defaults.format]
//! type = "webp"
//!
//! [defaults.format.options]
//! quality = 80
//! ```

use crate::decode::ParamSource;
use crate::defaults::TransformDefaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Where each request's transform parameters are read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamsMode {
    /// A path segment carries the compact encoding.
    #[default]
    Route,
    /// Flat key/value query parameters.
    Query,
    /// Requests carry no parameters; only defaults apply.
    None,
}

/// Handler options loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HandlerOptions {
    /// Extension appended to request filenames that lack one. Normalized
    /// on load, see [`normalize_ext`].
    pub ext: String,
    /// Directory resolved against request filenames.
    pub dir: PathBuf,
    /// Parameter source mode.
    pub params: ParamsMode,
    /// Transform defaults for fields requests leave unset.
    pub defaults: TransformDefaults,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            ext: ".jpg".to_string(),
            dir: PathBuf::from("./images"),
            params: ParamsMode::default(),
            defaults: TransformDefaults::default(),
        }
    }
}

impl HandlerOptions {
    /// Load options from a TOML file, normalizing and validating them.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let mut options: Self = toml::from_str(&raw)?;
        options.ext = normalize_ext(&options.ext);
        options.validate()?;
        Ok(options)
    }

    /// Validate configured defaults are usable transform values.
    ///
    /// Requests are tolerant of garbage (bad fields drop out), but the
    /// config file is under the operator's control and fails loudly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(size) = &self.defaults.size {
            if size.width == Some(0) || size.height == Some(0) {
                return Err(ConfigError::Validation(
                    "defaults.size dimensions must be non-zero".into(),
                ));
            }
        }
        if let Some(quality) = self
            .defaults
            .format
            .as_ref()
            .and_then(|f| f.options)
            .and_then(|o| o.quality)
        {
            if !(1..=100).contains(&quality) {
                return Err(ConfigError::Validation(
                    "defaults.format.options.quality must be 1-100".into(),
                ));
            }
        }
        Ok(())
    }

    /// Build the parameter source for one request per the configured mode.
    ///
    /// `route_segment` is the path segment preceding the filename, if the
    /// URL had one; `query` is the flat query map in insertion order. The
    /// mode decides which of the two is consulted.
    pub fn param_source(
        &self,
        route_segment: Option<&str>,
        query: &[(String, String)],
    ) -> ParamSource {
        match self.params {
            ParamsMode::Route => match route_segment {
                Some(segment) => ParamSource::Route(segment.to_string()),
                None => ParamSource::None,
            },
            ParamsMode::Query => ParamSource::Query(query.to_vec()),
            ParamsMode::None => ParamSource::None,
        }
    }
}

/// Normalize a configured extension to a `.ext` form.
///
/// Accepts `".jpg"` or `"jpg"` shapes of 3-4 letters (matched
/// case-insensitively); anything else falls back to `.jpg`.
pub fn normalize_ext(value: &str) -> String {
    let v = value.trim().to_ascii_lowercase();
    if is_bare_ext(v.strip_prefix('.').unwrap_or(&v)) {
        if v.starts_with('.') { v } else { format!(".{v}") }
    } else {
        ".jpg".to_string()
    }
}

fn is_bare_ext(v: &str) -> bool {
    (3..=4).contains(&v.len()) && v.bytes().all(|b| b.is_ascii_lowercase())
}

/// Stock config with all options documented. Printed by `gen-config`.
pub const STOCK_CONFIG: &str = r#"# imgpress handler configuration.
# All keys are optional - defaults shown below.

# Extension appended to request filenames that lack one.
# Accepts ".jpg" or "jpg" forms of 3-4 letters; anything else falls back
# to ".jpg".
ext = ".jpg"

# Directory resolved against request filenames.
dir = "./images"

# Where transform parameters come from:
#   "route" - a path segment carries the compact encoding
#             (e.g. /S300x200Fw/photo.jpg)
#   "query" - flat key/value query parameters (e.g. ?f=w&q=90)
#   "none"  - requests carry no parameters; only defaults apply
params = "route"

# Transform defaults for fields a request leaves unset. Each block is
# adopted wholesale: `size` only when the request set no resize at all,
# `format` only when it set no format at all.
#
# [defaults.size]
# width = 800
# height = 600
#
# [defaults.format]
# type = "webp"          # jpeg|png|webp|gif|tiff|avif|heif|raw
#
# [defaults.format.options]
# quality = 80           # 1-100
"#;
