//! Transform request types shared between the decoder, configuration
//! defaults, and the codec engine.
//!
//! A [`TransformRequest`] describes *what* to do to an image, never *how*.
//! It is built up field by field by the decoder, padded out by configured
//! defaults, and finally handed to a codec engine which performs the pixel
//! work. All fields are optional: an empty request is valid and means
//! "serve the image as-is".

use serde::{Deserialize, Serialize};

/// Canonical output format names, plus the `jpg` fallback emitted for
/// format codes not in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatName {
    Jpeg,
    Png,
    Webp,
    Gif,
    Tiff,
    Avif,
    Heif,
    Raw,
    /// Not a canonical format: unrecognized single-letter codes decode to
    /// this. Existing URLs depend on it, so it stays distinct from
    /// [`FormatName::Jpeg`] and serializes as `"jpg"`.
    Jpg,
}

impl FormatName {
    /// Look up a single-letter format code.
    ///
    /// Only exact one-letter codes match; anything else returns `None` and
    /// the caller decides the fallback.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "j" => Some(Self::Jpeg),
            "p" => Some(Self::Png),
            "w" => Some(Self::Webp),
            "g" => Some(Self::Gif),
            "t" => Some(Self::Tiff),
            "a" => Some(Self::Avif),
            "h" => Some(Self::Heif),
            "r" => Some(Self::Raw),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Gif => "gif",
            Self::Tiff => "tiff",
            Self::Avif => "avif",
            Self::Heif => "heif",
            Self::Raw => "raw",
            Self::Jpg => "jpg",
        }
    }
}

/// Target dimensions for a resize.
///
/// Either side may be absent: a lone `H15` parameter yields a height-only
/// spec, and the codec derives the missing side from the source aspect
/// ratio. The `s` parameter always writes both sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Encoder options for the output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u32>,
}

/// Requested output format.
///
/// `name` may be unset when only encoder options were given (a lone `Q90`);
/// an unset name applies as jpeg at the codec boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputFormat {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub name: Option<FormatName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<FormatOptions>,
}

/// The normalized description of a resize/reformat operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize: Option<ResizeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

impl TransformRequest {
    /// True when decoding populated nothing.
    pub fn is_empty(&self) -> bool {
        self.resize.is_none() && self.format.is_none()
    }
}
