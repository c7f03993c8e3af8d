//! Pure Rust codec engine on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Cover resize (both sides given) | `image::DynamicImage::resize_to_fill`, Lanczos3 |
//! | Aspect resize (one side given) | `image::DynamicImage::resize_exact`, Lanczos3 |
//! | Encode → JPEG | `JpegEncoder::new_with_quality` |
//! | Encode → AVIF | `AvifEncoder::new_with_speed_quality` (rav1e, speed 6) |
//! | Encode → PNG / WebP (lossless) / GIF / TIFF | respective `image` encoders |
//! | `raw` output | interleaved RGB8 pixels, no container |
//!
//! HEIF has no pure-Rust encoder and is reported as unsupported. The `jpg`
//! fallback name is accepted as a jpeg alias, as downstream codecs have
//! always treated it.

use super::backend::{CodecEngine, EngineError, TransformJob};
use crate::request::{FormatName, FormatOptions, ResizeSpec};
use image::codecs::avif::AvifEncoder;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tiff::TiffEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageFormat};
use std::io::Cursor;

/// AVIF encoder speed preset; a reasonable quality/throughput balance.
const AVIF_SPEED: u8 = 6;

/// Encoder quality when a format that wants one was requested without it.
const DEFAULT_QUALITY: u32 = 80;

/// Pure Rust engine using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct ImageEngine;

impl ImageEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// In-flight transform over one decoded source image.
pub struct ImageJob {
    image: DynamicImage,
    source_format: ImageFormat,
    output: Option<(FormatName, Option<FormatOptions>)>,
}

impl CodecEngine for ImageEngine {
    type Job = ImageJob;

    fn open(&self, source: Vec<u8>) -> Result<ImageJob, EngineError> {
        let source_format = image::guess_format(&source)
            .map_err(|e| EngineError::Decode(format!("unrecognized image container: {e}")))?;
        let image = image::load_from_memory_with_format(&source, source_format)
            .map_err(|e| EngineError::Decode(e.to_string()))?;
        Ok(ImageJob {
            image,
            source_format,
            output: None,
        })
    }
}

impl TransformJob for ImageJob {
    fn resize(&mut self, spec: &ResizeSpec) {
        let (source_w, source_h) = (self.image.width(), self.image.height());
        self.image = match (spec.width, spec.height) {
            // Both sides: cover-fit, cropping the overflow
            (Some(w), Some(h)) => self.image.resize_to_fill(w, h, FilterType::Lanczos3),
            (Some(w), None) => {
                let h = scaled_side(source_h, source_w, w);
                self.image.resize_exact(w, h, FilterType::Lanczos3)
            }
            (None, Some(h)) => {
                let w = scaled_side(source_w, source_h, h);
                self.image.resize_exact(w, h, FilterType::Lanczos3)
            }
            (None, None) => return,
        };
    }

    fn set_output_format(&mut self, format: FormatName, options: Option<FormatOptions>) {
        self.output = Some((format, options));
    }

    fn into_bytes(self) -> Result<Vec<u8>, EngineError> {
        let Some((format, options)) = self.output else {
            // No format requested: re-encode to the source container
            let mut bytes = Cursor::new(Vec::new());
            self.image
                .write_to(&mut bytes, self.source_format)
                .map_err(|e| EngineError::Encode(e.to_string()))?;
            return Ok(bytes.into_inner());
        };

        let quality = options
            .and_then(|o| o.quality)
            .unwrap_or(DEFAULT_QUALITY)
            .clamp(1, 100) as u8;
        let mut bytes = Cursor::new(Vec::new());

        match format {
            FormatName::Jpeg | FormatName::Jpg => {
                // JPEG has no alpha channel
                let rgb = DynamicImage::ImageRgb8(self.image.into_rgb8());
                rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, quality))
                    .map_err(|e| EngineError::Encode(e.to_string()))?;
            }
            FormatName::Png => {
                self.image
                    .write_with_encoder(PngEncoder::new(&mut bytes))
                    .map_err(|e| EngineError::Encode(e.to_string()))?;
            }
            FormatName::Webp => {
                self.image
                    .write_with_encoder(WebPEncoder::new_lossless(&mut bytes))
                    .map_err(|e| EngineError::Encode(e.to_string()))?;
            }
            FormatName::Gif => {
                let rgba = self.image.into_rgba8();
                let (w, h) = rgba.dimensions();
                GifEncoder::new(&mut bytes)
                    .encode(rgba.as_raw(), w, h, ExtendedColorType::Rgba8)
                    .map_err(|e| EngineError::Encode(e.to_string()))?;
            }
            FormatName::Tiff => {
                self.image
                    .write_with_encoder(TiffEncoder::new(&mut bytes))
                    .map_err(|e| EngineError::Encode(e.to_string()))?;
            }
            FormatName::Avif => {
                self.image
                    .write_with_encoder(AvifEncoder::new_with_speed_quality(
                        &mut bytes, AVIF_SPEED, quality,
                    ))
                    .map_err(|e| EngineError::Encode(e.to_string()))?;
            }
            FormatName::Raw => return Ok(self.image.into_rgb8().into_raw()),
            FormatName::Heif => return Err(EngineError::UnsupportedFormat("heif")),
        }

        Ok(bytes.into_inner())
    }
}

/// Scale `side` by `target / reference`, keeping at least one pixel.
fn scaled_side(side: u32, reference: u32, target: u32) -> u32 {
    let scaled = (side as f64 * target as f64 / reference as f64).round() as u32;
    scaled.max(1)
}
