//! End-to-end pipeline tests with the real codec engine.
//!
//! Synthetic source images are written to a temp directory and rendered
//! through `pipeline::render` with `ImageEngine`, then the output bytes
//! are decoded again to check dimensions and container format.

use imgpress::config::{HandlerOptions, ParamsMode};
use imgpress::decode::ParamSource;
use imgpress::engine::ImageEngine;
use imgpress::pipeline::{self, PipelineError};
use std::path::PathBuf;
use tempfile::TempDir;

/// Write a small synthetic JPEG into `dir` and return handler options
/// pointing at it.
fn setup(width: u32, height: u32) -> (TempDir, HandlerOptions) {
    let tmp = TempDir::new().unwrap();
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save(tmp.path().join("photo.jpg")).unwrap();
    let options = HandlerOptions {
        dir: tmp.path().to_path_buf(),
        ..HandlerOptions::default()
    };
    (tmp, options)
}

fn route(params: &str) -> ParamSource {
    ParamSource::Route(params.to_string())
}

#[test]
fn resize_and_reformat_from_a_route_segment() {
    let (_tmp, options) = setup(400, 300);
    let engine = ImageEngine::new();

    let bytes = pipeline::render(&options, &engine, "photo", &route("S120x90Fw")).unwrap();

    assert_eq!(
        image::guess_format(&bytes).unwrap(),
        image::ImageFormat::WebP
    );
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (120, 90));
}

#[test]
fn extensionless_filename_uses_the_configured_default() {
    let (_tmp, options) = setup(64, 48);
    let engine = ImageEngine::new();

    // Same file, with and without extension
    let with_ext = pipeline::render(&options, &engine, "photo.jpg", &ParamSource::None).unwrap();
    let without = pipeline::render(&options, &engine, "photo", &ParamSource::None).unwrap();
    assert_eq!(with_ext, without);
}

#[test]
fn quality_only_params_reencode_as_jpeg() {
    let (_tmp, options) = setup(64, 48);
    let engine = ImageEngine::new();

    let bytes = pipeline::render(&options, &engine, "photo", &route("Q70")).unwrap();
    assert_eq!(
        image::guess_format(&bytes).unwrap(),
        image::ImageFormat::Jpeg
    );
}

#[test]
fn height_only_params_scale_by_aspect_ratio() {
    let (_tmp, options) = setup(400, 200);
    let engine = ImageEngine::new();

    let bytes = pipeline::render(&options, &engine, "photo", &route("H100")).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (200, 100));
}

#[test]
fn raw_output_is_packed_pixels() {
    let (_tmp, options) = setup(20, 10);
    let engine = ImageEngine::new();

    let bytes = pipeline::render(&options, &engine, "photo", &route("Fr")).unwrap();
    assert_eq!(bytes.len(), 20 * 10 * 3);
}

#[test]
fn missing_image_is_image_not_found() {
    let (_tmp, options) = setup(16, 16);
    let engine = ImageEngine::new();

    let err = pipeline::render(&options, &engine, "absent", &ParamSource::None).unwrap_err();
    assert!(matches!(err, PipelineError::ImageNotFound(_)));
}

#[test]
fn config_defaults_apply_in_none_mode() {
    let (tmp, _) = setup(400, 300);
    let config_path = tmp.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
            dir = {dir:?}
            params = "none"

            [defaults.size]
            width = 100
            height = 75

            [defaults.format]
            type = "png"
            "#,
            dir = tmp.path().to_str().unwrap(),
        ),
    )
    .unwrap();

    let options = HandlerOptions::load(&config_path).unwrap();
    assert_eq!(options.params, ParamsMode::None);
    assert_eq!(options.dir, PathBuf::from(tmp.path()));

    let engine = ImageEngine::new();
    let source = options.param_source(None, &[]);
    let bytes = pipeline::render(&options, &engine, "photo", &source).unwrap();

    assert_eq!(
        image::guess_format(&bytes).unwrap(),
        image::ImageFormat::Png
    );
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (100, 75));
}
