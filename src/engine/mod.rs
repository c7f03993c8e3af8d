//! Codec engine boundary.
//!
//! The module is split into:
//! - **Backend**: [`CodecEngine`] / [`TransformJob`] traits, [`apply`], and
//!   the recording mock used by tests
//! - **Image engine**: the production [`ImageEngine`] on the `image` crate

pub mod backend;
pub mod image_engine;

pub use backend::{CodecEngine, EngineError, TransformJob, apply};
pub use image_engine::ImageEngine;
