//! Crate-level error type and `Result` alias.
//! Wraps I/O, codec and config failures, and names the ways a single image
//! can be rejected: remover failure, empty foreground, or an unusable crop window.
use thiserror::Error;

use crate::core::processing::crop::CropRect;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Background remover '{remover}' failed: {reason}")]
    Model { remover: String, reason: String },

    #[error("No foreground mass left after background removal ({width}x{height} image)")]
    DegenerateMass { width: u32, height: u32 },

    #[error("Crop rectangle {rect} is not usable on a {width}x{height} image")]
    Bounds { rect: CropRect, width: u32, height: u32 },

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Resize error: {0}")]
    Resize(String),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },
}

impl Error {
    pub fn model<E: std::fmt::Display>(remover: &str, e: E) -> Self {
        Error::Model {
            remover: remover.to_string(),
            reason: e.to_string(),
        }
    }

    pub fn resize<E: std::fmt::Display>(e: E) -> Self {
        Error::Resize(e.to_string())
    }
}
