//! Errors at the fallible edges of the canvas
//!
//! Drawing, viewing and compositing never fail. Parsing configuration and
//!   colors, and reading or writing images, can

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid color {0:?}, expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, Error>;
