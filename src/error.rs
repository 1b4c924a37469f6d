use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Unsupported file type")]
    UnsupportedFormat,

    #[error("Invalid image dimensions: {0}x{1}. Maximum allowed: {2}x{2}")]
    InvalidDimensions(u32, u32, u32),

    #[error("File too large: {0} bytes. Maximum allowed: {1} bytes")]
    FileTooLarge(u64, u64),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid max size: {0:?}. Must be a number greater than 0")]
    InvalidMaxSize(String),

    #[error("Invalid max width or height: {0:?}. Must be an integer of at least {1}")]
    InvalidMaxWidthOrHeight(String, u32),

    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Compression task failed: {0}")]
    Task(String),

    #[error("No compressed image available")]
    NoOutput,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CompressionError>;
