use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShadowError {
    #[error("Image file not found at {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Image loading error: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image has no pixels")]
    EmptyImage,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),
}

/// Coarse classification of a per-image failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    FileNotFound,
    DecodeOrProcessing,
}

impl ShadowError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ShadowError::FileNotFound(_) => FailureKind::FileNotFound,
            ShadowError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                FailureKind::FileNotFound
            }
            ShadowError::ImageLoad(image::ImageError::IoError(e))
                if e.kind() == std::io::ErrorKind::NotFound =>
            {
                FailureKind::FileNotFound
            }
            _ => FailureKind::DecodeOrProcessing,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShadowError>;
