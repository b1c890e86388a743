use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors raised while locating and reading a plate.
///
/// A photograph without a plate is not an error; see [`crate::models::Outcome`].
#[derive(Error, Debug)]
pub enum LprError {
    #[error("Image not found: {}", path.display())]
    ImageNotFound { path: PathBuf },

    #[error("Failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The plate quadrilateral covers no pixel of the image.
    #[error("Plate region is empty: the detected contour encloses no pixels")]
    EmptyRegion,

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error("Failed to write debug output to {}: {message}", path.display())]
    DebugOutput { path: PathBuf, message: String },
}

/// Failures of the external OCR engine.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The engine could not be started at all: missing binary, bad path, no permission.
    #[error("OCR engine unavailable at '{}': {source}", executable.display())]
    Unavailable {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("OCR engine exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("Failed to encode plate image for OCR: {0}")]
    Encode(#[source] image::ImageError),

    #[error("I/O error talking to OCR engine: {0}")]
    Io(#[source] std::io::Error),
}

/// Fieldless tag for each [`LprError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    DecodeError,
    EmptyRegion,
    /// Engine missing or misconfigured on the host.
    OcrEngineUnavailable,
    /// Engine ran but failed.
    OcrEngineError,
    DebugOutput,
}

impl LprError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LprError::ImageNotFound { .. } => ErrorKind::FileNotFound,
            LprError::Decode { .. } => ErrorKind::DecodeError,
            LprError::EmptyRegion => ErrorKind::EmptyRegion,
            LprError::Ocr(OcrError::Unavailable { .. }) => ErrorKind::OcrEngineUnavailable,
            LprError::Ocr(_) => ErrorKind::OcrEngineError,
            LprError::DebugOutput { .. } => ErrorKind::DebugOutput,
        }
    }
}

pub type Result<T, E = LprError> = std::result::Result<T, E>;
