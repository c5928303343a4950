/// Module containing the error types for wavmap
use thiserror::Error;

pub type WavmapResult<T> = Result<T, WavmapError>;

/// Error types for wavmap
#[derive(Error, Debug)]
pub enum WavmapError {
    /// Bad magic, chunk ordering violation or a truncated chunk.
    #[error("Malformed container: {0}")]
    MalformedContainer(String),
    /// Bad bit depth, unrecognised format tag or a type that cannot be stored.
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),
    /// The operation is not permitted by the mode the file was opened with.
    #[error("Mode violation: {0}")]
    ModeViolation(String),
    #[error("Cannot append without overwriting other chunks")]
    AppendConflict,
    #[error("Invalid type specified: {0}")]
    InvalidType(String),
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("Invalid wav spec: {0}")]
    InvalidSpec(String),
    #[error("IO error with file")]
    IOError(#[from] std::io::Error),
    #[cfg(feature = "ndarray")]
    #[error("IO error with ndarray")]
    NdArrayError(#[from] ndarray::ShapeError),
}
