use std::fmt;

use thiserror::Error;

/// The pipeline step a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Decoding,
    Resizing,
    Encoding,
    Storing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetching => "fetching",
            Stage::Decoding => "decoding",
            Stage::Resizing => "resizing",
            Stage::Encoding => "encoding",
            Stage::Storing => "storing",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum JobErrorKind {
    #[error("source object not found")]
    NotFound,
    #[error("read from object store failed: {0}")]
    Read(String),
    #[error("image decode failed: {0}")]
    Decode(String),
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),
    #[error("jpeg encode failed: {0}")]
    Encode(String),
    #[error("write to object store failed: {0}")]
    Write(String),
}

impl JobErrorKind {
    /// Machine-readable category for the HTTP error body.
    pub fn category(&self) -> &'static str {
        match self {
            JobErrorKind::NotFound => "NotFound",
            JobErrorKind::Read(_) => "ReadError",
            JobErrorKind::Decode(_) => "DecodeError",
            JobErrorKind::InvalidDimensions(_) => "InvalidDimensions",
            JobErrorKind::Encode(_) => "EncodeError",
            JobErrorKind::Write(_) => "WriteError",
        }
    }

    /// Transient infrastructure faults are worth another delivery. A missing
    /// source, a corrupt image, or a degenerate raster will fail the same way
    /// every time.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            JobErrorKind::Read(_) | JobErrorKind::Encode(_) | JobErrorKind::Write(_)
        )
    }
}

/// A pipeline failure, tagged with the stage it occurred in.
#[derive(Debug, Error)]
#[error("{stage} stage failed: {kind}")]
pub struct JobError {
    pub stage: Stage,
    pub kind: JobErrorKind,
}

impl JobError {
    pub fn new(stage: Stage, kind: JobErrorKind) -> Self {
        Self { stage, kind }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
