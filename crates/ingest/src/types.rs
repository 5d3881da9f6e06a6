use std::io;

/// Errors emitted by the tracking log pipeline. Appends are best-effort:
/// a failed write loses the event and is never retried.
#[derive(Debug)]
pub enum TrackError {
    WriteFailed(io::Error),
    ReadFailed(io::Error),
}

impl std::fmt::Display for TrackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WriteFailed(err) => write!(f, "tracking write failed: {}", err),
            Self::ReadFailed(err) => write!(f, "log read failed: {}", err),
        }
    }
}

impl std::error::Error for TrackError {}

pub type Result<T> = std::result::Result<T, TrackError>;
