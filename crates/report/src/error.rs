use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid filter input: {0}")]
    InvalidFilterInput(String),
    #[error(transparent)]
    Track(#[from] timelog_ingest::TrackError),
}

pub type Result<T> = std::result::Result<T, ReportError>;
