use thiserror::Error;

/// Errors surfaced by the extraction pipeline and its writers.
///
/// Missing fields, unparseable dates and documents without any records are
/// not errors; they show up as absent values or empty outputs instead.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("document nesting exceeds the depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv output failed: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HistoryError>;
