use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No API key provided")]
    MissingCredential,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Completion API error: {0}")]
    Api(String),

    #[error("Completion timed out after {0} seconds")]
    Timeout(u64),

    /// The response text could not be read as CSV. Carries the raw response
    /// so callers can show it to the user for diagnosis.
    #[error("Response is not parseable as CSV: {message}")]
    Parse { message: String, raw: String },

    /// The response parsed as CSV but with the wrong column count.
    #[error("Expected {expected} columns, found {found} at row {row}")]
    ColumnCount {
        expected: usize,
        found: usize,
        row: usize,
        raw: String,
    },

    #[error("Report contained no data rows")]
    Empty,

    #[error("Invalid report request: {0}")]
    Request(#[from] sist_models::RequestError),
}
