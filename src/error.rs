use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// QueryError – every way a query run can fail
// ---------------------------------------------------------------------------

/// Errors raised while loading a table or evaluating a query against it.
///
/// No stage recovers from these: the first error aborts the pipeline and is
/// reported once by the caller.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The input file is missing or cannot be opened.
    #[error("cannot read {}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file was readable but could not be decoded.
    #[error("malformed input {}", .path.display())]
    MalformedSource {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// Filter, sort or aggregation expression without a recognised separator.
    #[error("invalid expression: {0}")]
    InvalidExpression(String),

    #[error("column not found: {0}")]
    MissingColumn(String),

    #[error("cannot compare non-numeric value '{value}' in column '{column}'")]
    NonNumericComparison { column: String, value: String },

    #[error("unsupported sort direction '{0}', expected 'asc' or 'desc'")]
    InvalidSortDirection(String),

    #[error("cannot aggregate non-numeric column: {0}")]
    NonNumericColumn(String),

    #[error("unknown aggregation operation: {0}")]
    UnknownAggregation(String),
}

impl QueryError {
    pub(crate) fn malformed<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        QueryError::MalformedSource {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
