use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Query configuration
// ---------------------------------------------------------------------------

/// Everything one query run needs. Built by the caller (the CLI or a test)
/// and passed into [`crate::pipeline`]; nothing is read from process state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryConfig {
    /// Table to load.
    pub file: PathBuf,
    /// Filter expression, e.g. `rating>4.5`.
    pub filter: Option<String>,
    /// Sort expression, e.g. `price=desc`.
    pub order_by: Option<String>,
    /// Aggregation expression, e.g. `price=avg`.
    pub aggregate: Option<String>,
}

impl QueryConfig {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, expression: impl Into<String>) -> Self {
        self.filter = Some(expression.into());
        self
    }

    pub fn with_order_by(mut self, expression: impl Into<String>) -> Self {
        self.order_by = Some(expression.into());
        self
    }

    pub fn with_aggregate(mut self, expression: impl Into<String>) -> Self {
        self.aggregate = Some(expression.into());
        self
    }
}
