use thiserror::Error;

/// Reasons a statement could not be synthesized from its records.
///
/// These are raised before anything reaches the data store, so they are cheap to
/// clone and compare; a [`crate::batch::Batch`] keeps them per job.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    #[error("record types differ: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{table}: statement has no WHERE fields and no raw condition")]
    NoWhereClause { table: &'static str },

    #[error("{table}: record has no fields to write")]
    NoSetColumns { table: &'static str },

    #[error("INSERT mixes record types: {expected} and {found}")]
    HeterogeneousBatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("there is no data for INSERT")]
    EmptyInsert,

    #[error("{table}: INSERT row {row} sets different fields than the first row")]
    MismatchedColumns { table: &'static str, row: usize },

    #[error("{table}.{field} is not numeric and cannot be incremented")]
    NonNumericIncrement {
        table: &'static str,
        field: &'static str,
    },

    #[error("{table}.{field} is not set and is not nullable")]
    IncompleteRecord {
        table: &'static str,
        field: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum SqlRecordError {
    #[error(transparent)]
    Statement(#[from] StatementError),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("batch refused to run; {} job(s) failed to build", failures.len())]
    BatchBuildFailed {
        /// Job index (1-based, in add order) and the error that job produced.
        failures: Vec<(usize, StatementError)>,
    },

    #[error("batch has no jobs")]
    EmptyBatch,

    #[error("cannot decode column {column} of {table}: {message}")]
    Decode {
        table: &'static str,
        column: &'static str,
        message: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parameter conversion error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}

impl SqlRecordError {
    /// The build-time error behind this value, if it is one.
    #[must_use]
    pub fn as_statement_error(&self) -> Option<&StatementError> {
        match self {
            SqlRecordError::Statement(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SqlRecordError {
    fn from(err: serde_json::Error) -> Self {
        SqlRecordError::ConfigError(err.to_string())
    }
}
