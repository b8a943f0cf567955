//! The seam between statement synthesis and a database driver.

use crate::error::SqlRecordError;
use crate::results::ResultSet;
use crate::statement::Statement;

/// What a write statement reports back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Rows changed, or `None` when the driver cannot tell.
    pub rows_affected: Option<u64>,
    /// Row id assigned by the last insert, when the driver tracks one.
    pub last_insert_id: Option<i64>,
}

/// A caller-owned connection that statements run against.
///
/// Executors and batches borrow a handle; they never open or close it.
pub trait DbHandle {
    /// Run a statement that returns rows.
    ///
    /// # Errors
    /// Returns the driver's error unchanged.
    fn query(&mut self, statement: &Statement) -> Result<ResultSet, SqlRecordError>;

    /// Run a statement that changes rows.
    ///
    /// # Errors
    /// Returns the driver's error unchanged.
    fn execute(&mut self, statement: &Statement) -> Result<ExecOutcome, SqlRecordError>;

    /// # Errors
    /// Returns the driver's error unchanged.
    fn begin(&mut self) -> Result<(), SqlRecordError>;

    /// # Errors
    /// Returns the driver's error unchanged.
    fn commit(&mut self) -> Result<(), SqlRecordError>;

    /// # Errors
    /// Returns the driver's error unchanged.
    fn rollback(&mut self) -> Result<(), SqlRecordError>;
}
