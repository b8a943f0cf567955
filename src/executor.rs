//! Runs synthesized statements against a [`DbHandle`] and decodes the rows.

use crate::config::{BuilderOptions, StatementLog};
use crate::error::SqlRecordError;
use crate::handle::{DbHandle, ExecOutcome};
use crate::record::introspect::{ensure_complete, ensure_same_columns};
use crate::record::{AnyRecord, Record};
use crate::results::ResultSet;
use crate::statement::{Statement, StatementBuilder};

mod composite;

/// Result of an insert whose key columns may be assigned by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertOutcome {
    pub rows_affected: u64,
    /// Row id of the last inserted row, when the driver reports one.
    pub last_insert_id: Option<i64>,
}

/// Builds and runs statements over a borrowed handle.
///
/// The executor never opens, closes or pools connections; the caller owns the
/// handle and its lifetime.
pub struct Executor<'h, H: DbHandle + ?Sized> {
    handle: &'h mut H,
    builder: StatementBuilder,
}

impl<'h, H: DbHandle + ?Sized> Executor<'h, H> {
    pub fn new(handle: &'h mut H) -> Self {
        Self::with_options(handle, BuilderOptions::default())
    }

    pub fn with_options(handle: &'h mut H, options: BuilderOptions) -> Self {
        Self {
            handle,
            builder: StatementBuilder::new(options),
        }
    }

    #[must_use]
    pub fn builder(&self) -> StatementBuilder {
        self.builder
    }

    /// Read rows of `R`.
    ///
    /// Only the set fields of `target` are read back (all fields when none is
    /// set); every other field of the returned records stays unset.
    ///
    /// # Errors
    /// `SqlRecordError::Statement` if the SELECT cannot be built, the driver's
    /// error if it fails, `SqlRecordError::Decode` if a column does not fit its
    /// field.
    pub fn select<R: Record>(
        &mut self,
        target: &R,
        filter: &R,
        raw: Option<&str>,
    ) -> Result<Vec<R>, SqlRecordError> {
        let statement = self.builder.select(target, filter, raw)?;
        log_statement(self.builder.options(), &statement);
        let result_set = self.handle.query(&statement)?;
        decode_rows(&statement, &result_set)
    }

    /// Insert fully populated records in one statement.
    ///
    /// Every field that is not `nullable` must be set on every record, and every
    /// record must set the same fields; otherwise nothing is sent.
    ///
    /// # Errors
    /// `StatementError::IncompleteRecord` for a missing field,
    /// `StatementError::MismatchedColumns` when records set different fields, any
    /// other build error, or the driver's error.
    pub fn insert<R: Record>(&mut self, records: &[R]) -> Result<u64, SqlRecordError> {
        Ok(self.insert_checked(records, false)?.rows_affected)
    }

    /// Like [`Executor::insert`], but primary-key fields may be left unset for
    /// the store to assign.
    ///
    /// # Errors
    /// Same as [`Executor::insert`].
    pub fn insert_auto_increment<R: Record>(
        &mut self,
        records: &[R],
    ) -> Result<InsertOutcome, SqlRecordError> {
        self.insert_checked(records, true)
    }

    fn insert_checked<R: Record>(
        &mut self,
        records: &[R],
        exempt_primary_key: bool,
    ) -> Result<InsertOutcome, SqlRecordError> {
        for record in records {
            ensure_complete(record, exempt_primary_key)?;
        }
        self.insert_unchecked(records)
    }

    fn insert_unchecked<R: Record>(
        &mut self,
        records: &[R],
    ) -> Result<InsertOutcome, SqlRecordError> {
        let erased: Vec<&dyn AnyRecord> = records.iter().map(|r| r as &dyn AnyRecord).collect();
        ensure_same_columns(&erased)?;
        let statement = self.builder.insert(&erased)?;
        let outcome = run_write(&mut *self.handle, &statement, self.builder.options())?;
        Ok(InsertOutcome {
            rows_affected: rows_affected(&statement, outcome),
            last_insert_id: outcome.last_insert_id,
        })
    }

    /// # Errors
    /// Build errors or the driver's error.
    pub fn update<R: Record>(
        &mut self,
        target: &R,
        filter: &R,
        raw: Option<&str>,
    ) -> Result<u64, SqlRecordError> {
        let statement = self.builder.update(target, filter, raw)?;
        self.write(&statement)
    }

    /// # Errors
    /// Build errors or the driver's error.
    pub fn delete<R: Record>(&mut self, filter: &R, raw: Option<&str>) -> Result<u64, SqlRecordError> {
        let statement = self.builder.delete(filter, raw)?;
        self.write(&statement)
    }

    /// # Errors
    /// Build errors or the driver's error.
    pub fn upsert<R: Record>(&mut self, record: &R) -> Result<u64, SqlRecordError> {
        let statement = self.builder.upsert(record)?;
        self.write(&statement)
    }

    /// # Errors
    /// Build errors or the driver's error.
    pub fn increment<R: Record>(
        &mut self,
        target: &R,
        filter: &R,
        delta: i64,
        raw: Option<&str>,
    ) -> Result<u64, SqlRecordError> {
        let statement = self.builder.increment(target, filter, delta, raw)?;
        self.write(&statement)
    }

    /// # Errors
    /// Build errors or the driver's error.
    pub fn decrement<R: Record>(
        &mut self,
        target: &R,
        filter: &R,
        delta: i64,
        raw: Option<&str>,
    ) -> Result<u64, SqlRecordError> {
        let statement = self.builder.decrement(target, filter, delta, raw)?;
        self.write(&statement)
    }

    fn write(&mut self, statement: &Statement) -> Result<u64, SqlRecordError> {
        let outcome = run_write(&mut *self.handle, statement, self.builder.options())?;
        Ok(rows_affected(statement, outcome))
    }
}

/// Log `statement` as configured, then execute it.
pub(crate) fn run_write<H: DbHandle + ?Sized>(
    handle: &mut H,
    statement: &Statement,
    options: BuilderOptions,
) -> Result<ExecOutcome, SqlRecordError> {
    log_statement(options, statement);
    handle.execute(statement)
}

/// Rows affected, or 0 with a warning when the driver could not tell.
pub(crate) fn rows_affected(statement: &Statement, outcome: ExecOutcome) -> u64 {
    outcome.rows_affected.unwrap_or_else(|| {
        tracing::warn!(
            kind = statement.kind().as_str(),
            table = statement.table(),
            "driver did not report rows affected; counting 0"
        );
        0
    })
}

pub(crate) fn log_statement(options: BuilderOptions, statement: &Statement) {
    match options.statement_log {
        StatementLog::Off => {}
        StatementLog::Placeholders => tracing::debug!(
            kind = statement.kind().as_str(),
            params = statement.params().len(),
            sql = statement.sql(),
            "executing statement"
        ),
        StatementLog::Literal => tracing::debug!(
            kind = statement.kind().as_str(),
            sql = statement.literal(),
            "executing statement"
        ),
    }
}

/// Decode each row positionally into a blank `R`, using the field indices the
/// SELECT was built from.
fn decode_rows<R: Record>(
    statement: &Statement,
    result_set: &ResultSet,
) -> Result<Vec<R>, SqlRecordError> {
    let columns = statement.columns();
    result_set
        .results
        .iter()
        .map(|row| {
            if row.rows.len() != columns.len() {
                return Err(SqlRecordError::ExecutionError(format!(
                    "{}: expected {} columns, got {}",
                    statement.table(),
                    columns.len(),
                    row.rows.len()
                )));
            }
            let mut record = R::blank();
            for (value, &field_index) in row.rows.iter().zip(columns) {
                record.set_value(field_index, value.clone())?;
            }
            Ok(record)
        })
        .collect()
}
