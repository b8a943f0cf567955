//! Several write statements run as one all-or-nothing unit.
//!
//! Jobs are built as they are added. A job that fails to build is remembered,
//! and the whole batch then refuses to run, so a half-built batch never touches
//! the store.

use std::collections::BTreeMap;

use crate::config::BuilderOptions;
use crate::error::{SqlRecordError, StatementError};
use crate::executor::{rows_affected, run_write};
use crate::handle::DbHandle;
use crate::record::AnyRecord;
use crate::statement::{Statement, StatementBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// No job added yet.
    Empty,
    /// Every job added so far was built.
    Ready,
    /// At least one job failed to build; `run` will refuse.
    Failed,
}

/// Ordered write jobs, executed by [`Batch::run`].
#[derive(Debug, Default)]
pub struct Batch {
    builder: StatementBuilder,
    statements: Vec<Statement>,
    job_counter: usize,
    failures: BTreeMap<usize, StatementError>,
}

impl Batch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: BuilderOptions) -> Self {
        Self {
            builder: StatementBuilder::new(options),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn state(&self) -> BatchState {
        if !self.failures.is_empty() {
            BatchState::Failed
        } else if self.statements.is_empty() {
            BatchState::Empty
        } else {
            BatchState::Ready
        }
    }

    /// Jobs added so far, built or not.
    #[must_use]
    pub fn job_count(&self) -> usize {
        self.job_counter
    }

    /// Built statements, in the order they will run.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Build errors by job index (1-based).
    #[must_use]
    pub fn failures(&self) -> &BTreeMap<usize, StatementError> {
        &self.failures
    }

    /// Queue one INSERT of `records`. Returns the job index.
    ///
    /// # Errors
    /// The build error, which is also kept under the job index.
    pub fn add_insert(&mut self, records: &[&dyn AnyRecord]) -> Result<usize, StatementError> {
        let built = self.builder.insert(records);
        self.push(built)
    }

    /// # Errors
    /// The build error, which is also kept under the job index.
    pub fn add_update(
        &mut self,
        target: &dyn AnyRecord,
        filter: &dyn AnyRecord,
    ) -> Result<usize, StatementError> {
        let built = self.builder.update(target, filter, None);
        self.push(built)
    }

    /// # Errors
    /// The build error, which is also kept under the job index.
    pub fn add_upsert(&mut self, record: &dyn AnyRecord) -> Result<usize, StatementError> {
        let built = self.builder.upsert(record);
        self.push(built)
    }

    /// # Errors
    /// The build error, which is also kept under the job index.
    pub fn add_delete(&mut self, filter: &dyn AnyRecord) -> Result<usize, StatementError> {
        let built = self.builder.delete(filter, None);
        self.push(built)
    }

    /// # Errors
    /// The build error, which is also kept under the job index.
    pub fn add_increment(
        &mut self,
        target: &dyn AnyRecord,
        filter: &dyn AnyRecord,
        delta: i64,
    ) -> Result<usize, StatementError> {
        let built = self.builder.increment(target, filter, delta, None);
        self.push(built)
    }

    /// # Errors
    /// The build error, which is also kept under the job index.
    pub fn add_decrement(
        &mut self,
        target: &dyn AnyRecord,
        filter: &dyn AnyRecord,
        delta: i64,
    ) -> Result<usize, StatementError> {
        let built = self.builder.decrement(target, filter, delta, None);
        self.push(built)
    }

    fn push(&mut self, built: Result<Statement, StatementError>) -> Result<usize, StatementError> {
        self.job_counter += 1;
        match built {
            Ok(statement) => {
                self.statements.push(statement);
                Ok(self.job_counter)
            }
            Err(err) => {
                self.failures.insert(self.job_counter, err.clone());
                Err(err)
            }
        }
    }

    /// Execute every job and return the total rows affected.
    ///
    /// More than one job runs inside BEGIN/COMMIT and is rolled back on the
    /// first failure. A single job runs on its own.
    ///
    /// # Errors
    /// `BatchBuildFailed` if any job failed to build (nothing is executed),
    /// `EmptyBatch` if there are no jobs, otherwise the first driver error.
    pub fn run<H: DbHandle + ?Sized>(self, handle: &mut H) -> Result<u64, SqlRecordError> {
        if !self.failures.is_empty() {
            for (job, err) in &self.failures {
                tracing::error!(job, error = %err, "batch job failed to build");
            }
            return Err(SqlRecordError::BatchBuildFailed {
                failures: self.failures.into_iter().collect(),
            });
        }
        if self.statements.is_empty() {
            return Err(SqlRecordError::EmptyBatch);
        }

        let options = self.builder.options();
        let transactional = self.statements.len() > 1;
        if transactional {
            handle.begin()?;
        }

        let mut total = 0u64;
        for (index, statement) in self.statements.iter().enumerate() {
            match run_write(&mut *handle, statement, options) {
                Ok(outcome) => total += rows_affected(statement, outcome),
                Err(err) => {
                    tracing::warn!(job = index + 1, error = %err, "batch job failed; rolling back");
                    if transactional {
                        roll_back(&mut *handle);
                    }
                    return Err(err);
                }
            }
        }

        if transactional {
            if let Err(err) = handle.commit() {
                tracing::warn!(error = %err, "batch commit failed; rolling back");
                roll_back(&mut *handle);
                return Err(err);
            }
        }
        Ok(total)
    }
}

/// Abandon the open transaction. A failure here is logged, never returned, so the
/// caller sees the error that caused the rollback.
fn roll_back<H: DbHandle + ?Sized>(handle: &mut H) {
    if let Err(rollback_err) = handle.rollback() {
        tracing::warn!(error = %rollback_err, "batch rollback failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use crate::sql_record;
    use crate::test_utils::{HandleEvent, RecordingHandle};

    sql_record! {
        #[derive(Debug, Clone)]
        pub struct Item => "items" {
            #[primary_key]
            pub id: i64,
            pub count: i32,
        }
    }

    fn item(id: i64, count: i32) -> Item {
        Item {
            id: Some(id),
            count: Some(count),
        }
    }

    fn by_id(id: i64) -> Item {
        Item {
            id: Some(id),
            ..Item::blank()
        }
    }

    #[test]
    fn build_failure_blocks_the_whole_batch() {
        let mut batch = Batch::new();
        assert_eq!(batch.state(), BatchState::Empty);
        assert_eq!(batch.add_insert(&[&item(1, 1)]), Ok(1));
        assert!(batch.add_delete(&Item::blank()).is_err());
        assert_eq!(batch.add_upsert(&item(2, 2)), Ok(3));
        assert_eq!(batch.state(), BatchState::Failed);
        assert_eq!(batch.job_count(), 3);

        let mut handle = RecordingHandle::new();
        let err = batch.run(&mut handle).unwrap_err();
        match err {
            SqlRecordError::BatchBuildFailed { failures } => {
                assert_eq!(
                    failures,
                    [(2, StatementError::NoWhereClause { table: "items" })]
                );
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(handle.events().is_empty());
    }

    #[test]
    fn empty_batch_is_an_error() {
        let mut handle = RecordingHandle::new();
        assert!(matches!(
            Batch::new().run(&mut handle),
            Err(SqlRecordError::EmptyBatch)
        ));
    }

    #[test]
    fn single_job_runs_without_a_transaction() {
        let mut batch = Batch::new();
        batch.add_insert(&[&item(1, 1), &item(2, 1)]).unwrap();
        assert_eq!(batch.state(), BatchState::Ready);

        let mut handle = RecordingHandle::new();
        assert_eq!(batch.run(&mut handle).unwrap(), 1);
        assert_eq!(
            handle.events(),
            [HandleEvent::Execute(
                "INSERT INTO items (id, count) VALUES (?, ?), (?, ?);".into()
            )]
        );
    }

    #[test]
    fn jobs_commit_together_and_sum_rows() {
        let mut batch = Batch::new();
        batch.add_insert(&[&item(1, 1)]).unwrap();
        batch
            .add_increment(&Item { count: Some(0), ..Item::blank() }, &by_id(1), 2)
            .unwrap();
        batch
            .add_decrement(&Item { count: Some(0), ..Item::blank() }, &by_id(1), 1)
            .unwrap();

        let mut handle = RecordingHandle::new();
        assert_eq!(batch.run(&mut handle).unwrap(), 3);
        let events = handle.events();
        assert_eq!(events.first(), Some(&HandleEvent::Begin));
        assert_eq!(events.last(), Some(&HandleEvent::Commit));
        assert_eq!(
            events[2],
            HandleEvent::Execute("UPDATE items SET count=count+2 WHERE id=?;".into())
        );
        assert_eq!(
            events[3],
            HandleEvent::Execute("UPDATE items SET count=count-1 WHERE id=?;".into())
        );
    }

    #[test]
    fn first_execution_failure_rolls_back() {
        let mut batch = Batch::new();
        batch.add_insert(&[&item(1, 1)]).unwrap();
        batch.add_update(&item(1, 5), &by_id(1)).unwrap();
        batch.add_delete(&by_id(1)).unwrap();

        let mut handle = RecordingHandle::new().fail_on_execute(2);
        let err = batch.run(&mut handle).unwrap_err();
        assert!(matches!(err, SqlRecordError::ExecutionError(_)));
        assert_eq!(handle.events().len(), 4);
        assert_eq!(handle.events()[3], HandleEvent::Rollback);
    }

    #[test]
    fn failed_commit_rolls_back() {
        let mut batch = Batch::new();
        batch.add_delete(&by_id(1)).unwrap();
        batch.add_delete(&by_id(2)).unwrap();

        let mut handle = RecordingHandle::new().fail_commit();
        let err = batch.run(&mut handle).unwrap_err();
        assert!(err.to_string().contains("injected commit failure"));
        assert_eq!(
            &handle.events()[3..],
            [HandleEvent::Commit, HandleEvent::Rollback]
        );
    }

    #[test]
    fn failed_rollback_keeps_the_original_error() {
        let mut batch = Batch::new();
        batch.add_delete(&by_id(1)).unwrap();
        batch.add_delete(&by_id(2)).unwrap();

        let mut handle = RecordingHandle::new().fail_on_execute(1).fail_rollback();
        let err = batch.run(&mut handle).unwrap_err();
        assert!(err.to_string().contains("injected failure on execute #1"));
    }
}
