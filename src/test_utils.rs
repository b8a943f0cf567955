//! A scripted [`DbHandle`] for tests that do not need a real database.

use std::collections::VecDeque;

use crate::error::SqlRecordError;
use crate::handle::{DbHandle, ExecOutcome};
use crate::results::ResultSet;
use crate::statement::Statement;
use crate::types::RowValues;

/// Something the handle was asked to do, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum HandleEvent {
    Begin,
    Commit,
    Rollback,
    Query(String),
    Execute(String),
}

/// Records every call and answers from a script.
///
/// Queries pop scripted result sets in order (an empty set once the script is
/// exhausted). Executes report one row affected unless configured otherwise.
#[derive(Debug)]
pub struct RecordingHandle {
    statements: Vec<Statement>,
    events: Vec<HandleEvent>,
    results: VecDeque<ResultSet>,
    fail_on_execute: Option<usize>,
    fail_commit: bool,
    fail_rollback: bool,
    report_rows_affected: bool,
    last_insert_id: Option<i64>,
    executes: usize,
}

impl Default for RecordingHandle {
    fn default() -> Self {
        Self {
            statements: Vec::new(),
            events: Vec::new(),
            results: VecDeque::new(),
            fail_on_execute: None,
            fail_commit: false,
            fail_rollback: false,
            report_rows_affected: true,
            last_insert_id: None,
            executes: 0,
        }
    }
}

impl RecordingHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `nth` execute call (1-based).
    #[must_use]
    pub fn fail_on_execute(mut self, nth: usize) -> Self {
        self.fail_on_execute = Some(nth);
        self
    }

    #[must_use]
    pub fn fail_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    #[must_use]
    pub fn fail_rollback(mut self) -> Self {
        self.fail_rollback = true;
        self
    }

    /// Report `rows_affected: None` from every execute.
    #[must_use]
    pub fn without_rows_affected(mut self) -> Self {
        self.report_rows_affected = false;
        self
    }

    #[must_use]
    pub fn with_last_insert_id(mut self, id: i64) -> Self {
        self.last_insert_id = Some(id);
        self
    }

    /// Queue the result of the next query.
    pub fn push_result(&mut self, columns: &[&str], rows: Vec<Vec<RowValues>>) {
        let mut set = ResultSet::with_columns(columns.iter().map(|c| (*c).to_owned()).collect());
        for row in rows {
            set.add_row_values(row);
        }
        self.results.push_back(set);
    }

    /// Every statement received, queries and executes alike.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    #[must_use]
    pub fn events(&self) -> &[HandleEvent] {
        &self.events
    }
}

impl DbHandle for RecordingHandle {
    fn query(&mut self, statement: &Statement) -> Result<ResultSet, SqlRecordError> {
        self.statements.push(statement.clone());
        self.events.push(HandleEvent::Query(statement.sql().to_owned()));
        Ok(self.results.pop_front().unwrap_or_default())
    }

    fn execute(&mut self, statement: &Statement) -> Result<ExecOutcome, SqlRecordError> {
        self.statements.push(statement.clone());
        self.events.push(HandleEvent::Execute(statement.sql().to_owned()));
        self.executes += 1;
        if self.fail_on_execute == Some(self.executes) {
            return Err(SqlRecordError::ExecutionError(format!(
                "injected failure on execute #{}",
                self.executes
            )));
        }
        Ok(ExecOutcome {
            rows_affected: self.report_rows_affected.then_some(1),
            last_insert_id: self.last_insert_id,
        })
    }

    fn begin(&mut self) -> Result<(), SqlRecordError> {
        self.events.push(HandleEvent::Begin);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SqlRecordError> {
        self.events.push(HandleEvent::Commit);
        if self.fail_commit {
            return Err(SqlRecordError::ExecutionError("injected commit failure".into()));
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), SqlRecordError> {
        self.events.push(HandleEvent::Rollback);
        if self.fail_rollback {
            return Err(SqlRecordError::ExecutionError("injected rollback failure".into()));
        }
        Ok(())
    }
}
