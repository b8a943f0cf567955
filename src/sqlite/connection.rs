use rusqlite::Connection;

use crate::error::SqlRecordError;
use crate::handle::{DbHandle, ExecOutcome};
use crate::results::ResultSet;
use crate::statement::{Statement, StatementKind};

use super::params::Params;
use super::query::build_result_set;

impl DbHandle for Connection {
    fn query(&mut self, statement: &Statement) -> Result<ResultSet, SqlRecordError> {
        let params = Params::convert(statement.params())?;
        let mut stmt = self.prepare(statement.sql())?;
        build_result_set(&mut stmt, params.as_values())
    }

    fn execute(&mut self, statement: &Statement) -> Result<ExecOutcome, SqlRecordError> {
        let params = Params::convert(statement.params())?;
        let rows = {
            let mut stmt = self.prepare(statement.sql())?;
            stmt.execute(rusqlite::params_from_iter(params.as_values().iter()))?
        };
        let last_insert_id = match statement.kind() {
            StatementKind::Insert | StatementKind::Upsert => Some(self.last_insert_rowid()),
            _ => None,
        };
        Ok(ExecOutcome {
            rows_affected: u64::try_from(rows).ok(),
            last_insert_id,
        })
    }

    fn begin(&mut self) -> Result<(), SqlRecordError> {
        self.execute_batch("BEGIN")?;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SqlRecordError> {
        self.execute_batch("COMMIT")?;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), SqlRecordError> {
        self.execute_batch("ROLLBACK")?;
        Ok(())
    }
}
