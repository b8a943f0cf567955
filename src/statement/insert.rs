use crate::error::StatementError;
use crate::record::AnyRecord;
use crate::record::introspect::used_columns;

use super::{SqlWriter, Statement, StatementBuilder, StatementKind};

impl StatementBuilder {
    /// `INSERT INTO <table> (<set fields of the first record>) VALUES (...), (...);`
    ///
    /// One tuple per record, in input order. Each tuple holds the set fields of
    /// its own record, so records that set different fields produce tuples that
    /// do not line up with the column list. Such rows are logged; use
    /// [`ensure_same_columns`](crate::record::introspect::ensure_same_columns) to
    /// refuse them.
    ///
    /// # Errors
    /// `EmptyInsert` for no records, `HeterogeneousBatch` when the records are
    /// of different types, `NoSetColumns` when the first record sets nothing.
    pub fn insert(&self, records: &[&dyn AnyRecord]) -> Result<Statement, StatementError> {
        let Some(first) = records.first() else {
            return Err(StatementError::EmptyInsert);
        };
        if let Some(stranger) = records
            .iter()
            .find(|r| r.record_type() != first.record_type())
        {
            return Err(StatementError::HeterogeneousBatch {
                expected: first.type_name(),
                found: stranger.type_name(),
            });
        }

        let columns = used_columns(*first);
        if columns.is_empty() {
            return Err(StatementError::NoSetColumns {
                table: first.table(),
            });
        }

        let mut writer = SqlWriter::new("INSERT INTO ");
        writer.push(first.table());
        writer.push(" (");
        writer.push_list(columns.iter(), ", ", |w, column| w.push(column.name));
        writer.push(") VALUES ");
        writer.push_list(records.iter().enumerate(), ", ", |w, (position, record)| {
            let row = used_columns(*record);
            let same_fields = row.len() == columns.len()
                && row.iter().zip(&columns).all(|(a, b)| a.index == b.index);
            if !same_fields {
                tracing::warn!(
                    table = first.table(),
                    row = position + 1,
                    "INSERT row sets different fields than the first record"
                );
            }
            w.push("(");
            w.push_list(row, ", ", |w, column| w.push_value(column.value));
            w.push(")");
        });
        Ok(writer.finish(StatementKind::Insert, first.table(), Vec::new()))
    }
}
