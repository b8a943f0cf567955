use crate::error::StatementError;
use crate::record::AnyRecord;
use crate::record::introspect::used_columns;

use super::{SqlWriter, Statement, StatementBuilder, StatementKind};

impl StatementBuilder {
    /// `INSERT INTO <table> (...) VALUES (...) ON DUPLICATE KEY UPDATE col=?, ...;`
    ///
    /// The insert part covers every set field. The update part covers the set
    /// fields that are not primary keys, bound to the same values again.
    ///
    /// # Errors
    /// `NoSetColumns` when the record sets nothing, or sets only key fields.
    pub fn upsert(&self, record: &dyn AnyRecord) -> Result<Statement, StatementError> {
        let columns = used_columns(record);
        let fields = record.fields();
        let updates: Vec<_> = columns
            .iter()
            .filter(|column| !fields[column.index].primary_key)
            .cloned()
            .collect();
        if updates.is_empty() {
            return Err(StatementError::NoSetColumns {
                table: record.table(),
            });
        }

        let mut writer = SqlWriter::new("INSERT INTO ");
        writer.push(record.table());
        writer.push(" (");
        writer.push_list(columns.iter(), ", ", |w, column| w.push(column.name));
        writer.push(") VALUES (");
        writer.push_list(columns, ", ", |w, column| w.push_value(column.value));
        writer.push(") ON DUPLICATE KEY UPDATE ");
        writer.push_list(updates, ", ", |w, column| {
            w.push(column.name);
            w.push("=");
            w.push_value(column.value);
        });
        Ok(writer.finish(StatementKind::Upsert, record.table(), Vec::new()))
    }
}
