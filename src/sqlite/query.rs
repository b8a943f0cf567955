use rusqlite::Statement;
use rusqlite::types::Value;

use crate::error::SqlRecordError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
/// Returns `SqlRecordError::SqliteError` if the column cannot be read, or
/// `SqlRecordError::ExecutionError` for a BLOB column, which no record field holds.
pub fn sqlite_extract_value_sync(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<RowValues, SqlRecordError> {
    let value: Value = row.get(idx)?;
    match value {
        Value::Null => Ok(RowValues::Null),
        Value::Integer(i) => Ok(RowValues::Int(i)),
        Value::Real(f) => Ok(RowValues::Float(f)),
        Value::Text(s) => Ok(RowValues::Text(s)),
        Value::Blob(_) => Err(SqlRecordError::ExecutionError(format!(
            "column {idx} holds a BLOB"
        ))),
    }
}

/// Run a prepared query and collect every row.
///
/// # Errors
/// Returns `SqlRecordError` if query execution or value extraction fails.
pub fn build_result_set(
    stmt: &mut Statement<'_>,
    params: &[Value],
) -> Result<ResultSet, SqlRecordError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();
    let mut result_set = ResultSet::with_columns(column_names);

    let mut rows_iter = stmt.query(rusqlite::params_from_iter(params.iter()))?;
    while let Some(row) = rows_iter.next()? {
        let row_values = (0..col_count)
            .map(|i| sqlite_extract_value_sync(row, i))
            .collect::<Result<Vec<_>, _>>()?;
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}
