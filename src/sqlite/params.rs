use rusqlite::types::Value;

use crate::error::SqlRecordError;
use crate::types::{RowValues, TIMESTAMP_FORMAT};

/// Convert a single `RowValues` to a rusqlite `Value`.
///
/// # Errors
/// Returns `SqlRecordError::ParameterError` for an unsigned value above `i64::MAX`,
/// which `SQLite` cannot store as an integer.
pub fn row_value_to_sqlite_value(value: &RowValues) -> Result<Value, SqlRecordError> {
    Ok(match value {
        RowValues::Int(i) => Value::Integer(*i),
        RowValues::UInt(u) => Value::Integer(i64::try_from(*u).map_err(|_| {
            SqlRecordError::ParameterError(format!("{u} does not fit a SQLite integer"))
        })?),
        RowValues::Float(f) => Value::Real(*f),
        RowValues::Text(s) => Value::Text(s.clone()),
        RowValues::Timestamp(dt) => Value::Text(dt.format(TIMESTAMP_FORMAT).to_string()),
        RowValues::Null => Value::Null,
    })
}

/// Bound parameters for one `SQLite` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Params(pub Vec<Value>);

impl Params {
    /// Convert row values into `SQLite` values.
    ///
    /// # Errors
    /// Returns `SqlRecordError::ParameterError` if any value cannot be converted.
    pub fn convert(params: &[RowValues]) -> Result<Self, SqlRecordError> {
        params
            .iter()
            .map(row_value_to_sqlite_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Params)
    }

    #[must_use]
    pub fn as_values(&self) -> &[Value] {
        &self.0
    }
}
