//! Read-only classification of record fields.

use crate::error::StatementError;
use crate::types::RowValues;

use super::{AnyRecord, FieldMeta, Record};

/// A field that holds a value, with its position in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct UsedColumn {
    pub index: usize,
    pub name: &'static str,
    pub value: RowValues,
}

/// The set fields of `record`, in declaration order.
#[must_use]
pub fn used_columns(record: &dyn AnyRecord) -> Vec<UsedColumn> {
    record
        .fields()
        .iter()
        .enumerate()
        .filter_map(|(index, meta)| {
            record.field_value(index).map(|value| UsedColumn {
                index,
                name: meta.name,
                value,
            })
        })
        .collect()
}

/// Indices of the set fields of `record`, in declaration order.
#[must_use]
pub fn used_indices(record: &dyn AnyRecord) -> Vec<usize> {
    (0..record.fields().len())
        .filter(|&index| record.is_field_used(index))
        .collect()
}

/// Check that every record sets exactly the fields the first one sets.
///
/// # Errors
/// Returns `StatementError::MismatchedColumns` naming the first differing row
/// (1-based).
pub fn ensure_same_columns(records: &[&dyn AnyRecord]) -> Result<(), StatementError> {
    let Some(first) = records.first() else {
        return Ok(());
    };
    let expected = used_indices(*first);
    match records
        .iter()
        .position(|record| used_indices(*record) != expected)
    {
        Some(row) => Err(StatementError::MismatchedColumns {
            table: first.table(),
            row: row + 1,
        }),
        None => Ok(()),
    }
}

/// Field metadata for a record type.
#[must_use]
pub fn metadata<R: Record>() -> &'static [FieldMeta] {
    R::FIELDS
}

/// Check that every non-nullable field of `record` is set.
///
/// With `exempt_primary_key`, primary-key fields may also be left unset (the store
/// assigns them).
///
/// # Errors
/// Returns `StatementError::IncompleteRecord` naming the first unset field.
pub fn ensure_complete(
    record: &dyn AnyRecord,
    exempt_primary_key: bool,
) -> Result<(), StatementError> {
    let missing = record.fields().iter().enumerate().find(|(index, meta)| {
        let exempt = meta.nullable || (exempt_primary_key && meta.primary_key);
        !exempt && !record.is_field_used(*index)
    });
    match missing {
        Some((_, meta)) => Err(StatementError::IncompleteRecord {
            table: record.table(),
            field: meta.name,
        }),
        None => Ok(()),
    }
}
