use std::sync::Arc;

use crate::types::RowValues;

/// A row from a query result
///
/// Column names are shared by every row of the same [`ResultSet`](super::ResultSet).
#[derive(Debug, Clone, PartialEq)]
pub struct CustomDbRow {
    /// The column names for this row
    pub column_names: Arc<Vec<String>>,
    /// The values for this row, in column order
    pub rows: Vec<RowValues>,
}

impl CustomDbRow {
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, rows: Vec<RowValues>) -> Self {
        Self { column_names, rows }
    }

    /// Get the index of a column by name
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_names.iter().position(|col| col == column_name)
    }

    /// Get a value from the row by column name
    ///
    /// # Returns
    ///
    /// The value at the column, or None if the column wasn't found
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.rows.get(idx))
    }

    /// Get a value from the row by column index
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.rows.get(index)
    }
}
