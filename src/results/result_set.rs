use std::sync::Arc;

use super::row::CustomDbRow;
use crate::types::RowValues;

/// The rows returned by one query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<CustomDbRow>,
    /// Column names shared by all rows
    column_names: Arc<Vec<String>>,
}

impl ResultSet {
    /// Create an empty result set for the given columns
    #[must_use]
    pub fn with_columns(column_names: Vec<String>) -> Self {
        Self {
            results: Vec::new(),
            column_names: Arc::new(column_names),
        }
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Add a row to the result set
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        self.results
            .push(CustomDbRow::new(Arc::clone(&self.column_names), row_values));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
