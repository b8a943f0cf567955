//! Rows returned by a query, before they are decoded into records.

mod result_set;
mod row;

pub use result_set::ResultSet;
pub use row::CustomDbRow;
