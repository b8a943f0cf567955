//! Convenient imports for common functionality.

pub use crate::batch::{Batch, BatchState};
pub use crate::config::{BuilderOptions, StatementLog, WherePolicy};
pub use crate::error::{SqlRecordError, StatementError};
pub use crate::executor::{Executor, InsertOutcome};
pub use crate::handle::{DbHandle, ExecOutcome};
pub use crate::record::{AnyRecord, Record};
pub use crate::results::{CustomDbRow, ResultSet};
pub use crate::sql_record;
pub use crate::statement::{Statement, StatementBuilder, StatementKind};
pub use crate::types::RowValues;

#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteConfig;
