//! Derive SQL statements from plain records.
//!
//! A record is a struct whose fields are `Option`s. Which fields are set decides
//! which columns a statement reads, writes or filters on:
//!
//! ```rust
//! use sql_record::prelude::*;
//!
//! sql_record! {
//!     #[derive(Debug, Clone)]
//!     pub struct UserScore => "user_score" {
//!         #[primary_key]
//!         pub user_id: i64,
//!         pub name: String,
//!         pub score: i32,
//!     }
//! }
//!
//! let target = UserScore { name: Some(String::new()), score: Some(0), ..UserScore::blank() };
//! let filter = UserScore { user_id: Some(10), ..UserScore::blank() };
//! let stmt = StatementBuilder::default().select(&target, &filter, None)?;
//! assert_eq!(stmt.sql(), "SELECT name, score FROM user_score WHERE user_id = ?;");
//! assert_eq!(stmt.literal(), "SELECT name, score FROM user_score WHERE user_id = 10;");
//! # Ok::<(), StatementError>(())
//! ```
//!
//! [`Executor`] runs statements over any [`DbHandle`]; [`Batch`] runs several
//! writes in one transaction.

pub mod batch;
pub mod config;
pub mod error;
pub mod executor;
pub mod handle;
pub mod prelude;
pub mod record;
pub mod results;
pub mod statement;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use batch::{Batch, BatchState};
pub use config::{BuilderOptions, StatementLog, WherePolicy};
pub use error::{SqlRecordError, StatementError};
pub use executor::{Executor, InsertOutcome};
pub use handle::{DbHandle, ExecOutcome};
pub use record::{AnyRecord, FieldMeta, FieldType, Record, ScalarKind};
pub use results::{CustomDbRow, ResultSet};
pub use statement::{Statement, StatementBuilder, StatementKind};
pub use types::RowValues;
