//! Statement synthesis from records.
//!
//! Which columns a statement touches is decided only by which fields of the
//! records are set. Values are always emitted as `?` placeholders with bound
//! parameters; [`Statement::literal`] keeps an inline rendering for logs.

use serde::Serialize;

use crate::config::BuilderOptions;
use crate::error::StatementError;
use crate::record::AnyRecord;
use crate::record::introspect::used_columns;
use crate::types::RowValues;

mod delete;
mod insert;
mod select;
mod update;
mod upsert;
mod writer;

pub(crate) use writer::SqlWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Upsert,
    Delete,
    Increment,
}

impl StatementKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Upsert => "UPSERT",
            StatementKind::Delete => "DELETE",
            StatementKind::Increment => "INCREMENT",
        }
    }
}

/// A synthesized statement, ready to execute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    kind: StatementKind,
    table: &'static str,
    sql: String,
    literal: String,
    params: Vec<RowValues>,
    columns: Vec<usize>,
}

impl Statement {
    #[must_use]
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    #[must_use]
    pub fn table(&self) -> &'static str {
        self.table
    }

    /// SQL text with `?` placeholders, terminated with `;`.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// SQL text with every value inlined as an unescaped literal.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Parameters bound to the placeholders, in order.
    #[must_use]
    pub fn params(&self) -> &[RowValues] {
        &self.params
    }

    /// Field indices a SELECT reads, in result-column order. Empty for writes.
    #[must_use]
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Builds statements from records.
///
/// Every method is pure: the same records and options always give the same
/// statement, and nothing touches a database.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementBuilder {
    options: BuilderOptions,
}

impl StatementBuilder {
    #[must_use]
    pub fn new(options: BuilderOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> BuilderOptions {
        self.options
    }
}

fn ensure_same_type(
    target: &dyn AnyRecord,
    filter: &dyn AnyRecord,
) -> Result<(), StatementError> {
    if target.record_type() == filter.record_type() {
        Ok(())
    } else {
        Err(StatementError::TypeMismatch {
            expected: target.type_name(),
            found: filter.type_name(),
        })
    }
}

fn raw_condition(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|r| !r.is_empty())
}

/// Append `WHERE col<eq>? AND ...` for the set fields of `filter`, then the raw
/// condition if any.
fn write_conditions(
    writer: &mut SqlWriter,
    filter: &dyn AnyRecord,
    eq: &str,
    raw: Option<&str>,
    require_condition: bool,
) -> Result<(), StatementError> {
    let conditions = used_columns(filter);
    let raw = raw_condition(raw);
    if conditions.is_empty() && raw.is_none() && require_condition {
        return Err(StatementError::NoWhereClause {
            table: filter.table(),
        });
    }

    if !conditions.is_empty() {
        writer.push(" WHERE ");
        writer.push_list(conditions, " AND ", |w, column| {
            w.push(column.name);
            w.push(eq);
            w.push_value(column.value);
        });
    }
    if let Some(raw) = raw {
        writer.push(" ");
        writer.push(raw);
    }
    Ok(())
}
