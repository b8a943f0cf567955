use crate::error::StatementError;
use crate::record::AnyRecord;
use crate::record::introspect::used_columns;

use super::{SqlWriter, Statement, StatementBuilder, StatementKind, ensure_same_type, write_conditions};

impl StatementBuilder {
    /// `UPDATE <table> SET col=?, ... [WHERE col=? AND ...] [raw];`
    ///
    /// # Errors
    /// `TypeMismatch`, `NoSetColumns` when `target` sets nothing, or
    /// `NoWhereClause` when the policy requires a condition and none is given.
    pub fn update(
        &self,
        target: &dyn AnyRecord,
        filter: &dyn AnyRecord,
        raw: Option<&str>,
    ) -> Result<Statement, StatementError> {
        ensure_same_type(target, filter)?;
        let assignments = used_columns(target);
        if assignments.is_empty() {
            return Err(StatementError::NoSetColumns {
                table: target.table(),
            });
        }

        let mut writer = SqlWriter::new("UPDATE ");
        writer.push(target.table());
        writer.push(" SET ");
        writer.push_list(assignments, ", ", |w, column| {
            w.push(column.name);
            w.push("=");
            w.push_value(column.value);
        });
        write_conditions(
            &mut writer,
            filter,
            "=",
            raw,
            self.options.where_policy.requires_condition(false),
        )?;
        Ok(writer.finish(StatementKind::Update, target.table(), Vec::new()))
    }

    /// `UPDATE <table> SET col=col+N, ... [WHERE ...] [raw];`
    ///
    /// Every set field of `target` moves by the same `delta`; the value it holds
    /// is ignored. A negative delta renders as `col=col-N`.
    ///
    /// # Errors
    /// Same as [`StatementBuilder::update`], plus `NonNumericIncrement` when a set
    /// field of `target` is text or a timestamp.
    pub fn increment(
        &self,
        target: &dyn AnyRecord,
        filter: &dyn AnyRecord,
        delta: i64,
        raw: Option<&str>,
    ) -> Result<Statement, StatementError> {
        self.shift(target, filter, delta < 0, delta.unsigned_abs(), raw)
    }

    /// [`StatementBuilder::increment`] with the sign of `delta` flipped.
    ///
    /// # Errors
    /// Same as [`StatementBuilder::update`].
    pub fn decrement(
        &self,
        target: &dyn AnyRecord,
        filter: &dyn AnyRecord,
        delta: i64,
        raw: Option<&str>,
    ) -> Result<Statement, StatementError> {
        self.shift(target, filter, delta > 0, delta.unsigned_abs(), raw)
    }

    fn shift(
        &self,
        target: &dyn AnyRecord,
        filter: &dyn AnyRecord,
        negative: bool,
        magnitude: u64,
        raw: Option<&str>,
    ) -> Result<Statement, StatementError> {
        ensure_same_type(target, filter)?;
        let columns = used_columns(target);
        if columns.is_empty() {
            return Err(StatementError::NoSetColumns {
                table: target.table(),
            });
        }

        let fields = target.fields();
        if let Some(column) = columns.iter().find(|c| !fields[c.index].kind.is_numeric()) {
            return Err(StatementError::NonNumericIncrement {
                table: target.table(),
                field: column.name,
            });
        }

        let operator = if negative { "-" } else { "+" };
        let amount = magnitude.to_string();

        let mut writer = SqlWriter::new("UPDATE ");
        writer.push(target.table());
        writer.push(" SET ");
        writer.push_list(columns, ", ", |w, column| {
            w.push(column.name);
            w.push("=");
            w.push(column.name);
            w.push(operator);
            w.push(&amount);
        });
        write_conditions(
            &mut writer,
            filter,
            "=",
            raw,
            self.options.where_policy.requires_condition(false),
        )?;
        Ok(writer.finish(StatementKind::Increment, target.table(), Vec::new()))
    }
}
