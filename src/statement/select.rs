use crate::error::StatementError;
use crate::record::AnyRecord;

use super::{SqlWriter, Statement, StatementBuilder, StatementKind, ensure_same_type, write_conditions};

impl StatementBuilder {
    /// `SELECT <set fields of target> FROM <table> [WHERE ...] [raw];`
    ///
    /// When `target` has no set field every column is selected. Conditions use
    /// `col = ?`. Whether a SELECT with no condition is allowed depends on the
    /// [`WherePolicy`](crate::config::WherePolicy).
    ///
    /// # Errors
    /// `TypeMismatch` when `target` and `filter` are different record types;
    /// `NoWhereClause` when a condition is required and none is given.
    pub fn select(
        &self,
        target: &dyn AnyRecord,
        filter: &dyn AnyRecord,
        raw: Option<&str>,
    ) -> Result<Statement, StatementError> {
        ensure_same_type(target, filter)?;

        let fields = target.fields();
        let mut columns: Vec<usize> = (0..fields.len())
            .filter(|&index| target.is_field_used(index))
            .collect();
        if columns.is_empty() {
            columns = (0..fields.len()).collect();
        }

        let mut writer = SqlWriter::new("SELECT ");
        writer.push_list(columns.iter(), ", ", |w, &index| w.push(fields[index].name));
        writer.push(" FROM ");
        writer.push(target.table());
        write_conditions(
            &mut writer,
            filter,
            " = ",
            raw,
            self.options.where_policy.requires_condition(true),
        )?;
        Ok(writer.finish(StatementKind::Select, target.table(), columns))
    }
}
