use crate::types::RowValues;

use super::{Statement, StatementKind};

/// Accumulates one statement in two renderings at once: the placeholder SQL that
/// is executed and the inline-literal form that is logged.
#[derive(Debug, Default)]
pub(crate) struct SqlWriter {
    sql: String,
    literal: String,
    params: Vec<RowValues>,
}

impl SqlWriter {
    pub(crate) fn new(head: &str) -> Self {
        let mut writer = Self::default();
        writer.push(head);
        writer
    }

    /// Append SQL text verbatim to both renderings.
    pub(crate) fn push(&mut self, text: &str) {
        self.sql.push_str(text);
        self.literal.push_str(text);
    }

    /// Append a bound value.
    pub(crate) fn push_value(&mut self, value: RowValues) {
        self.sql.push('?');
        self.literal.push_str(&value.to_sql_literal());
        self.params.push(value);
    }

    /// Append `items` separated by `separator`, writing each with `write_item`.
    pub(crate) fn push_list<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        separator: &str,
        mut write_item: impl FnMut(&mut Self, T),
    ) {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.push(separator);
            }
            write_item(self, item);
        }
    }

    pub(crate) fn finish(
        mut self,
        kind: StatementKind,
        table: &'static str,
        columns: Vec<usize>,
    ) -> Statement {
        self.push(";");
        Statement {
            kind,
            table,
            sql: self.sql,
            literal: self.literal,
            params: self.params,
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_become_placeholders_and_literals() {
        let mut writer = SqlWriter::new("DELETE FROM t WHERE ");
        writer.push_list(
            [("a", RowValues::Int(1)), ("b", RowValues::Text("x".into()))],
            " AND ",
            |w, (name, value)| {
                w.push(name);
                w.push("=");
                w.push_value(value);
            },
        );
        let stmt = writer.finish(StatementKind::Delete, "t", Vec::new());
        assert_eq!(stmt.sql(), "DELETE FROM t WHERE a=? AND b=?;");
        assert_eq!(stmt.literal(), "DELETE FROM t WHERE a=1 AND b=\"x\";");
        assert_eq!(stmt.params().len(), 2);
    }
}
