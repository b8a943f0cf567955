use crate::error::StatementError;
use crate::record::AnyRecord;

use super::{SqlWriter, Statement, StatementBuilder, StatementKind, write_conditions};

impl StatementBuilder {
    /// `DELETE FROM <table> [WHERE col=? AND ...] [raw];`
    ///
    /// # Errors
    /// `NoWhereClause` when the policy requires a condition and neither `filter`
    /// nor `raw` supplies one.
    pub fn delete(
        &self,
        filter: &dyn AnyRecord,
        raw: Option<&str>,
    ) -> Result<Statement, StatementError> {
        let mut writer = SqlWriter::new("DELETE FROM ");
        writer.push(filter.table());
        write_conditions(
            &mut writer,
            filter,
            "=",
            raw,
            self.options.where_policy.requires_condition(false),
        )?;
        Ok(writer.finish(StatementKind::Delete, filter.table(), Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{BuilderOptions, WherePolicy};
    use crate::error::StatementError;
    use crate::record::Record;
    use crate::sql_record;
    use crate::statement::StatementBuilder;

    sql_record! {
        #[derive(Debug, Clone)]
        pub struct Account => "tblaccount" {
            #[primary_key]
            pub player_key: String,
            pub user_uuid: i64,
        }
    }

    #[test]
    fn deletes_rows_matching_every_set_field() {
        let filter = Account {
            player_key: Some("hello1".into()),
            user_uuid: Some(7),
        };
        let stmt = StatementBuilder::default().delete(&filter, None).unwrap();
        assert_eq!(
            stmt.sql(),
            "DELETE FROM tblaccount WHERE player_key=? AND user_uuid=?;"
        );
        assert_eq!(
            stmt.literal(),
            "DELETE FROM tblaccount WHERE player_key=\"hello1\" AND user_uuid=7;"
        );
    }

    #[test]
    fn raw_condition_alone_is_enough() {
        let stmt = StatementBuilder::default()
            .delete(&Account::blank(), Some("WHERE user_uuid < 0"))
            .unwrap();
        assert_eq!(stmt.sql(), "DELETE FROM tblaccount WHERE user_uuid < 0;");
        assert!(stmt.params().is_empty());
    }

    #[test]
    fn unconditioned_delete_needs_permissive_policy() {
        assert_eq!(
            StatementBuilder::default().delete(&Account::blank(), None),
            Err(StatementError::NoWhereClause {
                table: "tblaccount"
            })
        );
        let stmt = StatementBuilder::new(
            BuilderOptions::new().with_where_policy(WherePolicy::Permissive),
        )
        .delete(&Account::blank(), None)
        .unwrap();
        assert_eq!(stmt.sql(), "DELETE FROM tblaccount;");
    }
}
