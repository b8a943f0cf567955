//! A write followed by a SELECT that reads back the touched rows.
//!
//! If the write fails the SELECT is skipped and the write error is returned as
//! is. The raw condition only applies to the SELECT.

use crate::error::SqlRecordError;
use crate::handle::DbHandle;
use crate::record::Record;

use super::Executor;

impl<H: DbHandle + ?Sized> Executor<'_, H> {
    /// Insert `insert`, then select the `select` fields of rows matching the set
    /// fields of `insert`.
    ///
    /// Unset fields are not checked first, so columns the store fills in (an
    /// auto-increment key, defaults) can be read back.
    ///
    /// # Errors
    /// The insert's error, or the select's.
    pub fn insert_then_select<R: Record>(
        &mut self,
        insert: &R,
        select: &R,
        raw: Option<&str>,
    ) -> Result<Vec<R>, SqlRecordError> {
        self.insert_unchecked(std::slice::from_ref(insert))?;
        self.select(select, insert, raw)
    }

    /// Update, then select the `select` fields of rows matching `filter`.
    ///
    /// # Errors
    /// The update's error, or the select's.
    pub fn update_then_select<R: Record>(
        &mut self,
        target: &R,
        filter: &R,
        select: &R,
        raw: Option<&str>,
    ) -> Result<Vec<R>, SqlRecordError> {
        self.update(target, filter, None)?;
        self.select(select, filter, raw)
    }

    /// Upsert, then select the `select` fields of rows matching the set fields of
    /// `record`.
    ///
    /// # Errors
    /// The upsert's error, or the select's.
    pub fn upsert_then_select<R: Record>(
        &mut self,
        record: &R,
        select: &R,
        raw: Option<&str>,
    ) -> Result<Vec<R>, SqlRecordError> {
        self.upsert(record)?;
        self.select(select, record, raw)
    }

    /// Increment, then read the moved fields back.
    ///
    /// # Errors
    /// The increment's error, or the select's.
    pub fn increment_then_select<R: Record>(
        &mut self,
        target: &R,
        filter: &R,
        delta: i64,
        raw: Option<&str>,
    ) -> Result<Vec<R>, SqlRecordError> {
        self.increment(target, filter, delta, None)?;
        self.select(target, filter, raw)
    }

    /// Decrement, then read the moved fields back.
    ///
    /// # Errors
    /// The decrement's error, or the select's.
    pub fn decrement_then_select<R: Record>(
        &mut self,
        target: &R,
        filter: &R,
        delta: i64,
        raw: Option<&str>,
    ) -> Result<Vec<R>, SqlRecordError> {
        self.decrement(target, filter, delta, None)?;
        self.select(target, filter, raw)
    }
}

#[cfg(test)]
mod tests {
    use crate::executor::Executor;
    use crate::record::Record;
    use crate::sql_record;
    use crate::test_utils::RecordingHandle;
    use crate::types::RowValues;

    sql_record! {
        #[derive(Debug, Clone, PartialEq)]
        pub struct Wallet => "wallet" {
            #[primary_key]
            pub owner: String,
            pub gold: i64,
        }
    }

    fn owner(name: &str) -> Wallet {
        Wallet {
            owner: Some(name.into()),
            ..Wallet::blank()
        }
    }

    #[test]
    fn increment_then_select_reads_back_the_target_fields() {
        let mut handle = RecordingHandle::new();
        handle.push_result(&["gold"], vec![vec![RowValues::Int(15)]]);
        let target = Wallet {
            gold: Some(0),
            ..Wallet::blank()
        };
        let rows = Executor::new(&mut handle)
            .increment_then_select(&target, &owner("kim"), 5, Some("LIMIT 1"))
            .unwrap();
        assert_eq!(rows[0].gold, Some(15));

        let sql: Vec<_> = handle.statements().iter().map(|s| s.sql().to_owned()).collect();
        assert_eq!(
            sql,
            [
                "UPDATE wallet SET gold=gold+5 WHERE owner=?;",
                "SELECT gold FROM wallet WHERE owner = ? LIMIT 1;",
            ]
        );
    }

    #[test]
    fn failed_write_skips_the_select() {
        let mut handle = RecordingHandle::new().fail_on_execute(1);
        let target = Wallet {
            gold: Some(0),
            ..Wallet::blank()
        };
        let err = Executor::new(&mut handle)
            .update_then_select(&target, &owner("kim"), &Wallet::blank(), None)
            .unwrap_err();
        assert!(err.to_string().contains("injected"));
        assert_eq!(handle.statements().len(), 1);
    }

    #[test]
    fn insert_then_select_filters_on_the_inserted_fields() {
        let mut handle = RecordingHandle::new();
        handle.push_result(
            &["owner", "gold"],
            vec![vec![RowValues::Text("kim".into()), RowValues::Int(0)]],
        );
        let rows = Executor::new(&mut handle)
            .insert_then_select(&owner("kim"), &Wallet::blank(), None)
            .unwrap();
        assert_eq!(rows, [Wallet {
            owner: Some("kim".into()),
            gold: Some(0)
        }]);
        assert_eq!(
            handle.statements()[1].literal(),
            "SELECT owner, gold FROM wallet WHERE owner = \"kim\";"
        );
    }

    #[test]
    fn upsert_then_select_uses_the_record_as_filter() {
        let mut handle = RecordingHandle::new();
        handle.push_result(&["gold"], Vec::new());
        let record = Wallet {
            owner: Some("kim".into()),
            gold: Some(3),
        };
        let select = Wallet {
            gold: Some(0),
            ..Wallet::blank()
        };
        let rows = Executor::new(&mut handle)
            .upsert_then_select(&record, &select, None)
            .unwrap();
        assert!(rows.is_empty());
        assert_eq!(
            handle.statements()[1].sql(),
            "SELECT gold FROM wallet WHERE owner = ? AND gold = ?;"
        );
    }
}
