//! Records: plain structs whose fields are either set or unset.
//!
//! A set field (`Some`) takes part in the statement being built; an unset one
//! (`None`) is skipped. Implement [`Record`] with the [`sql_record!`](crate::sql_record)
//! macro or by hand.

use std::any::TypeId;

use crate::error::SqlRecordError;
use crate::types::RowValues;

pub mod field;
pub mod introspect;
mod macros;

pub use field::{FieldMeta, FieldType, ScalarKind, decode_slot};

/// A struct that maps to one table.
pub trait Record: Default + 'static {
    /// Table name the record maps to.
    const TABLE: &'static str;
    /// Field metadata, in declaration order.
    const FIELDS: &'static [FieldMeta];

    /// Current value of field `index`, or `None` when the field is unset or the
    /// index is out of range.
    fn value(&self, index: usize) -> Option<RowValues>;

    /// Store a value decoded from a result row into field `index`.
    ///
    /// # Errors
    /// Returns `SqlRecordError::Decode` when the value does not fit the field, or
    /// when `index` is out of range.
    fn set_value(&mut self, index: usize, value: RowValues) -> Result<(), SqlRecordError>;

    fn is_used(&self, index: usize) -> bool {
        self.value(index).is_some()
    }

    /// Unset every field.
    fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    fn blank() -> Self {
        Self::default()
    }

    #[must_use]
    fn blank_many(count: usize) -> Vec<Self> {
        (0..count).map(|_| Self::default()).collect()
    }
}

/// Type-erased view of a [`Record`].
///
/// Statement builders work on `&dyn AnyRecord` so one call can mix arguments and
/// report a type mismatch instead of refusing to compile.
pub trait AnyRecord {
    fn record_type(&self) -> TypeId;
    fn type_name(&self) -> &'static str;
    fn table(&self) -> &'static str;
    fn fields(&self) -> &'static [FieldMeta];
    fn field_value(&self, index: usize) -> Option<RowValues>;
    fn is_field_used(&self, index: usize) -> bool;
    fn clear(&mut self);
}

impl<R: Record> AnyRecord for R {
    fn record_type(&self) -> TypeId {
        TypeId::of::<R>()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<R>()
    }

    fn table(&self) -> &'static str {
        R::TABLE
    }

    fn fields(&self) -> &'static [FieldMeta] {
        R::FIELDS
    }

    fn field_value(&self, index: usize) -> Option<RowValues> {
        self.value(index)
    }

    fn is_field_used(&self, index: usize) -> bool {
        self.is_used(index)
    }

    fn clear(&mut self) {
        self.reset();
    }
}

/// Unset every field of every record given.
pub fn reset_all(records: &mut [&mut dyn AnyRecord]) {
    for record in records.iter_mut() {
        record.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql_record;

    sql_record! {
        #[derive(Debug, Clone, PartialEq)]
        pub struct Account => "tblaccount" {
            #[primary_key]
            pub player_key: String,
            pub user_uuid: i64,
            #[nullable]
            pub sns_id: String,
        }
    }

    sql_record! {
        #[derive(Debug, Clone)]
        struct Score {
            user_id: u32,
            points: f64,
        }
    }

    #[test]
    fn set_fields_are_used_until_reset() {
        let mut account = Account {
            player_key: Some("hello1".into()),
            user_uuid: Some(i64::MAX),
            sns_id: None,
        };
        assert!(account.is_used(0));
        assert!(account.is_used(1));
        assert!(!account.is_used(2));
        assert!(!account.is_used(99));

        account.reset();
        assert!((0..Account::FIELDS.len()).all(|i| !account.is_used(i)));
    }

    #[test]
    fn reset_all_clears_mixed_records() {
        let mut account = Account {
            user_uuid: Some(1),
            ..Account::blank()
        };
        let mut score = Score {
            user_id: Some(3),
            points: Some(1.5),
        };
        reset_all(&mut [&mut account, &mut score]);
        assert_eq!(account, Account::blank());
        assert!(score.user_id.is_none() && score.points.is_none());
    }

    #[test]
    fn macro_emits_metadata_in_declaration_order() {
        assert_eq!(Account::TABLE, "tblaccount");
        assert_eq!(Score::TABLE, "Score");

        let names: Vec<_> = Account::FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names, ["player_key", "user_uuid", "sns_id"]);
        assert!(Account::FIELDS[0].primary_key);
        assert!(!Account::FIELDS[0].nullable);
        assert!(Account::FIELDS[2].nullable);
        assert_eq!(Score::FIELDS[1].kind, ScalarKind::F64);
    }

    #[test]
    fn set_value_decodes_by_position() {
        let mut score = Score::blank();
        score.set_value(0, RowValues::Int(12)).unwrap();
        score.set_value(1, RowValues::Float(0.5)).unwrap();
        assert_eq!(score.user_id, Some(12));
        assert_eq!(score.points, Some(0.5));

        assert!(score.set_value(0, RowValues::Int(-1)).is_err());
        assert!(score.set_value(5, RowValues::Int(1)).is_err());
    }

    #[test]
    fn blank_many_builds_unset_records() {
        let rows = Account::blank_many(3);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| *r == Account::default()));
    }

    #[test]
    fn type_erased_view_reports_identity() {
        let account = Account::blank();
        let score = Score::blank();
        let erased: [&dyn AnyRecord; 2] = [&account, &score];
        assert_ne!(erased[0].record_type(), erased[1].record_type());
        assert_eq!(erased[0].table(), "tblaccount");
        assert!(erased[1].type_name().ends_with("Score"));
    }
}
