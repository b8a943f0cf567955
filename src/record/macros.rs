/// Declare a record struct and implement [`Record`](crate::record::Record) for it.
///
/// Every field is stored as `Option<T>`; `None` means the field takes no part in
/// the statement being built. The table name defaults to the struct name and can
/// be overridden with `=> "table"`. Two field markers are recognized:
/// `#[primary_key]` and `#[nullable]`.
///
/// ```rust
/// use sql_record::prelude::*;
///
/// sql_record! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Account => "tblaccount" {
///         #[primary_key]
///         pub player_key: String,
///         pub user_uuid: i64,
///         #[nullable]
///         pub sns_id: String,
///     }
/// }
///
/// let mut account = Account::blank();
/// account.user_uuid = Some(20);
/// assert_eq!(Account::TABLE, "tblaccount");
/// assert!(account.is_used(1));
/// ```
///
/// `Default` is derived by the macro; do not list it again. Field doc comments are
/// not accepted between the markers.
#[macro_export]
macro_rules! sql_record {
    (@emit
        [$($meta:tt)*] $vis:vis $name:ident, $table:expr,
        { $( [$($flag:ident)*] $field_vis:vis $field:ident : $ty:ty ),* }
    ) => {
        $($meta)*
        #[derive(Default)]
        $vis struct $name {
            $( $field_vis $field: ::core::option::Option<$ty>, )*
        }

        impl $crate::record::Record for $name {
            const TABLE: &'static str = $table;
            const FIELDS: &'static [$crate::record::FieldMeta] = &[
                $(
                    $crate::record::FieldMeta::new(
                        ::core::stringify!($field),
                        <$ty as $crate::record::FieldType>::KIND,
                    )
                    $( .$flag() )*,
                )*
            ];

            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn value(&self, index: usize) -> ::core::option::Option<$crate::types::RowValues> {
                let mut slot = 0usize;
                $(
                    if slot == index {
                        return self
                            .$field
                            .as_ref()
                            .map(<$ty as $crate::record::FieldType>::to_row_value);
                    }
                    slot += 1;
                )*
                ::core::option::Option::None
            }

            #[allow(unused_assignments, unused_mut)]
            fn set_value(
                &mut self,
                index: usize,
                value: $crate::types::RowValues,
            ) -> ::core::result::Result<(), $crate::error::SqlRecordError> {
                let mut slot = 0usize;
                $(
                    if slot == index {
                        self.$field = $crate::record::decode_slot::<$ty>(
                            $table,
                            ::core::stringify!($field),
                            value,
                        )?;
                        return ::core::result::Result::Ok(());
                    }
                    slot += 1;
                )*
                ::core::result::Result::Err($crate::error::SqlRecordError::Decode {
                    table: $table,
                    column: "<none>",
                    message: ::std::format!("field index {index} out of range ({value:?})"),
                })
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident => $table:literal {
            $( $(#[$flag:ident])* $field_vis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $crate::sql_record!(@emit
            [$(#[$meta])*] $vis $name, $table,
            { $( [$($flag)*] $field_vis $field : $ty ),* }
        );
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$flag:ident])* $field_vis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $crate::sql_record!(@emit
            [$(#[$meta])*] $vis $name, ::core::stringify!($name),
            { $( [$($flag)*] $field_vis $field : $ty ),* }
        );
    };
}
