//! Field metadata and the scalar types a record field may hold.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::SqlRecordError;
use crate::types::RowValues;

/// The scalar kind of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarKind {
    Text,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Timestamp,
}

impl ScalarKind {
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, ScalarKind::Text | ScalarKind::Timestamp)
    }
}

/// Static metadata for one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldMeta {
    /// Field name, used verbatim as the column name.
    pub name: &'static str,
    pub kind: ScalarKind,
    /// Excluded from the UPDATE part of an UPSERT.
    pub primary_key: bool,
    /// May be left unset when inserting.
    pub nullable: bool,
}

impl FieldMeta {
    #[must_use]
    pub const fn new(name: &'static str, kind: ScalarKind) -> Self {
        Self {
            name,
            kind,
            primary_key: false,
            nullable: false,
        }
    }

    /// Mark the field as (part of) the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark the field as nullable.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// A Rust type that can sit inside a record field.
///
/// Implemented for `String`, every integer width, `f32`/`f64` and
/// [`chrono::NaiveDateTime`]. A field of any other type does not compile.
pub trait FieldType: Sized {
    const KIND: ScalarKind;

    fn to_row_value(&self) -> RowValues;

    /// Convert a value read back from the store.
    ///
    /// # Errors
    /// Returns a message when the stored value does not fit this type.
    fn from_row_value(value: RowValues) -> Result<Self, String>;
}

macro_rules! impl_signed_field {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl FieldType for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;

                #[allow(clippy::cast_lossless, clippy::cast_possible_wrap)]
                fn to_row_value(&self) -> RowValues {
                    RowValues::Int(*self as i64)
                }

                fn from_row_value(value: RowValues) -> Result<Self, String> {
                    match value {
                        RowValues::Int(i) => <$ty>::try_from(i).map_err(|e| e.to_string()),
                        RowValues::UInt(u) => <$ty>::try_from(u).map_err(|e| e.to_string()),
                        other => Err(format!("expected integer, got {other:?}")),
                    }
                }
            }
        )*
    };
}

macro_rules! impl_unsigned_field {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl FieldType for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;

                #[allow(clippy::cast_lossless)]
                fn to_row_value(&self) -> RowValues {
                    RowValues::UInt(*self as u64)
                }

                fn from_row_value(value: RowValues) -> Result<Self, String> {
                    match value {
                        RowValues::Int(i) => <$ty>::try_from(i).map_err(|e| e.to_string()),
                        RowValues::UInt(u) => <$ty>::try_from(u).map_err(|e| e.to_string()),
                        other => Err(format!("expected unsigned integer, got {other:?}")),
                    }
                }
            }
        )*
    };
}

impl_signed_field!(i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize);
impl_unsigned_field!(u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize);

impl FieldType for f64 {
    const KIND: ScalarKind = ScalarKind::F64;

    fn to_row_value(&self) -> RowValues {
        RowValues::Float(*self)
    }

    fn from_row_value(value: RowValues) -> Result<Self, String> {
        value
            .as_float()
            .ok_or_else(|| format!("expected float, got {value:?}"))
    }
}

impl FieldType for f32 {
    const KIND: ScalarKind = ScalarKind::F32;

    fn to_row_value(&self) -> RowValues {
        RowValues::Float(f64::from(*self))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_row_value(value: RowValues) -> Result<Self, String> {
        value
            .as_float()
            .map(|f| f as f32)
            .ok_or_else(|| format!("expected float, got {value:?}"))
    }
}

impl FieldType for String {
    const KIND: ScalarKind = ScalarKind::Text;

    fn to_row_value(&self) -> RowValues {
        RowValues::Text(self.clone())
    }

    fn from_row_value(value: RowValues) -> Result<Self, String> {
        match value {
            RowValues::Text(s) => Ok(s),
            other => Err(format!("expected text, got {other:?}")),
        }
    }
}

impl FieldType for NaiveDateTime {
    const KIND: ScalarKind = ScalarKind::Timestamp;

    fn to_row_value(&self) -> RowValues {
        RowValues::Timestamp(*self)
    }

    fn from_row_value(value: RowValues) -> Result<Self, String> {
        value
            .as_timestamp()
            .ok_or_else(|| format!("expected timestamp, got {value:?}"))
    }
}

/// Decode a stored value into an optional field slot. NULL leaves the slot unset.
///
/// # Errors
/// Returns `SqlRecordError::Decode` when the value does not fit `T`.
pub fn decode_slot<T: FieldType>(
    table: &'static str,
    column: &'static str,
    value: RowValues,
) -> Result<Option<T>, SqlRecordError> {
    if value.is_null() {
        return Ok(None);
    }
    T::from_row_value(value)
        .map(Some)
        .map_err(|message| SqlRecordError::Decode {
            table,
            column,
            message,
        })
}
