use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used for literals, bound parameters and decoding.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Values read from a record field, bound as statement parameters, or decoded
/// from a result row.
///
/// ```rust
/// use sql_record::prelude::*;
///
/// let params = vec![
///     RowValues::Int(10),
///     RowValues::Text("127.0.0.1".into()),
/// ];
/// assert_eq!(params[1].to_sql_literal(), "\"127.0.0.1\"");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowValues {
    /// Signed integer value (64-bit)
    Int(i64),
    /// Unsigned integer value (64-bit)
    UInt(u64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RowValues::Int(value) => Some(*value),
            RowValues::UInt(value) => i64::try_from(*value).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            RowValues::Float(value) => Some(*value),
            #[allow(clippy::cast_precision_loss)]
            RowValues::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let RowValues::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            // Try "YYYY-MM-DD HH:MM:SS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
                return Some(dt);
            }
            // Try "YYYY-MM-DD HH:MM:SS.SSS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
                return Some(dt);
            }
        }
        None
    }

    /// Render the value as an inline SQL literal.
    ///
    /// Strings and timestamps are wrapped in double quotes with no escaping at
    /// all, so the output is only fit for logs. Executed statements always bind
    /// the value as a parameter instead.
    #[must_use]
    pub fn to_sql_literal(&self) -> String {
        match self {
            RowValues::Int(i) => i.to_string(),
            RowValues::UInt(u) => u.to_string(),
            RowValues::Float(f) => f.to_string(),
            RowValues::Text(s) => format!("\"{s}\""),
            RowValues::Timestamp(dt) => format!("\"{}\"", dt.format(TIMESTAMP_FORMAT)),
            RowValues::Null => "NULL".to_string(),
        }
    }
}
