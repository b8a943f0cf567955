//! Builder and executor settings.

use serde::{Deserialize, Serialize};

use crate::error::SqlRecordError;

/// Which statements may run without a WHERE clause.
///
/// A statement has a condition when its filter record sets at least one field or
/// a raw condition is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WherePolicy {
    /// SELECT, UPDATE, DELETE and INCREMENT all need a condition.
    Strict,
    /// SELECT may read the whole table; writes need a condition.
    #[default]
    SelectUnbounded,
    /// Nothing needs a condition.
    Permissive,
}

impl WherePolicy {
    #[must_use]
    pub fn requires_condition(self, is_select: bool) -> bool {
        match self {
            WherePolicy::Strict => true,
            WherePolicy::SelectUnbounded => !is_select,
            WherePolicy::Permissive => false,
        }
    }
}

/// How executed statements are logged through `tracing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementLog {
    #[default]
    Off,
    /// Log the SQL as sent, with `?` placeholders.
    Placeholders,
    /// Log the SQL with values inlined. Values are not escaped.
    Literal,
}

/// Options shared by the statement builder, the executor and batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    pub where_policy: WherePolicy,
    pub statement_log: StatementLog,
}

impl BuilderOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_where_policy(mut self, where_policy: WherePolicy) -> Self {
        self.where_policy = where_policy;
        self
    }

    #[must_use]
    pub fn with_statement_log(mut self, statement_log: StatementLog) -> Self {
        self.statement_log = statement_log;
        self
    }

    /// Parse options from JSON; missing keys take their defaults.
    ///
    /// # Errors
    /// Returns `SqlRecordError::ConfigError` if the JSON is malformed or names an
    /// unknown variant.
    pub fn from_json(json: &str) -> Result<Self, SqlRecordError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_allow_unbounded_select_only() {
        let options = BuilderOptions::default();
        assert_eq!(options.where_policy, WherePolicy::SelectUnbounded);
        assert!(!options.where_policy.requires_condition(true));
        assert!(options.where_policy.requires_condition(false));
        assert!(WherePolicy::Strict.requires_condition(true));
        assert!(!WherePolicy::Permissive.requires_condition(false));
    }

    #[test]
    fn json_fills_missing_keys_with_defaults() {
        let options = BuilderOptions::from_json(r#"{ "where_policy": "strict" }"#).unwrap();
        assert_eq!(options.where_policy, WherePolicy::Strict);
        assert_eq!(options.statement_log, StatementLog::Off);

        let options = BuilderOptions::from_json("{}").unwrap();
        assert_eq!(options, BuilderOptions::default());
    }

    #[test]
    fn json_rejects_unknown_policy() {
        let err = BuilderOptions::from_json(r#"{ "where_policy": "sometimes" }"#).unwrap_err();
        assert!(matches!(err, SqlRecordError::ConfigError(_)));
    }
}
