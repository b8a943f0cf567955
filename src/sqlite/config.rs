use std::path::PathBuf;
use std::time::Duration;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::error::SqlRecordError;

/// How to open a `SQLite` database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// Database file; `:memory:` opens a private in-memory database.
    pub path: PathBuf,
    pub busy_timeout_ms: u64,
    /// Switch the journal to WAL mode after opening.
    pub wal: bool,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(":memory:"),
            busy_timeout_ms: 5_000,
            wal: false,
        }
    }
}

impl SqliteConfig {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_wal(mut self, wal: bool) -> Self {
        self.wal = wal;
        self
    }

    #[must_use]
    pub fn with_busy_timeout_ms(mut self, busy_timeout_ms: u64) -> Self {
        self.busy_timeout_ms = busy_timeout_ms;
        self
    }

    /// Parse a config from JSON; missing keys take their defaults.
    ///
    /// # Errors
    /// Returns `SqlRecordError::ConfigError` if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, SqlRecordError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Open the database and apply the busy timeout and journal mode.
    ///
    /// # Errors
    /// Returns `SqlRecordError::SqliteError` if the file cannot be opened or a
    /// pragma fails.
    pub fn open(&self) -> Result<Connection, SqlRecordError> {
        let conn = if self.path.as_os_str() == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(&self.path)?
        };
        conn.busy_timeout(Duration::from_millis(self.busy_timeout_ms))?;
        if self.wal {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        tracing::debug!(path = %self.path.display(), wal = self.wal, "opened sqlite database");
        Ok(conn)
    }
}
