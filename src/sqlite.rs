//! `DbHandle` for a plain `rusqlite::Connection`.

pub mod config;
mod connection;
pub mod params;
pub mod query;

pub use config::SqliteConfig;
pub use params::Params;
pub use query::build_result_set;
