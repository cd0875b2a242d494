//! # Store
//!
//! Data access for the National Park Service database: the shared
//! connection, row normalization, filtered select building and the raw
//! statement escape hatch.

mod builder;
mod connection;
mod errors;
mod normalize;
mod raw;
mod tables;

pub use builder::{BuiltQuery, SelectBuilder};
pub use connection::{ScriptSource, Store, StoreOptions, EMBEDDED_SCHEMA, EMBEDDED_SEED};
pub use errors::{StoreError, StoreResult};
pub use normalize::{normalize_row, normalize_rows, normalize_value, Record};
pub use raw::{RawOutcome, RawStatement, BLOCKED_MESSAGE};
pub use tables::Table;

pub use rusqlite::types::Value as SqlValue;
pub use rusqlite::{params, Transaction};
