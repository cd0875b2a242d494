//! # Store
//!
//! Owns the process-wide SQLite connection. Every handler borrows it for the
//! duration of its statements; the mutex serializes access inside the
//! process while the engine's WAL journal handles readers from outside it.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use parking_lot::Mutex;
use rusqlite::{params_from_iter, Connection, OpenFlags, OptionalExtension, Params, Transaction};

use super::builder::BuiltQuery;
use super::errors::{StoreError, StoreResult};
use super::normalize::{column_names, normalize_row, normalize_rows, Record};
use super::raw::{RawOutcome, RawStatement};
use super::tables::Table;
use crate::observability::Event;

const BUSY_TIMEOUT_MS: u64 = 5_000;

/// Schema shipped with the binary
pub const EMBEDDED_SCHEMA: &str = include_str!("../../sql/schema.sql");

/// Sample data shipped with the binary
pub const EMBEDDED_SEED: &str = include_str!("../../sql/seed.sql");

/// Where a SQL script comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    Embedded(&'static str),
    File(PathBuf),
}

impl ScriptSource {
    fn load(&self) -> StoreResult<Cow<'static, str>> {
        match self {
            ScriptSource::Embedded(text) => Ok(Cow::Borrowed(text)),
            ScriptSource::File(path) => fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| StoreError::ScriptRead {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

/// How a store is prepared on open
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub schema: ScriptSource,
    pub seed: ScriptSource,
    /// Run the seed script when PERSON has no rows
    pub seed_on_empty: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            schema: ScriptSource::Embedded(EMBEDDED_SCHEMA),
            seed: ScriptSource::Embedded(EMBEDDED_SEED),
            seed_on_empty: true,
        }
    }
}

impl StoreOptions {
    /// Schema only, no sample data
    pub fn unseeded() -> Self {
        Self {
            seed_on_empty: false,
            ..Default::default()
        }
    }
}

/// Data-access object shared by all handlers
pub struct Store {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
    seeded: bool,
}

impl Store {
    /// Open (or create) a database file and bring its schema up
    pub fn open(path: &Path, options: &StoreOptions) -> StoreResult<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE;
        let conn = Connection::open_with_flags(path, flags)?;
        conn.busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS))?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        tracing::debug!(journal_mode = %mode, "journal mode set");

        let mut store = Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
            seeded: false,
        };
        store.bootstrap(options)?;
        tracing::info!(event = %Event::DatabaseOpened, path = %path.display(), "database ready");
        Ok(store)
    }

    /// Open a private in-memory database
    pub fn open_in_memory(options: &StoreOptions) -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self {
            conn: Mutex::new(conn),
            path: None,
            seeded: false,
        };
        store.bootstrap(options)?;
        Ok(store)
    }

    fn bootstrap(&mut self, options: &StoreOptions) -> StoreResult<()> {
        let schema = options.schema.load()?;
        let conn = self.conn.get_mut();

        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute_batch(&schema)?;
        tracing::info!(event = %Event::SchemaApplied, "schema applied");

        if !options.seed_on_empty {
            return Ok(());
        }

        let persons: i64 = conn.query_row("SELECT COUNT(*) FROM PERSON", [], |row| row.get(0))?;
        if persons == 0 {
            let seed = options.seed.load()?;
            let tx = conn.transaction()?;
            tx.execute_batch(&seed)?;
            tx.commit()?;
            self.seeded = true;
            tracing::info!(event = %Event::DatabaseSeeded, "database seeded with sample data");
        }
        Ok(())
    }

    /// Database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether this open loaded the seed script
    pub fn was_seeded(&self) -> bool {
        self.seeded
    }

    /// All rows of a read statement
    pub fn query_rows<P: Params>(&self, sql: &str, params: P) -> StoreResult<Vec<Record>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(sql)?;
        Ok(normalize_rows(&mut stmt, params)?)
    }

    /// First row of a read statement, or `None`
    pub fn query_one<P: Params>(&self, sql: &str, params: P) -> StoreResult<Option<Record>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(sql)?;
        let columns = column_names(&stmt);
        let record = stmt
            .query_row(params, |row| normalize_row(row, &columns))
            .optional()?;
        Ok(record)
    }

    /// Rows of a statement produced by [`SelectBuilder`](super::SelectBuilder)
    pub fn query_built(&self, query: &BuiltQuery) -> StoreResult<Vec<Record>> {
        self.query_rows(&query.sql, params_from_iter(query.params.iter()))
    }

    /// Single integer produced by an aggregate
    pub fn query_i64<P: Params>(&self, sql: &str, params: P) -> StoreResult<i64> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(sql)?;
        Ok(stmt.query_row(params, |row| row.get(0))?)
    }

    /// Round-trip a trivial statement through the connection
    pub fn ping(&self) -> StoreResult<()> {
        self.query_i64("SELECT 1", []).map(|_| ())
    }

    /// Row count of a table
    pub fn count(&self, table: Table) -> StoreResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.as_str());
        self.query_i64(&sql, [])
    }

    /// Run a write statement, returning the number of affected rows
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> StoreResult<usize> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(sql)?;
        Ok(stmt.execute(params)?)
    }

    /// Run several statements atomically
    ///
    /// The closure's error rolls the transaction back when it is dropped.
    pub fn transaction<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> rusqlite::Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let out = f(&tx)?;
        tx.commit()?;
        Ok(out)
    }

    /// Execute an escape-hatch statement exactly as written
    pub fn run_raw(&self, statement: &RawStatement) -> StoreResult<RawOutcome> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(statement.sql())?;
        if stmt.column_count() > 0 {
            let rows = normalize_rows(&mut stmt, [])?;
            return Ok(RawOutcome::Rows { rows });
        }
        let changes = stmt.execute([])?;
        Ok(RawOutcome::Write {
            changes,
            last_insert_rowid: conn.last_insert_rowid(),
        })
    }

    /// Close the connection, surfacing any error the engine reports
    pub fn close(self) -> StoreResult<()> {
        let conn = self.conn.into_inner();
        conn.close().map_err(|(_, e)| StoreError::from(e))?;
        tracing::info!(event = %Event::DatabaseClosed, "database closed");
        Ok(())
    }
}
