//! The generic tabular store the engine persists into.
//!
//! A [`Table`] is an ordered list of rows of [`Cell`]s under a named header
//! row. The engine never assumes a concrete backend: anything implementing
//! [`TabularStore`] works. Two adapters ship with the crate:
//! - [`memory::MemoryStore`] — in-process, with optional date inference that
//!   mimics spreadsheet backends coercing date-looking text into native dates
//! - [`sqlite::SqliteStore`] — durable, backed by SQLite through Diesel
//!
//! Backends are expected to be tolerant on read (a missing sheet is an empty
//! table, not an error) and may mark individual rows as informational so that
//! decoders skip them.

pub mod memory;
pub mod sqlite;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single cell value as stored by a backend.
///
/// Serialized form (used by the SQLite adapter) is untagged: `null`, a JSON
/// number, a `{"date": "YYYY-MM-DD"}` object, or a JSON string. The `date`
/// wrapper keeps native-date cells distinguishable from text so decode order
/// never reinterprets plain strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// An empty cell.
    #[default]
    Empty,
    /// A numeric cell.
    Number(f64),
    /// A native date cell, as produced by date-inferring backends.
    Date {
        /// The inferred calendar day.
        date: NaiveDate,
    },
    /// A plain text cell.
    Text(String),
}

impl Cell {
    /// Parse text that a date-inferring backend would coerce into a native
    /// date: `DD/MM/YYYY` or ISO `YYYY-MM-DD`.
    pub fn parse_date_text(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, "%d/%m/%Y")
            .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
            .ok()
    }

    /// Convenience constructor for a text cell.
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }
}

/// One table row: cells in column order, plus the informational marker.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    /// Cell values, aligned with [`Table::columns`].
    pub cells: Vec<Cell>,
    /// Informational rows (help text, legends) are skipped by decoders.
    #[serde(default)]
    pub note: bool,
}

impl Row {
    /// A plain data row.
    pub fn data(cells: Vec<Cell>) -> Self {
        Row { cells, note: false }
    }

    /// Cell at `idx`, or [`Cell::Empty`] when the row is short.
    pub fn cell(&self, idx: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.cells.get(idx).unwrap_or(&EMPTY)
    }
}

/// A named-column table, the unit of exchange with a [`TabularStore`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Header row: column titles.
    pub columns: Vec<String>,
    /// Data (and informational) rows.
    pub rows: Vec<Row>,
    /// Column indices that must be kept as plain text by the backend, i.e.
    /// exempt from date inference. Set by encoders for date columns.
    #[serde(default)]
    pub text_columns: Vec<usize>,
}

impl Table {
    /// An empty table with the given header row.
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
            text_columns: Vec::new(),
        }
    }

    /// True when the table has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Errors surfaced by store adapters.
///
/// Content-level problems (malformed cells, missing sheets) are not errors:
/// decoders substitute defaults. Only backend-level failures reach callers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Any backend failure: I/O, SQL, or persisted-row corruption.
    #[error("tabular store failure: {0}")]
    Backend(#[from] anyhow::Error),
}

/// The abstract backing store.
///
/// One sheet per call; a missing sheet reads back as an empty [`Table`].
/// Writes replace the named sheet wholesale. Reads take `&mut self` because
/// durable backends drive a connection.
pub trait TabularStore {
    /// Read the named sheet, or an empty table when it does not exist.
    fn get_table(&mut self, name: &str) -> Result<Table, StoreError>;

    /// Replace the named sheet with `table`.
    fn put_table(&mut self, name: &str, table: &Table) -> Result<(), StoreError>;
}

impl<S: TabularStore + ?Sized> TabularStore for &mut S {
    fn get_table(&mut self, name: &str) -> Result<Table, StoreError> {
        (**self).get_table(name)
    }

    fn put_table(&mut self, name: &str, table: &Table) -> Result<(), StoreError> {
        (**self).put_table(name, table)
    }
}
