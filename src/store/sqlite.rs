//! Durable [`TabularStore`] backed by SQLite through Diesel.
//!
//! Each sheet is persisted as one row in `sheets` (header + format hints as
//! JSON) plus one row per table row in `sheet_rows` (cells as JSON, ordered
//! by `row_idx`). Writes replace a sheet wholesale inside a single immediate
//! transaction; `ON DELETE CASCADE` keeps `sheet_rows` consistent.

use anyhow::Context;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Cell, Row, StoreError, Table, TabularStore};
use crate::db::{connection, migrate};
use crate::schema::{sheet_rows, sheets};

#[derive(Debug, Default, Serialize, Deserialize)]
struct SheetMeta {
    columns: Vec<String>,
    #[serde(default)]
    text_columns: Vec<usize>,
}

#[derive(Insertable)]
#[diesel(table_name = sheets)]
struct NewSheet<'a> {
    name: &'a str,
    meta: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = sheet_rows)]
struct NewSheetRow<'a> {
    sheet: &'a str,
    row_idx: i32,
    cells: String,
    note: i32,
}

/// SQLite-backed store.
pub struct SqliteStore {
    conn: SqliteConnection,
}

impl SqliteStore {
    /// Run pending migrations and open a PRAGMA-tuned connection at `path`.
    pub fn open(path: &str) -> anyhow::Result<Self> {
        migrate::run_sqlite(path).context("run sheet-store migrations")?;
        let conn = connection::connect_sqlite(path).context("open sheet store")?;
        Ok(SqliteStore { conn })
    }

    /// Wrap an already-opened connection (migrations must have run).
    pub fn from_connection(conn: SqliteConnection) -> Self {
        SqliteStore { conn }
    }
}

impl TabularStore for SqliteStore {
    fn get_table(&mut self, name: &str) -> Result<Table, StoreError> {
        let meta: Option<String> = sheets::table
            .find(name)
            .select(sheets::meta)
            .first(&mut self.conn)
            .optional()
            .with_context(|| format!("load sheet meta for {name}"))?;

        let Some(meta) = meta else {
            return Ok(Table::default());
        };
        let meta: SheetMeta = serde_json::from_str(&meta)
            .with_context(|| format!("parse sheet meta for {name}"))?;

        let raw: Vec<(String, i32)> = sheet_rows::table
            .filter(sheet_rows::sheet.eq(name))
            .order(sheet_rows::row_idx.asc())
            .select((sheet_rows::cells, sheet_rows::note))
            .load(&mut self.conn)
            .with_context(|| format!("load rows for {name}"))?;

        let mut table = Table::new(meta.columns);
        table.text_columns = meta.text_columns;
        for (cells, note) in raw {
            let cells: Vec<Cell> = serde_json::from_str(&cells)
                .with_context(|| format!("parse row cells for {name}"))?;
            table.rows.push(Row {
                cells,
                note: note != 0,
            });
        }
        Ok(table)
    }

    fn put_table(&mut self, name: &str, table: &Table) -> Result<(), StoreError> {
        let meta = serde_json::to_string(&SheetMeta {
            columns: table.columns.clone(),
            text_columns: table.text_columns.clone(),
        })
        .context("serialize sheet meta")?;

        let mut rows = Vec::with_capacity(table.rows.len());
        for (idx, row) in table.rows.iter().enumerate() {
            rows.push(NewSheetRow {
                sheet: name,
                row_idx: idx as i32,
                cells: serde_json::to_string(&row.cells).context("serialize row cells")?,
                note: i32::from(row.note),
            });
        }

        self.conn
            .immediate_transaction::<_, anyhow::Error, _>(|conn| {
                diesel::insert_into(sheets::table)
                    .values(NewSheet {
                        name,
                        meta: &meta,
                    })
                    .on_conflict(sheets::name)
                    .do_update()
                    .set(sheets::meta.eq(&meta))
                    .execute(conn)?;

                diesel::delete(sheet_rows::table.filter(sheet_rows::sheet.eq(name)))
                    .execute(conn)?;
                diesel::insert_into(sheet_rows::table)
                    .values(&rows)
                    .execute(conn)?;
                Ok(())
            })
            .with_context(|| format!("replace sheet {name}"))?;
        Ok(())
    }
}
