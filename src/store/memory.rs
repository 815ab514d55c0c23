//! In-memory [`TabularStore`] used by tests and the request-handler examples.

use indexmap::IndexMap;

use super::{Cell, StoreError, Table, TabularStore};

/// A sheet-per-key in-memory store.
///
/// With date inference enabled (the default, matching hosted spreadsheet
/// backends) any text cell that looks like a calendar date is coerced into a
/// native [`Cell::Date`] on write, unless the encoder flagged the column in
/// [`Table::text_columns`]. This is exactly the mangling the codec has to
/// detect and reverse, so keeping it on in tests exercises the real contract.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sheets: IndexMap<String, Table>,
    date_inference: bool,
}

impl MemoryStore {
    /// An empty store with date inference enabled.
    pub fn new() -> Self {
        MemoryStore {
            sheets: IndexMap::new(),
            date_inference: true,
        }
    }

    /// Toggle date inference; off gives a backend that stores cells verbatim.
    pub fn with_date_inference(mut self, enabled: bool) -> Self {
        self.date_inference = enabled;
        self
    }

    /// Names of sheets that have been written, in write order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

}

fn infer_dates(table: &mut Table) {
    let text_cols = table.text_columns.clone();
    for row in &mut table.rows {
        for (idx, cell) in row.cells.iter_mut().enumerate() {
            if text_cols.contains(&idx) {
                continue;
            }
            if let Cell::Text(s) = cell
                && let Some(date) = Cell::parse_date_text(s)
            {
                *cell = Cell::Date { date };
            }
        }
    }
}

impl TabularStore for MemoryStore {
    fn get_table(&mut self, name: &str) -> Result<Table, StoreError> {
        Ok(self.sheets.get(name).cloned().unwrap_or_default())
    }

    fn put_table(&mut self, name: &str, table: &Table) -> Result<(), StoreError> {
        let mut stored = table.clone();
        if self.date_inference {
            infer_dates(&mut stored);
        }
        self.sheets.insert(name.to_string(), stored);
        Ok(())
    }
}
