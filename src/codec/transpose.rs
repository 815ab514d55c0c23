//! Generic transposed-grid mapping, shared by the BOQ and Manual codecs.
//!
//! A transposed sheet stores category instances (cable types) as columns and
//! named metrics as rows:
//!
//! ```text
//! | Metric          | HV   | LV  |
//! | BOQ Total (m)   | 1000 | 600 |
//! | Color           | #d32 | #19 |
//! ```
//!
//! [`untranspose`] turns that into `type -> {metric: cell}`; [`transpose`]
//! inverts it back, one physical row per metric, columns in the exact order
//! the caller supplies.

use indexmap::IndexMap;

use super::cell;
use crate::store::{Cell, Row, Table};

/// Decode a transposed sheet into `key -> {metric label -> cell}`.
///
/// The header row supplies the keys (first column is the metric-label
/// column); each data row contributes one metric per key. Informational rows
/// and rows with an empty label are skipped. Keys appear in header order.
pub fn untranspose(table: &Table) -> IndexMap<String, IndexMap<String, Cell>> {
    let keys: Vec<String> = table.columns.iter().skip(1).cloned().collect();

    let mut out: IndexMap<String, IndexMap<String, Cell>> = IndexMap::new();
    for key in &keys {
        if !key.trim().is_empty() {
            out.entry(key.clone()).or_default();
        }
    }

    for row in &table.rows {
        if row.note {
            continue;
        }
        let label = cell::text(row.cell(0));
        if label.trim().is_empty() || label.starts_with('#') {
            continue;
        }
        for (idx, key) in keys.iter().enumerate() {
            if let Some(metrics) = out.get_mut(key) {
                metrics.insert(label.clone(), row.cell(idx + 1).clone());
            }
        }
    }
    out
}

/// Encode a transposed sheet: one row per metric label, one column per key,
/// in the given orders. `value(key, metric)` supplies each cell.
pub fn transpose(
    label_header: &str,
    metric_labels: &[&str],
    keys: &[String],
    value: impl Fn(&str, &str) -> Cell,
) -> Table {
    let mut columns = Vec::with_capacity(keys.len() + 1);
    columns.push(label_header.to_string());
    columns.extend(keys.iter().cloned());

    let mut table = Table::new(columns);
    for metric in metric_labels {
        let mut cells = Vec::with_capacity(keys.len() + 1);
        cells.push(Cell::text(*metric));
        for key in keys {
            cells.push(value(key, metric));
        }
        table.rows.push(Row::data(cells));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(keys: &[&str], metrics: &[(&str, &[f64])]) -> Table {
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        let metric_labels: Vec<&str> = metrics.iter().map(|(label, _)| *label).collect();
        transpose("Metric", &metric_labels, &keys, |key, metric| {
            let col = keys.iter().position(|k| k == key).unwrap();
            let values = metrics.iter().find(|(label, _)| *label == metric).unwrap().1;
            Cell::Number(values[col])
        })
    }

    #[test]
    fn round_trip_inverts_the_layout() {
        let table = grid(
            &["HV", "LV"],
            &[("Total", &[1000.0, 600.0]), ("Weight", &[7.5, 2.0])],
        );
        assert_eq!(table.columns, vec!["Metric", "HV", "LV"]);
        assert_eq!(table.rows.len(), 2);

        let decoded = untranspose(&table);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded["HV"]["Total"], Cell::Number(1000.0));
        assert_eq!(decoded["LV"]["Weight"], Cell::Number(2.0));
        // key order follows the header row
        assert_eq!(
            decoded.keys().cloned().collect::<Vec<_>>(),
            vec!["HV", "LV"]
        );
    }

    #[test]
    fn informational_rows_are_skipped() {
        let mut table = grid(&["HV"], &[("Total", &[1000.0])]);
        table.rows.push(Row {
            cells: vec![Cell::text("# help: edit the row above")],
            note: true,
        });
        table.rows.push(Row::data(vec![Cell::text("# marker-only note")]));

        let decoded = untranspose(&table);
        assert_eq!(decoded["HV"].len(), 1);
    }

    #[test]
    fn empty_grid_decodes_to_no_keys() {
        let decoded = untranspose(&Table::default());
        assert!(decoded.is_empty());
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn any_grid_survives_a_round_trip(
            keys in proptest::collection::vec("[A-Za-z][A-Za-z0-9 ]{0,6}", 0..6),
            labels in proptest::collection::vec("[A-Za-z][A-Za-z0-9 ()]{0,10}", 1..4),
            seed in 0u32..1000,
        ) {
            // de-duplicate; a sheet cannot hold two columns/rows with one name
            let mut keys = keys;
            keys.sort();
            keys.dedup();
            let mut labels = labels;
            labels.sort();
            labels.dedup();

            let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();
            let value = |key: &str, metric: &str| {
                let mix = key.len() as u32 * 31 + metric.len() as u32 + seed;
                Cell::Number(f64::from(mix))
            };

            let table = transpose("Metric", &label_refs, &keys, value);
            let decoded = untranspose(&table);

            prop_assert_eq!(decoded.len(), keys.len());
            for key in &keys {
                for label in &labels {
                    prop_assert_eq!(&decoded[key.as_str()][label.as_str()], &value(key, label));
                }
            }
        }
    }
}
