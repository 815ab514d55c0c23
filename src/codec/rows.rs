//! Row-per-record codecs: the SRN delivery log and the snapshot history.

use indexmap::IndexMap;
use tracing::debug;

use super::cell;
use crate::model::{Snapshot, SrnRecord};
use crate::store::{Cell, Row, Table};

const SRN_COLUMNS: [&str; 4] = ["Cable Type", "Date", "Length (m)", "SRN Ref"];
const SNAPSHOT_COLUMNS: [&str; 5] = ["ID", "Week", "Date", "Pulled (m)", "Total (m)"];

fn is_skippable(row: &Row) -> bool {
    row.note || cell::text(row.cell(0)).starts_with('#')
}

/// Decode the SRN log. Rows without a cable type are ignored; dates are
/// normalized to `DD/MM/YYYY` whatever the backend handed back.
pub fn decode_srn(table: &Table) -> Vec<SrnRecord> {
    table
        .rows
        .iter()
        .filter(|row| !is_skippable(row))
        .filter_map(|row| {
            let cable_type = cell::text(row.cell(0));
            if cable_type.trim().is_empty() {
                return None;
            }
            Some(SrnRecord {
                cable_type,
                date: cell::date_text(row.cell(1)),
                length: cell::number(row.cell(2)),
                reference: cell::text(row.cell(3)),
            })
        })
        .collect()
}

/// Encode the SRN log, marking the date column as plain text so the backend
/// cannot re-infer native dates on the next load.
pub fn encode_srn(records: &[SrnRecord]) -> Table {
    let mut table = Table::new(SRN_COLUMNS.iter().map(|c| c.to_string()).collect());
    table.text_columns = vec![1];
    for rec in records {
        table.rows.push(Row::data(vec![
            Cell::text(rec.cable_type.clone()),
            Cell::text(rec.date.clone()),
            Cell::Number(rec.length),
            Cell::text(rec.reference.clone()),
        ]));
    }
    table
}

/// Decode the snapshot history. A missing id gets a fresh millisecond
/// timestamp; a malformed pulled-map cell decodes as empty.
pub fn decode_snapshots(table: &Table) -> Vec<Snapshot> {
    table
        .rows
        .iter()
        .filter(|row| !is_skippable(row))
        .filter_map(|row| {
            let week_label = cell::text(row.cell(1));
            let date = cell::date_text(row.cell(2));
            if week_label.trim().is_empty() && date.trim().is_empty() {
                return None;
            }

            let id_cell = row.cell(0);
            let id = if cell::text(id_cell).trim().is_empty() {
                Snapshot::default().id
            } else {
                cell::number(id_cell) as i64
            };

            let raw_pulled = cell::text(row.cell(3));
            let pulled: IndexMap<String, f64> = match serde_json::from_str(&raw_pulled) {
                Ok(map) => map,
                Err(err) => {
                    if !raw_pulled.trim().is_empty() {
                        debug!(%err, "snapshot pulled cell is not a JSON map, using empty map");
                    }
                    IndexMap::new()
                }
            };

            Some(Snapshot {
                id,
                week_label,
                date,
                pulled,
                total: cell::number(row.cell(4)),
            })
        })
        .collect()
}

/// Encode the snapshot history; the pulled map is serialized into one cell.
pub fn encode_snapshots(snapshots: &[Snapshot]) -> Table {
    let mut table = Table::new(SNAPSHOT_COLUMNS.iter().map(|c| c.to_string()).collect());
    table.text_columns = vec![2];
    for snap in snapshots {
        let pulled =
            serde_json::to_string(&snap.pulled).unwrap_or_else(|_| "{}".to_string());
        table.rows.push(Row::data(vec![
            Cell::Number(snap.id as f64),
            Cell::text(snap.week_label.clone()),
            Cell::text(snap.date.clone()),
            Cell::text(pulled),
            Cell::Number(snap.total),
        ]));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn srn_round_trips_in_entry_order() {
        let records = vec![
            SrnRecord {
                cable_type: "HV".into(),
                date: "05/01/2025".into(),
                length: 400.0,
                reference: "SRN-7".into(),
            },
            SrnRecord {
                cable_type: "HV".into(),
                date: "02/01/2025".into(),
                length: 100.0,
                reference: String::new(),
            },
        ];
        let back = decode_srn(&encode_srn(&records));
        assert_eq!(back, records);
    }

    #[test]
    fn srn_reverses_backend_date_inference() {
        let mut table = encode_srn(&[]);
        table.rows.push(Row::data(vec![
            Cell::text("HV"),
            Cell::Date {
                date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            },
            Cell::Number(400.0),
            Cell::Empty,
        ]));
        let back = decode_srn(&table);
        assert_eq!(back[0].date, "05/01/2025");
    }

    #[test]
    fn srn_date_column_is_forced_to_text() {
        assert_eq!(encode_srn(&[]).text_columns, vec![1]);
    }

    #[test]
    fn srn_skips_help_and_typeless_rows() {
        let mut table = encode_srn(&[]);
        table.rows.push(Row {
            cells: vec![Cell::text("# type | date | length | ref")],
            note: true,
        });
        table.rows.push(Row::data(vec![
            Cell::Empty,
            Cell::text("05/01/2025"),
            Cell::Number(10.0),
        ]));
        assert!(decode_srn(&table).is_empty());
    }

    #[test]
    fn snapshots_round_trip_with_pulled_map() {
        let snapshots = vec![Snapshot {
            id: 1_700_000_000_000,
            week_label: "W34".into(),
            date: "22/08/2025".into(),
            pulled: IndexMap::from_iter([("HV".to_string(), 300.0), ("LV".to_string(), 80.0)]),
            total: 380.0,
        }];
        let back = decode_snapshots(&encode_snapshots(&snapshots));
        assert_eq!(back, snapshots);
    }

    #[test]
    fn snapshot_without_id_gets_a_timestamp() {
        let mut table = encode_snapshots(&[]);
        table.rows.push(Row::data(vec![
            Cell::Empty,
            Cell::text("W35"),
            Cell::text("29/08/2025"),
            Cell::text("{}"),
            Cell::Number(0.0),
        ]));
        let back = decode_snapshots(&table);
        assert_eq!(back.len(), 1);
        assert!(back[0].id > 0, "absent id defaults to a timestamp");
    }

    #[test]
    fn snapshot_with_garbage_pulled_cell_decodes_empty() {
        let mut table = encode_snapshots(&[]);
        table.rows.push(Row::data(vec![
            Cell::Number(5.0),
            Cell::text("W1"),
            Cell::text("03/01/2025"),
            Cell::text("pulled: lots"),
            Cell::Number(12.0),
        ]));
        let back = decode_snapshots(&table);
        assert!(back[0].pulled.is_empty());
        assert_eq!(back[0].total, 12.0);
    }
}
