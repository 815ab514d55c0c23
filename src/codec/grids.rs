//! Transposed-sheet codecs: BOQ and Manual overrides.
//!
//! Both sheets share the layout handled by [`super::transpose`]; this module
//! only knows the metric labels and the per-metric scalar rules. Writes take
//! the caller's type order (normally `project.types`): configured types come
//! first, payload-only types are appended, and anything else is dropped.

use indexmap::IndexMap;

use super::{cell, transpose};
use crate::model::{Boq, BoqEntry, Manual, ManualEntry};
use crate::store::{Cell, Table};

/// Header of the metric-label column.
pub const LABEL_HEADER: &str = "Metric";

/// BOQ metric: planned total in meters.
pub const BOQ_TOTAL: &str = "BOQ Total (m)";
/// BOQ metric: display color.
pub const BOQ_COLOR: &str = "Color";

/// Manual metric: delivered override (tri-state).
pub const MANUAL_DELIVERED: &str = "Delivered (m)";
/// Manual metric: pulled length.
pub const MANUAL_PULLED: &str = "Pulled (m)";
/// Manual metric: previous reporting week.
pub const MANUAL_LAST_WEEK: &str = "Last Week (m)";
/// Manual metric: current reporting week.
pub const MANUAL_THIS_WEEK: &str = "This Week (m)";

/// Column order for a grid write: every caller-ordered type, then payload
/// keys the order does not mention, in payload order.
fn column_order<V>(order: &[String], payload: &IndexMap<String, V>) -> Vec<String> {
    let mut keys: Vec<String> = order.to_vec();
    for key in payload.keys() {
        if !keys.contains(key) {
            keys.push(key.clone());
        }
    }
    keys
}

/// Decode the BOQ grid. Every type column yields an entry; blank cells mean
/// a zero total and no color.
pub fn decode_boq(table: &Table) -> Boq {
    untransposed_entries(table, |metrics| BoqEntry {
        total: cell::number(metric(metrics, BOQ_TOTAL)),
        color: cell::text(metric(metrics, BOQ_COLOR)),
    })
}

/// Encode the BOQ grid in the given type order.
pub fn encode_boq(order: &[String], boq: &Boq) -> Table {
    let keys = column_order(order, boq);
    transpose::transpose(
        LABEL_HEADER,
        &[BOQ_TOTAL, BOQ_COLOR],
        &keys,
        |key, metric| {
            let entry = boq.get(key);
            match metric {
                BOQ_TOTAL => Cell::Number(entry.map_or(0.0, |e| e.total)),
                _ => Cell::text(entry.map_or("", |e| e.color.as_str())),
            }
        },
    )
}

/// Decode the Manual grid, applying the tri-state `delivered` rule per type.
pub fn decode_manual(table: &Table) -> Manual {
    untransposed_entries(table, |metrics| ManualEntry {
        delivered: cell::delivered(metric(metrics, MANUAL_DELIVERED)),
        pulled: cell::number(metric(metrics, MANUAL_PULLED)),
        last_week: cell::number(metric(metrics, MANUAL_LAST_WEEK)),
        this_week: cell::number(metric(metrics, MANUAL_THIS_WEEK)),
    })
}

/// Encode the Manual grid in the given type order. Types without a payload
/// entry write as all-auto/zero.
pub fn encode_manual(order: &[String], manual: &Manual) -> Table {
    let keys = column_order(order, manual);
    let default = ManualEntry::default();
    transpose::transpose(
        LABEL_HEADER,
        &[
            MANUAL_DELIVERED,
            MANUAL_PULLED,
            MANUAL_LAST_WEEK,
            MANUAL_THIS_WEEK,
        ],
        &keys,
        |key, metric| {
            let entry = manual.get(key).unwrap_or(&default);
            match metric {
                MANUAL_DELIVERED => cell::delivered_cell(entry.delivered),
                MANUAL_PULLED => Cell::Number(entry.pulled),
                MANUAL_LAST_WEEK => Cell::Number(entry.last_week),
                _ => Cell::Number(entry.this_week),
            }
        },
    )
}

fn untransposed_entries<T>(
    table: &Table,
    build: impl Fn(&IndexMap<String, Cell>) -> T,
) -> IndexMap<String, T> {
    transpose::untranspose(table)
        .into_iter()
        .map(|(key, metrics)| {
            let entry = build(&metrics);
            (key, entry)
        })
        .collect()
}

fn metric<'a>(metrics: &'a IndexMap<String, Cell>, label: &str) -> &'a Cell {
    static EMPTY: Cell = Cell::Empty;
    metrics.get(label).unwrap_or(&EMPTY)
}
