//! Dashboard sheet rendering.
//!
//! The Dashboard is a read-only view of [`ProgressSummary`], regenerated on
//! every write. It is never decoded back; the durable sections are the
//! source of truth.

use crate::metrics::{ProgressSummary, TypeProgress};
use crate::store::{Cell, Row, Table};

const COLUMNS: [&str; 12] = [
    "Cable Type",
    "BOQ Total (km)",
    "Delivered (km)",
    "Pending (km)",
    "Pulled (km)",
    "Delivered - Pulled (km)",
    "Remaining vs BOQ (km)",
    "Last Week (km)",
    "This Week (km)",
    "Delivery %",
    "Pulling %",
    "SRN Deliveries",
];

/// Render the derived summary as a table. Percentages are written as
/// fractions (0.5 = 50%); renderers decide presentation.
pub fn encode_dashboard(summary: &ProgressSummary) -> Table {
    let mut table = Table::new(COLUMNS.iter().map(|c| c.to_string()).collect());
    match summary {
        ProgressSummary::NotConfigured => {
            table.rows.push(Row {
                cells: vec![Cell::text("# no cable types configured yet")],
                note: true,
            });
        }
        ProgressSummary::Ready(rows) => {
            for row in rows {
                table.rows.push(progress_row(row));
            }
        }
    }
    table
}

fn progress_row(p: &TypeProgress) -> Row {
    Row::data(vec![
        Cell::text(p.name.clone()),
        Cell::Number(p.boq_total_km),
        Cell::Number(p.delivered_km),
        Cell::Number(p.pending_km),
        Cell::Number(p.pulled_km),
        Cell::Number(p.delivered_minus_pulled_km),
        Cell::Number(p.remaining_vs_boq_km),
        Cell::Number(p.last_week_km),
        Cell::Number(p.this_week_km),
        Cell::Number(p.delivery_pct),
        Cell::Number(p.pulling_pct),
        Cell::Number(p.srn_delivery_count as f64),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derive_metrics;
    use crate::model::{Boq, BoqEntry, CableType, Manual, Project};

    #[test]
    fn not_configured_renders_a_single_note_row() {
        let table = encode_dashboard(&ProgressSummary::NotConfigured);
        assert_eq!(table.rows.len(), 1);
        assert!(table.rows[0].note);
    }

    #[test]
    fn one_row_per_type_in_order() {
        let project = Project {
            types: vec![
                CableType {
                    name: "HV".into(),
                    color: String::new(),
                },
                CableType {
                    name: "LV".into(),
                    color: String::new(),
                },
            ],
            ..Default::default()
        };
        let boq = Boq::from_iter([(
            "HV".to_string(),
            BoqEntry {
                total: 1000.0,
                color: String::new(),
            },
        )]);
        let summary = derive_metrics(&project, &boq, &[], &Manual::new());

        let table = encode_dashboard(&summary);
        assert_eq!(table.columns.len(), 12);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].cell(0), &Cell::text("HV"));
        assert_eq!(table.rows[0].cell(1), &Cell::Number(1.0));
        assert_eq!(table.rows[1].cell(0), &Cell::text("LV"));
    }
}
