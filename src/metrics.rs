//! Progress aggregation: the derived-metrics table.
//!
//! [`derive_metrics`] is a pure function of the four primary sections. It is
//! recomputed on every write and never persisted as primary data; the
//! Dashboard sheet is only a rendering of its output.

use std::fmt;

use crate::model::{Boq, Delivered, Manual, ManualEntry, Project, SrnRecord};

/// Derived series for one cable type. All lengths are kilometers; inputs are
/// meters and divide by 1000 exactly once, here.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeProgress {
    /// Cable-type name, from `project.types`.
    pub name: String,
    /// Display color hint carried through for renderers.
    pub color: String,
    /// Planned total (BOQ), km.
    pub boq_total_km: f64,
    /// Delivered so far, km: the manual override when explicit, otherwise
    /// the SRN sum.
    pub delivered_km: f64,
    /// Planned minus delivered, km. Negative means over-delivery and is
    /// surfaced as-is.
    pub pending_km: f64,
    /// Pulled (installed), km.
    pub pulled_km: f64,
    /// Delivered minus pulled, km: stock on site.
    pub delivered_minus_pulled_km: f64,
    /// Planned minus pulled, km: installation still outstanding.
    pub remaining_vs_boq_km: f64,
    /// Pulled during the previous reporting week, km.
    pub last_week_km: f64,
    /// Pulled during the current reporting week, km.
    pub this_week_km: f64,
    /// Delivered / planned; 0 when nothing is planned.
    pub delivery_pct: f64,
    /// Pulled / planned; 0 when nothing is planned.
    pub pulling_pct: f64,
    /// Number of SRN records logged for this type.
    pub srn_delivery_count: usize,
}

/// Aggregator output.
///
/// An empty `project.types` is reported as [`ProgressSummary::NotConfigured`]
/// so callers can tell "nothing set up yet" apart from "all metrics zero".
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressSummary {
    /// No cable types configured yet.
    NotConfigured,
    /// One entry per configured type, in `project.types` order.
    Ready(Vec<TypeProgress>),
}

impl ProgressSummary {
    /// The per-type rows, empty when not configured.
    pub fn rows(&self) -> &[TypeProgress] {
        match self {
            ProgressSummary::NotConfigured => &[],
            ProgressSummary::Ready(rows) => rows,
        }
    }
}

/// Compute the derived metrics for every configured cable type.
pub fn derive_metrics(
    project: &Project,
    boq: &Boq,
    srn: &[SrnRecord],
    manual: &Manual,
) -> ProgressSummary {
    if project.types.is_empty() {
        return ProgressSummary::NotConfigured;
    }

    let default_manual = ManualEntry::default();
    let rows = project
        .types
        .iter()
        .map(|ty| {
            let entry = manual.get(&ty.name).unwrap_or(&default_manual);
            let boq_total_km = boq.get(&ty.name).map_or(0.0, |e| e.total) / 1000.0;

            // the override-vs-derive resolution point, per type
            let delivered_km = match entry.delivered {
                Delivered::Explicit(m) => m / 1000.0,
                Delivered::Auto => {
                    srn.iter()
                        .filter(|r| r.cable_type == ty.name)
                        .map(|r| r.length)
                        .sum::<f64>()
                        / 1000.0
                }
            };

            let pulled_km = entry.pulled / 1000.0;
            TypeProgress {
                name: ty.name.clone(),
                color: ty.color.clone(),
                boq_total_km,
                delivered_km,
                pending_km: boq_total_km - delivered_km,
                pulled_km,
                delivered_minus_pulled_km: delivered_km - pulled_km,
                remaining_vs_boq_km: boq_total_km - pulled_km,
                last_week_km: entry.last_week / 1000.0,
                this_week_km: entry.this_week / 1000.0,
                delivery_pct: ratio(delivered_km, boq_total_km),
                pulling_pct: ratio(pulled_km, boq_total_km),
                srn_delivery_count: srn.iter().filter(|r| r.cable_type == ty.name).count(),
            }
        })
        .collect();

    ProgressSummary::Ready(rows)
}

fn ratio(value: f64, total: f64) -> f64 {
    if total > 0.0 { value / total } else { 0.0 }
}

impl fmt::Display for ProgressSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = match self {
            ProgressSummary::NotConfigured => {
                return write!(f, "No cable types configured");
            }
            ProgressSummary::Ready(rows) => rows,
        };

        writeln!(
            f,
            "{:<12} {:>9} {:>10} {:>9} {:>9} {:>7} {:>7} {:>5}",
            "Type", "BOQ (km)", "Delivered", "Pending", "Pulled", "Del %", "Pull %", "SRNs"
        )?;
        for row in rows {
            writeln!(
                f,
                "{:<12} {:>9.3} {:>10.3} {:>9.3} {:>9.3} {:>6.1}% {:>6.1}% {:>5}",
                row.name,
                row.boq_total_km,
                row.delivered_km,
                row.pending_km,
                row.pulled_km,
                row.delivery_pct * 100.0,
                row.pulling_pct * 100.0,
                row.srn_delivery_count
            )?;
        }
        Ok(())
    }
}
