//! Reconciliation controller: full reads, full/partial writes, and the
//! best-effort dashboard refresh.
//!
//! Writes are per-section: sections present in the payload replace their
//! sheet, absent sections are left untouched. After the durable sections are
//! written the dashboard is recomputed from the effective model (payload
//! overlaid on stored values) as an explicitly separate step — its failure
//! downgrades to a warning because the primary sheets are already committed
//! and remain the source of truth.

use std::fmt;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::codec::{
    BOQ_SHEET, CONFIG_SHEET, DASHBOARD_SHEET, MANUAL_SHEET, SNAPSHOTS_SHEET, SRN_SHEET, config,
    dashboard, grids, rows,
};
use crate::metrics::{ProgressSummary, derive_metrics};
use crate::model::{FullModel, ModelUpdate};
use crate::store::TabularStore;

/// Result type for controller operations.
pub type ReconcileResult<T> = anyhow::Result<T>;

/// Names the five writable sections for partial writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetKey {
    /// Project configuration (Config sheet).
    Project,
    /// BOQ grid.
    Boq,
    /// SRN delivery log.
    Srn,
    /// Manual-overrides grid.
    Manual,
    /// Snapshot history.
    Snapshots,
}

impl SheetKey {
    /// The wire name used in `writePartial` requests.
    pub fn as_str(self) -> &'static str {
        match self {
            SheetKey::Project => "project",
            SheetKey::Boq => "boq",
            SheetKey::Srn => "srn",
            SheetKey::Manual => "manual",
            SheetKey::Snapshots => "snapshots",
        }
    }
}

impl fmt::Display for SheetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SheetKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project" => Ok(SheetKey::Project),
            "boq" => Ok(SheetKey::Boq),
            "srn" => Ok(SheetKey::Srn),
            "manual" => Ok(SheetKey::Manual),
            "snapshots" => Ok(SheetKey::Snapshots),
            other => anyhow::bail!("unknown sheet key: {other}"),
        }
    }
}

/// Outcome of a successful write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteOutcome {
    /// Set when the dashboard refresh failed after the durable sections were
    /// committed; the write itself still succeeded.
    pub warning: Option<String>,
}

/// Orchestrates codec + store for the read/write operations.
pub struct Reconciler<S: TabularStore> {
    store: S,
}

impl<S: TabularStore> Reconciler<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Reconciler { store }
    }

    /// Give the store back.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Decode all five sections. Content problems degrade to defaults inside
    /// the codec; only store-level failures surface here.
    pub fn read_all(&mut self) -> ReconcileResult<FullModel> {
        let project = config::decode_project(
            &self.store.get_table(CONFIG_SHEET).context("read Config")?,
        );
        let boq = grids::decode_boq(&self.store.get_table(BOQ_SHEET).context("read BOQ")?);
        let srn = rows::decode_srn(&self.store.get_table(SRN_SHEET).context("read SRN")?);
        let manual =
            grids::decode_manual(&self.store.get_table(MANUAL_SHEET).context("read Manual")?);
        let snapshots = rows::decode_snapshots(
            &self.store.get_table(SNAPSHOTS_SHEET).context("read Snapshots")?,
        );

        Ok(FullModel {
            project,
            boq,
            srn,
            manual,
            snapshots,
        })
    }

    /// Persist the sections present in `update`, then refresh the dashboard
    /// from the effective model. Returns a warning instead of an error when
    /// only the dashboard refresh fails.
    pub fn write_all(&mut self, update: &ModelUpdate) -> ReconcileResult<WriteOutcome> {
        let mut effective = self
            .read_all()
            .context("read stored model before write")?;
        effective.apply(update);

        // column order for the transposed grids comes from the effective
        // type list, payload-first
        let order: Vec<String> = effective
            .project
            .types
            .iter()
            .map(|t| t.name.clone())
            .collect();

        if let Some(project) = &update.project {
            self.store
                .put_table(CONFIG_SHEET, &config::encode_project(project))
                .context("write Config")?;
        }
        if let Some(boq) = &update.boq {
            self.store
                .put_table(BOQ_SHEET, &grids::encode_boq(&order, boq))
                .context("write BOQ")?;
        }
        if let Some(srn) = &update.srn {
            self.store
                .put_table(SRN_SHEET, &rows::encode_srn(srn))
                .context("write SRN")?;
        }
        if let Some(manual) = &update.manual {
            self.store
                .put_table(MANUAL_SHEET, &grids::encode_manual(&order, manual))
                .context("write Manual")?;
        }
        if let Some(snapshots) = &update.snapshots {
            self.store
                .put_table(SNAPSHOTS_SHEET, &rows::encode_snapshots(snapshots))
                .context("write Snapshots")?;
        }

        let mut outcome = WriteOutcome::default();
        if let Err(err) = self.refresh_dashboard(&effective) {
            warn!(%err, "dashboard refresh failed after durable write");
            outcome.warning = Some(format!("dashboard refresh failed: {err:#}"));
        }
        Ok(outcome)
    }

    /// Replace exactly one section and run a full write cycle.
    ///
    /// The current model is read first and the payload merged into it, so
    /// the dashboard sees every section. A store that cannot be read is an
    /// explicit error here — a partial write must never silently narrow to
    /// "payload is the whole model".
    pub fn write_partial(
        &mut self,
        key: SheetKey,
        payload: &serde_json::Value,
    ) -> ReconcileResult<WriteOutcome> {
        let current = self
            .read_all()
            .context("read current model before partial write")?;

        let mut update = ModelUpdate::from(current);
        apply_section(&mut update, key, payload)
            .with_context(|| format!("decode payload for section {key}"))?;
        debug!(section = %key, "partial write merged into full model");
        self.write_all(&update)
    }

    /// Derive metrics for the current stored model without writing anything.
    pub fn summary(&mut self) -> ReconcileResult<ProgressSummary> {
        let model = self.read_all()?;
        Ok(derive_metrics(
            &model.project,
            &model.boq,
            &model.srn,
            &model.manual,
        ))
    }

    fn refresh_dashboard(&mut self, effective: &FullModel) -> ReconcileResult<()> {
        let summary = derive_metrics(
            &effective.project,
            &effective.boq,
            &effective.srn,
            &effective.manual,
        );
        self.store
            .put_table(DASHBOARD_SHEET, &dashboard::encode_dashboard(&summary))
            .context("write Dashboard")?;
        Ok(())
    }
}

fn apply_section(
    update: &mut ModelUpdate,
    key: SheetKey,
    payload: &serde_json::Value,
) -> ReconcileResult<()> {
    let payload = payload.clone();
    match key {
        SheetKey::Project => update.project = Some(serde_json::from_value(payload)?),
        SheetKey::Boq => update.boq = Some(serde_json::from_value(payload)?),
        SheetKey::Srn => update.srn = Some(serde_json::from_value(payload)?),
        SheetKey::Manual => update.manual = Some(serde_json::from_value(payload)?),
        SheetKey::Snapshots => update.snapshots = Some(serde_json::from_value(payload)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_key_wire_names_round_trip() {
        for key in [
            SheetKey::Project,
            SheetKey::Boq,
            SheetKey::Srn,
            SheetKey::Manual,
            SheetKey::Snapshots,
        ] {
            assert_eq!(key.as_str().parse::<SheetKey>().unwrap(), key);
        }
        assert!("dashboard".parse::<SheetKey>().is_err());
    }
}
