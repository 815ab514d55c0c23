//! Domain model for the cable-installation progress tracker.
//!
//! These types are the in-memory form of the five persisted sections:
//! - [`Project`] — singleton configuration, including the ordered cable-type
//!   list that drives column order everywhere else
//! - BOQ — planned quantity per cable type ([`BoqEntry`] keyed by type name)
//! - SRN log — append-only delivery records ([`SrnRecord`])
//! - Manual overrides — user-entered figures ([`ManualEntry`]), including the
//!   tri-state [`Delivered`] override
//! - Snapshots — immutable point-in-time pulled totals ([`Snapshot`])
//!
//! Keyed sections use [`IndexMap`] so that insertion order survives a
//! decode/encode cycle; `project.types` order is the single source of truth
//! for output ordering.
//!
//! Serde names follow the external JSON interface (camelCase, `type`/`ref`
//! for SRN records, `null` for an auto delivered override).

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// BOQ section: planned totals keyed by cable-type name.
pub type Boq = IndexMap<String, BoqEntry>;

/// Manual-override section keyed by cable-type name.
pub type Manual = IndexMap<String, ManualEntry>;

/// One cable type configured for the project.
///
/// The name is the unique key joining BOQ, SRN, and Manual rows; the color is
/// a display hint only.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CableType {
    /// Unique type name (e.g. "HV", "LV", "Fibre").
    pub name: String,
    /// Display color hint (e.g. "#d32f2f"); never interpreted by the core.
    pub color: String,
}

/// Singleton project configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    /// Project display name.
    pub name: String,
    /// Planned start date, kept as entered (free-form date string).
    pub start_date: String,
    /// Planned completion date, kept as entered.
    pub target_date: String,
    /// "Progress as of" label shown on the dashboard.
    pub as_of: String,
    /// Configured cable types, in display order.
    pub types: Vec<CableType>,
}

/// One BOQ entry: planned installable quantity for a cable type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoqEntry {
    /// Planned total in meters.
    pub total: f64,
    /// Display color hint for this type's BOQ row.
    pub color: String,
}

/// One delivery record (Store Receipt Note line).
///
/// The log is append-only; list order is order-of-entry, not date order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SrnRecord {
    /// Cable-type name this delivery belongs to.
    #[serde(rename = "type")]
    pub cable_type: String,
    /// Delivery date, normalized to `DD/MM/YYYY` by the codec.
    pub date: String,
    /// Delivered length in meters.
    pub length: f64,
    /// Free-form SRN reference; not unique.
    #[serde(rename = "ref")]
    pub reference: String,
}

/// The `delivered` override: either derive from the SRN log or use an
/// explicit figure.
///
/// Modeled as a tagged variant rather than a nullable number so that an
/// explicit `0` can never be confused with "auto". JSON form: `null` for
/// [`Delivered::Auto`], a plain number for [`Delivered::Explicit`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Delivered {
    /// Derive delivered quantity from the SRN log.
    #[default]
    Auto,
    /// Use this exact figure (meters), ignoring the SRN log.
    Explicit(f64),
}

impl Serialize for Delivered {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Delivered::Auto => serializer.serialize_none(),
            Delivered::Explicit(v) => serializer.serialize_f64(*v),
        }
    }
}

impl<'de> Deserialize<'de> for Delivered {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<f64>::deserialize(deserializer)? {
            None => Delivered::Auto,
            Some(v) => Delivered::Explicit(v),
        })
    }
}

/// Manual per-type figures entered by the site engineer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManualEntry {
    /// Delivered override; see [`Delivered`].
    pub delivered: Delivered,
    /// Pulled (installed) length in meters.
    pub pulled: f64,
    /// Length pulled during the previous reporting week, meters.
    pub last_week: f64,
    /// Length pulled during the current reporting week, meters.
    pub this_week: f64,
}

fn snapshot_id_now() -> i64 {
    Utc::now().timestamp_millis()
}

/// Immutable point-in-time record of cumulative pulled lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    /// Unique monotonic id; a millisecond timestamp is assigned when absent.
    pub id: i64,
    /// Human label for the reporting week (e.g. "W34").
    pub week_label: String,
    /// Snapshot date, kept as entered.
    pub date: String,
    /// Cumulative pulled meters per cable-type name at snapshot time.
    pub pulled: IndexMap<String, f64>,
    /// Cumulative pulled meters across all types.
    pub total: f64,
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot {
            id: snapshot_id_now(),
            week_label: String::new(),
            date: String::new(),
            pulled: IndexMap::new(),
            total: 0.0,
        }
    }
}

/// The complete persisted model: all five sections, fully decoded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FullModel {
    /// Project configuration.
    pub project: Project,
    /// Planned quantities per type.
    pub boq: Boq,
    /// Delivery log.
    pub srn: Vec<SrnRecord>,
    /// Manual overrides per type.
    pub manual: Manual,
    /// Snapshot history.
    pub snapshots: Vec<Snapshot>,
}

/// A write payload: any subset of the five sections.
///
/// Sections left `None` are not touched in the store; the derived summary
/// still sees their previously stored values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelUpdate {
    /// Replacement project configuration, if included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    /// Replacement BOQ section, if included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boq: Option<Boq>,
    /// Replacement SRN log, if included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srn: Option<Vec<SrnRecord>>,
    /// Replacement manual-override section, if included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual: Option<Manual>,
    /// Replacement snapshot history, if included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshots: Option<Vec<Snapshot>>,
}

impl From<FullModel> for ModelUpdate {
    fn from(m: FullModel) -> Self {
        ModelUpdate {
            project: Some(m.project),
            boq: Some(m.boq),
            srn: Some(m.srn),
            manual: Some(m.manual),
            snapshots: Some(m.snapshots),
        }
    }
}

impl FullModel {
    /// Overlay the sections present in `update` onto this model.
    pub fn apply(&mut self, update: &ModelUpdate) {
        if let Some(p) = &update.project {
            self.project = p.clone();
        }
        if let Some(b) = &update.boq {
            self.boq = b.clone();
        }
        if let Some(s) = &update.srn {
            self.srn = s.clone();
        }
        if let Some(m) = &update.manual {
            self.manual = m.clone();
        }
        if let Some(s) = &update.snapshots {
            self.snapshots = s.clone();
        }
    }
}
