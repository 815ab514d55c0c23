//! Domain codec: typed model ⇄ generic tables.
//!
//! Every decode here is a total function: malformed cells fall back to
//! documented defaults and a missing sheet decodes to an empty section.
//! Encoders produce the fixed physical layouts:
//! - Config — key/value rows ([`config`])
//! - SRN, Snapshots — row per record ([`rows`])
//! - BOQ, Manual — transposed grids, types as columns ([`grids`], built on
//!   the shared [`transpose`] utility)
//! - Dashboard — derived, read-only summary ([`dashboard`])

pub mod cell;
pub mod config;
pub mod dashboard;
pub mod grids;
pub mod rows;
pub mod transpose;

/// Sheet holding the key/value project configuration.
pub const CONFIG_SHEET: &str = "Config";
/// Transposed BOQ sheet.
pub const BOQ_SHEET: &str = "BOQ";
/// Row-per-delivery SRN log sheet.
pub const SRN_SHEET: &str = "SRN";
/// Transposed manual-overrides sheet.
pub const MANUAL_SHEET: &str = "Manual";
/// Row-per-snapshot history sheet.
pub const SNAPSHOTS_SHEET: &str = "Snapshots";
/// Derived summary sheet, regenerated on every write.
pub const DASHBOARD_SHEET: &str = "Dashboard";
