//! Progress tracking and reconciliation for cable-installation projects.
//!
//! The crate persists a small domain model (project configuration, BOQ,
//! delivery log, manual overrides, snapshots) into a generic tabular store
//! and derives a per-type progress summary from it. See [`reconcile`] for
//! the orchestration entry points and [`handler`] for the JSON boundary.

#![deny(missing_docs)]

pub mod codec;
pub mod db;
pub mod handler;
pub mod metrics;
pub mod model;
pub mod reconcile;
#[allow(missing_docs)]
pub mod schema;
pub mod store;
