//! Version reconstruction for Lawline.
//!
//! This crate answers "what did the law say at step N". It provides:
//! - Deterministic replay of change sets from the original state
//! - Vote gating: rejected, withdrawn, and inadmissible amendments stay out of the lineage
//! - Accumulated word diffs against the very first version
//! - Collected reconciliation warnings for dangling references
//! - Timeline validation and a per-step index for history views

pub mod accumulated;
pub mod config;
pub mod heading;
pub mod projection;
pub mod reconstruct;
pub mod validation;
pub mod warning;

pub use accumulated::{build_accumulated_diffs, AccumulatedDiffBuilder};
pub use config::ReplayConfig;
pub use heading::synthesize_heading;
pub use projection::{StepKind, TimelineIndex, TimelineIndexEntry};
pub use reconstruct::{apply_change_set, AppliedChanges, ReconstructedState, Reconstructor};
pub use validation::{TimelineValidator, ValidationReport, Violation, ViolationKind};
pub use warning::{ReconciliationWarning, WarningKind};
