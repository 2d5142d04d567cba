use std::fmt;

use lawline_types::SectionId;
use serde::Serialize;

/// A change that could not be applied as recorded during replay.
///
/// Reconstruction never fails; instead each skipped or degraded change is
/// reported here so callers and tests can inspect it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReconciliationWarning {
    /// Timeline step that carried the change.
    pub step: usize,
    pub section_id: Option<SectionId>,
    pub kind: WarningKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A substitution named a section that is not in the working state.
    MissingSubstituteTarget,
    /// A repeal named a section that is not in the working state.
    MissingRepealTarget,
    /// An insertion's anchor was not found; the section went to the head.
    MissingInsertAnchor,
    /// An insertion reused an id already present; it was skipped.
    DuplicateInsert,
    /// The requested step was past the end of the timeline and was clamped.
    TargetOutOfRange,
}

impl fmt::Display for ReconciliationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {}: {}", self.step, self.description)
    }
}
