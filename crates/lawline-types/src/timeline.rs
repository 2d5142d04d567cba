use serde::{Deserialize, Serialize};

use crate::change::ChangeSet;
use crate::error::TypeError;
use crate::state::LawState;

/// One recorded version of a law document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineStep {
    /// A full document body (bill or enacted act).
    Snapshot(LawState),
    /// A delta relative to the preceding materialized state.
    Amendment(ChangeSet),
}

impl TimelineStep {
    pub fn as_change_set(&self) -> Option<&ChangeSet> {
        match self {
            Self::Amendment(cs) => Some(cs),
            Self::Snapshot(_) => None,
        }
    }

    pub fn is_snapshot(&self) -> bool {
        matches!(self, Self::Snapshot(_))
    }
}

/// The ordered, 0-indexed versions of a law document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub steps: Vec<TimelineStep>,
}

impl Timeline {
    pub fn new(steps: Vec<TimelineStep>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The base state: step 0, which must be a snapshot.
    pub fn original(&self) -> Result<&LawState, TypeError> {
        match self.steps.first() {
            Some(TimelineStep::Snapshot(state)) => Ok(state),
            Some(TimelineStep::Amendment(_)) => Err(TypeError::MissingBaseSnapshot),
            None => Err(TypeError::EmptyTimeline),
        }
    }

    /// Decode a timeline from JSON.
    pub fn from_json(json: &str) -> Result<Self, TypeError> {
        serde_json::from_str(json).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Encode the timeline as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, TypeError> {
        serde_json::to_string_pretty(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }
}
