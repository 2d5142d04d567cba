use lawline_types::VoteOutcome;
use serde::{Deserialize, Serialize};

/// Configuration for state reconstruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Vote outcomes whose change sets are skipped before the target step.
    pub excluded_outcomes: Vec<VoteOutcome>,
    /// Whether reconstruction also builds diffs against the original state.
    pub attach_accumulated_diffs: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            excluded_outcomes: vec![
                VoteOutcome::Rejected,
                VoteOutcome::Withdrawn,
                VoteOutcome::Inadmissible,
            ],
            attach_accumulated_diffs: true,
        }
    }
}

impl ReplayConfig {
    /// Returns `true` if a change set with this vote stays out of the lineage.
    /// A change set without a recorded vote is always applied.
    pub fn is_excluded(&self, vote: Option<VoteOutcome>) -> bool {
        vote.is_some_and(|v| self.excluded_outcomes.contains(&v))
    }
}
