use std::fmt;

use lawline_types::{ChangeKind, Timeline, TimelineStep, VoteOutcome};
use serde::Serialize;

use crate::config::ReplayConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Snapshot,
    Amendment,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snapshot => write!(f, "Snapshot"),
            Self::Amendment => write!(f, "Amendment"),
        }
    }
}

/// Row in the timeline index for history views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimelineIndexEntry {
    pub index: usize,
    pub kind: StepKind,
    pub base_ref: Option<String>,
    pub result_ref: Option<String>,
    pub vote: Option<VoteOutcome>,
    /// Whether this step's edits carry into later steps.
    pub in_lineage: bool,
    pub repeals: usize,
    pub substitutions: usize,
    pub renumbers: usize,
    pub insertions: usize,
    pub summary: String,
}

/// Per-step summary of a timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimelineIndex {
    pub entries: Vec<TimelineIndexEntry>,
}

impl TimelineIndex {
    pub fn build(timeline: &Timeline, config: &ReplayConfig) -> Self {
        let entries = timeline
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| match step {
                TimelineStep::Snapshot(state) => TimelineIndexEntry {
                    index,
                    kind: StepKind::Snapshot,
                    base_ref: None,
                    result_ref: None,
                    vote: None,
                    in_lineage: index == 0,
                    repeals: 0,
                    substitutions: 0,
                    renumbers: 0,
                    insertions: 0,
                    summary: format!("{} ({} sections)", state.title, state.len()),
                },
                TimelineStep::Amendment(cs) => {
                    let in_lineage = !config.is_excluded(cs.vote);
                    let repeals = cs.count(ChangeKind::Repeal);
                    let substitutions = cs.count(ChangeKind::Substitute);
                    let renumbers = cs.count(ChangeKind::Renumber);
                    let insertions = cs.count(ChangeKind::Insert);
                    let vote = cs
                        .vote
                        .map_or_else(|| "no vote".to_string(), |v| v.to_string());
                    TimelineIndexEntry {
                        index,
                        kind: StepKind::Amendment,
                        base_ref: Some(cs.base_ref.clone()),
                        result_ref: Some(cs.result_ref.clone()),
                        vote: cs.vote,
                        in_lineage,
                        repeals,
                        substitutions,
                        renumbers,
                        insertions,
                        summary: format!(
                            "{} -> {}: {substitutions} substituted, {insertions} inserted, {repeals} repealed ({vote})",
                            cs.base_ref, cs.result_ref
                        ),
                    }
                }
            })
            .collect();

        Self { entries }
    }
}
