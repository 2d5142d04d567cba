use std::collections::{BTreeMap, BTreeSet};

use lawline_diff::WordDiff;
use lawline_types::{
    ArticleChange, ChangeSet, LawState, Section, SectionId, Timeline, TimelineStep, TypeError,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::accumulated::AccumulatedDiffBuilder;
use crate::config::ReplayConfig;
use crate::heading::synthesize_heading;
use crate::warning::{ReconciliationWarning, WarningKind};

/// The law as of one timeline step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReconstructedState {
    /// The step that was materialized, after clamping.
    pub target_index: usize,
    pub state: LawState,
    /// Sections substituted, inserted, or repealed by the target step itself.
    pub touched_ids: BTreeSet<SectionId>,
    /// The target step's change set, when the target is an amendment.
    pub applied_change_set: Option<ChangeSet>,
    /// Earlier steps whose change sets were kept out of the lineage by their vote.
    pub excluded_steps: Vec<usize>,
    /// Word diffs against the original state, keyed by section id. A section
    /// without an entry is identical to the original. `None` when the config
    /// turns accumulated diffs off.
    pub accumulated_diffs: Option<BTreeMap<SectionId, WordDiff>>,
    pub warnings: Vec<ReconciliationWarning>,
}

/// What applying one change set did to a working state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppliedChanges {
    pub touched: BTreeSet<SectionId>,
    pub warnings: Vec<ReconciliationWarning>,
}

/// Deterministic replay of a timeline up to a target step.
///
/// Holds no state between calls. Every reconstruction starts from a fresh
/// copy of the original, which is never mutated.
#[derive(Clone, Debug, Default)]
pub struct Reconstructor {
    config: ReplayConfig,
}

impl Reconstructor {
    pub fn new(config: ReplayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Reconstruct a timeline whose step 0 is its base snapshot.
    pub fn reconstruct_timeline(
        &self,
        timeline: &Timeline,
        target_index: usize,
    ) -> Result<ReconstructedState, TypeError> {
        let original = timeline.original()?;
        Ok(self.reconstruct(original, &timeline.steps, target_index))
    }

    /// Materialize the state at `target_index`.
    ///
    /// Change sets before the target are applied unless their vote is
    /// excluded. The target step's own change set is applied regardless of its
    /// vote, so a rejected amendment can be shown together with its result.
    /// Snapshot steps after the original contribute no edits.
    pub fn reconstruct(
        &self,
        original: &LawState,
        steps: &[TimelineStep],
        target_index: usize,
    ) -> ReconstructedState {
        let mut warnings = Vec::new();
        let last_index = steps.len().saturating_sub(1);
        let target = target_index.min(last_index);
        if target != target_index {
            warn!(
                requested = target_index,
                last = last_index,
                "target step out of range; clamping"
            );
            warnings.push(ReconciliationWarning {
                step: target_index,
                section_id: None,
                kind: WarningKind::TargetOutOfRange,
                description: format!(
                    "requested step {target_index} but the timeline ends at step {last_index}"
                ),
            });
        }

        let mut state = original.clone();
        let mut excluded_steps = Vec::new();

        for (index, step) in steps.iter().enumerate().take(target) {
            let Some(change_set) = step.as_change_set() else {
                continue;
            };
            if self.config.is_excluded(change_set.vote) {
                debug!(step = index, vote = ?change_set.vote, "skipping excluded change set");
                excluded_steps.push(index);
                continue;
            }
            let applied = apply_change_set(&mut state, change_set, index);
            debug!(
                step = index,
                changes = change_set.len(),
                touched = applied.touched.len(),
                "applied change set"
            );
            warnings.extend(applied.warnings);
        }

        let mut touched_ids = BTreeSet::new();
        let mut applied_change_set = None;
        if let Some(change_set) = steps.get(target).and_then(TimelineStep::as_change_set) {
            let applied = apply_change_set(&mut state, change_set, target);
            debug!(
                step = target,
                vote = ?change_set.vote,
                touched = applied.touched.len(),
                "applied target change set"
            );
            touched_ids = applied.touched;
            warnings.extend(applied.warnings);
            applied_change_set = Some(change_set.clone());
        }

        let accumulated_diffs = self
            .config
            .attach_accumulated_diffs
            .then(|| AccumulatedDiffBuilder::new(original).build(&state));

        ReconstructedState {
            target_index: target,
            state,
            touched_ids,
            applied_change_set,
            excluded_steps,
            accumulated_diffs,
            warnings,
        }
    }
}

/// Apply one change set to `state`, in the order its changes are stored.
///
/// A change that references a missing section is skipped with a warning; the
/// rest of the change set still applies.
pub fn apply_change_set(state: &mut LawState, change_set: &ChangeSet, step: usize) -> AppliedChanges {
    let mut applied = AppliedChanges::default();

    for change in change_set.changes() {
        match change {
            ArticleChange::Substitute {
                section_id,
                new_text,
                ..
            } => match state.get_mut(section_id) {
                Some(section) => {
                    section.content = new_text.clone();
                    applied.touched.insert(section_id.clone());
                }
                None => applied.warn(
                    step,
                    section_id,
                    WarningKind::MissingSubstituteTarget,
                    format!("substitution targets missing section {section_id}"),
                ),
            },
            ArticleChange::Insert {
                section_id,
                new_text,
                insert_after,
            } => {
                if state.contains(section_id) {
                    applied.warn(
                        step,
                        section_id,
                        WarningKind::DuplicateInsert,
                        format!("insertion of {section_id} skipped: id already present"),
                    );
                    continue;
                }
                let section = Section::new(
                    section_id.clone(),
                    synthesize_heading(section_id.as_str()),
                    new_text.clone(),
                );
                let anchored = state.insert_after(insert_after.as_ref(), section);
                if let (Some(anchor), false) = (insert_after, anchored) {
                    applied.warn(
                        step,
                        section_id,
                        WarningKind::MissingInsertAnchor,
                        format!("anchor {anchor} for {section_id} not found; inserted at head"),
                    );
                }
                applied.touched.insert(section_id.clone());
            }
            ArticleChange::Repeal { section_id, .. } => {
                if state.remove(section_id).is_some() {
                    applied.touched.insert(section_id.clone());
                } else {
                    applied.warn(
                        step,
                        section_id,
                        WarningKind::MissingRepealTarget,
                        format!("repeal targets missing section {section_id}"),
                    );
                }
            }
            ArticleChange::Renumber { .. } => {}
        }
    }

    applied
}

impl AppliedChanges {
    fn warn(&mut self, step: usize, section_id: &SectionId, kind: WarningKind, description: String) {
        warn!(step, section = %section_id, ?kind, "{description}");
        self.warnings.push(ReconciliationWarning {
            step,
            section_id: Some(section_id.clone()),
            kind,
            description,
        });
    }
}
