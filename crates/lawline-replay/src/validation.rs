use lawline_types::{ArticleChange, Timeline, TimelineStep};
use serde::Serialize;

/// Result of timeline validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub step_count: usize,
    pub snapshot_count: usize,
    pub amendment_count: usize,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific structural problem detected in a timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub step: usize,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    EmptyTimeline,
    MissingBaseSnapshot,
    DuplicateSectionId,
    EmptyInsertText,
    SelfAnchoredInsert,
}

/// Structural checks run before a timeline is handed to the reconstructor.
/// Replay itself tolerates all of these.
pub struct TimelineValidator;

impl TimelineValidator {
    pub fn validate(timeline: &Timeline) -> ValidationReport {
        let mut violations = Vec::new();
        let mut snapshot_count = 0;
        let mut amendment_count = 0;

        if timeline.is_empty() {
            violations.push(Violation {
                step: 0,
                kind: ViolationKind::EmptyTimeline,
                description: "timeline has no steps".into(),
            });
        } else if !timeline.steps[0].is_snapshot() {
            violations.push(Violation {
                step: 0,
                kind: ViolationKind::MissingBaseSnapshot,
                description: "step 0 must be a full snapshot".into(),
            });
        }

        for (step, entry) in timeline.steps.iter().enumerate() {
            match entry {
                TimelineStep::Snapshot(state) => {
                    snapshot_count += 1;
                    for id in state.duplicate_ids() {
                        violations.push(Violation {
                            step,
                            kind: ViolationKind::DuplicateSectionId,
                            description: format!("section id {id} appears more than once"),
                        });
                    }
                }
                TimelineStep::Amendment(change_set) => {
                    amendment_count += 1;
                    for change in change_set.changes() {
                        let ArticleChange::Insert {
                            section_id,
                            new_text,
                            insert_after,
                        } = change
                        else {
                            continue;
                        };
                        if new_text.trim().is_empty() {
                            violations.push(Violation {
                                step,
                                kind: ViolationKind::EmptyInsertText,
                                description: format!("insertion of {section_id} has no text"),
                            });
                        }
                        if insert_after.as_ref() == Some(section_id) {
                            violations.push(Violation {
                                step,
                                kind: ViolationKind::SelfAnchoredInsert,
                                description: format!("insertion of {section_id} is anchored on itself"),
                            });
                        }
                    }
                }
            }
        }

        ValidationReport {
            step_count: timeline.len(),
            snapshot_count,
            amendment_count,
            violations,
        }
    }
}
