//! Change set computation: compare two ordered section lists.
//!
//! Sections are matched by id. Ids only in the old list are repealed, ids only
//! in the new list are inserted after their predecessor in the new list, and
//! ids in both whose normalized content differs are substituted.

use std::collections::{HashMap, HashSet};

use lawline_types::{ArticleChange, ChangeSet, Section, SectionId};
use serde::Serialize;
use tracing::warn;

/// Freshly computed changes that have not yet become a historical record.
///
/// Unlike [`ChangeSet`], a draft may be re-sorted. Sealing it fixes the order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSetDraft {
    changes: Vec<ArticleChange>,
}

impl ChangeSetDraft {
    pub fn new(changes: Vec<ArticleChange>) -> Self {
        Self { changes }
    }

    pub fn changes(&self) -> &[ArticleChange] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Stable sort by application priority: repeal, substitute, renumber, insert.
    pub fn sort_by_priority(&mut self) {
        self.changes.sort_by_key(|c| c.kind().priority());
    }

    /// Turn the draft into a replayable change set.
    pub fn seal(self, base_ref: impl Into<String>, result_ref: impl Into<String>) -> ChangeSet {
        ChangeSet::new(base_ref, result_ref, self.changes)
    }
}

/// Counts gathered while computing a change set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChangeStats {
    pub old_count: usize,
    pub new_count: usize,
    pub unchanged: usize,
    pub substituted: usize,
    pub inserted: usize,
    pub repealed: usize,
}

/// `|new| == |old| + inserted - repealed`, evaluated on list lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CrossCheck {
    /// `|old| + inserted - repealed`.
    pub expected: i64,
    /// `|new|`.
    pub actual: i64,
}

impl CrossCheck {
    fn from_stats(stats: &ChangeStats) -> Self {
        Self {
            expected: stats.old_count as i64 + stats.inserted as i64 - stats.repealed as i64,
            actual: stats.new_count as i64,
        }
    }

    pub fn holds(&self) -> bool {
        self.expected == self.actual
    }

    /// Human-readable account of the check.
    pub fn detail(&self) -> String {
        if self.holds() {
            format!("cross-check ok: {} sections", self.actual)
        } else {
            format!(
                "cross-check failed: expected {} sections, found {}; article segmentation may have mis-split or mis-matched sections",
                self.expected, self.actual
            )
        }
    }
}

/// Output of [`compute_changeset`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeSetResult {
    /// Changes sorted by application priority.
    pub changes: ChangeSetDraft,
    pub stats: ChangeStats,
    pub is_consistent: bool,
    pub cross_check: CrossCheck,
}

impl ChangeSetResult {
    /// The cross-check failure, if any, for the caller to surface.
    pub fn warning(&self) -> Option<String> {
        (!self.is_consistent).then(|| self.cross_check.detail())
    }

    /// Seal the computed changes into a change set between two versions.
    pub fn into_change_set(
        self,
        base_ref: impl Into<String>,
        result_ref: impl Into<String>,
    ) -> ChangeSet {
        self.changes.seal(base_ref, result_ref)
    }
}

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compute the changes that turn `old` into `new`.
///
/// Never fails. A result whose cross-check does not hold is still returned,
/// flagged via [`ChangeSetResult::is_consistent`] and logged.
pub fn compute_changeset(old: &[Section], new: &[Section]) -> ChangeSetResult {
    let old_ids: HashSet<&SectionId> = old.iter().map(|s| &s.id).collect();
    let new_by_id: HashMap<&SectionId, &Section> = new.iter().map(|s| (&s.id, s)).collect();

    let mut changes = Vec::new();
    let mut stats = ChangeStats {
        old_count: old.len(),
        new_count: new.len(),
        ..ChangeStats::default()
    };

    // Repealed and substituted sections, in old document order.
    let mut seen = HashSet::new();
    for section in old {
        if !seen.insert(&section.id) {
            continue;
        }
        match new_by_id.get(&section.id) {
            None => {
                changes.push(ArticleChange::Repeal {
                    section_id: section.id.clone(),
                    old_text: section.content.clone(),
                });
                stats.repealed += 1;
            }
            Some(new_section) => {
                if normalize_whitespace(&section.content)
                    != normalize_whitespace(&new_section.content)
                {
                    changes.push(ArticleChange::Substitute {
                        section_id: section.id.clone(),
                        old_text: section.content.clone(),
                        new_text: new_section.content.clone(),
                    });
                    stats.substituted += 1;
                } else {
                    stats.unchanged += 1;
                }
            }
        }
    }

    // Inserted sections, anchored on their predecessor in the new list.
    let mut seen = HashSet::new();
    let mut predecessor: Option<&SectionId> = None;
    for section in new {
        if seen.insert(&section.id) && !old_ids.contains(&section.id) {
            changes.push(ArticleChange::Insert {
                section_id: section.id.clone(),
                new_text: section.content.clone(),
                insert_after: predecessor.cloned(),
            });
            stats.inserted += 1;
        }
        predecessor = Some(&section.id);
    }

    let mut changes = ChangeSetDraft::new(changes);
    changes.sort_by_priority();

    let cross_check = CrossCheck::from_stats(&stats);
    let is_consistent = cross_check.holds();
    if !is_consistent {
        warn!(
            expected = cross_check.expected,
            actual = cross_check.actual,
            "change set cross-check failed"
        );
    }

    ChangeSetResult {
        changes,
        stats,
        is_consistent,
        cross_check,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawline_types::ChangeKind;
    use proptest::prelude::*;

    fn count_kind(changes: &[ArticleChange], kind: ChangeKind) -> usize {
        changes.iter().filter(|c| c.kind() == kind).count()
    }

    fn sections(pairs: &[(&str, &str)]) -> Vec<Section> {
        pairs
            .iter()
            .map(|(id, content)| Section::new(*id, *id, *content))
            .collect()
    }

    fn kinds(result: &ChangeSetResult) -> Vec<ChangeKind> {
        result.changes.changes().iter().map(ArticleChange::kind).collect()
    }

    #[test]
    fn identical_lists_no_changes() {
        let list = sections(&[("art_1", "Foo"), ("art_2", "Bar")]);
        let result = compute_changeset(&list, &list);
        assert!(result.changes.is_empty());
        assert_eq!(result.stats.unchanged, 2);
        assert!(result.is_consistent);
        assert!(result.warning().is_none());
    }

    #[test]
    fn repeal_scenario() {
        let old = sections(&[("art_1", "A"), ("art_2", "B"), ("art_3", "C")]);
        let new = sections(&[("art_1", "A"), ("art_3", "C")]);

        let result = compute_changeset(&old, &new);
        assert_eq!(kinds(&result), vec![ChangeKind::Repeal]);
        assert_eq!(
            result.changes.changes()[0],
            ArticleChange::Repeal {
                section_id: "art_2".into(),
                old_text: "B".into(),
            }
        );
        assert_eq!(result.stats.substituted, 0);
        assert_eq!(result.stats.inserted, 0);
        assert!(result.is_consistent);
    }

    #[test]
    fn whitespace_only_edit_is_unchanged() {
        let old = sections(&[("art_1", "The  minister\nshall act. ")]);
        let new = sections(&[("art_1", "The minister shall act.")]);
        let result = compute_changeset(&old, &new);
        assert!(result.changes.is_empty());
        assert_eq!(result.stats.unchanged, 1);
    }

    #[test]
    fn substitution_keeps_raw_texts() {
        let old = sections(&[("art_1", "Foo")]);
        let new = sections(&[("art_1", "Foo2")]);
        let result = compute_changeset(&old, &new);
        assert_eq!(
            result.changes.changes(),
            &[ArticleChange::Substitute {
                section_id: "art_1".into(),
                old_text: "Foo".into(),
                new_text: "Foo2".into(),
            }]
        );
    }

    #[test]
    fn insert_anchors_on_predecessor() {
        let old = sections(&[("art_1", "A"), ("art_2", "B")]);
        let new = sections(&[
            ("art_0", "Zero"),
            ("art_1", "A"),
            ("art_1bis", "A bis"),
            ("art_1ter", "A ter"),
            ("art_2", "B"),
        ]);

        let result = compute_changeset(&old, &new);
        let anchors: Vec<(String, Option<String>)> = result
            .changes
            .changes()
            .iter()
            .map(|c| match c {
                ArticleChange::Insert {
                    section_id,
                    insert_after,
                    ..
                } => (
                    section_id.to_string(),
                    insert_after.as_ref().map(ToString::to_string),
                ),
                other => panic!("expected Insert, got {:?}", other),
            })
            .collect();
        assert_eq!(
            anchors,
            vec![
                ("art_0".to_string(), None),
                ("art_1bis".to_string(), Some("art_1".to_string())),
                ("art_1ter".to_string(), Some("art_1bis".to_string())),
            ]
        );
        assert!(result.is_consistent);
    }

    #[test]
    fn changes_sorted_by_priority() {
        let old = sections(&[("art_1", "A"), ("art_2", "B"), ("art_3", "C")]);
        let new = sections(&[("art_1", "A changed"), ("art_new", "N"), ("art_3", "C")]);

        let result = compute_changeset(&old, &new);
        assert_eq!(
            kinds(&result),
            vec![ChangeKind::Repeal, ChangeKind::Substitute, ChangeKind::Insert]
        );
        assert_eq!(result.stats.repealed, 1);
        assert_eq!(result.stats.substituted, 1);
        assert_eq!(result.stats.inserted, 1);
        assert_eq!(result.stats.unchanged, 1);
    }

    #[test]
    fn duplicate_ids_fail_cross_check() {
        let old = sections(&[("art_1", "A"), ("art_1", "A")]);
        let new = sections(&[("art_1", "A")]);

        let result = compute_changeset(&old, &new);
        assert!(!result.is_consistent);
        assert_eq!(result.cross_check.expected, 2);
        assert_eq!(result.cross_check.actual, 1);
        let warning = result.warning().unwrap();
        assert!(warning.contains("cross-check failed"));
    }

    #[test]
    fn sealed_change_set_keeps_order() {
        let old = sections(&[("art_1", "A")]);
        let new = sections(&[("art_2", "B")]);
        let cs = compute_changeset(&old, &new).into_change_set("bill", "act");
        assert_eq!(cs.base_ref, "bill");
        assert_eq!(cs.result_ref, "act");
        assert_eq!(cs.changes()[0].kind(), ChangeKind::Repeal);
        assert_eq!(cs.changes()[1].kind(), ChangeKind::Insert);
        assert!(cs.vote.is_none());
    }

    #[test]
    fn draft_sort_is_stable() {
        let mut draft = ChangeSetDraft::new(vec![
            ArticleChange::Insert {
                section_id: "b".into(),
                new_text: "B".into(),
                insert_after: None,
            },
            ArticleChange::Renumber {
                section_id: "r".into(),
            },
            ArticleChange::Insert {
                section_id: "a".into(),
                new_text: "A".into(),
                insert_after: Some("b".into()),
            },
        ]);
        draft.sort_by_priority();
        let ids: Vec<&str> = draft.changes().iter().map(|c| c.section_id().as_str()).collect();
        assert_eq!(ids, vec!["r", "b", "a"]);
    }

    fn section_list() -> impl Strategy<Value = Vec<Section>> {
        proptest::collection::btree_map(0u8..24, "[a-c ]{0,6}", 0..12).prop_map(|map| {
            map.into_iter()
                .map(|(n, content)| Section::new(format!("art_{n}"), "", content))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn cross_check_holds_for_unique_ids(old in section_list(), new in section_list()) {
            let result = compute_changeset(&old, &new);
            let stats = result.stats;
            prop_assert_eq!(
                new.len() as i64,
                old.len() as i64 + stats.inserted as i64 - stats.repealed as i64
            );
            prop_assert!(result.is_consistent);
            prop_assert_eq!(result.changes.len(), stats.inserted + stats.repealed + stats.substituted);
            prop_assert_eq!(count_kind(result.changes.changes(), ChangeKind::Insert), stats.inserted);
        }

        #[test]
        fn consistency_flag_matches_arithmetic(list in section_list(), extra in 0usize..3) {
            let mut old = list.clone();
            if let Some(first) = list.first() {
                for _ in 0..extra {
                    old.push(first.clone());
                }
            }
            let result = compute_changeset(&old, &list);
            let holds = result.stats.new_count as i64
                == result.stats.old_count as i64 + result.stats.inserted as i64
                    - result.stats.repealed as i64;
            prop_assert_eq!(result.is_consistent, holds);
            prop_assert_eq!(holds, extra == 0 || list.is_empty());
        }

        #[test]
        fn compute_against_self_is_empty(list in section_list()) {
            let result = compute_changeset(&list, &list);
            prop_assert!(result.changes.is_empty());
            prop_assert_eq!(result.stats.unchanged, list.len());
        }
    }
}
