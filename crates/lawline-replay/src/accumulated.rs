//! Accumulated diffs: each section now versus the very first version.

use std::collections::BTreeMap;

use lawline_diff::{diff_words, WordDiff};
use lawline_types::{LawState, SectionId};

/// Diffs reconstructed states against a fixed original.
///
/// The original content is captured once, at construction, so every build
/// compares "original vs. now" and never "previous step vs. now".
#[derive(Clone, Debug)]
pub struct AccumulatedDiffBuilder {
    baseline: BTreeMap<SectionId, String>,
}

impl AccumulatedDiffBuilder {
    pub fn new(original: &LawState) -> Self {
        Self {
            baseline: original.content_map(),
        }
    }

    /// Word diffs for every section of `reconstructed` that differs from the original.
    ///
    /// Sections absent from the original are all-added. Sections whose content
    /// is unchanged have no entry; absence means "identical to original".
    pub fn build(&self, reconstructed: &LawState) -> BTreeMap<SectionId, WordDiff> {
        reconstructed
            .sections
            .iter()
            .filter_map(|section| {
                let diff = match self.baseline.get(&section.id) {
                    None => WordDiff::all_added(&section.content),
                    Some(original) if original == &section.content => return None,
                    Some(original) => diff_words(original, &section.content),
                };
                Some((section.id.clone(), diff))
            })
            .collect()
    }
}

/// One-shot form of [`AccumulatedDiffBuilder`].
pub fn build_accumulated_diffs(
    original: &LawState,
    reconstructed: &LawState,
) -> BTreeMap<SectionId, WordDiff> {
    AccumulatedDiffBuilder::new(original).build(reconstructed)
}
