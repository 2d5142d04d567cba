use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::section::{Section, SectionId};

/// A law document at one point of its timeline.
///
/// Sections are kept in document order. Identifiers are unique within a state;
/// the mutating helpers below refuse to break that invariant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawState {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub preface: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl LawState {
    /// Create a state from its parts.
    pub fn new(title: impl Into<String>, preface: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            title: title.into(),
            preface: preface.into(),
            sections,
        }
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the state has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Index of the section with the given id.
    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    pub fn get(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    pub fn get_mut(&mut self, id: &SectionId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| &s.id == id)
    }

    pub fn contains(&self, id: &SectionId) -> bool {
        self.position(id).is_some()
    }

    /// Section identifiers in document order.
    pub fn ids(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.iter().map(|s| &s.id)
    }

    /// Snapshot of `id -> content` for every section.
    pub fn content_map(&self) -> BTreeMap<SectionId, String> {
        self.sections
            .iter()
            .map(|s| (s.id.clone(), s.content.clone()))
            .collect()
    }

    /// Splice `section` immediately after `anchor`.
    ///
    /// With no anchor, or an anchor that is not present, the section goes to
    /// the head of the list. Returns `true` if the anchor was found.
    /// The caller is responsible for checking the id is not already present.
    pub fn insert_after(&mut self, anchor: Option<&SectionId>, section: Section) -> bool {
        match anchor.and_then(|a| self.position(a)) {
            Some(index) => {
                self.sections.insert(index + 1, section);
                true
            }
            None => {
                self.sections.insert(0, section);
                false
            }
        }
    }

    /// Remove and return the section with the given id.
    pub fn remove(&mut self, id: &SectionId) -> Option<Section> {
        let index = self.position(id)?;
        Some(self.sections.remove(index))
    }

    /// Identifiers that occur more than once, in order of their second occurrence.
    pub fn duplicate_ids(&self) -> Vec<SectionId> {
        let mut seen = HashSet::new();
        self.sections
            .iter()
            .filter(|s| !seen.insert(&s.id))
            .map(|s| s.id.clone())
            .collect()
    }
}
