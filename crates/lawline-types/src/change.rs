use std::fmt;

use serde::{Deserialize, Serialize};

use crate::section::SectionId;

/// A single structural edit to a law state.
///
/// Each variant carries exactly the payload its kind requires, so a repeal can
/// never carry replacement text and an insertion always carries its content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArticleChange {
    /// Replace the content of an existing section.
    Substitute {
        section_id: SectionId,
        old_text: String,
        new_text: String,
    },
    /// Add a new section. `section_id` is the id of the new section;
    /// `insert_after` names its predecessor, or `None` for the head.
    Insert {
        section_id: SectionId,
        new_text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        insert_after: Option<SectionId>,
    },
    /// Remove a section. `old_text` keeps the removed content for audit.
    Repeal {
        section_id: SectionId,
        old_text: String,
    },
    /// Reserved for identifier remapping. Has no effect on content.
    Renumber { section_id: SectionId },
}

impl ArticleChange {
    /// The section this change targets (the new id for insertions).
    pub fn section_id(&self) -> &SectionId {
        match self {
            Self::Substitute { section_id, .. }
            | Self::Insert { section_id, .. }
            | Self::Repeal { section_id, .. }
            | Self::Renumber { section_id } => section_id,
        }
    }

    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::Substitute { .. } => ChangeKind::Substitute,
            Self::Insert { .. } => ChangeKind::Insert,
            Self::Repeal { .. } => ChangeKind::Repeal,
            Self::Renumber { .. } => ChangeKind::Renumber,
        }
    }
}

/// Discriminant of [`ArticleChange`], ordered by application priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Repeal,
    Substitute,
    Renumber,
    Insert,
}

impl ChangeKind {
    /// Application priority: repeals first, insertions last.
    pub fn priority(self) -> u8 {
        match self {
            Self::Repeal => 0,
            Self::Substitute => 1,
            Self::Renumber => 2,
            Self::Insert => 3,
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repeal => write!(f, "Repeal"),
            Self::Substitute => write!(f, "Substitute"),
            Self::Renumber => write!(f, "Renumber"),
            Self::Insert => write!(f, "Insert"),
        }
    }
}

/// Result of the legislative vote that produced a change set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOutcome {
    Approved,
    Rejected,
    Withdrawn,
    Inadmissible,
    Pending,
}

impl VoteOutcome {
    /// Returns `true` for outcomes whose edits never take effect.
    pub fn is_rejected(self) -> bool {
        matches!(self, Self::Rejected | Self::Withdrawn | Self::Inadmissible)
    }
}

impl fmt::Display for VoteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
            Self::Withdrawn => write!(f, "withdrawn"),
            Self::Inadmissible => write!(f, "inadmissible"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

/// An ordered, historical record of changes between two document versions.
///
/// The order of `changes` is authoritative and is replayed exactly as stored.
/// A loaded change set cannot be re-sorted; freshly computed changes are
/// sorted before they are sealed into one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Opaque identifier of the version this change set applies to.
    pub base_ref: String,
    /// Opaque identifier of the version it produces.
    pub result_ref: String,
    changes: Vec<ArticleChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote: Option<VoteOutcome>,
}

impl ChangeSet {
    /// Record a change set, keeping `changes` in the given order.
    pub fn new(
        base_ref: impl Into<String>,
        result_ref: impl Into<String>,
        changes: Vec<ArticleChange>,
    ) -> Self {
        Self {
            base_ref: base_ref.into(),
            result_ref: result_ref.into(),
            changes,
            vote: None,
        }
    }

    /// Attach a vote outcome.
    pub fn with_vote(mut self, vote: VoteOutcome) -> Self {
        self.vote = Some(vote);
        self
    }

    /// The changes in replay order.
    pub fn changes(&self) -> &[ArticleChange] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Whether the vote outcome keeps this change set out of the lineage.
    pub fn is_rejected(&self) -> bool {
        self.vote.is_some_and(VoteOutcome::is_rejected)
    }

    /// Number of changes of the given kind.
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind() == kind).count()
    }
}
