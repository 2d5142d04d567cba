//! Diff engine for Lawline.
//!
//! Computes word-level diffs between article texts and structural change sets
//! between two ordered lists of sections.
//!
//! # Key Types
//!
//! - [`WordDiff`] / [`WordToken`] / [`TokenKind`] -- Word-level LCS diff
//! - [`ChangeSetResult`] / [`ChangeStats`] / [`CrossCheck`] -- Computed change set with integrity statistics
//! - [`ChangeSetDraft`] -- Freshly computed, sortable changes before they are sealed into a [`lawline_types::ChangeSet`]

pub mod changeset;
pub mod word_diff;

pub use changeset::{
    compute_changeset, normalize_whitespace, ChangeSetDraft, ChangeSetResult, ChangeStats,
    CrossCheck,
};
pub use word_diff::{diff_change, diff_words, TokenKind, WordDiff, WordToken};
