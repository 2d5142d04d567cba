//! Word-level diff: longest-common-subsequence alignment of two texts.
//!
//! Texts are split on runs of whitespace. Tokens are compared literally, with
//! no case or punctuation folding.

use lawline_types::ArticleChange;
use serde::{Deserialize, Serialize};

/// How a token relates the old text to the new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Unchanged,
    Added,
    Removed,
}

/// One whitespace-delimited word in a diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordToken {
    pub text: String,
    pub kind: TokenKind,
}

impl WordToken {
    fn new(text: &str, kind: TokenKind) -> Self {
        Self {
            text: text.to_string(),
            kind,
        }
    }
}

/// The result of diffing two texts word by word.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordDiff {
    /// Tokens in reading order.
    pub tokens: Vec<WordToken>,
}

impl WordDiff {
    /// Every word of `text` tagged as added.
    pub fn all_added(text: &str) -> Self {
        Self::uniform(text, TokenKind::Added)
    }

    /// Every word of `text` tagged as removed.
    pub fn all_removed(text: &str) -> Self {
        Self::uniform(text, TokenKind::Removed)
    }

    fn uniform(text: &str, kind: TokenKind) -> Self {
        Self {
            tokens: text
                .split_whitespace()
                .map(|w| WordToken::new(w, kind))
                .collect(),
        }
    }

    /// Returns `true` if no token was added or removed.
    pub fn is_unchanged(&self) -> bool {
        self.tokens.iter().all(|t| t.kind == TokenKind::Unchanged)
    }

    /// Number of added words.
    pub fn additions(&self) -> usize {
        self.count(TokenKind::Added)
    }

    /// Number of removed words.
    pub fn removals(&self) -> usize {
        self.count(TokenKind::Removed)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn count(&self, kind: TokenKind) -> usize {
        self.tokens.iter().filter(|t| t.kind == kind).count()
    }
}

/// Compute a word-level diff between two texts.
///
/// Classic dynamic-programming LCS over the token sequences, O(m·n) in time
/// and space. On ties during backtracking an added token is emitted before a
/// removed one, so a replaced word reads as `Removed(old) Added(new)` once the
/// sequence is put back in reading order.
pub fn diff_words(old: &str, new: &str) -> WordDiff {
    let old_words: Vec<&str> = old.split_whitespace().collect();
    let new_words: Vec<&str> = new.split_whitespace().collect();

    if old_words.is_empty() {
        return WordDiff::all_added(new);
    }
    if new_words.is_empty() {
        return WordDiff::all_removed(old);
    }

    let (m, n) = (old_words.len(), new_words.len());
    let width = n + 1;
    // lcs[i * width + j] = LCS length of old_words[..i] and new_words[..j].
    let mut lcs = vec![0usize; (m + 1) * width];
    for i in 1..=m {
        for j in 1..=n {
            lcs[i * width + j] = if old_words[i - 1] == new_words[j - 1] {
                lcs[(i - 1) * width + (j - 1)] + 1
            } else {
                lcs[(i - 1) * width + j].max(lcs[i * width + (j - 1)])
            };
        }
    }

    let mut tokens = Vec::with_capacity(m.max(n));
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old_words[i - 1] == new_words[j - 1] {
            tokens.push(WordToken::new(old_words[i - 1], TokenKind::Unchanged));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || lcs[i * width + (j - 1)] >= lcs[(i - 1) * width + j]) {
            tokens.push(WordToken::new(new_words[j - 1], TokenKind::Added));
            j -= 1;
        } else {
            tokens.push(WordToken::new(old_words[i - 1], TokenKind::Removed));
            i -= 1;
        }
    }
    tokens.reverse();

    WordDiff { tokens }
}

/// Word diff for a single change, as rendered next to an amendment.
///
/// Renumbering carries no text and yields `None`.
pub fn diff_change(change: &ArticleChange) -> Option<WordDiff> {
    match change {
        ArticleChange::Substitute {
            old_text, new_text, ..
        } => Some(diff_words(old_text, new_text)),
        ArticleChange::Insert { new_text, .. } => Some(WordDiff::all_added(new_text)),
        ArticleChange::Repeal { old_text, .. } => Some(WordDiff::all_removed(old_text)),
        ArticleChange::Renumber { .. } => None,
    }
}
