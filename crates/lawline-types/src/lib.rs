//! Foundation types for Lawline.
//!
//! This crate provides the value shapes shared by the diff and replay engines.
//! Every other Lawline crate depends on `lawline-types`.
//!
//! # Key Types
//!
//! - [`SectionId`] -- Stable identifier of an article, unique within a state
//! - [`Section`] -- A named unit of legal text (`id`, `heading`, `content`)
//! - [`LawState`] -- Ordered sections plus title and preface
//! - [`ArticleChange`] -- Closed sum of substitution, insertion, repeal, renumber
//! - [`ChangeSet`] -- Historical, replay-as-is record of changes with an optional vote
//! - [`Timeline`] / [`TimelineStep`] -- Ordered snapshots and amendments

pub mod change;
pub mod error;
pub mod section;
pub mod state;
pub mod timeline;

pub use change::{ArticleChange, ChangeKind, ChangeSet, VoteOutcome};
pub use error::TypeError;
pub use section::{Section, SectionId};
pub use state::LawState;
pub use timeline::{Timeline, TimelineStep};
