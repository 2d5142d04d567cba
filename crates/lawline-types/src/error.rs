use thiserror::Error;

/// Errors produced while decoding Lawline values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("timeline has no steps")]
    EmptyTimeline,

    #[error("timeline step 0 must be a full snapshot")]
    MissingBaseSnapshot,
}
