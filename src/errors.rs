/*!
 * Error types for the media-overlay crate.
 *
 * Queries on a built timeline never fail: absent results are `None` or zero.
 * The errors here cover construction-time contract violations and
 * configuration problems only.
 */

use thiserror::Error;

use crate::node::NodeKind;

/// Leaf slot of a parallel group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The audio clip slot
    Audio,
    /// The text fragment slot
    Text,
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Audio => write!(f, "audio"),
            Slot::Text => write!(f, "text"),
        }
    }
}

/// Errors raised while attaching nodes to a timeline under construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The parent handle was issued by a different builder
    #[error("{kind} parent handle belongs to another timeline")]
    ForeignParent {
        /// Kind of the offending parent
        kind: NodeKind,
    },

    /// The parent handle does not address a node of the expected kind
    #[error("parent #{index} is not a {expected}")]
    ParentKindMismatch {
        /// Arena index of the parent
        index: usize,
        /// Kind the attachment required
        expected: NodeKind,
    },

    /// A root sequence was requested twice
    #[error("timeline already has a root sequence")]
    RootAlreadySet,

    /// A sequence would nest deeper than the configured limit
    #[error("sequence depth {depth} exceeds the limit of {max}")]
    TooDeep {
        /// Depth the new sequence would have
        depth: usize,
        /// Configured maximum
        max: usize,
    },

    /// A leaf was attached to a parallel whose slot is already taken
    #[error("{slot} slot of parallel #{index} is already occupied")]
    SlotOccupied {
        /// Arena index of the parallel
        index: usize,
        /// The occupied slot
        slot: Slot,
    },
}

/// Errors raised by configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration text could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configuration value is outside its allowed range
    #[error("Invalid configuration value for {field}: {message}")]
    InvalidValue {
        /// Name of the field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

/// Main error type that wraps all other errors.
///
/// Returned by [`TimelineBuilder::with_config_json`](crate::builder::TimelineBuilder::with_config_json);
/// consumers that mix builder and config calls can also collect into it with `?`.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Error while building a timeline
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Error from configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for OverlayError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
