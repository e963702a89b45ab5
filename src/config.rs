use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Build-time configuration for timelines.
///
/// Only affects construction; a built timeline is never reconfigured.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BuildConfig {
    /// What happens when a leaf lands in an occupied parallel slot
    #[serde(default)]
    pub slot_policy: SlotPolicy,

    /// Deepest allowed sequence nesting (the root sequence is depth 1)
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,

    /// Log a warning at build time when declared and computed durations differ
    #[serde(default = "default_true")]
    pub log_drift: bool,

    /// Disagreement in ms tolerated before the drift warning fires
    #[serde(default = "default_drift_tolerance_ms")]
    pub duration_drift_tolerance_ms: u32,
}

/// Slot assignment policy for parallel groups
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SlotPolicy {
    /// Fail the attachment with `BuildError::SlotOccupied`
    #[default]
    Reject,
    /// Replace the previous occupant (last write wins)
    Overwrite,
}

impl std::fmt::Display for SlotPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Overwrite => write!(f, "overwrite"),
        }
    }
}

impl std::str::FromStr for SlotPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "overwrite" => Ok(Self::Overwrite),
            _ => Err(ConfigError::InvalidValue {
                field: "slot_policy",
                message: format!("unknown policy '{}'", s),
            }),
        }
    }
}

fn default_max_nesting_depth() -> usize {
    64
}

fn default_true() -> bool {
    true
}

fn default_drift_tolerance_ms() -> u32 {
    1000
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            slot_policy: SlotPolicy::default(),
            max_nesting_depth: default_max_nesting_depth(),
            log_drift: default_true(),
            duration_drift_tolerance_ms: default_drift_tolerance_ms(),
        }
    }
}

impl BuildConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(ConfigError::from)
            .context("Failed to load build configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize build configuration")
    }

    /// Compatibility preset: occupied slots are silently overwritten
    pub fn last_write_wins() -> Self {
        Self {
            slot_policy: SlotPolicy::Overwrite,
            ..Self::default()
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.max_nesting_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_nesting_depth",
                message: "must allow at least the root sequence".to_string(),
            });
        }
        Ok(())
    }
}
