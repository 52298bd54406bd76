//! Discrete quality tiers
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{
    HIGH_TIER_DURATION_SCALE, HIGH_TIER_FPS, LOW_TIER_DURATION_SCALE, LOW_TIER_FPS,
    MEDIUM_TIER_DURATION_SCALE, MEDIUM_TIER_FPS,
};

/// Performance class driving feature-flag defaults.
///
/// Variants are declared in ascending order so the derived `Ord` gives
/// `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    Medium,
    High,
}

impl QualityTier {
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// The tier one step below this one, or `None` at the floor.
    #[must_use]
    pub const fn step_down(self) -> Option<Self> {
        match self {
            Self::High => Some(Self::Medium),
            Self::Medium => Some(Self::Low),
            Self::Low => None,
        }
    }

    /// Built-in frame-rate target, used when no config overrides it.
    #[must_use]
    pub const fn default_frame_rate(self) -> u32 {
        match self {
            Self::High => HIGH_TIER_FPS,
            Self::Medium => MEDIUM_TIER_FPS,
            Self::Low => LOW_TIER_FPS,
        }
    }

    /// Built-in multiplier applied to animation durations.
    #[must_use]
    pub const fn default_duration_scale(self) -> f64 {
        match self {
            Self::High => HIGH_TIER_DURATION_SCALE,
            Self::Medium => MEDIUM_TIER_DURATION_SCALE,
            Self::Low => LOW_TIER_DURATION_SCALE,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Single-letter badge shown on the floating settings button.
    #[must_use]
    pub const fn badge(self) -> char {
        match self {
            Self::High => 'H',
            Self::Medium => 'M',
            Self::Low => 'L',
        }
    }

    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::High => "🚀",
            Self::Medium => "⚡",
            Self::Low => "🐌",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown quality tier '{0}' (expected high, medium or low)")]
pub struct TierParseError(pub String);

impl FromStr for QualityTier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(TierParseError(other.to_string())),
        }
    }
}
