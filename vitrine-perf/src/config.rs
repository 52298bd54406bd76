//! Governor tuning loaded from static assets
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_DOWNGRADE_FPS, DEFAULT_SAMPLE_WINDOW};
use crate::tier::QualityTier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernorConfig {
    #[serde(default = "GovernorConfig::default_sample_window")]
    pub sample_window: u32,
    #[serde(default = "GovernorConfig::default_downgrade_fps")]
    pub downgrade_fps: f64,
    #[serde(default)]
    pub tier_frame_rates: TierFrameRates,
    #[serde(default)]
    pub duration_scale: TierDurationScale,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            sample_window: Self::default_sample_window(),
            downgrade_fps: Self::default_downgrade_fps(),
            tier_frame_rates: TierFrameRates::default(),
            duration_scale: TierDurationScale::default(),
        }
    }
}

impl GovernorConfig {
    const fn default_sample_window() -> u32 {
        DEFAULT_SAMPLE_WINDOW
    }

    const fn default_downgrade_fps() -> f64 {
        DEFAULT_DOWNGRADE_FPS
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `GovernorConfigError::Json` for malformed input, or the first
    /// violated bound reported by [`GovernorConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, GovernorConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a JSON document, falling back to defaults when it is unusable.
    #[must_use]
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|err| {
            log::warn!("governor config rejected, using defaults: {err}");
            Self::default()
        })
    }

    /// Check the documented bounds.
    ///
    /// # Errors
    ///
    /// Returns `GovernorConfigError` when any field violates its bound.
    pub fn validate(&self) -> Result<(), GovernorConfigError> {
        if self.sample_window == 0 {
            return Err(GovernorConfigError::EmptyWindow);
        }
        if !self.downgrade_fps.is_finite() || self.downgrade_fps <= 0.0 {
            return Err(GovernorConfigError::Threshold {
                value: self.downgrade_fps,
            });
        }
        self.tier_frame_rates.validate()?;
        self.duration_scale.validate()
    }

    #[must_use]
    pub const fn frame_rate_for(&self, tier: QualityTier) -> u32 {
        self.tier_frame_rates.for_tier(tier)
    }

    #[must_use]
    pub const fn duration_scale_for(&self, tier: QualityTier) -> f64 {
        self.duration_scale.for_tier(tier)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierFrameRates {
    #[serde(default = "TierFrameRates::default_high")]
    pub high: u32,
    #[serde(default = "TierFrameRates::default_medium")]
    pub medium: u32,
    #[serde(default = "TierFrameRates::default_low")]
    pub low: u32,
}

impl Default for TierFrameRates {
    fn default() -> Self {
        Self {
            high: Self::default_high(),
            medium: Self::default_medium(),
            low: Self::default_low(),
        }
    }
}

impl TierFrameRates {
    const fn default_high() -> u32 {
        QualityTier::High.default_frame_rate()
    }

    const fn default_medium() -> u32 {
        QualityTier::Medium.default_frame_rate()
    }

    const fn default_low() -> u32 {
        QualityTier::Low.default_frame_rate()
    }

    #[must_use]
    pub const fn for_tier(&self, tier: QualityTier) -> u32 {
        match tier {
            QualityTier::High => self.high,
            QualityTier::Medium => self.medium,
            QualityTier::Low => self.low,
        }
    }

    fn validate(&self) -> Result<(), GovernorConfigError> {
        if self.low == 0 || self.low > self.medium || self.medium > self.high {
            return Err(GovernorConfigError::FrameRatesNotMonotonic {
                low: self.low,
                medium: self.medium,
                high: self.high,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierDurationScale {
    #[serde(default = "TierDurationScale::default_high")]
    pub high: f64,
    #[serde(default = "TierDurationScale::default_medium")]
    pub medium: f64,
    #[serde(default = "TierDurationScale::default_low")]
    pub low: f64,
}

impl Default for TierDurationScale {
    fn default() -> Self {
        Self {
            high: Self::default_high(),
            medium: Self::default_medium(),
            low: Self::default_low(),
        }
    }
}

impl TierDurationScale {
    const fn default_high() -> f64 {
        QualityTier::High.default_duration_scale()
    }

    const fn default_medium() -> f64 {
        QualityTier::Medium.default_duration_scale()
    }

    const fn default_low() -> f64 {
        QualityTier::Low.default_duration_scale()
    }

    #[must_use]
    pub const fn for_tier(&self, tier: QualityTier) -> f64 {
        match tier {
            QualityTier::High => self.high,
            QualityTier::Medium => self.medium,
            QualityTier::Low => self.low,
        }
    }

    fn validate(&self) -> Result<(), GovernorConfigError> {
        for (tier, value) in [
            (QualityTier::High, self.high),
            (QualityTier::Medium, self.medium),
            (QualityTier::Low, self.low),
        ] {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(GovernorConfigError::DurationScale { tier, value });
            }
        }
        Ok(())
    }
}

/// Errors raised when governor configuration bounds are violated.
#[derive(Debug, Error)]
pub enum GovernorConfigError {
    #[error("sample window must contain at least one frame")]
    EmptyWindow,
    #[error("downgrade threshold must be a positive fps value (got {value})")]
    Threshold { value: f64 },
    #[error("tier frame rates must satisfy 0 < low <= medium <= high (got {low}/{medium}/{high})")]
    FrameRatesNotMonotonic { low: u32, medium: u32, high: u32 },
    #[error("{tier} duration scale must be within (0, 1] (got {value})")]
    DurationScale { tier: QualityTier, value: f64 },
    #[error("governor config JSON invalid: {0}")]
    Json(#[from] serde_json::Error),
}
