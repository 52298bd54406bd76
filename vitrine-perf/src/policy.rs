//! The shared performance policy and its mutation rules.
//!
//! A [`Policy`] is a plain `Copy` value. The governor owns the only mutable
//! instance and hands out snapshots; every mutation path here re-establishes
//! the two invariants before returning:
//!
//! * reduced motion forces animations and particles off;
//! * the low tier forces particles off.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::GovernorConfig;
use crate::detector::CapabilityProfile;
use crate::tier::{QualityTier, TierParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub tier: QualityTier,
    pub reduced_motion_requested: bool,
    pub animations_enabled: bool,
    pub particles_enabled: bool,
    pub blur_enabled: bool,
    pub target_frame_rate: u32,
    pub is_mobile: bool,
}

impl Policy {
    /// Derive every flag from the tier and the environment facts.
    #[must_use]
    pub fn derive(
        tier: QualityTier,
        reduced_motion: bool,
        is_mobile: bool,
        cfg: &GovernorConfig,
    ) -> Self {
        Self {
            tier,
            reduced_motion_requested: reduced_motion,
            animations_enabled: !reduced_motion,
            particles_enabled: tier == QualityTier::High && !is_mobile && !reduced_motion,
            blur_enabled: tier != QualityTier::Low,
            target_frame_rate: cfg.frame_rate_for(tier),
            is_mobile,
        }
    }

    #[must_use]
    pub fn from_profile(profile: &CapabilityProfile, cfg: &GovernorConfig) -> Self {
        Self::derive(
            profile.tier,
            profile.reduced_motion,
            profile.is_mobile,
            cfg,
        )
    }

    /// True when both invariants hold.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let motion_ok =
            !self.reduced_motion_requested || (!self.animations_enabled && !self.particles_enabled);
        let tier_ok = self.tier != QualityTier::Low || !self.particles_enabled;
        motion_ok && tier_ok
    }

    fn enforce_invariants(&mut self) {
        if self.reduced_motion_requested {
            self.animations_enabled = false;
            self.particles_enabled = false;
        }
        if self.tier == QualityTier::Low {
            self.particles_enabled = false;
        }
    }

    /// React to the accessibility preference changing at the OS level.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion_requested = reduced;
        self.animations_enabled = !reduced;
        self.particles_enabled = !reduced && self.tier == QualityTier::High && !self.is_mobile;
    }

    /// Merge the supplied override fields.
    ///
    /// The tier is applied first so flag fields are checked against the tier
    /// they will live with. Fields that would contradict an invariant are left
    /// untouched and reported as rejected.
    pub fn apply_override(&mut self, patch: &PolicyOverride) -> OverrideReport {
        let mut report = OverrideReport::default();

        if let Some(tier) = patch.tier {
            self.tier = tier;
            report.applied.push(PolicyField::Tier);
        }

        if let Some(enabled) = patch.animations_enabled {
            if enabled && self.reduced_motion_requested {
                report.rejected.push(PolicyError::ReducedMotionConflict {
                    field: PolicyField::Animations,
                });
            } else {
                self.animations_enabled = enabled;
                report.applied.push(PolicyField::Animations);
            }
        }

        if let Some(enabled) = patch.particles_enabled {
            if enabled && self.reduced_motion_requested {
                report.rejected.push(PolicyError::ReducedMotionConflict {
                    field: PolicyField::Particles,
                });
            } else if enabled && self.tier == QualityTier::Low {
                report.rejected.push(PolicyError::LowTierParticles);
            } else {
                self.particles_enabled = enabled;
                report.applied.push(PolicyField::Particles);
            }
        }

        if let Some(enabled) = patch.blur_enabled {
            self.blur_enabled = enabled;
            report.applied.push(PolicyField::Blur);
        }

        if let Some(fps) = patch.target_frame_rate {
            self.target_frame_rate = fps;
            report.applied.push(PolicyField::FrameRate);
        }

        self.enforce_invariants();
        report
    }

    /// Drop one tier and re-derive the flags from it.
    ///
    /// Per-flag user overrides do not survive this. Particles are always
    /// stripped and leaving the high tier also strips blur.
    pub fn apply_downgrade(&mut self, cfg: &GovernorConfig) -> Option<(QualityTier, QualityTier)> {
        let from = self.tier;
        let to = from.step_down()?;
        *self = Self::derive(to, self.reduced_motion_requested, self.is_mobile, cfg);
        self.particles_enabled = false;
        if from == QualityTier::High {
            self.blur_enabled = false;
        }
        Some((from, to))
    }
}

/// Caller-supplied partial policy. `None` fields are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PolicyOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<QualityTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animations_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particles_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_frame_rate: Option<u32>,
}

impl PolicyOverride {
    #[must_use]
    pub const fn tier(tier: QualityTier) -> Self {
        Self {
            tier: Some(tier),
            animations_enabled: None,
            particles_enabled: None,
            blur_enabled: None,
            target_frame_rate: None,
        }
    }

    /// Build a tier override from a settings-surface label.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::UnknownTier` when the label names no tier.
    pub fn parse_tier(label: &str) -> Result<Self, PolicyError> {
        Ok(Self::tier(label.parse()?))
    }

    #[must_use]
    pub const fn with_animations(mut self, enabled: bool) -> Self {
        self.animations_enabled = Some(enabled);
        self
    }

    #[must_use]
    pub const fn with_particles(mut self, enabled: bool) -> Self {
        self.particles_enabled = Some(enabled);
        self
    }

    #[must_use]
    pub const fn with_blur(mut self, enabled: bool) -> Self {
        self.blur_enabled = Some(enabled);
        self
    }

    #[must_use]
    pub const fn with_frame_rate(mut self, fps: u32) -> Self {
        self.target_frame_rate = Some(fps);
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tier.is_none()
            && self.animations_enabled.is_none()
            && self.particles_enabled.is_none()
            && self.blur_enabled.is_none()
            && self.target_frame_rate.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyField {
    Tier,
    Animations,
    Particles,
    Blur,
    FrameRate,
}

impl fmt::Display for PolicyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tier => "tier",
            Self::Animations => "animations_enabled",
            Self::Particles => "particles_enabled",
            Self::Blur => "blur_enabled",
            Self::FrameRate => "target_frame_rate",
        };
        f.write_str(name)
    }
}

/// Reasons an override field is refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("{field} cannot be enabled while reduced motion is requested")]
    ReducedMotionConflict { field: PolicyField },
    #[error("particles cannot be enabled on the low tier")]
    LowTierParticles,
    #[error(transparent)]
    UnknownTier(#[from] TierParseError),
}

/// What an override actually changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideReport {
    pub applied: Vec<PolicyField>,
    pub rejected: Vec<PolicyError>,
}

impl OverrideReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}
