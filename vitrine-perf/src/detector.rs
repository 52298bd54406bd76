//! One-shot capability detection
use serde::{Deserialize, Serialize};

use crate::constants::{
    HIGH_TIER_MIN_CORES, HIGH_TIER_MIN_MEMORY_GB, MEDIUM_TIER_MIN_CORES,
    MEDIUM_TIER_MIN_MEMORY_GB,
};
use crate::environment::EnvironmentSignals;
use crate::tier::QualityTier;

/// Classify the environment into an initial tier.
///
/// Thresholds are evaluated in order and the first match wins. Missing
/// signals have already been replaced by their fallbacks, so this never fails
/// and never consults sampling history.
#[must_use]
pub fn detect(signals: &EnvironmentSignals) -> QualityTier {
    let cores = signals.resolved_cores();
    let memory_gb = signals.resolved_memory_gb();
    let slow = signals.is_slow_network();

    if cores >= HIGH_TIER_MIN_CORES
        && memory_gb >= HIGH_TIER_MIN_MEMORY_GB
        && !signals.is_mobile()
        && !slow
    {
        QualityTier::High
    } else if cores >= MEDIUM_TIER_MIN_CORES && memory_gb >= MEDIUM_TIER_MIN_MEMORY_GB && !slow {
        QualityTier::Medium
    } else {
        QualityTier::Low
    }
}

/// Detector output plus the environment facts the policy keeps deriving from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityProfile {
    pub tier: QualityTier,
    pub is_mobile: bool,
    pub reduced_motion: bool,
}

impl CapabilityProfile {
    #[must_use]
    pub fn detect(signals: &EnvironmentSignals) -> Self {
        Self {
            tier: detect(signals),
            is_mobile: signals.is_mobile(),
            reduced_motion: signals.reduced_motion,
        }
    }

    /// Devices the detector placed on the floor tier.
    #[must_use]
    pub fn is_low_end(&self) -> bool {
        self.tier == QualityTier::Low
    }
}
