//! Centralized thresholds for capability detection and frame governance.
//!
//! The detector thresholds and the default sampling parameters live here so
//! tuning happens in reviewed code rather than scattered literals.

// Detector fallbacks ------------------------------------------------------
pub(crate) const DEFAULT_LOGICAL_CORES: u32 = 2;
pub(crate) const DEFAULT_DEVICE_MEMORY_GB: f64 = 4.0;

// Detector thresholds -----------------------------------------------------
pub(crate) const HIGH_TIER_MIN_CORES: u32 = 8;
pub(crate) const HIGH_TIER_MIN_MEMORY_GB: f64 = 8.0;
pub(crate) const MEDIUM_TIER_MIN_CORES: u32 = 4;
pub(crate) const MEDIUM_TIER_MIN_MEMORY_GB: f64 = 4.0;

// User agents classified as mobile form factors.
pub(crate) const MOBILE_UA_PATTERN: &str =
    r"(?i)Android|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini";

// Sampling loop -----------------------------------------------------------
pub const DEFAULT_SAMPLE_WINDOW: u32 = 60;
pub const DEFAULT_DOWNGRADE_FPS: f64 = 30.0;
pub(crate) const MS_PER_SECOND: f64 = 1_000.0;

// Tier frame rates --------------------------------------------------------
pub(crate) const HIGH_TIER_FPS: u32 = 60;
pub(crate) const MEDIUM_TIER_FPS: u32 = 30;
pub(crate) const LOW_TIER_FPS: u32 = 15;

// Animation duration scale per tier ---------------------------------------
pub(crate) const HIGH_TIER_DURATION_SCALE: f64 = 1.0;
pub(crate) const MEDIUM_TIER_DURATION_SCALE: f64 = 0.8;
pub(crate) const LOW_TIER_DURATION_SCALE: f64 = 0.5;
