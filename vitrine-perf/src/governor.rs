//! Owner of the session policy and its frame-timing feedback loop.
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationKind, animation_duration, should_animate};
use crate::config::GovernorConfig;
use crate::detector::CapabilityProfile;
use crate::environment::EnvironmentProbe;
use crate::policy::{OverrideReport, Policy, PolicyOverride};
use crate::sampler::{FrameSampler, WindowSample};
use crate::tier::QualityTier;

/// Record of one automatic downgrade step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Downgrade {
    pub from: QualityTier,
    pub to: QualityTier,
    pub measured_fps: f64,
}

/// Owns the single [`Policy`] of a session.
///
/// The governor is the only writer. Consumers call [`policy`](Self::policy)
/// or [`should_animate`](Self::should_animate) right before each
/// animation-affecting decision; nothing is pushed to them.
#[derive(Debug, Clone)]
pub struct PerformanceGovernor<P>
where
    P: EnvironmentProbe,
{
    probe: P,
    config: GovernorConfig,
    profile: CapabilityProfile,
    policy: Policy,
    sampler: FrameSampler,
}

impl<P> PerformanceGovernor<P>
where
    P: EnvironmentProbe,
{
    /// Probe the environment once and derive the initial policy.
    pub fn new(probe: P) -> Self {
        Self::with_config(probe, GovernorConfig::default())
    }

    /// Like [`new`](Self::new) with explicit tuning. A config that fails
    /// [`GovernorConfig::validate`] is replaced by the defaults.
    pub fn with_config(probe: P, config: GovernorConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("governor config rejected, using defaults: {err}");
                GovernorConfig::default()
            }
        };
        let profile = CapabilityProfile::detect(&probe.probe());
        let policy = Policy::from_profile(&profile, &config);
        let sampler = FrameSampler::new(config.sample_window);
        log::debug!(
            "performance governor starting at {} tier (mobile: {}, reduced motion: {})",
            profile.tier,
            profile.is_mobile,
            profile.reduced_motion
        );
        Self {
            probe,
            config,
            profile,
            policy,
            sampler,
        }
    }

    /// Snapshot of the current policy.
    #[must_use]
    pub const fn policy(&self) -> Policy {
        self.policy
    }

    /// Detector output captured at construction or the last reset.
    #[must_use]
    pub const fn profile(&self) -> CapabilityProfile {
        self.profile
    }

    #[must_use]
    pub const fn config(&self) -> &GovernorConfig {
        &self.config
    }

    #[must_use]
    pub const fn sampler(&self) -> &FrameSampler {
        &self.sampler
    }

    #[must_use]
    pub const fn is_mobile(&self) -> bool {
        self.profile.is_mobile
    }

    #[must_use]
    pub fn is_low_end(&self) -> bool {
        self.profile.is_low_end()
    }

    #[must_use]
    pub fn should_animate(&self, kind: AnimationKind) -> bool {
        should_animate(&self.policy, kind)
    }

    #[must_use]
    pub fn animation_duration(&self, base_ms: f64) -> f64 {
        animation_duration(&self.policy, base_ms, &self.config)
    }

    /// Merge an explicit user setting into the policy.
    pub fn set_override(&mut self, patch: &PolicyOverride) -> OverrideReport {
        let report = self.policy.apply_override(patch);
        for rejected in &report.rejected {
            log::debug!("override field rejected: {rejected}");
        }
        report
    }

    /// Re-run detection from scratch, dropping overrides and sampling history.
    pub fn reset_to_detected(&mut self) {
        self.profile = CapabilityProfile::detect(&self.probe.probe());
        self.policy = Policy::from_profile(&self.profile, &self.config);
        self.sampler.clear();
        log::debug!("policy reset to detected {} tier", self.profile.tier);
    }

    /// The OS-level reduced-motion preference changed mid-session.
    pub fn on_reduced_motion_changed(&mut self, reduced: bool) {
        self.profile.reduced_motion = reduced;
        self.policy.set_reduced_motion(reduced);
        log::debug!("reduced motion preference now {reduced}");
    }

    /// Frames stopped being rendered (hidden tab, suspended page).
    ///
    /// The timestamp clock restarts at the next frame so the pause is not
    /// counted as frame time.
    pub fn pause_sampling(&mut self) {
        self.sampler.reset_clock();
        log::debug!("frame sampling paused");
    }

    /// Feed one frame duration in milliseconds.
    pub fn on_frame_paced(&mut self, frame_ms: f64) -> Option<Downgrade> {
        let sample = self.sampler.record(frame_ms)?;
        self.evaluate(&sample)
    }

    /// Feed a raw animation-frame timestamp in milliseconds.
    pub fn on_frame_timestamp(&mut self, now_ms: f64) -> Option<Downgrade> {
        let sample = self.sampler.record_timestamp(now_ms)?;
        self.evaluate(&sample)
    }

    fn evaluate(&mut self, sample: &WindowSample) -> Option<Downgrade> {
        log::debug!(
            "frame window closed: {:.1} fps over {} frames at {} tier",
            sample.fps,
            sample.frames,
            self.policy.tier
        );
        if sample.fps >= self.config.downgrade_fps {
            return None;
        }
        let (from, to) = self.policy.apply_downgrade(&self.config)?;
        log::info!(
            "sustained {:.1} fps below {:.0}: quality tier lowered {from} -> {to}",
            sample.fps,
            self.config.downgrade_fps
        );
        Some(Downgrade {
            from,
            to,
            measured_fps: sample.fps,
        })
    }
}
