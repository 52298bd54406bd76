use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vitrine_perf::{
    AnimationKind, EnvironmentSignals, FormFactor, NetworkClass, PerformanceGovernor,
    PolicyOverride, QualityTier, detect,
};

fn workstation() -> EnvironmentSignals {
    EnvironmentSignals::default()
        .with_cores(8)
        .with_memory_gb(8.0)
        .with_network(NetworkClass::FourG)
}

fn feed(governor: &mut PerformanceGovernor<EnvironmentSignals>, frames: u32, ms: f64) -> usize {
    (0..frames)
        .filter_map(|_| governor.on_frame_paced(ms))
        .count()
}

#[test]
fn detector_boundaries_are_deterministic() {
    let cases = [
        (8, 8.0, FormFactor::Desktop, NetworkClass::FourG, QualityTier::High),
        (7, 8.0, FormFactor::Desktop, NetworkClass::FourG, QualityTier::Medium),
        (3, 8.0, FormFactor::Desktop, NetworkClass::FourG, QualityTier::Low),
        (8, 8.0, FormFactor::Mobile, NetworkClass::FourG, QualityTier::Medium),
        (8, 8.0, FormFactor::Desktop, NetworkClass::TwoG, QualityTier::Low),
        (4, 3.0, FormFactor::Desktop, NetworkClass::Unknown, QualityTier::Low),
    ];
    for (cores, memory, form, network, expected) in cases {
        let signals = EnvironmentSignals::default()
            .with_cores(cores)
            .with_memory_gb(memory)
            .with_form_factor(form)
            .with_network(network);
        assert_eq!(detect(&signals), expected, "{signals:?}");
        assert_eq!(detect(&signals), detect(&signals));
    }
}

#[test]
fn reduced_motion_dominates_any_state() {
    let mut governor = PerformanceGovernor::new(workstation());
    governor.set_override(&PolicyOverride::default().with_animations(true).with_particles(true));
    governor.on_reduced_motion_changed(true);
    let policy = governor.policy();
    assert!(!policy.animations_enabled);
    assert!(!policy.particles_enabled);

    let report =
        governor.set_override(&PolicyOverride::default().with_animations(true).with_particles(true));
    assert_eq!(report.rejected.len(), 2);
    assert!(governor.policy().is_consistent());
}

#[test]
fn sustained_low_fps_steps_one_level_per_window() {
    let mut governor = PerformanceGovernor::new(workstation());
    assert_eq!(feed(&mut governor, 60, 100.0), 1);
    assert_eq!(governor.policy().tier, QualityTier::Medium);
    assert_eq!(feed(&mut governor, 30, 100.0), 0);
    assert_eq!(governor.policy().tier, QualityTier::Medium);
    assert_eq!(feed(&mut governor, 30, 100.0), 1);
    assert_eq!(governor.policy().tier, QualityTier::Low);
    assert_eq!(feed(&mut governor, 240, 100.0), 0);
}

#[test]
fn low_tier_never_recovers_automatically() {
    let mut governor = PerformanceGovernor::new(workstation());
    feed(&mut governor, 120, 40.0);
    assert_eq!(governor.policy().tier, QualityTier::Low);
    feed(&mut governor, 6_000, 1000.0 / 60.0);
    assert_eq!(governor.policy().tier, QualityTier::Low);

    governor.set_override(&PolicyOverride::tier(QualityTier::High));
    assert_eq!(governor.policy().tier, QualityTier::High);
}

#[test]
fn policy_queries_are_idempotent() {
    let governor = PerformanceGovernor::new(workstation());
    assert_eq!(governor.policy(), governor.policy());
}

#[test]
fn override_then_reset_restores_detected_policy() {
    let mut governor = PerformanceGovernor::new(workstation());
    let detected = governor.policy();
    assert!(governor.should_animate(AnimationKind::Particles));

    governor.set_override(&PolicyOverride::tier(QualityTier::Low));
    assert!(!governor.should_animate(AnimationKind::Particles));

    governor.reset_to_detected();
    assert_eq!(governor.policy(), detected);
    assert!(governor.should_animate(AnimationKind::Particles));
}

#[test]
fn end_to_end_degradation_scenario() {
    let mut governor = PerformanceGovernor::new(workstation());
    let start = governor.policy();
    assert_eq!(start.tier, QualityTier::High);
    assert!(start.particles_enabled);
    assert_eq!(start.target_frame_rate, 60);

    feed(&mut governor, 60, 40.0);
    let medium = governor.policy();
    assert_eq!(medium.tier, QualityTier::Medium);
    assert!(!medium.particles_enabled);

    feed(&mut governor, 60, 40.0);
    let low = governor.policy();
    assert_eq!(low.tier, QualityTier::Low);
    assert!(!low.blur_enabled);
    assert_eq!(low.target_frame_rate, 15);
}

#[test]
fn jittered_fast_frames_hold_the_tier() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
    let mut governor = PerformanceGovernor::new(workstation());
    for _ in 0..1_200 {
        let frame_ms = rng.gen_range(12.0..24.0);
        assert!(governor.on_frame_paced(frame_ms).is_none());
    }
    assert_eq!(governor.policy().tier, QualityTier::High);
}
