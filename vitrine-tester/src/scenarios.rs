//! Catalog of synthetic frame traces run against the governor.

use vitrine_perf::{EnvironmentSignals, FormFactor, NetworkClass, PolicyOverride, QualityTier};

const FRAME_60_FPS_MS: f64 = 1000.0 / 60.0;

/// One step of a scripted session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Feed `count` frames of roughly `frame_ms`, perturbed by up to `jitter_ms`.
    Frames {
        count: u32,
        frame_ms: f64,
        jitter_ms: f64,
    },
    Override(PolicyOverride),
    Reset,
    ReducedMotion(bool),
}

impl Step {
    const fn frames(count: u32, frame_ms: f64, jitter_ms: f64) -> Self {
        Self::Frames {
            count,
            frame_ms,
            jitter_ms,
        }
    }
}

/// What the policy must look like when the script finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectation {
    pub initial_tier: QualityTier,
    pub final_tier: QualityTier,
    pub downgrades: usize,
    pub final_animations: bool,
    pub final_particles: bool,
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    pub signals: EnvironmentSignals,
    pub steps: Vec<Step>,
    pub expect: Expectation,
}

fn workstation() -> EnvironmentSignals {
    EnvironmentSignals::default()
        .with_cores(8)
        .with_memory_gb(16.0)
        .with_network(NetworkClass::FourG)
}

#[allow(clippy::too_many_lines)]
#[must_use]
pub fn catalog() -> Vec<Scenario> {
    vec![
        Scenario {
            key: "steady-desktop",
            description: "Workstation holding 60 fps keeps the high tier",
            signals: workstation(),
            steps: vec![Step::frames(600, FRAME_60_FPS_MS, 3.0)],
            expect: Expectation {
                initial_tier: QualityTier::High,
                final_tier: QualityTier::High,
                downgrades: 0,
                final_animations: true,
                final_particles: true,
            },
        },
        Scenario {
            key: "sustained-slow",
            description: "Sustained 25 fps walks down one tier per window to low",
            signals: workstation(),
            steps: vec![Step::frames(240, 40.0, 4.0)],
            expect: Expectation {
                initial_tier: QualityTier::High,
                final_tier: QualityTier::Low,
                downgrades: 2,
                final_animations: true,
                final_particles: false,
            },
        },
        Scenario {
            key: "single-spike",
            description: "One long frame inside a healthy window does not downgrade",
            signals: workstation(),
            steps: vec![
                Step::frames(59, FRAME_60_FPS_MS, 2.0),
                Step::frames(1, 250.0, 0.0),
                Step::frames(120, FRAME_60_FPS_MS, 2.0),
            ],
            expect: Expectation {
                initial_tier: QualityTier::High,
                final_tier: QualityTier::High,
                downgrades: 0,
                final_animations: true,
                final_particles: true,
            },
        },
        Scenario {
            key: "no-auto-upgrade",
            description: "Recovered frame rate never raises the tier again",
            signals: workstation(),
            steps: vec![
                Step::frames(60, 50.0, 5.0),
                Step::frames(1_200, FRAME_60_FPS_MS, 2.0),
            ],
            expect: Expectation {
                initial_tier: QualityTier::High,
                final_tier: QualityTier::Medium,
                downgrades: 1,
                final_animations: true,
                final_particles: false,
            },
        },
        Scenario {
            key: "mobile-flagship",
            description: "Capable phone starts at medium with particles off",
            signals: workstation().with_form_factor(FormFactor::Mobile),
            steps: vec![Step::frames(300, FRAME_60_FPS_MS, 3.0)],
            expect: Expectation {
                initial_tier: QualityTier::Medium,
                final_tier: QualityTier::Medium,
                downgrades: 0,
                final_animations: true,
                final_particles: false,
            },
        },
        Scenario {
            key: "reduced-motion",
            description: "Reduced motion rejects animation overrides until it is lifted",
            signals: workstation().with_reduced_motion(true),
            steps: vec![
                Step::Override(
                    PolicyOverride::default()
                        .with_animations(true)
                        .with_particles(true),
                ),
                Step::frames(120, FRAME_60_FPS_MS, 2.0),
                Step::ReducedMotion(false),
            ],
            expect: Expectation {
                initial_tier: QualityTier::High,
                final_tier: QualityTier::High,
                downgrades: 0,
                final_animations: true,
                final_particles: true,
            },
        },
        Scenario {
            key: "slow-network",
            description: "2g connection starts at the floor and stays there",
            signals: workstation().with_network(NetworkClass::TwoG),
            steps: vec![Step::frames(180, 40.0, 4.0)],
            expect: Expectation {
                initial_tier: QualityTier::Low,
                final_tier: QualityTier::Low,
                downgrades: 0,
                final_animations: true,
                final_particles: false,
            },
        },
        Scenario {
            key: "override-reset",
            description: "User override to low survives slow frames, reset restores detection",
            signals: workstation(),
            steps: vec![
                Step::Override(PolicyOverride::tier(QualityTier::Low)),
                Step::frames(120, 40.0, 4.0),
                Step::Reset,
                Step::frames(120, FRAME_60_FPS_MS, 2.0),
            ],
            expect: Expectation {
                initial_tier: QualityTier::High,
                final_tier: QualityTier::High,
                downgrades: 0,
                final_animations: true,
                final_particles: true,
            },
        },
        Scenario {
            key: "low-memory",
            description: "Many cores but 2 GB of memory lands on the low tier",
            signals: workstation().with_memory_gb(2.0),
            steps: vec![Step::frames(120, FRAME_60_FPS_MS, 2.0)],
            expect: Expectation {
                initial_tier: QualityTier::Low,
                final_tier: QualityTier::Low,
                downgrades: 0,
                final_animations: true,
                final_particles: false,
            },
        },
    ]
}

#[must_use]
pub fn find_scenario(key: &str) -> Option<Scenario> {
    catalog().into_iter().find(|scenario| scenario.key == key)
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog()
        .into_iter()
        .map(|scenario| (scenario.key, scenario.description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_keys_are_unique() {
        let keys: HashSet<_> = catalog().iter().map(|s| s.key).collect();
        assert_eq!(keys.len(), catalog().len());
    }

    #[test]
    fn expected_initial_tier_matches_detector() {
        for scenario in catalog() {
            assert_eq!(
                vitrine_perf::detect(&scenario.signals),
                scenario.expect.initial_tier,
                "{}",
                scenario.key
            );
        }
    }

    #[test]
    fn find_scenario_by_key() {
        assert!(find_scenario("sustained-slow").is_some());
        assert!(find_scenario("missing").is_none());
    }
}
