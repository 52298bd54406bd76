use colored::Colorize;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use vitrine_perf::numbers::u32_to_f64;
use vitrine_perf::{Downgrade, PerformanceGovernor, Policy, QualityTier};

use crate::scenarios::{Expectation, Scenario, Step};

/// Smallest frame time a jittered sample may take.
const MIN_FRAME_MS: f64 = 1.0;

/// Everything observed while replaying one scripted session.
#[derive(Debug, Clone)]
pub struct Trace {
    pub initial: Policy,
    pub final_policy: Policy,
    pub downgrades: Vec<Downgrade>,
    pub frames: u32,
    pub total_frame_ms: f64,
    pub rejected_overrides: usize,
    pub violations: Vec<String>,
}

impl Trace {
    /// Mean frame rate over every fed frame.
    #[must_use]
    pub fn mean_fps(&self) -> f64 {
        if self.total_frame_ms <= 0.0 {
            return 0.0;
        }
        u32_to_f64(self.frames) * 1000.0 / self.total_frame_ms
    }
}

/// Per-iteration row used by the CSV report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceRecord {
    pub scenario_name: String,
    pub seed: u64,
    pub initial_tier: QualityTier,
    pub final_tier: QualityTier,
    pub downgrades: usize,
    pub frames: u32,
    pub mean_fps: f64,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

fn jittered(rng: &mut ChaCha8Rng, frame_ms: f64, jitter_ms: f64) -> f64 {
    if jitter_ms <= 0.0 {
        return frame_ms;
    }
    (frame_ms + rng.gen_range(-jitter_ms..=jitter_ms)).max(MIN_FRAME_MS)
}

/// Replay `scenario` against a fresh governor.
pub fn run_trace(scenario: &Scenario, rng: &mut ChaCha8Rng) -> Trace {
    let mut governor = PerformanceGovernor::new(scenario.signals);
    let initial = governor.policy();
    let mut trace = Trace {
        initial,
        final_policy: initial,
        downgrades: Vec::new(),
        frames: 0,
        total_frame_ms: 0.0,
        rejected_overrides: 0,
        violations: Vec::new(),
    };

    for (index, step) in scenario.steps.iter().enumerate() {
        match *step {
            Step::Frames {
                count,
                frame_ms,
                jitter_ms,
            } => {
                for _ in 0..count {
                    let ms = jittered(rng, frame_ms, jitter_ms);
                    trace.frames += 1;
                    trace.total_frame_ms += ms;
                    if let Some(downgrade) = governor.on_frame_paced(ms) {
                        log::debug!(
                            "{}: {} -> {} at {:.1} fps",
                            scenario.key,
                            downgrade.from,
                            downgrade.to,
                            downgrade.measured_fps
                        );
                        trace.downgrades.push(downgrade);
                    }
                }
            }
            Step::Override(patch) => {
                trace.rejected_overrides += governor.set_override(&patch).rejected.len();
            }
            Step::Reset => governor.reset_to_detected(),
            Step::ReducedMotion(reduced) => governor.on_reduced_motion_changed(reduced),
        }

        let policy = governor.policy();
        if !policy.is_consistent() {
            trace
                .violations
                .push(format!("step {}: inconsistent policy {policy:?}", index + 1));
        }
    }

    trace.final_policy = governor.policy();
    trace
}

/// Compare a trace against its expectation, listing every mismatch.
pub fn evaluate_expectation(expect: &Expectation, trace: &Trace) -> Option<String> {
    let mut problems = trace.violations.clone();
    let fin = &trace.final_policy;
    if trace.initial.tier != expect.initial_tier {
        problems.push(format!(
            "initial tier {} (expected {})",
            trace.initial.tier, expect.initial_tier
        ));
    }
    if fin.tier != expect.final_tier {
        problems.push(format!(
            "final tier {} (expected {})",
            fin.tier, expect.final_tier
        ));
    }
    if trace.downgrades.len() != expect.downgrades {
        problems.push(format!(
            "{} downgrades (expected {})",
            trace.downgrades.len(),
            expect.downgrades
        ));
    }
    if fin.animations_enabled != expect.final_animations {
        problems.push(format!("animations {}", fin.animations_enabled));
    }
    if fin.particles_enabled != expect.final_particles {
        problems.push(format!("particles {}", fin.particles_enabled));
    }
    if trace
        .downgrades
        .windows(2)
        .any(|pair| pair[1].from != pair[0].to)
    {
        problems.push("downgrades skipped a tier".to_string());
    }

    if problems.is_empty() {
        None
    } else {
        Some(problems.join("; "))
    }
}

pub struct ScenarioRunner {
    verbose: bool,
}

impl ScenarioRunner {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn run_scenario(
        &self,
        scenario: &Scenario,
        seeds: &[u64],
        iterations: usize,
    ) -> (Vec<ScenarioResult>, Vec<TraceRecord>) {
        let mut results = Vec::new();
        let mut records = Vec::new();

        for &seed in seeds {
            if self.verbose {
                println!(
                    "🧪 Testing scenario: {} (seed: {})",
                    scenario.key.bright_white(),
                    seed
                );
            }
            let (result, mut scenario_records) = self.run_single_scenario(scenario, seed, iterations);
            results.push(result);
            records.append(&mut scenario_records);
        }

        (results, records)
    }

    fn run_single_scenario(
        &self,
        scenario: &Scenario,
        seed: u64,
        iterations: usize,
    ) -> (ScenarioResult, Vec<TraceRecord>) {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut durations = Vec::new();
        let mut records = Vec::new();

        for i in 0..iterations {
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
            let mut rng = ChaCha8Rng::seed_from_u64(iteration_seed);
            let start = Instant::now();
            let trace = run_trace(scenario, &mut rng);
            durations.push(start.elapsed());

            let problem = evaluate_expectation(&scenario.expect, &trace);
            records.push(TraceRecord {
                scenario_name: scenario.key.to_string(),
                seed: iteration_seed,
                initial_tier: trace.initial.tier,
                final_tier: trace.final_policy.tier,
                downgrades: trace.downgrades.len(),
                frames: trace.frames,
                mean_fps: trace.mean_fps(),
                passed: problem.is_none(),
            });

            match problem {
                None => successes += 1,
                Some(err) => {
                    if self.verbose {
                        println!("   ❌ iteration {}: {}", i + 1, err.red());
                    }
                    failures.push(format!(
                        "Iteration {} (seed {iteration_seed}, {} frames, {:.1} fps mean): {err}",
                        i + 1,
                        trace.frames,
                        trace.mean_fps()
                    ));
                }
            }
        }

        let average_duration = if durations.is_empty() {
            Duration::ZERO
        } else {
            durations.iter().sum::<Duration>() / u32::try_from(durations.len()).unwrap_or(1)
        };

        let result = ScenarioResult {
            scenario_name: scenario.key.to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
        };
        (result, records)
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_micros().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = u128::deserialize(deserializer)?;
        Ok(Duration::from_micros(u64::try_from(micros).unwrap_or(0)))
    }
}
