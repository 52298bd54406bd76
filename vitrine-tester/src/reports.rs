use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;
use vitrine_perf::numbers::usize_to_f64;

use crate::runner::{ScenarioResult, TraceRecord};

fn success_rate(results: &[ScenarioResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    usize_to_f64(passed) / usize_to_f64(results.len()) * 100.0
}

pub fn generate_console_report<W: Write + ?Sized>(
    out: &mut W,
    results: &[ScenarioResult],
    records: &[TraceRecord],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Governor Trace Results".bright_cyan().bold())?;
    writeln!(out, "{}", "=========================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "Total runs: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            out,
            "{} {} (seed {})",
            status,
            result.scenario_name.bold(),
            result.seed
        )?;
        writeln!(
            out,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "   Average time: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    if !records.is_empty() {
        writeln!(out, "{}", "⚡ Trace Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "===============".yellow())?;
        let mut keys: Vec<&str> = Vec::new();
        for record in records {
            if !keys.contains(&record.scenario_name.as_str()) {
                keys.push(record.scenario_name.as_str());
            }
        }
        for key in keys {
            let rows: Vec<&TraceRecord> =
                records.iter().filter(|r| r.scenario_name == key).collect();
            let count = usize_to_f64(rows.len());
            let mean_fps = rows.iter().map(|r| r.mean_fps).sum::<f64>() / count;
            let mean_downgrades =
                rows.iter().map(|r| usize_to_f64(r.downgrades)).sum::<f64>() / count;
            writeln!(
                out,
                "{key:20} {mean_fps:6.1} fps mean, {mean_downgrades:.2} downgrades/run"
            )?;
        }
    }
    Ok(())
}

pub fn generate_json_report<W: Write + ?Sized>(out: &mut W, results: &[ScenarioResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report<W: Write + ?Sized>(
    out: &mut W,
    results: &[ScenarioResult],
) -> Result<()> {
    writeln!(out, "# Vitrine Governor Trace Results\n")?;
    writeln!(
        out,
        "_Generated {}_\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total runs**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", total - passed)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(results))?;

    writeln!(out, "## Detailed Results\n")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "### {} {} (seed {})\n", status, result.scenario_name, result.seed)?;
        writeln!(
            out,
            "- **Iterations**: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "- **Average time**: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_csv_report<W: Write + ?Sized>(out: &mut W, records: &[TraceRecord]) -> Result<()> {
    writeln!(
        out,
        "scenario,seed,initial_tier,final_tier,downgrades,frames,mean_fps,passed"
    )?;
    for r in records {
        writeln!(
            out,
            "{},{},{},{},{},{},{:.2},{}",
            r.scenario_name,
            r.seed,
            r.initial_tier,
            r.final_tier,
            r.downgrades,
            r.frames,
            r.mean_fps,
            r.passed
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_perf::QualityTier;

    fn sample_result(passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: "sustained-slow".to_string(),
            seed: 1337,
            passed,
            iterations_run: 2,
            successful_iterations: if passed { 2 } else { 1 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["final tier medium (expected low)".to_string()]
            },
            average_duration: Duration::from_micros(250),
        }
    }

    fn sample_record() -> TraceRecord {
        TraceRecord {
            scenario_name: "sustained-slow".to_string(),
            seed: 1337,
            initial_tier: QualityTier::High,
            final_tier: QualityTier::Low,
            downgrades: 2,
            frames: 240,
            mean_fps: 25.0,
            passed: true,
        }
    }

    #[test]
    fn console_report_lists_failures_and_summary() {
        let mut buf = Vec::new();
        generate_console_report(
            &mut buf,
            &[sample_result(true), sample_result(false)],
            &[sample_record()],
            Duration::from_millis(5),
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Success rate: 50.0%"));
        assert!(text.contains("expected low"));
        assert!(text.contains("Trace Summary"));
        assert!(text.contains("2.00 downgrades/run"));
    }

    #[test]
    fn trace_summary_lists_each_scenario_once() {
        let other = TraceRecord {
            scenario_name: "single-spike".to_string(),
            ..sample_record()
        };
        let records = [sample_record(), other, sample_record()];
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &[sample_result(true)], &records, Duration::ZERO).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let summary = text.split("Trace Summary").nth(1).unwrap();
        assert_eq!(summary.matches("sustained-slow").count(), 1);
        assert_eq!(summary.matches("single-spike").count(), 1);
    }

    #[test]
    fn csv_report_has_header_and_rows() {
        let mut buf = Vec::new();
        generate_csv_report(&mut buf, &[sample_record()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("scenario,seed,initial_tier"));
        assert_eq!(
            lines.next().unwrap(),
            "sustained-slow,1337,high,low,2,240,25.00,true"
        );
    }

    #[test]
    fn json_report_round_trips_results() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &[sample_result(true)]).unwrap();
        let parsed: Vec<ScenarioResult> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed[0].average_duration, Duration::from_micros(250));
    }

    #[test]
    fn markdown_report_has_sections() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &[sample_result(false)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("# Vitrine Governor Trace Results"));
        assert!(text.contains("## Detailed Results"));
        assert!(text.contains("❌ sustained-slow"));
    }
}
