mod reports;
mod runner;
mod scenarios;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use runner::{ScenarioResult, ScenarioRunner, TraceRecord};
use scenarios::{find_scenario, list_scenarios};
use util::{parse_seeds, split_csv};

#[derive(Debug, Parser)]
#[command(name = "vitrine-tester", version = "0.1.0")]
#[command(about = "Replays synthetic frame traces through the Vitrine performance governor")]
struct Args {
    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds for frame jitter (comma-separated, decimal or 0x-hex)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    let seeds = parse_seeds(&split_csv(&args.seeds))?;
    let (results, records) = run_scenarios(&args, &scenarios, &seeds);

    write_reports(&args, &results, &records, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎛️  Vitrine Governor Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.contains(&"all".to_string()) {
        scenarios.retain(|s| s != "all");
        for (key, _) in list_scenarios() {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push(key.to_string());
            }
        }
    }
    scenarios
}

fn run_scenarios(
    args: &Args,
    scenarios: &[String],
    seeds: &[u64],
) -> (Vec<ScenarioResult>, Vec<TraceRecord>) {
    let mut results = Vec::new();
    let mut records = Vec::new();

    println!("{}", "🧠 Replaying Frame Traces".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let runner = ScenarioRunner::new(args.verbose);
    for scenario_name in scenarios {
        let Some(scenario) = find_scenario(scenario_name) else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
            continue;
        };
        let (scenario_results, mut scenario_records) =
            runner.run_scenario(&scenario, seeds, args.iterations);
        results.extend(scenario_results);
        records.append(&mut scenario_records);
    }

    (results, records)
}

fn write_reports(
    args: &Args,
    results: &[ScenarioResult],
    records: &[TraceRecord],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, results)?,
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Vitrine Governor Trace Results\n\n_No scenarios executed._"
                )?;
            } else {
                reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        "csv" => reports::generate_csv_report(&mut output_target, records)?,
        _ => {
            let duration = start_time.elapsed();
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(&mut output_target, results, records, duration)?;
            }
        }
    }

    if args.report == "console" {
        let duration = start_time.elapsed();
        writeln!(&mut output_target)?;
        writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn base_args() -> Args {
        Args {
            scenarios: "steady-desktop".to_string(),
            list_scenarios: false,
            seeds: "1337".to_string(),
            iterations: 1,
            report: "json".to_string(),
            verbose: false,
            output: None,
        }
    }

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("vitrine-{}-{name}", std::process::id()))
    }

    fn sample_result() -> ScenarioResult {
        ScenarioResult {
            scenario_name: "steady-desktop".to_string(),
            seed: 1337,
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_micros(40),
        }
    }

    #[test]
    fn expands_all_scenarios_keyword() {
        let expanded = expand_scenarios("all,steady-desktop");
        assert_eq!(expanded[0], "steady-desktop");
        assert!(expanded.contains(&"sustained-slow".to_string()));
        assert_eq!(
            expanded.iter().filter(|s| *s == "steady-desktop").count(),
            1
        );
    }

    #[test]
    fn expand_scenarios_without_all_preserves_order() {
        let expanded = expand_scenarios("single-spike,mobile-flagship");
        assert_eq!(expanded, vec!["single-spike", "mobile-flagship"]);
    }

    #[test]
    fn run_scenarios_skips_unknown_names() {
        let args = base_args();
        let (results, records) =
            run_scenarios(&args, &["nope".to_string(), "steady-desktop".to_string()], &[7]);
        assert_eq!(results.len(), 1);
        assert_eq!(records.len(), 1);
        assert!(results[0].passed);
    }

    #[test]
    fn maybe_list_scenarios_writes_output() {
        let temp = temp_file("scenarios.txt");
        let args = Args {
            list_scenarios: true,
            output: Some(temp.clone()),
            ..base_args()
        };
        assert!(maybe_list_scenarios(&args).unwrap());
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("Available scenarios"));
        assert!(content.contains("no-auto-upgrade"));
    }

    #[test]
    fn maybe_list_scenarios_returns_false_when_disabled() {
        assert!(!maybe_list_scenarios(&base_args()).unwrap());
    }

    #[test]
    fn write_reports_emits_json_output() {
        let temp = temp_file("report.json");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result()], &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("scenario_name"));
    }

    #[test]
    fn write_reports_markdown_empty_results() {
        let temp = temp_file("report.md");
        let args = Args {
            report: "markdown".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("No scenarios executed"));
    }

    #[test]
    fn write_reports_console_appends_total_time() {
        let temp = temp_file("report.txt");
        let args = Args {
            report: "console".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result()], &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("Governor Trace Results"));
        assert!(content.contains("Total time"));
    }

    #[test]
    fn output_target_stdout_writes() {
        let mut target = OutputTarget::new(None).unwrap();
        target.write_all(b"ok").unwrap();
        target.flush().unwrap();
    }
}
