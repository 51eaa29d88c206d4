// Ninefold Benchmark Runner — allocation-regime sweeps over the boundary engine
// Monte Carlo over seeded ChaCha8 PRNG; JSON report per invocation.
//
// Usage:
//   cargo run --release --bin bench                 # all scenarios, 30 runs
//   cargo run --release --bin bench -- --runs 5     # quick mode
//   cargo run --release --bin bench -- FOSSIL       # filter by name
//   cargo run --release --bin bench -- --seed 42    # custom base seed
//   cargo run --release --bin bench -- --periods 24 # longer horizon

mod report;
mod scenarios;

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use boundary_engine::allocation::allocation_to_revenue;
use boundary_engine::returns::compute_roi;
use boundary_engine::scenario::{run_scenario, SimSession};
use boundary_engine::{
    EngineConfig, Portfolio, Scheme, BOUNDARY_COUNT, DEFAULT_DT, DEFAULT_REGEN, PB_THRESHOLDS,
};

use report::{BenchReport, RunStats, ScenarioReport};
use scenarios::{build_timeline, scenarios, Scenario};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    periods: u32,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        runs: 30,
        seed: 0,
        periods: 24,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(30);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--periods" => {
                i += 1;
                if i < args.len() {
                    cli.periods = args[i].parse().unwrap_or(24);
                }
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Per-scenario sweep ─────────────────────────────────────────────────────

fn run_scenario_sweep(scenario: &Scenario, cli: &CliArgs) -> ScenarioReport {
    let portfolio = Portfolio::default();
    let config = EngineConfig::default();
    let mitigation = [0.0; BOUNDARY_COUNT];

    let mut breach_samples = Vec::with_capacity(cli.runs);
    let mut ratio_samples = Vec::with_capacity(cli.runs);
    let mut roi_samples = Vec::with_capacity(cli.runs);

    for run in 0..cli.runs {
        let mut rng = ChaCha8Rng::seed_from_u64(cli.seed.wrapping_add(run as u64));
        let timeline = build_timeline(scenario, cli.periods, portfolio.len(), &mut rng);

        let mut session = SimSession::new();
        let history = run_scenario(
            &mut session,
            &portfolio,
            &timeline,
            cli.periods,
            DEFAULT_DT,
            DEFAULT_REGEN,
            Scheme::Rk4,
            &config,
            &mitigation,
        )
        .expect("default portfolio and generated timelines are well-formed");

        let last = history.last().expect("at least one period");
        let breaches = last.breaches.iter().filter(|b| **b).count() as f64;
        let max_ratio = (0..BOUNDARY_COUNT)
            .map(|k| last.stocks[k] / PB_THRESHOLDS[k])
            .fold(f64::NEG_INFINITY, f64::max);

        let first_revenue = allocation_to_revenue(&timeline[0]);
        let roi = compute_roi(&portfolio, &first_revenue, Some(session.stocks()), &config)
            .expect("revenue derived from the portfolio's own dimension");

        breach_samples.push(breaches);
        ratio_samples.push(max_ratio);
        roi_samples.push(roi);
    }

    ScenarioReport {
        name: scenario.name,
        label: scenario.label,
        runs: cli.runs,
        final_breaches: RunStats::from_samples(&breach_samples),
        max_threshold_ratio: RunStats::from_samples(&ratio_samples),
        roi: RunStats::from_samples(&roi_samples),
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios
                .iter()
                .filter(|s| {
                    s.name.to_lowercase().contains(&f_lower)
                        || s.label.to_lowercase().contains(&f_lower)
                })
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    println!("\n  Ninefold Benchmark Runner");
    println!(
        "  PRNG: ChaCha8Rng | Runs/scenario: {} | Periods: {} | Base seed: {}",
        cli.runs, cli.periods, cli.seed
    );
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!(
        "  {:<34} {:>9} {:>11} {:>9}",
        "Scenario", "Breaches", "MaxRatio", "ROI%"
    );
    println!("  {}", "-".repeat(68));

    let suite_start = Instant::now();
    let mut scenario_reports = Vec::new();

    for scenario in &to_run {
        let report = run_scenario_sweep(scenario, &cli);
        println!(
            "  {:<34} {:>9.1} {:>11.3} {:>9.2}",
            report.label,
            report.final_breaches.mean,
            report.max_threshold_ratio.mean,
            report.roi.mean,
        );
        scenario_reports.push(report);
    }

    let suite_elapsed = suite_start.elapsed();
    println!("  {}", "-".repeat(68));
    println!(
        "  {} scenario(s) in {:.1}s\n",
        scenario_reports.len(),
        suite_elapsed.as_secs_f64()
    );

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_millis();
    let report = BenchReport {
        timestamp: format!("{}", ts),
        version: env!("CARGO_PKG_VERSION"),
        prng: "ChaCha8Rng",
        runs_per_scenario: cli.runs,
        periods: cli.periods,
        scenarios: scenario_reports,
    };

    let dir = std::path::Path::new("benchmark-results");
    if !dir.exists() {
        std::fs::create_dir_all(dir).expect("Failed to create benchmark-results/");
    }
    let path = dir.join(format!("bench-{}.json", ts));
    let json = serde_json::to_string_pretty(&report).expect("Failed to serialize");
    std::fs::write(&path, &json).expect("Failed to write benchmark file");
    println!("  Results saved to: {}\n", path.display());
}
