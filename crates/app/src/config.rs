//! Configuration for the pitlink-sim application.
//!
//! Handles command-line arguments and resolves them into a complete
//! [`Config`]: scenario, batch order, seed and output mode.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments, using the default preset and a
//! time-derived seed. The seed is always printed so any run can be replayed.

use clap::Parser;
use pitlink_sim_core::schedule::DEFAULT_BATCH_SIZE;
use pitlink_sim_core::scenario::DEFAULT_PRESET;
use pitlink_sim_core::{plan_batches, Batch, Error, Result, ScenarioConfig};
use std::path::PathBuf;

/// Priority-aware chunk delivery simulator
///
/// Samples how each chunk of a P0/P1/P2 workload fares over a lossy
/// multi-path link with FEC backup, and prints delivery statistics.
#[derive(Parser, Debug)]
#[command(name = "pitlink-sim")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Built-in scenario preset (motorsport, mobility, manufacturing)
    #[arg(long, default_value = DEFAULT_PRESET)]
    pub scenario: String,

    /// Load the scenario from a JSON file instead of a preset
    #[arg(long, conflicts_with = "scenario")]
    pub scenario_file: Option<PathBuf>,

    /// Random seed for reproducible results. When omitted, a time-based seed is used.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Explicit batch, e.g. `P0:10`. Repeatable; processed in the given order.
    #[arg(short = 'b', long = "batch")]
    pub batches: Vec<Batch>,

    /// Interleave lanes with WFQ + EDF instead of one batch per lane
    #[arg(long, conflicts_with = "batches")]
    pub plan: bool,

    /// Chunks per WFQ round when planning
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Number of independent runs, executed in parallel
    #[arg(long, default_value_t = 1)]
    pub runs: usize,

    /// Print the full run (chunks + stats) as JSON
    #[arg(long)]
    pub json: bool,

    /// Print stats as key=value lines
    #[arg(long)]
    pub export_text: bool,

    /// Print every chunk in the human-readable report
    #[arg(long)]
    pub chunks: bool,

    /// Print resolved configuration
    #[arg(long)]
    pub print_config: bool,

    /// Enable debug logging for the simulator core
    #[arg(short, long)]
    pub verbose: bool,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Report { show_chunks: bool },
    Json,
    Text,
}

/// Complete configuration for a simulation session.
#[derive(Debug, Clone)]
pub struct Config {
    pub scenario: ScenarioConfig,

    /// Batches in processing order
    pub batches: Vec<Batch>,

    /// Seed of the first run; run `i` uses `seed + i`
    pub seed: u64,

    pub runs: usize,

    pub output: OutputMode,

    pub print_config: bool,
}

impl Config {
    /// Resolve parsed arguments into a configuration.
    pub fn from_args(args: Args) -> Result<Self> {
        let scenario = match &args.scenario_file {
            Some(path) => ScenarioConfig::from_json_file(path)?,
            None => ScenarioConfig::preset(&args.scenario)?,
        };

        if args.runs == 0 {
            return Err(Error::Config("--runs must be at least 1".to_string()));
        }

        let batches = if !args.batches.is_empty() {
            args.batches
        } else if args.plan {
            plan_batches(&scenario, args.batch_size)
        } else {
            scenario.default_batches()
        };

        let seed = args.seed.unwrap_or_else(time_seed);

        let output = if args.json {
            OutputMode::Json
        } else if args.export_text {
            OutputMode::Text
        } else {
            OutputMode::Report {
                show_chunks: args.chunks,
            }
        };

        Ok(Config {
            scenario,
            batches,
            seed,
            runs: args.runs,
            output,
            print_config: args.print_config,
        })
    }

    /// Seed for the `index`-th run.
    pub fn run_seed(&self, index: usize) -> u64 {
        self.seed.wrapping_add(index as u64)
    }

    /// One line per configured lane, as the simulator will see it.
    pub fn lane_lines(&self) -> Vec<String> {
        self.scenario
            .lanes
            .keys()
            .map(|&priority| {
                let lane = self.scenario.lane(priority);
                format!(
                    "{}: {:.0} ms base, {}, paths [{}], weight {}, deadline {:.1}s",
                    priority,
                    lane.base_latency_ms,
                    lane.fec_label,
                    lane.candidate_paths.join(", "),
                    lane.weight,
                    lane.deadline_s,
                )
            })
            .collect()
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Scenario: {} ({})", self.scenario.label, self.scenario.name);
        println!("Seed: {}", self.seed);
        println!("Runs: {}", self.runs);
        println!();
        println!("=== Lanes ===");
        for line in self.lane_lines() {
            println!("{}", line);
        }
        println!();
        let penalties = self.scenario.penalties.normalized();
        println!("=== Penalties ===");
        println!("Jitter: up to {:.0}% of base", penalties.jitter_factor * 100.0);
        println!("Retransmit: +{:.0}% of base", penalties.retransmit_factor * 100.0);
        println!("Dropped: +{:.0}% of base", penalties.dropped_factor * 100.0);
        println!();
        let order: Vec<String> = self.batches.iter().map(Batch::to_string).collect();
        println!("Batches: {}", order.join(" "));
        println!();
    }
}

/// Seed derived from the wall clock, for runs without `--seed`.
fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_else(|_| rand::random())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitlink_sim_core::{LaneConfig, PriorityClass};

    fn parse(argv: &[&str]) -> Args {
        let mut full = vec!["pitlink-sim"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_zero_args_defaults() {
        let config = Config::from_args(parse(&[])).unwrap();
        assert_eq!(config.scenario.name, "motorsport");
        assert_eq!(config.batches, config.scenario.default_batches());
        assert_eq!(config.runs, 1);
        assert_eq!(config.output, OutputMode::Report { show_chunks: false });
    }

    #[test]
    fn test_explicit_batches_and_seed() {
        let config = Config::from_args(parse(&["--seed", "42", "-b", "P2:3", "--batch", "P0:1"])).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(
            config.batches,
            vec![Batch::new(PriorityClass::P2, 3), Batch::new(PriorityClass::P0, 1)]
        );
    }

    #[test]
    fn test_bad_batch_rejected_by_parser() {
        let result = Args::try_parse_from(["pitlink-sim", "--batch", "P0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_plan_mode() {
        let config = Config::from_args(parse(&["--scenario", "mobility", "--plan", "--batch-size", "6"])).unwrap();
        assert_eq!(config.batches, plan_batches(&config.scenario, 6));
    }

    #[test]
    fn test_scenario_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../scenarios/lab.json");
        let config = Config::from_args(parse(&["--scenario-file", path])).unwrap();
        assert_eq!(config.scenario.name, "lab");
        assert_eq!(
            config.batches,
            vec![Batch::new(PriorityClass::P0, 20), Batch::new(PriorityClass::P1, 20)]
        );
    }

    #[test]
    fn test_unknown_scenario() {
        let err = Config::from_args(parse(&["--scenario", "rally"])).unwrap_err();
        assert!(matches!(err, Error::UnknownScenario { .. }));
    }

    #[test]
    fn test_zero_runs_rejected() {
        let err = Config::from_args(parse(&["--runs", "0"])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_output_modes() {
        assert_eq!(Config::from_args(parse(&["--json"])).unwrap().output, OutputMode::Json);
        assert_eq!(Config::from_args(parse(&["--export-text"])).unwrap().output, OutputMode::Text);
        assert_eq!(
            Config::from_args(parse(&["--chunks"])).unwrap().output,
            OutputMode::Report { show_chunks: true }
        );
    }

    #[test]
    fn test_lane_lines_show_normalized_lanes() {
        let mut config = Config::from_args(parse(&["--seed", "1"])).unwrap();
        config.scenario = ScenarioConfig::new("bare")
            .with_lane(PriorityClass::P1, LaneConfig::new(-3.0, Vec::<String>::new(), "RS(16,11)", 2));

        let lines = config.lane_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("P1: 120 ms base"), "{}", lines[0]);
        assert!(lines[0].contains("paths [Primary link]"), "{}", lines[0]);
        assert!(!lines[0].contains("paths []"));
    }

    #[test]
    fn test_run_seeds() {
        let config = Config::from_args(parse(&["--seed", "10", "--runs", "3"])).unwrap();
        assert_eq!(config.run_seed(0), 10);
        assert_eq!(config.run_seed(2), 12);
    }
}
