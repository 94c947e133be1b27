//! PitLink simulator CLI
//!
//! Runs the chunk delivery simulator for a scenario preset (or a JSON
//! scenario file) and prints the results.
//!
//! # Example
//!
//! ```bash
//! # Default preset, time-based seed
//! pitlink-sim
//!
//! # Reproducible run with explicit batches
//! pitlink-sim --seed 42 -b P0:10 -b P1:10 -b P2:10
//!
//! # WFQ + EDF interleaving, eight runs in parallel
//! pitlink-sim --scenario mobility --plan --runs 8 --seed 7
//! ```

mod config;
mod report;

use clap::Parser;
use config::{Args, Config, OutputMode};
use pitlink_sim_core::{run_simulation, Run};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "warn,pitlink_sim=debug,pitlink_sim_core=debug"
    } else {
        "warn,pitlink_sim=info,pitlink_sim_core=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    if config.print_config {
        config.print();
    }

    info!(
        scenario = %config.scenario.name,
        seed = config.seed,
        runs = config.runs,
        batches = config.batches.len(),
        "starting simulation"
    );

    let runs = execute(&config);

    match emit(&config, &runs) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed to write output");
            ExitCode::FAILURE
        }
    }
}

/// Run every requested simulation. Each run owns its own RNG, so runs are
/// independent and may execute on separate threads.
fn execute(config: &Config) -> Vec<(u64, Run)> {
    if config.runs == 1 {
        return vec![single(config, config.seed)];
    }

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..config.runs)
            .map(|i| {
                let seed = config.run_seed(i);
                s.spawn(move || single(config, seed))
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    })
}

fn single(config: &Config, seed: u64) -> (u64, Run) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (seed, run_simulation(&config.batches, &config.scenario, &mut rng))
}

fn emit(config: &Config, runs: &[(u64, Run)]) -> Result<(), serde_json::Error> {
    match config.output {
        OutputMode::Json => {
            let out: Vec<&Run> = runs.iter().map(|(_, r)| r).collect();
            if let [only] = out.as_slice() {
                println!("{}", serde_json::to_string_pretty(only)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
        }
        OutputMode::Text => {
            for (seed, run) in runs {
                println!("seed={}", seed);
                print!("{}", run.stats.export_text());
            }
        }
        OutputMode::Report { show_chunks } => {
            if let [(seed, run)] = runs {
                report::print_summary(&config.scenario, run, *seed, show_chunks);
            } else {
                println!("=== {} · {} runs ===", config.scenario.label, runs.len());
                for (i, (seed, run)) in runs.iter().enumerate() {
                    println!("{}", report::run_line(i, *seed, &run.stats));
                }
                let stats: Vec<_> = runs.iter().map(|(_, r)| r.stats.clone()).collect();
                let breached = stats.iter().filter(|s| !s.sla_met()).count();
                println!();
                println!("Mean loss rate: {:.1}%", report::mean_loss_rate(&stats) * 100.0);
                println!("SLA breached in {} of {} runs", breached, stats.len());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(argv: &[&str]) -> Config {
        let mut full = vec!["pitlink-sim"];
        full.extend_from_slice(argv);
        Config::from_args(Args::try_parse_from(full).unwrap()).unwrap()
    }

    #[test]
    fn test_execute_is_deterministic() {
        let config = config(&["--seed", "10", "--runs", "3"]);
        let first = execute(&config);
        let second = execute(&config);
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_parallel_runs_match_single_runs() {
        let config = config(&["--seed", "10", "--runs", "3", "--plan"]);
        let runs = execute(&config);
        for (i, (seed, run)) in runs.iter().enumerate() {
            assert_eq!(*seed, 10 + i as u64);
            assert_eq!((*seed, run.clone()), single(&config, 10 + i as u64));
        }
    }

    #[test]
    fn test_single_run_uses_base_seed() {
        let config = config(&["--seed", "99"]);
        let runs = execute(&config);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0], single(&config, 99));
    }
}
