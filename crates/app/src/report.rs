//! Human-readable rendering of runs.

use pitlink_sim_core::{Run, RunStats, ScenarioConfig, SimulatedChunk};

/// Print a full summary of one run to stdout.
pub fn print_summary(scenario: &ScenarioConfig, run: &Run, seed: u64, show_chunks: bool) {
    let stats = &run.stats;

    println!("\n=== PitLink Run · {} ===", scenario.label);
    if !scenario.description.is_empty() {
        println!("{}", scenario.description);
    }
    println!("Seed: {}", seed);
    println!();

    if show_chunks {
        println!("=== Chunks ===");
        for c in &run.chunks {
            println!("{}", chunk_line(c));
        }
        println!();
    }

    println!("=== Lanes ===");
    for lane in &run.lanes {
        println!(
            "{}: {} chunks, {} delivered, {} recovered, {} retransmit, {} dropped, {:.2}s",
            lane.priority,
            lane.chunks,
            lane.counts.delivered,
            lane.counts.recovered,
            lane.counts.retransmit,
            lane.counts.dropped,
            lane.duration_ms / 1000.0
        );
    }
    println!();

    println!("=== Summary ===");
    println!("Chunks: {}", stats.total);
    println!("Delivered: {}", stats.delivered);
    println!("Recovered via FEC: {}", stats.recovered);
    println!("Retransmitted: {}", stats.retransmit);
    println!("Dropped: {}", stats.dropped);
    println!("Loss rate: {:.1}%", stats.loss_rate * 100.0);
    println!("Success ratio: {:.1}%", stats.success_ratio() * 100.0);
    println!("Simulated duration: {:.2}s", stats.duration_seconds);
    println!();

    print_result(scenario, stats);
}

/// One chunk row; lossy outcomes are flagged with `!`.
pub fn chunk_line(c: &SimulatedChunk) -> String {
    format!(
        "{}#{:<4} {} {:<10} {:>8.1} ms  {:<32} {}",
        if c.outcome.is_loss() { "!" } else { " " },
        c.id,
        c.priority,
        c.outcome.as_str(),
        c.transfer_ms,
        c.path,
        c.note
    )
}

/// Print just the SLA verdict.
pub fn print_result(scenario: &ScenarioConfig, stats: &RunStats) {
    if stats.sla_met() {
        println!("✓ SLA met: every lost chunk was recovered or retransmitted");
    } else {
        println!("✗ SLA breached: {} chunks dropped after FEC exhaustion", stats.dropped);
    }
    let note = scenario.narrative_for(stats);
    if !note.is_empty() {
        println!("  {}", note);
    }
}

/// One line per run, for multi-run sessions.
pub fn run_line(index: usize, seed: u64, stats: &RunStats) -> String {
    format!(
        "run {:>3} seed {:<20} total {:>4}  loss {:>5.1}%  dropped {:>3}  duration {:>6.2}s  {}",
        index + 1,
        seed,
        stats.total,
        stats.loss_rate * 100.0,
        stats.dropped,
        stats.duration_seconds,
        if stats.sla_met() { "SLA met" } else { "SLA breached" }
    )
}

/// Mean loss rate across runs; 0 when there are none.
pub fn mean_loss_rate(stats: &[RunStats]) -> f64 {
    if stats.is_empty() {
        0.0
    } else {
        stats.iter().map(|s| s.loss_rate).sum::<f64>() / stats.len() as f64
    }
}
