//! Weighted-fair batch planning with earliest-deadline-first ordering.
//!
//! The run aggregator processes batches in whatever order it is handed. This
//! module produces one such order from a scenario's lanes, the way a sender
//! interleaving several priority queues would:
//!
//! 1. Every lane starts with its `requested_count` chunks queued.
//! 2. Each round, a lane with chunks left gets a share of the round size
//!    proportional to its weight, at least one chunk.
//! 3. Within a round, lanes are emitted by ascending deadline.
//!
//! This only orders batches. It does not preempt or reschedule anything
//! once the simulator runs.

use crate::priority::PriorityClass;
use crate::run::Batch;
use crate::scenario::ScenarioConfig;
use tracing::debug;

/// Default number of chunks per scheduling round.
pub const DEFAULT_BATCH_SIZE: usize = 12;

/// Plan an interleaved batch order for all configured lanes.
///
/// `batch_size == 0` is treated as 1. The planned counts for each lane sum to
/// its `requested_count`.
pub fn plan_batches(scenario: &ScenarioConfig, batch_size: usize) -> Vec<Batch> {
    let batch_size = batch_size.max(1);

    // (priority, remaining, weight, deadline)
    let mut queues: Vec<(PriorityClass, usize, u32, f64)> = scenario
        .lanes
        .keys()
        .map(|p| {
            let lane = scenario.lane(*p);
            (*p, lane.requested_count, lane.weight, lane.deadline_s)
        })
        .collect();

    let total_weight: u64 = queues.iter().map(|q| u64::from(q.2)).sum();
    let mut plan = Vec::new();
    let mut round = 0usize;

    while queues.iter().any(|q| q.1 > 0) {
        round += 1;
        let mut batch_round: Vec<(f64, Batch)> = Vec::new();

        for (priority, remaining, weight, deadline) in queues.iter_mut() {
            if *remaining == 0 {
                continue;
            }
            let share = wfq_share(batch_size, *weight, total_weight);
            let take = share.min(*remaining);
            *remaining -= take;
            batch_round.push((*deadline, Batch::new(*priority, take)));
        }

        // Stable sort keeps priority order for equal deadlines
        batch_round.sort_by(|a, b| a.0.total_cmp(&b.0));

        debug!(round, batches = batch_round.len(), "planned scheduling round");
        plan.extend(batch_round.into_iter().map(|(_, b)| b));
    }

    plan
}

/// Chunks a lane of `weight` gets out of a round of `batch_size`.
fn wfq_share(batch_size: usize, weight: u32, total_weight: u64) -> usize {
    if total_weight == 0 {
        return 1;
    }
    let share = (batch_size as f64 * f64::from(weight) / total_weight as f64).round() as usize;
    share.max(1)
}
