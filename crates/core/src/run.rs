//! Run aggregator: batches in, chunk sequence and statistics out.
//!
//! Batches are processed strictly in the order given. A single id counter
//! runs across all of them, so ids are 1-based, unique and gap-free over the
//! whole run. Each batch is resolved against the scenario; a priority the
//! scenario does not configure runs on the default lane rather than failing.

use crate::error::{Error, Result};
use crate::metrics::{LaneLedger, LaneSummary, RunStats};
use crate::priority::PriorityClass;
use crate::random::RandomSource;
use crate::scenario::ScenarioConfig;
use crate::simulator::{simulate_lane, SimulatedChunk};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// A request for `count` chunks of one priority class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub priority: PriorityClass,
    pub count: usize,
}

impl Batch {
    pub fn new(priority: PriorityClass, count: usize) -> Self {
        Self { priority, count }
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.priority, self.count)
    }
}

/// Parses `<priority>:<count>`, e.g. `P0:10`.
impl FromStr for Batch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidBatch {
            spec: s.to_string(),
            reason: reason.to_string(),
        };

        let (priority, count) = s
            .split_once(':')
            .ok_or_else(|| invalid("expected <priority>:<count>"))?;
        let priority: PriorityClass = priority.parse()?;
        let count = count
            .trim()
            .parse::<usize>()
            .map_err(|_| invalid("count must be a non-negative integer"))?;

        Ok(Batch::new(priority, count))
    }
}

/// Complete output of one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Lane order, then generation order within the lane
    pub chunks: Vec<SimulatedChunk>,

    pub stats: RunStats,

    /// Per-lane figures, in order of first appearance
    pub lanes: Vec<LaneSummary>,
}

impl Run {
    pub fn lane(&self, priority: PriorityClass) -> Option<&LaneSummary> {
        self.lanes.iter().find(|l| l.priority == priority)
    }
}

/// Simulate every batch in order and aggregate the results.
///
/// Never fails: unconfigured priorities use the default lane, zero-count
/// batches contribute nothing, and an empty batch list yields an empty run
/// with zero loss rate and zero duration.
pub fn run_simulation<R: RandomSource + ?Sized>(
    batches: &[Batch],
    scenario: &ScenarioConfig,
    rng: &mut R,
) -> Run {
    let mut chunks = Vec::with_capacity(batches.iter().map(|b| b.count).sum());
    let mut ledger = LaneLedger::new();
    let mut next_id = 1;

    for batch in batches {
        let lane = scenario.lane(batch.priority);
        ledger.open(batch.priority);

        let out = simulate_lane(
            batch.priority,
            &lane,
            &scenario.penalties,
            batch.count,
            next_id,
            rng,
        );
        next_id = out.next_id;

        for chunk in &out.chunks {
            ledger.record(chunk);
        }
        chunks.extend(out.chunks);
    }

    let (stats, lanes) = ledger.finish();

    info!(
        scenario = %scenario.name,
        total = stats.total,
        delivered = stats.delivered,
        recovered = stats.recovered,
        retransmit = stats.retransmit,
        dropped = stats.dropped,
        loss_rate = stats.loss_rate,
        duration_s = stats.duration_seconds,
        "run complete"
    );

    Run {
        chunks,
        stats,
        lanes,
    }
}
