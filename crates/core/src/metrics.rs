//! Run statistics derived from a chunk sequence.
//!
//! Everything here is computed from the emitted chunks after the fact:
//! - Outcome tallies and totals
//! - Loss rate (anything not delivered cleanly)
//! - Per-lane cumulative latency and the run duration (slowest lane)
//!
//! # Design
//!
//! [`LaneLedger`] accumulates per-lane figures while chunks stream in and is
//! then frozen into [`RunStats`] plus a list of [`LaneSummary`]. Lanes are
//! kept in first-appearance order so reports follow batch order.

use crate::priority::{OutcomeKind, PriorityClass};
use crate::simulator::SimulatedChunk;
use serde::{Deserialize, Serialize};

/// Outcome tallies shared by whole-run and per-lane figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub delivered: usize,
    pub recovered: usize,
    pub retransmit: usize,
    pub dropped: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: OutcomeKind) {
        match outcome {
            OutcomeKind::Delivered => self.delivered += 1,
            OutcomeKind::Recovered => self.recovered += 1,
            OutcomeKind::Retransmit => self.retransmit += 1,
            OutcomeKind::Dropped => self.dropped += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.delivered + self.recovered + self.retransmit + self.dropped
    }

    /// Chunks that needed FEC, a retransmit, or were lost.
    pub fn lossy(&self) -> usize {
        self.recovered + self.retransmit + self.dropped
    }
}

/// Aggregate over one run. Never mutated after computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub delivered: usize,
    pub recovered: usize,
    pub retransmit: usize,
    pub dropped: usize,

    /// Number of chunks in the run
    pub total: usize,

    /// (recovered + retransmit + dropped) / total, 0 for an empty run
    pub loss_rate: f64,

    /// Slowest lane's cumulative latency, in seconds
    pub duration_seconds: f64,
}

impl RunStats {
    /// Stats for a run with no chunks.
    pub fn empty() -> Self {
        Self::from_counts(OutcomeCounts::default(), 0.0)
    }

    fn from_counts(counts: OutcomeCounts, max_lane_ms: f64) -> Self {
        let total = counts.total();
        let loss_rate = if total == 0 {
            0.0
        } else {
            counts.lossy() as f64 / total as f64
        };
        let duration_seconds = if total == 0 { 0.0 } else { max_lane_ms / 1000.0 };

        Self {
            delivered: counts.delivered,
            recovered: counts.recovered,
            retransmit: counts.retransmit,
            dropped: counts.dropped,
            total,
            loss_rate,
            duration_seconds,
        }
    }

    /// True when every lost chunk was recovered or retransmitted.
    pub fn sla_met(&self) -> bool {
        self.dropped == 0
    }

    /// Share of chunks that reached the far side by any means.
    ///
    /// Returns 1.0 for an empty run.
    pub fn success_ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (self.total - self.dropped) as f64 / self.total as f64
        }
    }

    /// Export stats as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "total={}\n\
             delivered={}\n\
             recovered={}\n\
             retransmit={}\n\
             dropped={}\n\
             loss_rate={:.4}\n\
             duration_s={:.3}\n\
             success_ratio={:.4}\n\
             sla_met={}\n",
            self.total,
            self.delivered,
            self.recovered,
            self.retransmit,
            self.dropped,
            self.loss_rate,
            self.duration_seconds,
            self.success_ratio(),
            self.sla_met(),
        )
    }
}

/// Per-lane figures for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSummary {
    pub priority: PriorityClass,

    pub chunks: usize,

    pub counts: OutcomeCounts,

    /// Sum of `transfer_ms` over the lane's chunks
    pub duration_ms: f64,
}

/// Running per-lane accumulator.
#[derive(Debug, Default)]
pub struct LaneLedger {
    totals: OutcomeCounts,
    lanes: Vec<LaneSummary>,
}

impl LaneLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `priority` has a lane entry, even if it never emits a chunk.
    pub fn open(&mut self, priority: PriorityClass) {
        self.lane_mut(priority);
    }

    /// Add one chunk to its lane and to the run totals.
    pub fn record(&mut self, chunk: &SimulatedChunk) {
        self.totals.record(chunk.outcome);
        let lane = self.lane_mut(chunk.priority);
        lane.chunks += 1;
        lane.counts.record(chunk.outcome);
        lane.duration_ms += chunk.transfer_ms;
    }

    fn lane_mut(&mut self, priority: PriorityClass) -> &mut LaneSummary {
        let idx = match self.lanes.iter().position(|l| l.priority == priority) {
            Some(idx) => idx,
            None => {
                self.lanes.push(LaneSummary {
                    priority,
                    chunks: 0,
                    counts: OutcomeCounts::default(),
                    duration_ms: 0.0,
                });
                self.lanes.len() - 1
            }
        };
        &mut self.lanes[idx]
    }

    /// Freeze into run stats and lane summaries.
    pub fn finish(self) -> (RunStats, Vec<LaneSummary>) {
        let max_lane_ms = self
            .lanes
            .iter()
            .map(|l| l.duration_ms)
            .fold(0.0_f64, f64::max);
        (RunStats::from_counts(self.totals, max_lane_ms), self.lanes)
    }
}
