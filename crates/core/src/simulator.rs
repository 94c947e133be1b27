//! Chunk simulator: one priority lane at a time.
//!
//! For each chunk the simulator draws an outcome, a primary path, a latency
//! jitter and a display size, in that order, then applies the outcome's
//! latency penalty and path/note rendering. Chunks are independent trials:
//! nothing about one chunk feeds into the next, so the same four draws always
//! produce the same chunk regardless of position.
//!
//! # Effective latency
//!
//! ```text
//! base      = base_latency_ms + U(0, base_latency_ms * jitter_factor)
//! delivered = base
//! recovered = base
//! retransmit= base + base_latency_ms * retransmit_factor
//! dropped   = base + base_latency_ms * dropped_factor
//! ```

use crate::lane::{LaneConfig, Penalties};
use crate::outcome;
use crate::path::{choose_fallback, choose_primary, render_failover};
use crate::priority::{OutcomeKind, PriorityClass};
use crate::random::RandomSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Lower bound of the display-only size proxy.
pub const SIZE_PROXY_MIN: f64 = 45.0;

/// Width of the size proxy range; values fall in `[45, 100)`.
pub const SIZE_PROXY_SPAN: f64 = 55.0;

/// Largest f64 below 100. `45 + u * 55` rounds up to 100.0 for `u` close to 1.
const SIZE_PROXY_CEIL: f64 = 99.999_999_999_999_99;

/// One simulated unit of transfer. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedChunk {
    /// 1-based, unique and gap-free within a run
    pub id: u64,

    pub priority: PriorityClass,

    pub outcome: OutcomeKind,

    /// Display-only magnitude in `[45, 100)`; no effect on outcome
    pub size_proxy: f64,

    /// Path taken; `"A → B"` after a failover
    pub path: String,

    /// Simulated effective latency (ms)
    pub transfer_ms: f64,

    pub fec_label: String,

    pub note: String,
}

/// Result of simulating one lane.
#[derive(Debug, Clone)]
pub struct LaneOutput {
    pub chunks: Vec<SimulatedChunk>,

    /// Id to hand to the next lane
    pub next_id: u64,
}

/// Simulate `count` chunks for one lane, numbering them from `start_id`.
///
/// The lane is normalized first, so an empty path list or a bad latency
/// still yields chunks.
pub fn simulate_lane<R: RandomSource + ?Sized>(
    priority: PriorityClass,
    lane: &LaneConfig,
    penalties: &Penalties,
    count: usize,
    start_id: u64,
    rng: &mut R,
) -> LaneOutput {
    let lane = lane.clone().normalized();
    let penalties = penalties.normalized();

    debug!(
        priority = %priority,
        count,
        start_id,
        base_latency_ms = lane.base_latency_ms,
        paths = lane.candidate_paths.len(),
        "simulating lane"
    );

    let mut chunks = Vec::with_capacity(count);
    let mut id = start_id;

    for _ in 0..count {
        let chunk = simulate_chunk(id, priority, &lane, &penalties, rng);
        trace!(
            id = chunk.id,
            outcome = %chunk.outcome,
            path = %chunk.path,
            transfer_ms = chunk.transfer_ms,
            "chunk simulated"
        );
        chunks.push(chunk);
        id += 1;
    }

    LaneOutput {
        chunks,
        next_id: id,
    }
}

/// Simulate a single chunk. `lane` and `penalties` must already be normalized.
fn simulate_chunk<R: RandomSource + ?Sized>(
    id: u64,
    priority: PriorityClass,
    lane: &LaneConfig,
    penalties: &Penalties,
    rng: &mut R,
) -> SimulatedChunk {
    let outcome = outcome::sample(priority, rng.next_unit());
    let primary = choose_primary(&lane.candidate_paths, rng.next_unit());
    let jitter = rng.next_unit() * lane.base_latency_ms * penalties.jitter_factor;
    let size_proxy = (SIZE_PROXY_MIN + rng.next_unit() * SIZE_PROXY_SPAN).min(SIZE_PROXY_CEIL);

    let base = lane.base_latency_ms;
    let mut transfer_ms = base + jitter;
    let fec = &lane.fec_label;

    let (path, note) = match outcome {
        OutcomeKind::Delivered => (
            primary.to_string(),
            format!("Delivered cleanly via {primary}"),
        ),
        OutcomeKind::Recovered => (
            primary.to_string(),
            format!("Recovered via Reed-Solomon FEC ({fec} on {primary})"),
        ),
        OutcomeKind::Retransmit => {
            let fallback = choose_fallback(&lane.candidate_paths, primary);
            transfer_ms += base * penalties.retransmit_factor;
            (
                render_failover(primary, fallback),
                format!("Loss on {primary}; retransmitted via {fallback}"),
            )
        }
        OutcomeKind::Dropped => {
            transfer_ms += base * penalties.dropped_factor;
            (
                primary.to_string(),
                format!("Dropped on {primary}: FEC exhausted ({fec})"),
            )
        }
    };

    SimulatedChunk {
        id,
        priority,
        outcome,
        size_proxy,
        path,
        transfer_ms: transfer_ms.max(0.0),
        fec_label: lane.fec_label.clone(),
        note,
    }
}
