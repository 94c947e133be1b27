//! Per-priority lane configuration.
//!
//! A lane is everything the simulator needs to know about one priority
//! class: how slow it is, which paths it may use, which FEC scheme it is
//! credited with, and how many chunks it contributes. There is exactly one
//! default, [`LaneConfig::default`], used for any class a scenario does not
//! configure.

use crate::path::DEFAULT_PATH;
use serde::{Deserialize, Serialize};

/// Base latency of the default lane, in milliseconds.
pub const DEFAULT_BASE_LATENCY_MS: f64 = 120.0;

/// FEC label of the default lane.
pub const DEFAULT_FEC_LABEL: &str = "RS(12,9)";

/// Deadline of the default lane, in seconds.
pub const DEFAULT_DEADLINE_S: f64 = 30.0;

/// Configuration for one priority lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneConfig {
    /// Base effective latency per chunk (ms, > 0)
    pub base_latency_ms: f64,

    /// Candidate paths in preference order
    pub candidate_paths: Vec<String>,

    /// Modelled FEC scheme, e.g. `RS(12,9)`
    pub fec_label: String,

    /// Chunks this lane contributes to a default run
    #[serde(default)]
    pub requested_count: usize,

    /// WFQ weight used by the batch planner
    #[serde(default = "default_weight")]
    pub weight: u32,

    /// EDF deadline used by the batch planner (seconds)
    #[serde(default = "default_deadline")]
    pub deadline_s: f64,
}

fn default_weight() -> u32 {
    1
}

fn default_deadline() -> f64 {
    DEFAULT_DEADLINE_S
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            base_latency_ms: DEFAULT_BASE_LATENCY_MS,
            candidate_paths: vec![DEFAULT_PATH.to_string()],
            fec_label: DEFAULT_FEC_LABEL.to_string(),
            requested_count: 0,
            weight: default_weight(),
            deadline_s: DEFAULT_DEADLINE_S,
        }
    }
}

impl LaneConfig {
    /// Build a lane from its required fields; scheduling fields take defaults.
    pub fn new(
        base_latency_ms: f64,
        candidate_paths: impl IntoIterator<Item = impl Into<String>>,
        fec_label: impl Into<String>,
        requested_count: usize,
    ) -> Self {
        Self {
            base_latency_ms,
            candidate_paths: candidate_paths.into_iter().map(Into::into).collect(),
            fec_label: fec_label.into(),
            requested_count,
            ..Self::default()
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_deadline(mut self, deadline_s: f64) -> Self {
        self.deadline_s = deadline_s;
        self
    }

    /// Repair values the simulator cannot use.
    ///
    /// - empty path list → `["Primary link"]`
    /// - non-finite or non-positive base latency → 120 ms
    /// - non-finite or negative deadline → 30 s
    pub fn normalized(mut self) -> Self {
        if self.candidate_paths.is_empty() {
            self.candidate_paths.push(DEFAULT_PATH.to_string());
        }
        if !self.base_latency_ms.is_finite() || self.base_latency_ms <= 0.0 {
            self.base_latency_ms = DEFAULT_BASE_LATENCY_MS;
        }
        if !self.deadline_s.is_finite() || self.deadline_s < 0.0 {
            self.deadline_s = DEFAULT_DEADLINE_S;
        }
        self
    }
}

/// Latency adjustments applied per outcome, as multiples of the lane's
/// base latency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Penalties {
    /// Upper bound of the uniform jitter added to every chunk
    pub jitter_factor: f64,

    /// Added when a chunk fails over to another path
    pub retransmit_factor: f64,

    /// Added when FEC is exhausted and the chunk is dropped
    pub dropped_factor: f64,
}

impl Default for Penalties {
    fn default() -> Self {
        Self {
            jitter_factor: 0.9,
            retransmit_factor: 0.6,
            dropped_factor: 1.0,
        }
    }
}

impl Penalties {
    /// Replace each non-finite or negative factor with its default.
    pub fn normalized(&self) -> Self {
        let defaults = Self::default();
        let fix = |v: f64, d: f64| if v.is_finite() && v >= 0.0 { v } else { d };
        Self {
            jitter_factor: fix(self.jitter_factor, defaults.jitter_factor),
            retransmit_factor: fix(self.retransmit_factor, defaults.retransmit_factor),
            dropped_factor: fix(self.dropped_factor, defaults.dropped_factor),
        }
    }
}
