//! pitlink-sim-core: priority-aware chunk delivery simulator
//!
//! This library models how chunks of different priority classes fare when
//! pushed over a lossy, multi-path network with forward error correction as
//! a backup. It does not move any bytes: each chunk's fate is sampled from a
//! priority-specific distribution and rolled up into run statistics.
//!
//! # Architecture
//!
//! Leaf-first:
//! - `outcome`: priority-conditioned outcome sampling
//! - `path`: primary path choice and failover
//! - `simulator`: per-lane chunk generation
//! - `run`: batch iteration and aggregation into a [`Run`]
//! - `metrics`: run statistics and per-lane summaries
//! - `scenario` / `lane`: typed configuration and built-in presets
//! - `schedule`: WFQ + EDF batch planning
//! - `random`: injectable uniform random source
//!
//! # Design Principles
//!
//! - **Total**: every input produces a Run; bad configuration is normalized
//! - **Deterministic**: a run is fully determined by its random draws
//! - **Explicit inputs**: scenario and random source are parameters, never globals

pub mod error;
pub mod lane;
pub mod metrics;
pub mod outcome;
pub mod path;
pub mod priority;
pub mod random;
pub mod run;
pub mod scenario;
pub mod schedule;
pub mod simulator;

// Re-export commonly used types
pub use error::{Error, Result};
pub use lane::{LaneConfig, Penalties};
pub use metrics::{LaneSummary, OutcomeCounts, RunStats};
pub use priority::{OutcomeKind, PriorityClass};
pub use random::{RandomSource, SequenceSource};
pub use run::{run_simulation, Batch, Run};
pub use scenario::ScenarioConfig;
pub use schedule::plan_batches;
pub use simulator::{simulate_lane, SimulatedChunk};
