//! Scenario configuration and built-in presets.
//!
//! A scenario is plain data: one [`LaneConfig`] per configured priority
//! class, the latency penalties, and the copy shown for a passed or breached
//! SLA. It is passed explicitly to [`run_simulation`](crate::run::run_simulation);
//! nothing in the crate holds a "current" scenario.
//!
//! Scenarios come from three places:
//! - [`ScenarioConfig::preset`] for the built-in industry presets
//! - [`ScenarioConfig::from_json_file`] / [`ScenarioConfig::from_json_str`]
//! - the builder methods, for tests and embedding

use crate::error::{Error, Result};
use crate::lane::{LaneConfig, Penalties};
use crate::metrics::RunStats;
use crate::priority::PriorityClass;
use crate::run::Batch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Names accepted by [`ScenarioConfig::preset`].
pub const PRESET_NAMES: [&str; 3] = ["motorsport", "mobility", "manufacturing"];

/// Preset used when none is named.
pub const DEFAULT_PRESET: &str = "motorsport";

/// Copy shown after a run, keyed by the SLA verdict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    pub pass: String,
    pub fail: String,
}

/// Complete input for one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub description: String,

    /// Configured lanes; any other class falls back to `LaneConfig::default()`
    pub lanes: BTreeMap<PriorityClass, LaneConfig>,

    #[serde(default)]
    pub penalties: Penalties,

    #[serde(default)]
    pub narrative: Narrative,
}

impl ScenarioConfig {
    /// Empty scenario: every class resolves to the default lane.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            description: String::new(),
            lanes: BTreeMap::new(),
            penalties: Penalties::default(),
            narrative: Narrative::default(),
        }
    }

    pub fn with_lane(mut self, priority: PriorityClass, lane: LaneConfig) -> Self {
        self.lanes.insert(priority, lane);
        self
    }

    /// Look up a built-in preset by name (case-insensitive).
    pub fn preset(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "motorsport" => Ok(motorsport()),
            "mobility" => Ok(mobility()),
            "manufacturing" => Ok(manufacturing()),
            _ => Err(Error::UnknownScenario {
                name: name.to_string(),
                available: PRESET_NAMES.join(", "),
            }),
        }
    }

    pub fn preset_names() -> &'static [&'static str] {
        &PRESET_NAMES
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Configured lane for `priority`, if any.
    pub fn configured(&self, priority: PriorityClass) -> Option<&LaneConfig> {
        self.lanes.get(&priority)
    }

    /// Resolved, normalized lane for `priority`.
    ///
    /// Unconfigured classes get `LaneConfig::default()`.
    pub fn lane(&self, priority: PriorityClass) -> LaneConfig {
        self.configured(priority)
            .cloned()
            .unwrap_or_default()
            .normalized()
    }

    /// One batch per configured lane, most urgent first.
    pub fn default_batches(&self) -> Vec<Batch> {
        self.lanes
            .iter()
            .map(|(priority, lane)| Batch::new(*priority, lane.requested_count))
            .collect()
    }

    /// Narrative line matching the run's SLA verdict.
    pub fn narrative_for(&self, stats: &RunStats) -> &str {
        if stats.sla_met() {
            &self.narrative.pass
        } else {
            &self.narrative.fail
        }
    }
}

fn rs(n: u32, k: u32) -> String {
    format!("RS({n},{k})")
}

fn motorsport() -> ScenarioConfig {
    let mut s = ScenarioConfig::new("motorsport")
        .with_lane(
            PriorityClass::P0,
            LaneConfig::new(48.0, ["Trackside 5G", "Low-Earth Orbit"], rs(16, 11), 12)
                .with_weight(8)
                .with_deadline(2.0),
        )
        .with_lane(
            PriorityClass::P1,
            LaneConfig::new(85.0, ["Trackside 5G", "Low-Earth Orbit"], rs(20, 16), 10)
                .with_weight(3)
                .with_deadline(8.0),
        )
        .with_lane(
            PriorityClass::P2,
            LaneConfig::new(140.0, ["Low-Earth Orbit", "Trackside 5G"], rs(20, 18), 8)
                .with_weight(1)
                .with_deadline(30.0),
        );
    s.label = "Motorsport: Trackside to Factory".to_string();
    s.description = "Pit wall strategy files, high-rate telemetry and bulk video pushed from \
                     the circuit to HQ over private 5G with satellite backup."
        .to_string();
    s.narrative = Narrative {
        pass: "Race control receives every delta before the pit wall freeze.".to_string(),
        fail: "Escalate to the trackside strategist: not every strategy delta arrived in time."
            .to_string(),
    };
    s
}

fn mobility() -> ScenarioConfig {
    let mut s = ScenarioConfig::new("mobility")
        .with_lane(
            PriorityClass::P0,
            LaneConfig::new(40.0, ["C-V2X 5G", "Satellite Backhaul"], rs(16, 11), 14)
                .with_weight(9)
                .with_deadline(1.5),
        )
        .with_lane(
            PriorityClass::P1,
            LaneConfig::new(70.0, ["C-V2X 5G", "Edge Mesh"], rs(18, 14), 10)
                .with_weight(3)
                .with_deadline(5.0),
        )
        .with_lane(
            PriorityClass::P2,
            LaneConfig::new(150.0, ["Edge Mesh", "Satellite Backhaul"], rs(20, 18), 6)
                .with_weight(1)
                .with_deadline(25.0),
        );
    s.label = "Urban Mobility: Autonomous Fleet Ops".to_string();
    s.description = "Over-the-air safety patches, live vehicle telemetry and HD map refreshes \
                     across a robo-taxi fleet in a dense city corridor."
        .to_string();
    s.narrative = Narrative {
        pass: "Fleet orchestration green-lit: every vehicle receives the safety kernel within SLA."
            .to_string(),
        fail: "Trigger depot fallback mode: at least one pod missed its control update window."
            .to_string(),
    };
    s
}

fn manufacturing() -> ScenarioConfig {
    let mut s = ScenarioConfig::new("manufacturing")
        .with_lane(
            PriorityClass::P0,
            LaneConfig::new(24.0, ["Fiber Backbone", "Industrial 5G"], rs(18, 13), 12)
                .with_weight(8)
                .with_deadline(1.8),
        )
        .with_lane(
            PriorityClass::P1,
            LaneConfig::new(45.0, ["Industrial 5G", "Fiber Backbone"], rs(20, 15), 10)
                .with_weight(3)
                .with_deadline(6.0),
        )
        .with_lane(
            PriorityClass::P2,
            LaneConfig::new(210.0, ["LoRa Supervisory", "Fiber Backbone"], rs(22, 18), 8)
                .with_weight(2)
                .with_deadline(45.0),
        );
    s.label = "Smart Manufacturing: Gigafactory Ops".to_string();
    s.description = "Robotics safety interlocks, machine telemetry and sustainability audits \
                     across wired and wireless OT networks."
        .to_string();
    s.narrative = Narrative {
        pass: "Digital twin stays green: all safety interlocks landed before the robotics cycle reset."
            .to_string(),
        fail: "Alert the OT engineer: resend interlocks or route through the fiber segment."
            .to_string(),
    };
    s
}
