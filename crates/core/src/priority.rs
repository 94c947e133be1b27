//! Priority classes and delivery outcomes.
//!
//! `PriorityClass` orders by urgency (`P0` most urgent). The simulator does
//! not preempt on priority; the class only selects an outcome distribution
//! and a lane configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A traffic class tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityClass {
    /// Critical control traffic, never dropped
    P0,
    /// Engineering / telemetry feeds
    P1,
    /// Bulk media and archives
    P2,
}

impl PriorityClass {
    /// All classes, most urgent first.
    pub const ALL: [PriorityClass; 3] = [PriorityClass::P0, PriorityClass::P1, PriorityClass::P2];

    pub fn as_str(self) -> &'static str {
        match self {
            PriorityClass::P0 => "P0",
            PriorityClass::P1 => "P1",
            PriorityClass::P2 => "P2",
        }
    }
}

impl fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "P0" => Ok(PriorityClass::P0),
            "P1" => Ok(PriorityClass::P1),
            "P2" => Ok(PriorityClass::P2),
            _ => Err(Error::UnknownPriority(s.to_string())),
        }
    }
}

/// How a single chunk fared. Exactly one per chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    /// Arrived on the first attempt
    Delivered,
    /// Lost, then rebuilt from parity
    Recovered,
    /// Lost, then resent over a fallback path
    Retransmit,
    /// Lost beyond what FEC could repair
    Dropped,
}

impl OutcomeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeKind::Delivered => "delivered",
            OutcomeKind::Recovered => "recovered",
            OutcomeKind::Retransmit => "retransmit",
            OutcomeKind::Dropped => "dropped",
        }
    }

    /// True for every outcome except a clean first-attempt delivery.
    pub fn is_loss(self) -> bool {
        !matches!(self, OutcomeKind::Delivered)
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
