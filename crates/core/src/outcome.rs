//! Outcome sampling conditioned on priority.
//!
//! Each priority class owns a set of cumulative probability bands. A draw is
//! checked against them in the fixed order recovered → retransmit → dropped;
//! anything past the last band is a clean delivery.
//!
//! | Priority | recovered | retransmit | dropped |
//! |---|---|---|---|
//! | P0 | `[0, 0.08)` | `[0.08, 0.11)` | never |
//! | P1 | `[0, 0.10)` | `[0.10, 0.16)` | `[0.16, 0.18)` |
//! | P2 | `[0, 0.12)` | `[0.12, 0.22)` | `[0.22, 0.28)` |

use crate::priority::{OutcomeKind, PriorityClass};

/// Cumulative upper bounds of the loss bands for one priority.
///
/// Invariant: `recovered <= retransmit <= dropped <= 1.0`. An empty band
/// (equal consecutive bounds) can never be selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeBands {
    pub recovered: f64,
    pub retransmit: f64,
    pub dropped: f64,
}

impl OutcomeBands {
    /// P0 has a zero-width dropped band.
    pub const P0: OutcomeBands = OutcomeBands {
        recovered: 0.08,
        retransmit: 0.11,
        dropped: 0.11,
    };

    pub const P1: OutcomeBands = OutcomeBands {
        recovered: 0.10,
        retransmit: 0.16,
        dropped: 0.18,
    };

    /// Bands for every class without a dedicated table.
    pub const DEFAULT: OutcomeBands = OutcomeBands {
        recovered: 0.12,
        retransmit: 0.22,
        dropped: 0.28,
    };

    pub fn for_priority(priority: PriorityClass) -> OutcomeBands {
        match priority {
            PriorityClass::P0 => Self::P0,
            PriorityClass::P1 => Self::P1,
            _ => Self::DEFAULT,
        }
    }

    /// Classify a draw. First matching band wins.
    pub fn classify(&self, unit: f64) -> OutcomeKind {
        if unit < self.recovered {
            OutcomeKind::Recovered
        } else if unit < self.retransmit {
            OutcomeKind::Retransmit
        } else if unit < self.dropped {
            OutcomeKind::Dropped
        } else {
            OutcomeKind::Delivered
        }
    }
}

/// Draw the outcome for one chunk of `priority` from a caller-supplied
/// uniform value in `[0, 1)`.
pub fn sample(priority: PriorityClass, unit: f64) -> OutcomeKind {
    OutcomeBands::for_priority(priority).classify(unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_draws() {
        assert_eq!(sample(PriorityClass::P0, 0.05), OutcomeKind::Recovered);
        assert_eq!(sample(PriorityClass::P0, 0.50), OutcomeKind::Delivered);
        assert_eq!(sample(PriorityClass::P1, 0.17), OutcomeKind::Dropped);
        assert_eq!(sample(PriorityClass::P2, 0.25), OutcomeKind::Dropped);
    }

    #[test]
    fn test_band_edges() {
        // Lower bounds are inclusive, upper bounds exclusive
        assert_eq!(sample(PriorityClass::P0, 0.0), OutcomeKind::Recovered);
        assert_eq!(sample(PriorityClass::P0, 0.08), OutcomeKind::Retransmit);
        assert_eq!(sample(PriorityClass::P0, 0.11), OutcomeKind::Delivered);

        assert_eq!(sample(PriorityClass::P1, 0.10), OutcomeKind::Retransmit);
        assert_eq!(sample(PriorityClass::P1, 0.16), OutcomeKind::Dropped);
        assert_eq!(sample(PriorityClass::P1, 0.18), OutcomeKind::Delivered);

        assert_eq!(sample(PriorityClass::P2, 0.119), OutcomeKind::Recovered);
        assert_eq!(sample(PriorityClass::P2, 0.12), OutcomeKind::Retransmit);
        assert_eq!(sample(PriorityClass::P2, 0.22), OutcomeKind::Dropped);
        assert_eq!(sample(PriorityClass::P2, 0.28), OutcomeKind::Delivered);
        assert_eq!(sample(PriorityClass::P2, 0.999_999), OutcomeKind::Delivered);
    }

    #[test]
    fn test_p0_never_dropped_on_grid() {
        for i in 0..10_000 {
            let unit = i as f64 / 10_000.0;
            assert_ne!(sample(PriorityClass::P0, unit), OutcomeKind::Dropped, "unit={unit}");
        }
    }

    #[test]
    fn test_bands_monotonic() {
        for p in PriorityClass::ALL {
            let b = OutcomeBands::for_priority(p);
            assert!(b.recovered <= b.retransmit);
            assert!(b.retransmit <= b.dropped);
            assert!(b.dropped <= 1.0);
        }
    }

    #[test]
    fn test_loss_mass_ordering() {
        let p0 = OutcomeBands::for_priority(PriorityClass::P0).dropped;
        let p1 = OutcomeBands::for_priority(PriorityClass::P1).dropped;
        let p2 = OutcomeBands::for_priority(PriorityClass::P2).dropped;
        assert!(p0 < p1 && p1 < p2);
    }
}
