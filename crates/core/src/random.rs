//! Injectable source of uniform random draws.
//!
//! Every stochastic decision in the simulator goes through [`RandomSource`],
//! so a run is fully determined by the sequence of draws it receives.
//! Production code hands in a seeded [`ChaCha8Rng`] (or a thread RNG when no
//! seed was asked for); tests hand in a [`SequenceSource`] with exact values.
//!
//! A source is passed by `&mut`, never shared: concurrent runs each own one.

use rand::rngs::ThreadRng;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Something that yields uniform floats in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl RandomSource for ChaCha8Rng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl RandomSource for ThreadRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Values outside `[0, 1)` are clamped into range so a stub cannot push the
/// simulator outside its documented domain.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceSource {
    /// Create a source from the given draws. An empty list yields `0.0` forever.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            pos: 0,
        }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            self.pos += 1;
            return 0.0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        if v.is_nan() {
            0.0
        } else {
            v.clamp(0.0, 1.0 - f64::EPSILON / 2.0)
        }
    }
}
