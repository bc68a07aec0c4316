//! Injectable random sources.
//!
//! Draws never touch a global generator; callers hand one in so tests can
//! pin the outcome.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform random numbers for the selector.
pub trait RandomSource {
    /// A value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// An integer in `[0, n)`. Returns 0 when `n` is 0.
    fn next_below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        ((self.next_unit() * n as f64) as u32).min(n - 1)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn next_below(&mut self, n: u32) -> u32 {
        (**self).next_below(n)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn next_below(&mut self, n: u32) -> u32 {
        (**self).next_below(n)
    }
}

/// Adapter from any [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    /// Wrap a generator.
    pub fn new(rng: R) -> Self {
        Self(rng)
    }

    /// Unwrap the generator.
    pub fn into_inner(self) -> R {
        self.0
    }
}

impl RngSource<StdRng> {
    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl RngSource<ChaCha8Rng> {
    /// Reproducible generator for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    fn next_below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.0.gen_range(0..n)
    }
}

/// Replays a fixed list of unit values, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// Create a source from values in `[0, 1)`. An empty list always yields 0.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
