//! Random die sources.
//!
//! The roll engine asks a [`DieSource`] for exactly one outcome per die.
//! [`RngSource`] wraps any `rand` generator; [`FixedSource`] replays a
//! recorded sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces one uniformly distributed outcome per call.
pub trait DieSource {
    /// Draw an outcome in `1..=faces`. `faces` is always at least 1.
    fn draw(&mut self, faces: u32) -> u32;
}

impl<S: DieSource + ?Sized> DieSource for Box<S> {
    fn draw(&mut self, faces: u32) -> u32 {
        (**self).draw(faces)
    }
}

/// A die source backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// A reproducible source for the given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A source seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> DieSource for RngSource<R> {
    fn draw(&mut self, faces: u32) -> u32 {
        self.rng.random_range(1..=faces.max(1))
    }
}

/// Replays a fixed sequence of outcomes, cycling when exhausted.
///
/// Values are clamped into `1..=faces` so the source never breaks the
/// outcome range of the die being rolled.
#[derive(Debug, Clone)]
pub struct FixedSource {
    values: Vec<u32>,
    cursor: usize,
    draws: usize,
}

impl FixedSource {
    /// Replay `values` in order. An empty sequence always yields 1.
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
            draws: 0,
        }
    }

    /// How many outcomes have been drawn so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl DieSource for FixedSource {
    fn draw(&mut self, faces: u32) -> u32 {
        self.draws += 1;
        let value = if self.values.is_empty() {
            1
        } else {
            let v = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            v
        };
        value.clamp(1, faces.max(1))
    }
}
