//! Randomness consumed by growth steps.

use std::collections::VecDeque;

use rand::Rng;
use tidal_blocks::Direction;

/// Host-supplied entropy. Any `rand` generator qualifies.
pub trait Entropy {
    /// Uniform in `[0, 1)`.
    fn next_f32(&mut self) -> f32;
    fn next_bool(&mut self) -> bool;
    /// Uniform over all six directions.
    fn next_direction(&mut self) -> Direction;
    /// True with probability `1/n`.
    fn one_in(&mut self, n: u32) -> bool;
}

impl<R: rand::RngCore + ?Sized> Entropy for R {
    #[inline]
    fn next_f32(&mut self) -> f32 {
        self.gen_range(0.0..1.0)
    }

    #[inline]
    fn next_bool(&mut self) -> bool {
        self.gen_bool(0.5)
    }

    #[inline]
    fn next_direction(&mut self) -> Direction {
        Direction::ALL[self.gen_range(0..Direction::ALL.len())]
    }

    #[inline]
    fn one_in(&mut self, n: u32) -> bool {
        n <= 1 || self.gen_range(0..n) == 0
    }
}

/// Replays queued outcomes, falling back to fixed defaults once a queue runs
/// dry. Used to drive growth steps down a chosen branch.
///
/// Defaults: coin flips come up `false`, floats `0.99`, `one_in` passes,
/// directions are `Down`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEntropy {
    floats: VecDeque<f32>,
    bools: VecDeque<bool>,
    directions: VecDeque<Direction>,
    gates: VecDeque<bool>,
    bool_default: bool,
}

impl ScriptedEntropy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn floats(mut self, xs: impl IntoIterator<Item = f32>) -> Self {
        self.floats.extend(xs);
        self
    }

    pub fn bools(mut self, xs: impl IntoIterator<Item = bool>) -> Self {
        self.bools.extend(xs);
        self
    }

    pub fn directions(mut self, xs: impl IntoIterator<Item = Direction>) -> Self {
        self.directions.extend(xs);
        self
    }

    pub fn gates(mut self, xs: impl IntoIterator<Item = bool>) -> Self {
        self.gates.extend(xs);
        self
    }

    /// Coin-flip outcome once the queue is empty.
    pub fn bools_default(mut self, v: bool) -> Self {
        self.bool_default = v;
        self
    }

    /// Queued values not yet consumed, summed over all queues.
    pub fn remaining(&self) -> usize {
        self.floats.len() + self.bools.len() + self.directions.len() + self.gates.len()
    }
}

impl Entropy for ScriptedEntropy {
    fn next_f32(&mut self) -> f32 {
        self.floats.pop_front().unwrap_or(0.99)
    }

    fn next_bool(&mut self) -> bool {
        self.bools.pop_front().unwrap_or(self.bool_default)
    }

    fn next_direction(&mut self) -> Direction {
        self.directions.pop_front().unwrap_or(Direction::Down)
    }

    fn one_in(&mut self, _n: u32) -> bool {
        self.gates.pop_front().unwrap_or(true)
    }
}
