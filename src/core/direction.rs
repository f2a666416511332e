// File: src/core/direction.rs
use crate::core::random::RandomSource;
use crate::core::types::Direction;
use serde::{Deserialize, Serialize};

/// Categorical weights for `(right, down, left, up)`.
///
/// The weights are not normalised. `up` is never consulted: it takes whatever
/// probability mass is left after the first three cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct DirectionWeights {
    pub right: f64,
    pub down: f64,
    pub left: f64,
    pub up: f64,
}

impl DirectionWeights {
    pub fn new(right: f64, down: f64, left: f64, up: f64) -> Self {
        Self { right, down, left, up }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.right, self.down, self.left, self.up]
    }

    fn cutoffs(&self) -> [f64; 3] {
        let c1 = self.right;
        let c2 = c1 + self.down;
        let c3 = c2 + self.left;
        [c1, c2, c3]
    }
}

impl Default for DirectionWeights {
    fn default() -> Self {
        Self::new(0.35, 0.30, 0.20, 0.15)
    }
}

impl From<[f64; 4]> for DirectionWeights {
    fn from(w: [f64; 4]) -> Self {
        Self::new(w[0], w[1], w[2], w[3])
    }
}

impl From<DirectionWeights> for [f64; 4] {
    fn from(w: DirectionWeights) -> Self {
        w.as_array()
    }
}

/// Rolls a direction with one uniform draw against the cumulative cutoffs.
pub fn roll_direction<R: RandomSource>(rng: &mut R, weights: &DirectionWeights) -> Direction {
    let [c1, c2, c3] = weights.cutoffs();
    let r = rng.uniform();
    if r < c1 {
        Direction::Right
    } else if r < c2 {
        Direction::Down
    } else if r < c3 {
        Direction::Left
    } else {
        Direction::Up
    }
}
