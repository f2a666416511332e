// File: src/core/random.rs
use crate::error::{Result, XwordError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Gamma};

/// The randomness the fill engine consumes.
///
/// `word_dist` decides which rank of the filtered corpus gets drawn, so its
/// shape is the word-frequency weighting. Placement logic never looks at it.
pub trait RandomSource {
    /// Uniform float in [0, 1).
    fn uniform(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` is never zero.
    fn choose_index(&mut self, len: usize) -> usize;

    /// Word-rank sample, nominally in [0, 1). Values above 1 are clamped by the selector.
    fn word_dist(&mut self) -> f64;

    fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            None
        } else {
            items.get(self.choose_index(items.len()))
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }

    fn choose_index(&mut self, len: usize) -> usize {
        (**self).choose_index(len)
    }

    fn word_dist(&mut self) -> f64 {
        (**self).word_dist()
    }
}

fn seeded(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Every draw is uniform. Pair it with a shuffled corpus to ignore frequency rank.
#[derive(Debug, Clone)]
pub struct UniformEngine {
    rng: ChaCha8Rng,
}

impl UniformEngine {
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: seeded(seed) }
    }
}

impl RandomSource for UniformEngine {
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn choose_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn word_dist(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Word ranks follow `Gamma(alpha, beta) / divisor`.
///
/// With a frequency-ordered corpus a small `alpha` concentrates draws on the
/// most common words.
#[derive(Debug, Clone)]
pub struct GammaEngine {
    rng: ChaCha8Rng,
    gamma: Gamma<f64>,
    divisor: f64,
}

impl GammaEngine {
    pub fn new(alpha: f64, beta: f64, divisor: f64, seed: Option<u64>) -> Result<Self> {
        if !(divisor.is_finite() && divisor > 0.0) {
            return Err(XwordError::Distribution(format!(
                "divisor must be positive, got {}",
                divisor
            )));
        }
        let gamma = Gamma::new(alpha, beta).map_err(|e| {
            XwordError::Distribution(format!("gamma(alpha={}, beta={}): {}", alpha, beta, e))
        })?;
        Ok(Self { rng: seeded(seed), gamma, divisor })
    }
}

impl RandomSource for GammaEngine {
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn choose_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn word_dist(&mut self) -> f64 {
        self.gamma.sample(&mut self.rng) / self.divisor
    }
}
