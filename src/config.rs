// File: src/config.rs
use crate::core::direction::DirectionWeights;
use crate::core::random::{GammaEngine, RandomSource, UniformEngine};
use crate::core::selector::LengthPolicy;
use crate::error::{Result, XwordError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shape of `word_dist`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WordDistribution {
    Uniform,
    Gamma { alpha: f64, beta: f64, divisor: f64 },
}

impl Default for WordDistribution {
    fn default() -> Self {
        WordDistribution::Gamma { alpha: 0.5, beta: 1.0, divisor: 15.0 }
    }
}

/// Everything needed to generate one puzzle, except the corpus itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    pub width: usize,
    pub height: usize,
    pub direction_weights: DirectionWeights,
    pub distribution: WordDistribution,
    /// Fixed seed for a reproducible puzzle; entropy when unset.
    pub seed: Option<u64>,
    pub min_word_len: usize,
    /// Regex the words must match before filling, e.g. `^[AEIOU]`.
    pub starts_with: Option<String>,
    pub shuffle: bool,
    pub length_policy: LengthPolicy,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            width: 15,
            height: 15,
            direction_weights: DirectionWeights::default(),
            distribution: WordDistribution::default(),
            seed: None,
            min_word_len: 3,
            starts_with: None,
            shuffle: false,
            length_policy: LengthPolicy::Exact,
        }
    }
}

impl PuzzleConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: PuzzleConfig = serde_json::from_str(&text)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(XwordError::Config(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.direction_weights.as_array().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(XwordError::Config(format!(
                "direction weights must be finite and non-negative, got {:?}",
                self.direction_weights.as_array()
            )));
        }
        if let WordDistribution::Gamma { alpha, beta, divisor } = self.distribution {
            if !(alpha > 0.0 && beta > 0.0 && divisor > 0.0) {
                return Err(XwordError::Config(format!(
                    "gamma parameters must be positive, got alpha={} beta={} divisor={}",
                    alpha, beta, divisor
                )));
            }
        }
        self.word_filter()?;
        Ok(())
    }

    /// The compiled `starts_with` filter, if one is set.
    pub fn word_filter(&self) -> Result<Option<Regex>> {
        match &self.starts_with {
            Some(pattern) => Ok(Some(Regex::new(pattern)?)),
            None => Ok(None),
        }
    }

    pub fn random_source(&self) -> Result<PuzzleRandom> {
        Ok(match self.distribution {
            WordDistribution::Uniform => PuzzleRandom::Uniform(UniformEngine::new(self.seed)),
            WordDistribution::Gamma { alpha, beta, divisor } => {
                PuzzleRandom::Gamma(GammaEngine::new(alpha, beta, divisor, self.seed)?)
            }
        })
    }
}

/// The configured random source.
#[derive(Debug, Clone)]
pub enum PuzzleRandom {
    Uniform(UniformEngine),
    Gamma(GammaEngine),
}

impl RandomSource for PuzzleRandom {
    fn uniform(&mut self) -> f64 {
        match self {
            PuzzleRandom::Uniform(e) => e.uniform(),
            PuzzleRandom::Gamma(e) => e.uniform(),
        }
    }

    fn choose_index(&mut self, len: usize) -> usize {
        match self {
            PuzzleRandom::Uniform(e) => e.choose_index(len),
            PuzzleRandom::Gamma(e) => e.choose_index(len),
        }
    }

    fn word_dist(&mut self) -> f64 {
        match self {
            PuzzleRandom::Uniform(e) => e.word_dist(),
            PuzzleRandom::Gamma(e) => e.word_dist(),
        }
    }
}
