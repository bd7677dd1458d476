//! Token sampling over next-token logits.
//!
//! Greedy arg-max at temperature zero, otherwise a single categorical draw
//! from the temperature-scaled softmax. The RNG is owned and seedable so
//! tests can pin the draw sequence while production samplers seed from OS
//! entropy once per process.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{GenerationError, GenerationResult};

/// Picks the next token from a logits vector.
pub struct TokenSampler {
    rng: StdRng,
}

impl TokenSampler {
    /// Sampler seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Sampler with a fixed seed, for reproducible draws.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose a token id from `logits`.
    ///
    /// `temperature == 0` takes the deterministic arg-max path (first
    /// occurrence wins on ties) and consumes no entropy. Positive
    /// temperatures scale the logits by `1/temperature` before a
    /// numerically stable softmax and one categorical draw.
    pub fn sample(&mut self, logits: &Array1<f32>, temperature: f32) -> GenerationResult<u32> {
        if logits.is_empty() {
            return Err(GenerationError::InvalidInput(
                "logits must not be empty".to_string(),
            ));
        }
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(GenerationError::InvalidInput(format!(
                "temperature must be a non-negative finite number, got {}",
                temperature
            )));
        }

        if temperature == 0.0 {
            return Ok(argmax(logits));
        }

        // Subtract the max logit before exponentiating so large scores
        // cannot overflow exp().
        let max_logit = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let mut probs: Vec<f32> = logits
            .iter()
            .map(|&l| ((l - max_logit) / temperature).exp())
            .collect();
        let sum: f32 = probs.iter().sum();
        for p in &mut probs {
            *p /= sum;
        }

        let uniform: f32 = self.rng.gen();
        let mut cumulative = 0.0;
        for (idx, &prob) in probs.iter().enumerate() {
            cumulative += prob;
            if cumulative >= uniform {
                return Ok(idx as u32);
            }
        }
        // Rounding can leave the cumulative sum fractionally below 1.
        Ok((probs.len() - 1) as u32)
    }
}

impl Default for TokenSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of the maximum logit; the first occurrence wins on ties.
fn argmax(logits: &Array1<f32>) -> u32 {
    let mut best_idx = 0u32;
    let mut best_val = f32::NEG_INFINITY;
    for (i, &v) in logits.iter().enumerate() {
        if v > best_val {
            best_val = v;
            best_idx = i as u32;
        }
    }
    best_idx
}
