use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, GenerationResult};

/// Generation parameters for one decoding request.
///
/// Parseable from model-card style JSON; absent fields fall back to the
/// summarization task defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// Hard upper bound on the number of tokens emitted.
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Minimum number of tokens emitted before an end-of-sequence token is
    /// honored as a stop signal.
    #[serde(default)]
    pub min_length: usize,
    /// Sampling sharpness. 0 selects deterministic arg-max; positive values
    /// scale the softmax.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_max_length() -> usize {
    100
}

fn default_temperature() -> f32 {
    0.8
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            min_length: 0,
            temperature: default_temperature(),
        }
    }
}

impl GenerationConfig {
    /// Defaults tuned for article summarization.
    pub fn summarization() -> Self {
        Self {
            max_length: 100,
            min_length: 30,
            temperature: 0.8,
        }
    }

    /// Deterministic arg-max decoding with this config's length bounds.
    pub fn greedy(mut self) -> Self {
        self.temperature = 0.0;
        self
    }

    /// Check the configuration before a generation request.
    ///
    /// A `max_length` of zero is rejected here rather than silently
    /// producing an empty result downstream.
    pub fn validate(&self) -> GenerationResult<()> {
        if self.max_length == 0 {
            return Err(GenerationError::InvalidInput(
                "max_length must be at least 1".to_string(),
            ));
        }
        if self.min_length > self.max_length {
            return Err(GenerationError::InvalidInput(format!(
                "min_length ({}) exceeds max_length ({})",
                self.min_length, self.max_length
            )));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(GenerationError::InvalidInput(format!(
                "temperature must be a non-negative finite number, got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}
