//! The autoregressive decoding loop.
//!
//! One `generate` call drives the scoring oracle one position at a time:
//! score the next position, sample a token, record it, decide whether to
//! stop, and feed the token back into the decoder context if generation
//! continues. The loop is strictly sequential — every step's scoring call
//! depends on the previous step's token — and blocking; callers wanting
//! timeouts or cancellation wrap the whole call.

use std::time::Instant;

use log::{debug, info};

use crate::config::GenerationConfig;
use crate::error::{GenerationError, GenerationResult};
use crate::oracle::ScoringOracle;
use crate::sampling::TokenSampler;
use crate::state::{DecoderState, EncoderInput};
use crate::stopping::{should_stop, StopReason};

/// The tokens emitted by one generation run, plus why the run ended.
///
/// Contains only newly generated ids — the seeded start token is not
/// included. When the run ended on an end-of-sequence token, that token is
/// the last element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSequence {
    tokens: Vec<u32>,
    stop_reason: StopReason,
}

impl GeneratedSequence {
    pub fn tokens(&self) -> &[u32] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<u32> {
        self.tokens
    }

    pub fn stop_reason(&self) -> StopReason {
        self.stop_reason
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Orchestrates token-by-token generation against a scoring oracle.
pub struct DecodingEngine {
    sampler: TokenSampler,
}

impl DecodingEngine {
    /// Engine with an entropy-seeded sampler.
    pub fn new() -> Self {
        Self {
            sampler: TokenSampler::new(),
        }
    }

    /// Engine with a caller-provided sampler, e.g. a seeded one for
    /// reproducible runs.
    pub fn with_sampler(sampler: TokenSampler) -> Self {
        Self { sampler }
    }

    /// Run the decoding loop until an honored end-of-sequence token or the
    /// `max_length` bound.
    ///
    /// The stopping token is part of the returned sequence but is not fed
    /// back into the decoder context — generation has concluded, so it
    /// never conditions a further scoring call.
    ///
    /// Any oracle or sampler failure aborts the whole run; partially
    /// generated tokens are discarded.
    pub fn generate(
        &mut self,
        oracle: &mut dyn ScoringOracle,
        encoder_input: &EncoderInput,
        seed: &DecoderState,
        config: &GenerationConfig,
    ) -> GenerationResult<GeneratedSequence> {
        config.validate()?;

        let t_start = Instant::now();
        let mut decoder_state = seed.clone();
        let mut emitted: Vec<u32> = Vec::new();
        let mut stop_reason = StopReason::MaxLength;

        for step in 0..config.max_length {
            let logits = oracle
                .logits_for(encoder_input, &decoder_state)
                .map_err(|source| GenerationError::ScoringFailure { source })?;

            if logits.len() != oracle.vocab_size() {
                return Err(GenerationError::SamplingFailure(format!(
                    "oracle returned {} logits for a vocabulary of {}",
                    logits.len(),
                    oracle.vocab_size()
                )));
            }

            let token = self
                .sampler
                .sample(&logits, config.temperature)
                .map_err(|e| GenerationError::SamplingFailure(e.to_string()))?;

            emitted.push(token);
            debug!("step {}: chose token {}", step, token);

            if should_stop(token, emitted.len(), config) {
                stop_reason = StopReason::EndOfSequence;
                break;
            }
            decoder_state.push(token);
        }

        let elapsed = t_start.elapsed();
        if elapsed.as_secs_f64() > 0.0 {
            let tps = emitted.len() as f64 / elapsed.as_secs_f64();
            info!(
                "generated {} tokens in {:?} ({:.2} t/s), stop: {:?}",
                emitted.len(),
                elapsed,
                tps,
                stop_reason
            );
        }

        Ok(GeneratedSequence {
            tokens: emitted,
            stop_reason,
        })
    }
}

impl Default for DecodingEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use ndarray::Array1;

    /// Plays back a fixed list of logit vectors, repeating the last one
    /// when the script runs out, and records the decoder context it saw on
    /// every call.
    struct ScriptedOracle {
        vocab_size: usize,
        script: Vec<Vec<f32>>,
        seen_contexts: Vec<Vec<u32>>,
    }

    impl ScriptedOracle {
        fn new(vocab_size: usize, script: Vec<Vec<f32>>) -> Self {
            Self {
                vocab_size,
                script,
                seen_contexts: Vec::new(),
            }
        }
    }

    impl ScoringOracle for ScriptedOracle {
        fn vocab_size(&self) -> usize {
            self.vocab_size
        }

        fn logits_for(
            &mut self,
            _encoder_input: &EncoderInput,
            decoder_state: &DecoderState,
        ) -> anyhow::Result<Array1<f32>> {
            self.seen_contexts.push(decoder_state.tokens().to_vec());
            let step = self.seen_contexts.len() - 1;
            let row = self
                .script
                .get(step)
                .or_else(|| self.script.last())
                .expect("script must not be empty");
            Ok(Array1::from_vec(row.clone()))
        }
    }

    struct FailingOracle;

    impl ScoringOracle for FailingOracle {
        fn vocab_size(&self) -> usize {
            5
        }

        fn logits_for(
            &mut self,
            _encoder_input: &EncoderInput,
            _decoder_state: &DecoderState,
        ) -> anyhow::Result<Array1<f32>> {
            Err(anyhow!("scoring backend offline"))
        }
    }

    struct WrongLengthOracle;

    impl ScoringOracle for WrongLengthOracle {
        fn vocab_size(&self) -> usize {
            5
        }

        fn logits_for(
            &mut self,
            _encoder_input: &EncoderInput,
            _decoder_state: &DecoderState,
        ) -> anyhow::Result<Array1<f32>> {
            Ok(Array1::zeros(3))
        }
    }

    fn greedy(max_length: usize, min_length: usize) -> GenerationConfig {
        GenerationConfig {
            max_length,
            min_length,
            temperature: 0.0,
        }
    }

    fn engine() -> DecodingEngine {
        DecodingEngine::with_sampler(TokenSampler::with_seed(0))
    }

    fn input() -> EncoderInput {
        EncoderInput::new(vec![2, 3, 4]).unwrap()
    }

    #[test]
    fn test_runs_to_max_length_without_end_token() {
        // Token 4 always wins; the end token never does.
        let mut oracle = ScriptedOracle::new(5, vec![vec![0.0, 0.0, 0.0, 0.0, 5.0]]);
        let result = engine()
            .generate(&mut oracle, &input(), &DecoderState::seeded(), &greedy(3, 0))
            .unwrap();

        assert_eq!(result.tokens(), &[4, 4, 4]);
        assert_eq!(result.stop_reason(), StopReason::MaxLength);
    }

    #[test]
    fn test_stops_on_end_token() {
        // Step 0 picks token 0 (the start id, not the end id), step 1
        // picks the end token.
        let mut oracle = ScriptedOracle::new(
            5,
            vec![vec![10.0, 0.0, 0.0, 0.0, 0.0], vec![0.0, 10.0, 0.0, 0.0, 0.0]],
        );
        let result = engine()
            .generate(&mut oracle, &input(), &DecoderState::seeded(), &greedy(5, 0))
            .unwrap();

        assert_eq!(result.tokens(), &[0, 1]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.stop_reason(), StopReason::EndOfSequence);
        // The loop stopped after step 1: exactly two scoring calls.
        assert_eq!(oracle.seen_contexts.len(), 2);
    }

    #[test]
    fn test_stop_token_not_fed_back_to_context() {
        let mut oracle = ScriptedOracle::new(
            5,
            vec![vec![0.0, 0.0, 9.0, 0.0, 0.0], vec![0.0, 10.0, 0.0, 0.0, 0.0]],
        );
        let result = engine()
            .generate(&mut oracle, &input(), &DecoderState::seeded(), &greedy(5, 0))
            .unwrap();

        assert_eq!(result.tokens(), &[2, 1]);
        // Step 0 saw the seed; step 1 saw the seed plus token 2. The end
        // token never appears in any scoring context.
        assert_eq!(oracle.seen_contexts, vec![vec![0], vec![0, 2]]);
    }

    #[test]
    fn test_min_length_defers_end_token() {
        // The end token wins every step; with min_length 2 the first win
        // is ignored and the second is honored.
        let mut oracle = ScriptedOracle::new(5, vec![vec![0.0, 10.0, 0.0, 0.0, 0.0]]);
        let result = engine()
            .generate(&mut oracle, &input(), &DecoderState::seeded(), &greedy(5, 2))
            .unwrap();

        assert_eq!(result.tokens(), &[1, 1]);
        assert_eq!(result.stop_reason(), StopReason::EndOfSequence);
        // The unhonored end token at step 0 was still fed back as context.
        assert_eq!(oracle.seen_contexts, vec![vec![0], vec![0, 1]]);
    }

    #[test]
    fn test_greedy_generation_is_idempotent() {
        let script = vec![
            vec![0.0, 0.0, 7.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0, 7.0, 0.0],
            vec![0.0, 10.0, 0.0, 0.0, 0.0],
        ];
        let mut first = ScriptedOracle::new(5, script.clone());
        let mut second = ScriptedOracle::new(5, script);

        let a = engine()
            .generate(&mut first, &input(), &DecoderState::seeded(), &greedy(10, 0))
            .unwrap();
        let b = engine()
            .generate(&mut second, &input(), &DecoderState::seeded(), &greedy(10, 0))
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(a.tokens(), &[2, 3, 1]);
    }

    #[test]
    fn test_emitted_length_always_within_bounds() {
        let mut oracle = ScriptedOracle::new(5, vec![vec![0.0, 0.0, 5.0, 0.0, 0.0]]);
        let result = engine()
            .generate(&mut oracle, &input(), &DecoderState::seeded(), &greedy(7, 0))
            .unwrap();

        assert_eq!(result.len(), 7);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_scoring_failure_aborts_and_discards() {
        let result = engine().generate(
            &mut FailingOracle,
            &input(),
            &DecoderState::seeded(),
            &greedy(5, 0),
        );
        assert!(matches!(
            result,
            Err(GenerationError::ScoringFailure { .. })
        ));
    }

    #[test]
    fn test_wrong_length_logits_fail_sampling() {
        let result = engine().generate(
            &mut WrongLengthOracle,
            &input(),
            &DecoderState::seeded(),
            &greedy(5, 0),
        );
        assert!(matches!(result, Err(GenerationError::SamplingFailure(_))));
    }

    #[test]
    fn test_zero_max_length_is_invalid_input() {
        let mut oracle = ScriptedOracle::new(5, vec![vec![1.0; 5]]);
        let result = engine().generate(
            &mut oracle,
            &input(),
            &DecoderState::seeded(),
            &greedy(0, 0),
        );
        assert!(matches!(result, Err(GenerationError::InvalidInput(_))));
        // Validation failed before any scoring happened.
        assert!(oracle.seen_contexts.is_empty());
    }

    #[test]
    fn test_sampled_run_respects_max_length() {
        let mut oracle = ScriptedOracle::new(4, vec![vec![1.0, -100.0, 1.0, 1.0]]);
        let config = GenerationConfig {
            max_length: 6,
            min_length: 0,
            temperature: 1.0,
        };
        let result = engine()
            .generate(&mut oracle, &input(), &DecoderState::seeded(), &config)
            .unwrap();

        assert!(result.len() >= 1 && result.len() <= 6);
        assert!(result.tokens().iter().all(|&t| (t as usize) < 4));
    }
}
