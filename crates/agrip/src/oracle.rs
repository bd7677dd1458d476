//! The scoring seam between the decoding engine and the model runtime.
//!
//! The engine passes logical token sequences across this boundary and gets
//! back one unnormalized score per vocabulary entry for the next position.
//! Everything tensor-shaped — batching, resizing, device placement — lives
//! on the implementation's side.

use anyhow::Result;
use ndarray::Array1;

use crate::state::{DecoderState, EncoderInput, EOS_TOKEN_ID};

/// Next-token scoring capability of a pretrained seq2seq model.
///
/// `logits_for` takes `&mut self`: a scoring backend's execution context is
/// not assumed to be safe under concurrent invocation, so each in-flight
/// generation request needs exclusive access to its handle. Implementations
/// that are internally synchronized may still be shared behind their own
/// locking.
pub trait ScoringOracle: Send {
    /// Size of the fixed vocabulary this oracle scores over. Every logits
    /// vector returned by `logits_for` has exactly this length.
    fn vocab_size(&self) -> usize;

    /// Score the position immediately following the current end of
    /// `decoder_state`, conditioned on `encoder_input`.
    ///
    /// Each call may be expensive and blocks until the backend finishes;
    /// there are no partial or streamed results.
    fn logits_for(
        &mut self,
        encoder_input: &EncoderInput,
        decoder_state: &DecoderState,
    ) -> Result<Array1<f32>>;
}

/// Deterministic placeholder backend: replays the unmasked encoder tokens
/// in order, then emits the end-of-sequence token.
///
/// Stands in for a native scoring runtime behind the same seam one would
/// implement, which keeps the front end and engine fully exercisable
/// without model weights. Assumes the conventional single start-token
/// decoder seed when deriving how many tokens have been generated so far.
pub struct EchoOracle {
    vocab_size: usize,
}

impl EchoOracle {
    pub fn new(vocab_size: usize) -> Self {
        Self { vocab_size }
    }
}

impl ScoringOracle for EchoOracle {
    fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    fn logits_for(
        &mut self,
        encoder_input: &EncoderInput,
        decoder_state: &DecoderState,
    ) -> Result<Array1<f32>> {
        let generated_so_far = decoder_state.len().saturating_sub(1);

        let next_echo = encoder_input
            .tokens()
            .iter()
            .zip(encoder_input.attention_mask())
            .filter(|(_, &mask)| mask != 0)
            .map(|(&token, _)| token)
            .nth(generated_so_far);

        let mut logits = Array1::zeros(self.vocab_size);
        let favored = match next_echo {
            Some(token) if (token as usize) < self.vocab_size => token,
            _ => EOS_TOKEN_ID,
        };
        logits[favored as usize] = 8.0;
        Ok(logits)
    }
}
