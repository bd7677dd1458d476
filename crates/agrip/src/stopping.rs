//! Stop decision for the decoding loop.

use crate::config::GenerationConfig;
use crate::state::EOS_TOKEN_ID;

/// Why a generation run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The model emitted the end-of-sequence token after `min_length`
    /// tokens were out.
    EndOfSequence,
    /// The loop reached `max_length` without an honored end token.
    MaxLength,
}

/// True when `chosen_token` ends generation: it is the end-of-sequence id
/// and at least `min_length` tokens have been emitted. The engine's loop
/// bound enforces `max_length` independently of this predicate.
pub fn should_stop(chosen_token: u32, emitted_count: usize, config: &GenerationConfig) -> bool {
    chosen_token == EOS_TOKEN_ID && emitted_count >= config.min_length
}
