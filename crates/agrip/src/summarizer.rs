//! High-level summarization API.
//!
//! Ties the collaborators together for one request: tokenize the source
//! text, run the decoding engine against the scoring oracle, decode the
//! emitted ids. The engine itself never sees text.

use anyhow::{anyhow, Context, Result};

use crate::config::GenerationConfig;
use crate::engine::{DecodingEngine, GeneratedSequence};
use crate::oracle::ScoringOracle;
use crate::state::{DecoderState, EncoderInput};
use crate::tokenizer::TextTokenizer;

/// Task prefix the model family expects in front of text to summarize.
const TASK_PREFIX: &str = "summarize: ";

/// Turns free-form text into a generated summary.
pub struct Summarizer {
    tokenizer: TextTokenizer,
    oracle: Box<dyn ScoringOracle>,
    engine: DecodingEngine,
    config: GenerationConfig,
}

impl Summarizer {
    /// Summarizer with the summarization task defaults.
    pub fn new(tokenizer: TextTokenizer, oracle: Box<dyn ScoringOracle>) -> Self {
        Self {
            tokenizer,
            oracle,
            engine: DecodingEngine::new(),
            config: GenerationConfig::summarization(),
        }
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_engine(mut self, engine: DecodingEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Summarize `text`, returning the decoded summary.
    pub fn summarize(&mut self, text: &str) -> Result<String> {
        let generated = self.summarize_tokens(text)?;
        let summary = self
            .tokenizer
            .decode(generated.tokens())
            .context("failed to decode generated tokens")?;
        Ok(summary.trim().to_string())
    }

    /// Summarize `text`, returning the raw emitted token ids and the stop
    /// reason instead of decoded text.
    pub fn summarize_tokens(&mut self, text: &str) -> Result<GeneratedSequence> {
        if text.trim().is_empty() {
            return Err(anyhow!("input text is empty, nothing to summarize"));
        }

        let prompt = format!("{}{}", TASK_PREFIX, text);
        let input_ids = self
            .tokenizer
            .encode(&prompt)
            .context("failed to tokenize input text")?;
        log::debug!("input tokens [{}]: {:?}", input_ids.len(), input_ids);

        let encoder_input = EncoderInput::new(input_ids)?;
        let seed = DecoderState::seeded();

        let generated =
            self.engine
                .generate(self.oracle.as_mut(), &encoder_input, &seed, &self.config)?;
        log::debug!(
            "output tokens [{}]: {:?}",
            generated.len(),
            generated.tokens()
        );

        Ok(generated)
    }
}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer")
            .field("config", &self.config)
            .field("vocab_size", &self.oracle.vocab_size())
            .finish()
    }
}
