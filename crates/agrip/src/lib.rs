//! # agrip
//!
//! An autoregressive decoding engine for sequence-to-sequence models, plus
//! the small amount of plumbing needed to use it as a text summarizer.
//!
//! The engine drives an opaque [`ScoringOracle`] one token at a time:
//! score, sample with temperature, append, check the stopping rule,
//! repeat. Model execution and tokenization are collaborators behind
//! narrow seams, so the whole loop is testable against deterministic
//! stand-ins.
//!
//! ## Quick Start
//!
//! ```ignore
//! use agrip::{EchoOracle, GenerationConfig, Summarizer, TextTokenizer};
//!
//! let tokenizer = TextTokenizer::from_file("tokenizer.json")?;
//! let oracle = EchoOracle::new(tokenizer.vocab_size());
//! let mut summarizer = Summarizer::new(tokenizer, Box::new(oracle))
//!     .with_config(GenerationConfig::summarization());
//!
//! let summary = summarizer.summarize(&article)?;
//! println!("{}", summary);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod oracle;
pub mod sampling;
pub mod state;
pub mod stopping;
pub mod summarizer;
pub mod tokenizer;

pub use config::GenerationConfig;
pub use engine::{DecodingEngine, GeneratedSequence};
pub use error::{GenerationError, GenerationResult};
pub use oracle::{EchoOracle, ScoringOracle};
pub use sampling::TokenSampler;
pub use state::{DecoderState, EncoderInput, DECODER_START_TOKEN_ID, EOS_TOKEN_ID};
pub use stopping::StopReason;
pub use summarizer::Summarizer;
pub use tokenizer::TextTokenizer;
