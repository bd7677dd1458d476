//! Thin wrapper over the HuggingFace `tokenizers` runtime.
//!
//! Both directions are checked: an encoding that produces no ids and a
//! decoding that produces no text are errors the caller must see, not
//! empty values silently handed to (or from) the engine.

use std::path::Path;

use anyhow::{anyhow, Result};
use tokenizers::Tokenizer;

/// Text ↔ token-id conversion for one model's vocabulary.
pub struct TextTokenizer {
    inner: Tokenizer,
}

impl TextTokenizer {
    /// Load a tokenizer definition from a `tokenizer.json` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner = Tokenizer::from_file(&path).map_err(|e| {
            anyhow!(
                "failed to load tokenizer from {}: {}",
                path.as_ref().display(),
                e
            )
        })?;
        Ok(Self { inner })
    }

    /// Build a tokenizer from an in-memory JSON definition.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let inner = Tokenizer::from_bytes(bytes).map_err(|e| anyhow!("invalid tokenizer definition: {}", e))?;
        Ok(Self { inner })
    }

    /// Number of entries in the vocabulary, including added tokens.
    pub fn vocab_size(&self) -> usize {
        self.inner.get_vocab_size(true)
    }

    /// Convert text into token ids.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        if text.trim().is_empty() {
            return Err(anyhow!("cannot encode empty text"));
        }
        let encoding = self.inner.encode(text, false).map_err(|e| anyhow!(e))?;
        let ids = encoding.get_ids().to_vec();
        if ids.is_empty() {
            return Err(anyhow!("tokenizer produced no tokens for the input text"));
        }
        Ok(ids)
    }

    /// Convert token ids back into text, skipping special tokens.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        if ids.is_empty() {
            return Err(anyhow!("cannot decode an empty token sequence"));
        }
        let text = self.inner.decode(ids, true).map_err(|e| anyhow!(e))?;
        if text.trim().is_empty() {
            return Err(anyhow!("tokenizer produced no text for the token sequence"));
        }
        Ok(text)
    }
}
