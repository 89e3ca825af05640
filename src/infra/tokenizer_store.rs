// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads and saves the language-model tokenizer (HuggingFace
// tokenizer.json), and registers the garment tokenizer's special
// tokens in its vocabulary.
//
// Registration is idempotent: tokens already in the vocabulary
// keep their ids, new ones are appended after the last id.

use anyhow::{Context, Result};
use std::{collections::HashMap, fs, path::PathBuf};
use tokenizers::{AddedToken, Tokenizer};

const TOKENIZER_FILE: &str = "tokenizer.json";

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKENIZER_FILE)
    }

    /// Load a previously saved tokenizer from JSON file
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.path();
        Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}", path.display(), e
            ))
    }

    pub fn save(&self, tokenizer: &Tokenizer) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;
        let path = self.path();
        tokenizer
            .save(&path, true)
            .map_err(|e| anyhow::anyhow!("Cannot write tokenizer '{}': {}", path.display(), e))?;
        tracing::info!("Tokenizer saved to '{}'", path.display());
        Ok(path)
    }
}

/// Add `names` as special tokens and return every name's id.
pub fn register_tokens(tokenizer: &mut Tokenizer, names: &[String]) -> Result<HashMap<String, u32>> {
    let before = tokenizer.get_vocab_size(true);

    let tokens: Vec<AddedToken> = names
        .iter()
        .map(|n| AddedToken::from(n.clone(), true))
        .collect();
    let added = tokenizer.add_special_tokens(&tokens);

    let mut token2idx = HashMap::with_capacity(names.len());
    for name in names {
        let id = tokenizer
            .token_to_id(name)
            .with_context(|| format!("Token '{name}' missing after registration"))?;
        token2idx.insert(name.clone(), id);
    }

    tracing::info!(
        "Registered {} garment tokens ({} new), vocabulary {} → {}",
        names.len(),
        added,
        before,
        tokenizer.get_vocab_size(true)
    );
    Ok(token2idx)
}
