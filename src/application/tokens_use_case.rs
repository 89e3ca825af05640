// ============================================================
// Layer 2 — Token Use Cases
// ============================================================
// TokensUseCase: make the language-model tokenizer aware of the
// garment tokens and report the ids they received.
//
//   Step 1: Load tokenizer.json                 (Layer 6 - infra)
//   Step 2: Register every garment token        (Layer 6 - infra)
//   Step 3: Install the ids in the dataset      (Layer 4 - data)
//   Step 4: Save the extended tokenizer         (Layer 6 - infra)
//
// DecodeUseCase: turn model output ids back into text.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::open_dataset;
use crate::data::config::DatasetConfig;
use crate::domain::tokens::PanelEdgeTypeIndices;
use crate::infra::tokenizer_store::{register_tokens, TokenizerStore};

pub struct TokensUseCase {
    config: DatasetConfig,
}

impl TokensUseCase {
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    /// Extend the tokenizer in `tokenizer_dir`, saving to `out_dir`
    /// (or back in place when None).
    pub fn execute(&self, tokenizer_dir: PathBuf, out_dir: Option<PathBuf>) -> Result<PanelEdgeTypeIndices> {
        let mut dataset = open_dataset(&self.config)?;

        let mut tokenizer = TokenizerStore::new(&tokenizer_dir).load()?;
        let token2idx = register_tokens(&mut tokenizer, &dataset.all_token_names())?;
        dataset.set_token_indices(&token2idx)?;

        TokenizerStore::new(out_dir.unwrap_or(tokenizer_dir)).save(&tokenizer)?;

        dataset
            .panel_edge_type_indices()
            .context("Garment tokenizer reported no indices after registration")
    }
}

pub struct DecodeUseCase {
    config: DatasetConfig,
}

impl DecodeUseCase {
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, tokenizer_dir: PathBuf, ids: &[u32]) -> Result<String> {
        let dataset   = open_dataset(&self.config)?;
        let tokenizer = TokenizerStore::new(tokenizer_dir).load()?;
        Ok(dataset.decode(ids, &tokenizer)?)
    }
}
