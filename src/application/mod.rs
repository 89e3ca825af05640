// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Each use case builds a GarmentDataset from a DatasetConfig
// and drives one workflow over it:
//
//   sample_use_case   : fetch and batch samples, save summaries
//   split_use_case    : reproduce a recorded train/val/test split
//   tokens_use_case   : register garment tokens, decode ids
//   evaluate_use_case : score predicted patterns against ground truth
//
// No printing here; results go back to Layer 1.

pub mod sample_use_case;
pub mod split_use_case;
pub mod tokens_use_case;
pub mod evaluate_use_case;

use anyhow::Result;

use crate::data::config::DatasetConfig;
use crate::data::dataset::GarmentDataset;
use crate::domain::tokens::GtStats;
use crate::infra::garment_tokenizer::BasicGarmentTokenizer;
use crate::infra::run_store::load_gt_stats;

/// Dataset over `config`, with normalization stats loaded when configured.
pub fn open_dataset(config: &DatasetConfig) -> Result<GarmentDataset<BasicGarmentTokenizer>> {
    let stats = match &config.gt_stats {
        Some(path) => load_gt_stats(path)?,
        None       => GtStats::default(),
    };
    GarmentDataset::new(config, BasicGarmentTokenizer::new(stats))
}
