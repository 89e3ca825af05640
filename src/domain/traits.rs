// ============================================================
// Layer 3 — Collaborator Traits
// ============================================================
// The dataset adapter owns no encoding or vision logic of its
// own. It talks to these traits, and the concrete types are
// chosen by whoever builds the dataset:
//
//   GarmentTokenizer   → infra::garment_tokenizer::BasicGarmentTokenizer
//   ImagePreprocessor  → data::vision::ClipImageProcessor

use std::collections::HashMap;

use image::RgbImage;
use tokenizers::Tokenizer;

use crate::domain::encoding::PatternEncoding;
use crate::domain::error::Result;
use crate::domain::pattern::SewingPattern;
use crate::domain::sample::ImageTensor;
use crate::domain::tokens::{GtStats, PanelEdgeTypeIndices, PatternMetrics};

// ─── GarmentTokenizer ─────────────────────────────────────────────────────────
/// Converts sewing patterns to and from model-facing features.
///
/// `Send + Sync` because the dataset is shared with burn's
/// data loader workers.
pub trait GarmentTokenizer: Send + Sync {
    /// Encode a pattern into named feature groups.
    fn encode(&self, pattern: &SewingPattern) -> Result<PatternEncoding>;

    /// Decode language-model output ids back to text.
    fn decode(&self, ids: &[u32], tokenizer: &Tokenizer) -> Result<String>;

    /// Compare predictions with ground truth, pairwise.
    fn evaluate_patterns(
        &self,
        predicted:    &[SewingPattern],
        ground_truth: &[SewingPattern],
    ) -> Result<PatternMetrics>;

    /// Every special token the tokenizer needs in the LM vocabulary.
    fn all_token_names(&self) -> Vec<String>;

    /// Install the LM vocabulary ids assigned to [`all_token_names`].
    ///
    /// [`all_token_names`]: GarmentTokenizer::all_token_names
    fn set_token_indices(&mut self, token2idx: &HashMap<String, u32>) -> Result<()>;

    /// Ids of the panel and edge-type markers; None until installed.
    fn panel_edge_type_indices(&self) -> Option<PanelEdgeTypeIndices>;

    /// Normalization statistics of the ground-truth data.
    fn gt_stats(&self) -> &GtStats;
}

// ─── ImagePreprocessor ────────────────────────────────────────────────────────
/// Turns a decoded RGB render into a vision-encoder input.
pub trait ImagePreprocessor: Send + Sync {
    fn preprocess(&self, image: &RgbImage) -> Result<ImageTensor>;

    /// `[channels, height, width]` of every tensor `preprocess` returns.
    fn output_shape(&self) -> [usize; 3];
}
