// ============================================================
// Layer 3 — Garment Sample
// ============================================================
// The per-index training unit handed to the batching layer.
// Plain data only: image pixels are a flat CHW Vec<f32> and
// encodings are PatternEncoding maps. Burn tensors are built
// later by data::batcher.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::encoding::PatternEncoding;
use crate::domain::pattern::SewingPattern;
use crate::domain::sample_type::SampleType;

// ─── ImageTensor ──────────────────────────────────────────────────────────────
/// Preprocessed image in CHW layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTensor {
    pub channels: usize,
    pub height:   usize,
    pub width:    usize,
    /// `channels * height * width` values, channel-major.
    pub data:     Vec<f32>,
}

impl ImageTensor {
    /// All-zero placeholder used by samples without an image.
    pub fn zeros(channels: usize, height: usize, width: usize) -> Self {
        Self {
            channels,
            height,
            width,
            data: vec![0.0; channels * height * width],
        }
    }

    pub fn shape(&self) -> [usize; 3] {
        [self.channels, self.height, self.width]
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&v| v == 0.0)
    }
}

// ─── GarmentSample ────────────────────────────────────────────────────────────
/// One multimodal training sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentSample {
    /// Encoding the model is trained to produce. For editing samples
    /// this is the before and after encodings stacked per key.
    pub pattern_encoding: PatternEncoding,

    /// Encoding shown in the question. Empty except for editing,
    /// where it holds the "before" pattern.
    pub question_pattern_encoding: PatternEncoding,

    /// Render the image was loaded from, if any.
    pub image_path: Option<PathBuf>,

    /// Preprocessed render, or a zero tensor when unused.
    pub image: ImageTensor,

    /// Question and answer rendered through the chat template.
    pub conversations: Vec<String>,

    /// Same turns with an empty answer, for prompt masking.
    pub question_only_conversations: Vec<String>,

    /// Raw question strings.
    pub questions: Vec<String>,

    /// Patterns involved: `[gt]`, or `[before, after]` for editing.
    pub patterns: Vec<SewingPattern>,

    pub sample_type: SampleType,
}

impl GarmentSample {
    /// Integer tag of the sample type.
    pub fn type_tag(&self) -> usize {
        self.sample_type.tag()
    }
}
