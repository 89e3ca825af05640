// ============================================================
// Layer 4 — Dataset Configuration
// ============================================================
// Every input needed to construct a GarmentDataset. Serialisable
// so runs can be described by a JSON file and reproduced later.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::loader::DatapointSource;
use crate::data::sampling::SamplingRates;
use crate::data::vision::CLIP_SIZE;
use crate::domain::error::{DatasetError, Result};

pub const DEFAULT_VISION_TOWER: &str = "openai/clip-vit-large-patch14";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Directory holding one folder per datapoint.
    pub root_dir: PathBuf,

    /// Directory with edited specifications and editing captions.
    pub editing_dir: PathBuf,

    /// Directory with caption files.
    pub caption_dir: PathBuf,

    /// Probabilities of image, descriptive text, speculative text,
    /// image+text and editing samples.
    pub sampling_rate: SamplingRates,

    /// Vision encoder whose preprocessing settings are used.
    #[serde(default = "default_vision_tower")]
    pub vision_tower: String,

    /// Image size used when the vision tower has no processor config.
    #[serde(default = "default_image_size")]
    pub image_size: u32,

    /// Probability that an editing sample goes ground truth → edited.
    #[serde(default = "default_flip_prob")]
    pub editing_flip_prob: f64,

    /// Datapoint names, inline or as a .txt file path.
    pub datapoints: DatapointSource,

    /// Optional panel-class table.
    #[serde(default)]
    pub panel_classification: Option<PathBuf>,

    /// Normalization statistics for the garment tokenizer.
    #[serde(default)]
    pub gt_stats: Option<PathBuf>,

    /// Fixes every random draw when set.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_vision_tower() -> String {
    DEFAULT_VISION_TOWER.to_string()
}

fn default_image_size() -> u32 {
    CLIP_SIZE
}

fn default_flip_prob() -> f64 {
    0.5
}

impl DatasetConfig {
    /// Minimal config over inline datapoints; other fields take defaults.
    pub fn new(
        root_dir:      impl Into<PathBuf>,
        editing_dir:   impl Into<PathBuf>,
        caption_dir:   impl Into<PathBuf>,
        sampling_rate: SamplingRates,
        datapoints:    DatapointSource,
    ) -> Self {
        Self {
            root_dir: root_dir.into(),
            editing_dir: editing_dir.into(),
            caption_dir: caption_dir.into(),
            sampling_rate,
            vision_tower: default_vision_tower(),
            image_size: default_image_size(),
            editing_flip_prob: default_flip_prob(),
            datapoints,
            panel_classification: None,
            gt_stats: None,
            seed: None,
        }
    }

    /// Range checks not covered by the field types.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.editing_flip_prob) {
            return Err(DatasetError::invalid_config(format!(
                "editing_flip_prob must be in [0, 1], got {}",
                self.editing_flip_prob
            )));
        }
        if self.image_size == 0 {
            return Err(DatasetError::invalid_config("image_size must be positive"));
        }
        Ok(())
    }
}
