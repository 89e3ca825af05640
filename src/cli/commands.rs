// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Five subcommands share one set of dataset flags. A JSON
// config passed with --config replaces those flags, except
// --seed which still overrides it.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use garment_mm_dataset::data::config::{DatasetConfig, DEFAULT_VISION_TOWER};
use garment_mm_dataset::data::loader::DatapointSource;
use garment_mm_dataset::data::sampling::SamplingRates;
use garment_mm_dataset::infra::run_store::load_config;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and batch samples, printing a JSON summary of each
    Sample(SampleArgs),

    /// Reproduce a recorded train/validation/test split
    Split(SplitArgs),

    /// Add the garment tokens to a tokenizer.json
    Tokens(TokensArgs),

    /// Decode token ids with a tokenizer.json
    Decode(DecodeArgs),

    /// Compare predicted specifications with ground truth
    Evaluate(EvaluateArgs),
}

/// Flags describing the dataset.
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// JSON dataset config; replaces the flags below
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory with one folder per datapoint
    #[arg(long, default_value = "data/garments")]
    pub root_dir: PathBuf,

    /// Directory with edited specifications and editing captions
    #[arg(long, default_value = "data/edits")]
    pub editing_dir: PathBuf,

    /// Directory with captions.json files
    #[arg(long, default_value = "data/captions")]
    pub caption_dir: PathBuf,

    /// Image, descriptive, speculative, image+text and editing rates
    #[arg(long, value_delimiter = ',', default_value = "1,0,0,0,0")]
    pub sampling_rate: Vec<f64>,

    /// Vision tower name or directory holding preprocessor_config.json
    #[arg(long, default_value = DEFAULT_VISION_TOWER)]
    pub vision_tower: String,

    /// Image size when the vision tower has no processor config
    #[arg(long, default_value_t = 224)]
    pub image_size: u32,

    /// Probability of ground truth → edited for editing samples
    #[arg(long, default_value_t = 0.5)]
    pub editing_flip_prob: f64,

    /// Text file with one datapoint name per line
    #[arg(long, default_value = "data/datapoints.txt")]
    pub datapoints: PathBuf,

    /// JSON table of panel classes
    #[arg(long)]
    pub panel_classification: Option<PathBuf>,

    /// JSON normalization statistics for the garment tokenizer
    #[arg(long)]
    pub gt_stats: Option<PathBuf>,

    /// Seed for every random draw
    #[arg(long)]
    pub seed: Option<u64>,
}

impl TryFrom<DatasetArgs> for DatasetConfig {
    type Error = anyhow::Error;

    fn try_from(a: DatasetArgs) -> Result<Self> {
        if let Some(path) = &a.config {
            let mut cfg = load_config(path)?;
            cfg.seed = a.seed.or(cfg.seed);
            return Ok(cfg);
        }

        let cfg = DatasetConfig {
            root_dir:             a.root_dir,
            editing_dir:          a.editing_dir,
            caption_dir:          a.caption_dir,
            sampling_rate:        SamplingRates::new(&a.sampling_rate)?,
            vision_tower:         a.vision_tower,
            image_size:           a.image_size,
            editing_flip_prob:    a.editing_flip_prob,
            datapoints:           DatapointSource::File(a.datapoints),
            panel_classification: a.panel_classification,
            gt_stats:             a.gt_stats,
            seed:                 a.seed,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
pub struct SampleArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Number of samples, from index 0
    #[arg(long, default_value_t = 8)]
    pub count: usize,

    #[arg(long, default_value_t = 4)]
    pub batch_size: usize,

    /// Directory for the config and samples.jsonl
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// JSON file with "train", "validation" and "test" name lists
    #[arg(long)]
    pub split_file: PathBuf,

    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TokensArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Directory holding tokenizer.json
    #[arg(long)]
    pub tokenizer_dir: PathBuf,

    /// Where to save the extended tokenizer (default: in place)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[arg(long)]
    pub tokenizer_dir: PathBuf,

    /// Comma-separated token ids
    #[arg(long, value_delimiter = ',', required = true)]
    pub ids: Vec<u32>,
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Predicted specification files, comma-separated
    #[arg(long, value_delimiter = ',', required = true)]
    pub predicted: Vec<PathBuf>,

    /// Ground-truth specification files, same order
    /// (default: the specifications of the first datapoints)
    #[arg(long, value_delimiter = ',')]
    pub ground_truth: Option<Vec<PathBuf>>,

    /// Row label in metrics.csv
    #[arg(long, default_value = "eval")]
    pub label: String,

    /// Directory for metrics.csv
    #[arg(long)]
    pub metrics_dir: Option<PathBuf>,
}
