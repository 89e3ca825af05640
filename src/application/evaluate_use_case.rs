// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Scores predicted specification files against ground truth,
// pair by pair, and appends the result to the metrics CSV.
//
// Without explicit ground-truth files, prediction i is compared
// with the specification of datapoint i.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use crate::application::open_dataset;
use crate::data::config::DatasetConfig;
use crate::domain::pattern::SewingPattern;
use crate::domain::tokens::PatternMetrics;
use crate::infra::metrics::MetricsLogger;

pub struct EvaluateUseCase {
    config: DatasetConfig,
}

impl EvaluateUseCase {
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    pub fn execute(
        &self,
        predicted:    &[PathBuf],
        ground_truth: Option<&[PathBuf]>,
        label:        &str,
        metrics_dir:  Option<&Path>,
    ) -> Result<PatternMetrics> {
        let dataset = open_dataset(&self.config)?;

        let gt_paths: Vec<PathBuf> = match ground_truth {
            Some(paths) => paths.to_vec(),
            None => dataset
                .datapoints()
                .iter()
                .take(predicted.len())
                .map(|d| dataset.layout().spec_path(d))
                .collect(),
        };
        if predicted.len() != gt_paths.len() {
            bail!(
                "Got {} predictions for {} ground-truth patterns",
                predicted.len(),
                gt_paths.len()
            );
        }

        let pred    = parse_all(predicted)?;
        let gt      = parse_all(&gt_paths)?;
        let metrics = dataset.evaluate_patterns(&pred, &gt)?;

        if let Some(dir) = metrics_dir {
            MetricsLogger::new(dir)?.log(label, &metrics)?;
        }
        Ok(metrics)
    }
}

fn parse_all(paths: &[PathBuf]) -> Result<Vec<SewingPattern>> {
    paths
        .iter()
        .map(|p| Ok(SewingPattern::from_file(p, None, None)?))
        .collect()
}
