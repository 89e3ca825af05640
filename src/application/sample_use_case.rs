// ============================================================
// Layer 2 — SampleUseCase
// ============================================================
// Draws samples the way a training loop would:
//
//   Step 1: Build the dataset                (Layer 4 - data)
//   Step 2: Fetch the requested indices      (Layer 4 - data)
//   Step 3: Stack them with GarmentBatcher   (Layer 4 - data)
//   Step 4: Save config + summaries          (Layer 6 - infra)
//
// Failed fetches are logged and skipped, as burn's loader would.

use anyhow::Result;
use burn::backend::NdArray;
use burn::data::dataloader::batcher::Batcher;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf};

use crate::application::open_dataset;
use crate::data::batcher::GarmentBatcher;
use crate::data::config::DatasetConfig;
use crate::domain::sample::GarmentSample;
use crate::domain::sample_type::SampleType;
use crate::infra::run_store::RunStore;

/// Readable digest of one fetched sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub index:           usize,
    pub datapoint:       String,
    pub sample_type:     SampleType,
    pub image_path:      Option<PathBuf>,
    pub question:        String,
    pub conversation:    String,
    pub patterns:        Vec<String>,
    pub encoding_shapes: BTreeMap<String, [usize; 2]>,
}

impl SampleSummary {
    fn new(index: usize, datapoint: &str, s: &GarmentSample) -> Self {
        Self {
            index,
            datapoint:       datapoint.to_string(),
            sample_type:     s.sample_type,
            image_path:      s.image_path.clone(),
            question:        s.questions.first().cloned().unwrap_or_default(),
            conversation:    s.conversations.first().cloned().unwrap_or_default(),
            patterns:        s.patterns.iter().map(|p| p.name.clone()).collect(),
            encoding_shapes: s
                .pattern_encoding
                .iter()
                .map(|(k, t)| (k.to_string(), t.shape()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SampleRequest {
    /// Fetch indices `0..count` (clamped to the dataset length).
    pub count:      usize,
    pub batch_size: usize,
    pub out_dir:    Option<PathBuf>,
}

pub struct SampleUseCase {
    config: DatasetConfig,
}

impl SampleUseCase {
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, req: &SampleRequest) -> Result<Vec<SampleSummary>> {
        // ── Step 1: Build the dataset ─────────────────────────────────────────
        let dataset = open_dataset(&self.config)?;
        let count   = req.count.min(dataset.len());

        // ── Step 2: Fetch ─────────────────────────────────────────────────────
        let mut samples   = Vec::with_capacity(count);
        let mut summaries = Vec::with_capacity(count);
        for index in 0..count {
            match dataset.fetch(index) {
                Ok(s) => {
                    let datapoint = dataset.item_info(index).unwrap_or_default();
                    summaries.push(SampleSummary::new(index, datapoint, &s));
                    samples.push(s);
                }
                Err(e) => tracing::warn!("Skipping sample {}: {}", index, e),
            }
        }

        let mut per_type: BTreeMap<SampleType, usize> = BTreeMap::new();
        for s in &summaries {
            *per_type.entry(s.sample_type).or_insert(0) += 1;
        }
        tracing::info!(
            "Fetched {}/{} samples, by type: {:?}",
            summaries.len(),
            count,
            per_type
        );

        // ── Step 3: Batch ─────────────────────────────────────────────────────
        let batcher = GarmentBatcher::<NdArray>::new(Default::default());
        for chunk in samples.chunks(req.batch_size.max(1)) {
            let batch = batcher.batch(chunk.to_vec());
            tracing::debug!(
                "Batch of {}: images {:?}",
                batch.batch_size(),
                batch.images.dims()
            );
        }

        // ── Step 4: Save ──────────────────────────────────────────────────────
        if let Some(dir) = &req.out_dir {
            let store = RunStore::new(dir)?;
            store.save_config(&self.config)?;
            let path = store.save_lines(&summaries)?;
            tracing::info!("Sample summaries written to '{}'", path.display());
        }

        Ok(summaries)
    }
}
