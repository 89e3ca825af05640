// ============================================================
// Layer 2 — SplitUseCase
// ============================================================
// Reproduces a recorded split over the configured datapoints
// and optionally saves the result.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::application::open_dataset;
use crate::data::config::DatasetConfig;
use crate::data::splitter::DataSplit;
use crate::infra::run_store::{load_split_dict, RunStore};

pub struct SplitUseCase {
    config: DatasetConfig,
}

impl SplitUseCase {
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, split_file: &Path, out_dir: Option<&PathBuf>) -> Result<DataSplit> {
        let dataset = open_dataset(&self.config)?;
        let dict    = load_split_dict(split_file)?;
        let split   = dataset.split_from_dict(&dict);

        if let Some(dir) = out_dir {
            let path = RunStore::new(dir)?.save_split(&split)?;
            tracing::info!("Split written to '{}'", path.display());
        }
        Ok(split)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sampling::SamplingRates;
    use crate::domain::sample_type::SampleType;
    use crate::test_support::DatasetFixture;
    use std::fs;

    #[test]
    fn test_split_from_file() {
        let fx = DatasetFixture::new();
        let split_file = fx.path().join("split.json");
        fs::write(&split_file, r#"{"train": ["g1"], "validation": ["g2"], "test": ["g3"]}"#).unwrap();

        let cfg = fx.config(&["g3", "g2", "g1"], SamplingRates::only(SampleType::Image).unwrap());
        let out = fx.path().join("run");
        let split = SplitUseCase::new(cfg).execute(&split_file, Some(&out)).unwrap();

        assert_eq!(split.train, vec!["g1".to_string()]);
        assert_eq!(split.test, Some(vec!["g3".to_string()]));
        assert!(out.join("split.json").is_file());
    }
}
