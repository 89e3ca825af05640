// ============================================================
// Layer 6 — Run Store
// ============================================================
// JSON persistence for everything a run reads or produces.
//
// Inputs (explicit paths):
//   dataset config    → DatasetConfig
//   split file        → SplitDict
//   gt stats file     → GtStats
//
// Outputs under the run directory:
//   runs/
//     dataset_config.json   ← config the run was built from
//     split.json            ← reproduced DataSplit
//     samples.jsonl         ← one GarmentSample summary per line
//
// Saving the config next to the outputs lets a later run
// rebuild the exact same dataset (including the seed).

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::data::config::DatasetConfig;
use crate::data::splitter::{DataSplit, SplitDict};
use crate::domain::tokens::GtStats;

const CONFIG_FILE:  &str = "dataset_config.json";
const SPLIT_FILE:   &str = "split.json";
const SAMPLES_FILE: &str = "samples.jsonl";

/// Read and deserialise a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid JSON in '{}'", path.display()))
}

pub fn load_config(path: &Path) -> Result<DatasetConfig> {
    let cfg: DatasetConfig = read_json(path)?;
    cfg.validate()?;
    tracing::debug!("Loaded dataset config from '{}'", path.display());
    Ok(cfg)
}

pub fn load_split_dict(path: &Path) -> Result<SplitDict> {
    read_json(path)
}

pub fn load_gt_stats(path: &Path) -> Result<GtStats> {
    read_json(path)
}

/// Output directory of one run.
pub struct RunStore {
    dir: PathBuf,
}

impl RunStore {
    /// Create the store, making the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create run directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    fn write_pretty<T: Serialize>(&self, file: &str, value: &T) -> Result<PathBuf> {
        let path = self.dir.join(file);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        tracing::debug!("Saved '{}'", path.display());
        Ok(path)
    }

    pub fn save_config(&self, cfg: &DatasetConfig) -> Result<PathBuf> {
        self.write_pretty(CONFIG_FILE, cfg)
    }

    pub fn save_split(&self, split: &DataSplit) -> Result<PathBuf> {
        self.write_pretty(SPLIT_FILE, split)
    }

    /// Write one JSON object per line, replacing any previous file.
    pub fn save_lines<T: Serialize>(&self, rows: &[T]) -> Result<PathBuf> {
        let path = self.dir.join(SAMPLES_FILE);
        let mut f = fs::File::create(&path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;
        for row in rows {
            serde_json::to_writer(&mut f, row)?;
            writeln!(f)?;
        }
        tracing::debug!("Saved {} rows to '{}'", rows.len(), path.display());
        Ok(path)
    }
}
