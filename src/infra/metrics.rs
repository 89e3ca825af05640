// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Appends pattern-evaluation results to a CSV file, one row per
// evaluation run, so results can be compared across runs.
//
// Example CSV output:
//   label,num_pairs,panel_count_accuracy,edge_count_accuracy,vertex_l2,translation_l2
//   val_epoch_1,120,0.841667,0.790123,3.214500,1.902000

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::tokens::PatternMetrics;

const HEADER: &str =
    "label,num_pairs,panel_count_accuracy,edge_count_accuracy,vertex_l2,translation_l2";

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, label: &str, m: &PatternMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        // commas would break the row
        let label = label.replace(',', ";");
        writeln!(
            f,
            "{},{},{:.6},{:.6},{:.6},{:.6}",
            label,
            m.num_pairs,
            m.panel_count_accuracy,
            m.edge_count_accuracy,
            m.vertex_l2,
            m.translation_l2,
        )?;

        tracing::debug!(
            "Logged '{}' metrics: panel_acc={:.4}, vertex_l2={:.4}",
            label,
            m.panel_count_accuracy,
            m.vertex_l2,
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
