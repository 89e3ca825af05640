// ============================================================
// Layer 4 — Datapoint List Loader
// ============================================================
// The dataset is indexed by a list of datapoint names, each a
// path relative to the root directory (e.g. "dresses/dress_0042").
// The list is given inline or as a newline-delimited .txt file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

/// Where the datapoint names come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatapointSource {
    /// Names listed directly in the config.
    Inline(Vec<String>),

    /// Newline-delimited text file, one name per line.
    File(PathBuf),
}

impl DatapointSource {
    /// Resolve to the ordered list of datapoint names.
    pub fn resolve(&self) -> Result<Vec<String>> {
        match self {
            DatapointSource::Inline(names) => Ok(names.clone()),
            DatapointSource::File(path)    => load_name_file(path),
        }
    }
}

/// Read one datapoint name per line, trimming whitespace and
/// skipping blank lines.
pub fn load_name_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read datapoint list '{}'", path.display()))?;

    let names: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    tracing::info!("Loaded {} datapoint names from '{}'", names.len(), path.display());
    Ok(names)
}

/// Last path segment of a datapoint name: the garment's own name,
/// used for file prefixes and as the cache key.
pub fn data_name(datapoint: &str) -> &str {
    datapoint.rsplit('/').next().unwrap_or(datapoint)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_source() {
        let src = DatapointSource::Inline(vec!["a".into(), "b/c".into()]);
        assert_eq!(src.resolve().unwrap(), vec!["a", "b/c"]);
    }

    #[test]
    fn test_file_source_trims_and_skips_blank_lines() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.txt");
        fs::write(&path, "dress_01\n  shirt_02  \n\npants_03\n").unwrap();

        let src = DatapointSource::File(path);
        assert_eq!(src.resolve().unwrap(), vec!["dress_01", "shirt_02", "pants_03"]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let src = DatapointSource::File(PathBuf::from("/definitely/not/here.txt"));
        assert!(src.resolve().is_err());
    }

    #[test]
    fn test_serde_untagged() {
        let inline: DatapointSource = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert!(matches!(inline, DatapointSource::Inline(_)));
        let file: DatapointSource = serde_json::from_str(r#""names.txt""#).unwrap();
        assert_eq!(file, DatapointSource::File(PathBuf::from("names.txt")));
    }

    #[test]
    fn test_data_name() {
        assert_eq!(data_name("dresses/dress_0042"), "dress_0042");
        assert_eq!(data_name("dress_0042"), "dress_0042");
    }
}
