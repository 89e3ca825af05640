// ============================================================
// Layer 4 — Split Reproduction
// ============================================================
// Rebuilds a train/validation/test split recorded elsewhere
// (e.g. by an earlier experiment) over this dataset's own
// datapoint order.
//
// Membership is checked train → test → validation, so a name
// listed in several sets lands in the first match. Names found
// in no set are dropped. An empty test partition is reported as
// None.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Recorded split: names per partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitDict {
    #[serde(default)]
    pub train: Vec<String>,
    #[serde(default)]
    pub validation: Vec<String>,
    #[serde(default)]
    pub test: Vec<String>,
}

/// Datapoint names of each partition, in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSplit {
    pub train:      Vec<String>,
    pub validation: Vec<String>,
    pub test:       Option<Vec<String>>,
}

/// Partition `names` to match `split`.
pub fn split_from_dict(names: &[String], split: &SplitDict) -> DataSplit {
    let train: HashSet<&str> = split.train.iter().map(String::as_str).collect();
    let valid: HashSet<&str> = split.validation.iter().map(String::as_str).collect();
    let test:  HashSet<&str> = split.test.iter().map(String::as_str).collect();

    let mut out_train = Vec::new();
    let mut out_valid = Vec::new();
    let mut out_test  = Vec::new();

    for (idx, name) in names.iter().enumerate() {
        let key = name.as_str();
        if train.contains(key) {
            out_train.push(name.clone());
        } else if test.contains(key) {
            out_test.push(name.clone());
        } else if valid.contains(key) {
            out_valid.push(name.clone());
        } else {
            continue;
        }

        if idx % 1000 == 0 {
            tracing::debug!(
                "Split progress {}: train={}, validation={}, test={}",
                idx,
                out_train.len(),
                out_valid.len(),
                out_test.len()
            );
        }
    }

    tracing::info!(
        "Reproduced split: {} train, {} validation, {} test ({} unassigned)",
        out_train.len(),
        out_valid.len(),
        out_test.len(),
        names.len() - out_train.len() - out_valid.len() - out_test.len()
    );

    DataSplit {
        train:      out_train,
        validation: out_valid,
        test:       (!out_test.is_empty()).then_some(out_test),
    }
}
