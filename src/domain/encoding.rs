// ============================================================
// Layer 3 — Pattern Encoding
// ============================================================
// A garment tokenizer turns a SewingPattern into named feature
// groups ("edge_type", "edge_params", ...), each a row-major
// 2D tensor of shape [rows, width]. Rows index panels or edges,
// so two encodings are joined by stacking rows key by key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::error::{DatasetError, Result};

// ─── FeatureTensor ────────────────────────────────────────────────────────────
/// Row-major `[rows, width]` block of f32 values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTensor {
    rows:  usize,
    width: usize,
    data:  Vec<f32>,
}

impl FeatureTensor {
    /// Wrap `data` as a `[rows, width]` tensor.
    pub fn new(rows: usize, width: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != rows * width {
            return Err(DatasetError::EncodingMismatch(format!(
                "{} values do not fill a [{rows}, {width}] tensor",
                data.len()
            )));
        }
        Ok(Self { rows, width, data })
    }

    /// Build from equally sized rows.
    pub fn from_rows(width: usize, rows: &[Vec<f32>]) -> Result<Self> {
        let mut data = Vec::with_capacity(rows.len() * width);
        for row in rows {
            if row.len() != width {
                return Err(DatasetError::EncodingMismatch(format!(
                    "row of length {} in a tensor of width {width}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Self::new(rows.len(), width, data)
    }

    /// Length along the concatenation axis.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.width]
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn row(&self, i: usize) -> Option<&[f32]> {
        (i < self.rows).then(|| &self.data[i * self.width..(i + 1) * self.width])
    }

    /// Stack `other` below `self`.
    pub fn concat(&self, other: &FeatureTensor) -> Result<FeatureTensor> {
        if self.width != other.width {
            return Err(DatasetError::EncodingMismatch(format!(
                "width {} vs {}",
                self.width, other.width
            )));
        }
        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        Ok(Self {
            rows: self.rows + other.rows,
            width: self.width,
            data,
        })
    }
}

// ─── PatternEncoding ──────────────────────────────────────────────────────────
/// Feature groups produced by a garment tokenizer, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternEncoding {
    features: BTreeMap<String, FeatureTensor>,
}

impl PatternEncoding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, tensor: FeatureTensor) {
        self.features.insert(key.into(), tensor);
    }

    pub fn get(&self, key: &str) -> Option<&FeatureTensor> {
        self.features.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureTensor)> {
        self.features.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Join two encodings key-wise: every key of `before` is stacked
    /// with the same key of `after`. Keys only in `after` are ignored.
    pub fn concat(before: &PatternEncoding, after: &PatternEncoding) -> Result<PatternEncoding> {
        let mut joined = PatternEncoding::new();
        for (key, head) in &before.features {
            let tail = after.features.get(key).ok_or_else(|| {
                DatasetError::EncodingMismatch(format!("key '{key}' missing from second encoding"))
            })?;
            joined.insert(key.clone(), head.concat(tail)?);
        }
        Ok(joined)
    }
}

impl FromIterator<(String, FeatureTensor)> for PatternEncoding {
    fn from_iter<I: IntoIterator<Item = (String, FeatureTensor)>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn tensor(rows: usize, width: usize, fill: f32) -> FeatureTensor {
        FeatureTensor::new(rows, width, vec![fill; rows * width]).unwrap()
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        assert!(FeatureTensor::new(2, 3, vec![0.0; 5]).is_err());
    }

    #[test]
    fn test_from_rows() {
        let t = FeatureTensor::from_rows(2, &[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(t.shape(), [2, 2]);
        assert_eq!(t.row(1), Some(&[3.0, 4.0][..]));
        assert_eq!(t.row(2), None);
        assert!(FeatureTensor::from_rows(2, &[vec![1.0]]).is_err());
    }

    #[test]
    fn test_concat_stacks_rows() {
        let a = tensor(2, 3, 1.0);
        let b = tensor(5, 3, 2.0);
        let c = a.concat(&b).unwrap();
        assert_eq!(c.rows(), 7);
        assert_eq!(c.row(1).unwrap(), &[1.0, 1.0, 1.0]);
        assert_eq!(c.row(2).unwrap(), &[2.0, 2.0, 2.0]);
        assert!(a.concat(&tensor(1, 4, 0.0)).is_err());
    }

    #[test]
    fn test_encoding_concat_per_key() {
        let mut before = PatternEncoding::new();
        before.insert("edge_type", tensor(8, 1, 0.0));
        before.insert("panel_translation", tensor(2, 3, 0.0));
        let mut after = PatternEncoding::new();
        after.insert("edge_type", tensor(12, 1, 1.0));
        after.insert("panel_translation", tensor(3, 3, 1.0));

        let joined = PatternEncoding::concat(&before, &after).unwrap();
        assert_eq!(joined.get("edge_type").unwrap().rows(), 20);
        assert_eq!(joined.get("panel_translation").unwrap().rows(), 5);
    }

    #[test]
    fn test_encoding_concat_missing_key() {
        let mut before = PatternEncoding::new();
        before.insert("edge_type", tensor(1, 1, 0.0));
        let err = PatternEncoding::concat(&before, &PatternEncoding::new()).unwrap_err();
        assert!(err.to_string().contains("edge_type"));
    }
}
