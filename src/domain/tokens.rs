// ============================================================
// Layer 3 — Garment Token Types
// ============================================================
// Values exchanged with a garment tokenizer: normalization
// statistics, the token indices of structural markers, and
// evaluation metrics for predicted patterns.

use serde::{Deserialize, Serialize};

use crate::domain::pattern::EdgeKind;

/// Ground-truth statistics used to normalize pattern features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GtStats {
    pub vertex_mean:      [f32; 2],
    pub vertex_std:       [f32; 2],
    pub translation_mean: [f32; 3],
    pub translation_std:  [f32; 3],
}

impl Default for GtStats {
    fn default() -> Self {
        Self {
            vertex_mean:      [0.0; 2],
            vertex_std:       [1.0; 2],
            translation_mean: [0.0; 3],
            translation_std:  [1.0; 3],
        }
    }
}

impl GtStats {
    pub fn normalize_vertex(&self, v: [f64; 2]) -> [f32; 2] {
        [
            normalize(v[0] as f32, self.vertex_mean[0], self.vertex_std[0]),
            normalize(v[1] as f32, self.vertex_mean[1], self.vertex_std[1]),
        ]
    }

    pub fn normalize_translation(&self, t: [f64; 3]) -> [f32; 3] {
        [
            normalize(t[0] as f32, self.translation_mean[0], self.translation_std[0]),
            normalize(t[1] as f32, self.translation_mean[1], self.translation_std[1]),
            normalize(t[2] as f32, self.translation_mean[2], self.translation_std[2]),
        ]
    }
}

// zero std leaves the value centred but unscaled
fn normalize(x: f32, mean: f32, std: f32) -> f32 {
    if std == 0.0 { x - mean } else { (x - mean) / std }
}

/// Token ids of the structural garment tokens, once installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelEdgeTypeIndices {
    pub pattern_start: u32,
    pub pattern_end:   u32,
    pub panel_start:   u32,
    pub panel_end:     u32,
    /// One id per edge kind, in [`EdgeKind::ALL`] order.
    pub edge_types:    Vec<(EdgeKind, u32)>,
}

impl PanelEdgeTypeIndices {
    pub fn edge_type(&self, kind: EdgeKind) -> Option<u32> {
        self.edge_types
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, id)| *id)
    }
}

/// Aggregate comparison of predicted against ground-truth patterns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternMetrics {
    /// Number of (prediction, ground truth) pairs compared.
    pub num_pairs: usize,

    /// Fraction of pairs with the same number of panels.
    pub panel_count_accuracy: f64,

    /// Fraction of matched panels with the same number of edges.
    pub edge_count_accuracy: f64,

    /// Mean L2 distance between matched vertices.
    pub vertex_l2: f64,

    /// Mean L2 distance between matched panel translations.
    pub translation_l2: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats_are_identity() {
        let s = GtStats::default();
        assert_eq!(s.normalize_vertex([3.0, -2.0]), [3.0, -2.0]);
        assert_eq!(s.normalize_translation([1.0, 2.0, 3.0]), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_normalize_with_stats() {
        let s = GtStats {
            vertex_mean: [1.0, 1.0],
            vertex_std: [2.0, 0.0],
            ..GtStats::default()
        };
        assert_eq!(s.normalize_vertex([5.0, 3.0]), [2.0, 2.0]);
    }

    #[test]
    fn test_edge_type_lookup() {
        let idx = PanelEdgeTypeIndices {
            pattern_start: 1,
            pattern_end: 2,
            panel_start: 3,
            panel_end: 4,
            edge_types: vec![(EdgeKind::Line, 5), (EdgeKind::Circle, 8)],
        };
        assert_eq!(idx.edge_type(EdgeKind::Circle), Some(8));
        assert_eq!(idx.edge_type(EdgeKind::Cubic), None);
    }
}
