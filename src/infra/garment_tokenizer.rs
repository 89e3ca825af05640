// ============================================================
// Layer 6 — Basic Garment Tokenizer
// ============================================================
// Reference GarmentTokenizer. Encodes a SewingPattern into
// per-panel and per-edge feature groups:
//
//   panel_class        [P, 1]  class index, -1 when unclassified
//   panel_edge_count   [P, 1]
//   panel_translation  [P, 3]  normalized by GtStats
//   panel_rotation     [P, 3]  degrees / 180
//   edge_panel         [E, 1]  index of the owning panel
//   edge_type          [E, 1]  EdgeKind index
//   edge_vector        [E, 2]  end - start, scaled by vertex std
//   edge_curvature     [E, 4]  Curvature::params, zero for lines
//
// Structural tokens (pattern/panel markers and one token per
// edge kind) are added to the language-model vocabulary; their
// ids are installed with set_token_indices.

use std::collections::HashMap;

use tokenizers::Tokenizer;

use crate::domain::encoding::{FeatureTensor, PatternEncoding};
use crate::domain::error::{DatasetError, Result};
use crate::domain::pattern::{EdgeKind, SewingPattern};
use crate::domain::tokens::{GtStats, PanelEdgeTypeIndices, PatternMetrics};
use crate::domain::traits::GarmentTokenizer;

pub const PATTERN_START: &str = "<pattern_start>";
pub const PATTERN_END:   &str = "<pattern_end>";
pub const PANEL_START:   &str = "<panel_start>";
pub const PANEL_END:     &str = "<panel_end>";

fn edge_token(kind: EdgeKind) -> String {
    format!("<edge_{}>", kind.name())
}

#[derive(Debug, Clone, Default)]
pub struct BasicGarmentTokenizer {
    stats:     GtStats,
    token_ids: HashMap<String, u32>,
}

impl BasicGarmentTokenizer {
    pub fn new(stats: GtStats) -> Self {
        Self { stats, token_ids: HashMap::new() }
    }

    fn token_id(&self, name: &str) -> Option<u32> {
        self.token_ids.get(name).copied()
    }
}

impl GarmentTokenizer for BasicGarmentTokenizer {
    fn encode(&self, pattern: &SewingPattern) -> Result<PatternEncoding> {
        let mut panel_class: Vec<Vec<f32>> = Vec::new();
        let mut panel_edge_count: Vec<Vec<f32>> = Vec::new();
        let mut panel_translation: Vec<Vec<f32>> = Vec::new();
        let mut panel_rotation: Vec<Vec<f32>> = Vec::new();
        let mut edge_panel: Vec<Vec<f32>> = Vec::new();
        let mut edge_type: Vec<Vec<f32>> = Vec::new();
        let mut edge_vector: Vec<Vec<f32>> = Vec::new();
        let mut edge_curvature: Vec<Vec<f32>> = Vec::new();

        for (p_idx, panel) in pattern.panels.iter().enumerate() {
            panel_class.push(vec![panel.class_idx.map_or(-1.0, |c| c as f32)]);
            panel_edge_count.push(vec![panel.edges.len() as f32]);
            panel_translation.push(self.stats.normalize_translation(panel.translation).to_vec());
            panel_rotation.push(panel.rotation.iter().map(|r| (*r / 180.0) as f32).collect());

            for edge in &panel.edges {
                let [dx, dy] = panel.edge_vector(edge);
                let std = self.stats.vertex_std;
                edge_panel.push(vec![p_idx as f32]);
                edge_type.push(vec![edge.kind().index() as f32]);
                edge_vector.push(vec![scale(dx as f32, std[0]), scale(dy as f32, std[1])]);
                edge_curvature.push(
                    edge.curvature
                        .as_ref()
                        .map_or([0.0; 4], |c| c.params())
                        .iter()
                        .map(|v| *v as f32)
                        .collect(),
                );
            }
        }

        let mut enc = PatternEncoding::new();
        enc.insert("panel_class",       FeatureTensor::from_rows(1, &panel_class)?);
        enc.insert("panel_edge_count",  FeatureTensor::from_rows(1, &panel_edge_count)?);
        enc.insert("panel_translation", FeatureTensor::from_rows(3, &panel_translation)?);
        enc.insert("panel_rotation",    FeatureTensor::from_rows(3, &panel_rotation)?);
        enc.insert("edge_panel",        FeatureTensor::from_rows(1, &edge_panel)?);
        enc.insert("edge_type",         FeatureTensor::from_rows(1, &edge_type)?);
        enc.insert("edge_vector",       FeatureTensor::from_rows(2, &edge_vector)?);
        enc.insert("edge_curvature",    FeatureTensor::from_rows(4, &edge_curvature)?);
        Ok(enc)
    }

    fn decode(&self, ids: &[u32], tokenizer: &Tokenizer) -> Result<String> {
        tokenizer
            .decode(ids, false)
            .map_err(|e| DatasetError::tokenizer(format!("decode failed: {e}")))
    }

    fn evaluate_patterns(
        &self,
        predicted:    &[SewingPattern],
        ground_truth: &[SewingPattern],
    ) -> Result<PatternMetrics> {
        if predicted.len() != ground_truth.len() {
            return Err(DatasetError::tokenizer(format!(
                "{} predictions for {} ground-truth patterns",
                predicted.len(),
                ground_truth.len()
            )));
        }
        Ok(compare_patterns(predicted, ground_truth))
    }

    fn all_token_names(&self) -> Vec<String> {
        let mut names: Vec<String> = [PATTERN_START, PATTERN_END, PANEL_START, PANEL_END]
            .iter()
            .map(|s| s.to_string())
            .collect();
        names.extend(EdgeKind::ALL.iter().map(|k| edge_token(*k)));
        names
    }

    fn set_token_indices(&mut self, token2idx: &HashMap<String, u32>) -> Result<()> {
        let mut ids = HashMap::new();
        for name in self.all_token_names() {
            let id = token2idx
                .get(&name)
                .ok_or_else(|| DatasetError::tokenizer(format!("no index for token '{name}'")))?;
            ids.insert(name, *id);
        }
        tracing::info!("Installed {} garment token indices", ids.len());
        self.token_ids = ids;
        Ok(())
    }

    fn panel_edge_type_indices(&self) -> Option<PanelEdgeTypeIndices> {
        let edge_types = EdgeKind::ALL
            .iter()
            .map(|k| self.token_id(&edge_token(*k)).map(|id| (*k, id)))
            .collect::<Option<Vec<_>>>()?;

        Some(PanelEdgeTypeIndices {
            pattern_start: self.token_id(PATTERN_START)?,
            pattern_end:   self.token_id(PATTERN_END)?,
            panel_start:   self.token_id(PANEL_START)?,
            panel_end:     self.token_id(PANEL_END)?,
            edge_types,
        })
    }

    fn gt_stats(&self) -> &GtStats {
        &self.stats
    }
}

fn scale(x: f32, std: f32) -> f32 {
    if std == 0.0 { x } else { x / std }
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Pairwise comparison; panels are matched by name.
fn compare_patterns(predicted: &[SewingPattern], ground_truth: &[SewingPattern]) -> PatternMetrics {
    let num_pairs = predicted.len();
    if num_pairs == 0 {
        return PatternMetrics::default();
    }

    let mut panel_count_hits = 0usize;
    let mut matched_panels   = 0usize;
    let mut edge_count_hits  = 0usize;
    let mut vertex_dist      = 0.0f64;
    let mut vertex_pairs     = 0usize;
    let mut translation_dist = 0.0f64;

    for (pred, gt) in predicted.iter().zip(ground_truth) {
        if pred.num_panels() == gt.num_panels() {
            panel_count_hits += 1;
        }
        for gt_panel in &gt.panels {
            let Some(pred_panel) = pred.panel(&gt_panel.name) else {
                continue;
            };
            matched_panels += 1;
            if pred_panel.edges.len() == gt_panel.edges.len() {
                edge_count_hits += 1;
            }
            for (pv, gv) in pred_panel.vertices.iter().zip(&gt_panel.vertices) {
                vertex_dist += distance(pv, gv);
                vertex_pairs += 1;
            }
            translation_dist += distance(&pred_panel.translation, &gt_panel.translation);
        }
    }

    let ratio = |n: usize, d: usize| if d == 0 { 0.0 } else { n as f64 / d as f64 };
    let mean  = |s: f64, d: usize| if d == 0 { 0.0 } else { s / d as f64 };

    PatternMetrics {
        num_pairs,
        panel_count_accuracy: ratio(panel_count_hits, num_pairs),
        edge_count_accuracy:  ratio(edge_count_hits, matched_panels),
        vertex_l2:            mean(vertex_dist, vertex_pairs),
        translation_l2:       mean(translation_dist, matched_panels),
    }
}
