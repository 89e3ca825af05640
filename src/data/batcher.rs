// ============================================================
// Layer 4 — Garment Batcher
// ============================================================
// Implements Burn's Batcher trait to stack GarmentSamples.
//
// Only the image pixels and the sample-type tags become tensors:
//
//   images:       N × [C, H, W]  → Tensor [N, C, H, W]
//   sample_types: N tags         → Int Tensor [N]
//
// Text and pattern encodings have per-sample lengths, so they
// are carried as-is for the model side to tokenize and pad.

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::encoding::PatternEncoding;
use crate::domain::pattern::SewingPattern;
use crate::domain::sample::GarmentSample;

// ─── GarmentBatch ─────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct GarmentBatch<B: Backend> {
    /// Preprocessed renders, shape [batch_size, C, H, W]
    pub images: Tensor<B, 4>,

    /// Sample-type tags 0..=4, shape [batch_size]
    pub sample_types: Tensor<B, 1, Int>,

    pub conversations:               Vec<String>,
    pub question_only_conversations: Vec<String>,
    pub questions:                   Vec<String>,
    pub pattern_encodings:           Vec<PatternEncoding>,
    pub question_pattern_encodings:  Vec<PatternEncoding>,
    pub patterns:                    Vec<Vec<SewingPattern>>,
}

impl<B: Backend> GarmentBatch<B> {
    pub fn batch_size(&self) -> usize {
        self.conversations.len()
    }
}

// ─── GarmentBatcher ───────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct GarmentBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> GarmentBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<GarmentSample, GarmentBatch<B>> for GarmentBatcher<B> {
    /// Every sample's image has the processor's output shape, so
    /// the flat pixel buffers concatenate into one [N, C, H, W] block.
    fn batch(&self, items: Vec<GarmentSample>) -> GarmentBatch<B> {
        let batch_size = items.len();
        let [c, h, w]  = items.first().map_or([0, 0, 0], |s| s.image.shape());

        let pixels: Vec<f32> = items
            .iter()
            .flat_map(|s| s.image.data.iter().copied())
            .collect();

        let tags: Vec<i32> = items
            .iter()
            .map(|s| s.type_tag() as i32)
            .collect();

        let images = Tensor::<B, 1>::from_floats(
            pixels.as_slice(), &self.device
        ).reshape([batch_size, c, h, w]);

        let sample_types = Tensor::<B, 1, Int>::from_ints(
            tags.as_slice(), &self.device
        );

        let mut batch = GarmentBatch {
            images,
            sample_types,
            conversations:               Vec::with_capacity(batch_size),
            question_only_conversations: Vec::with_capacity(batch_size),
            questions:                   Vec::with_capacity(batch_size),
            pattern_encodings:           Vec::with_capacity(batch_size),
            question_pattern_encodings:  Vec::with_capacity(batch_size),
            patterns:                    Vec::with_capacity(batch_size),
        };

        for s in items {
            batch.conversations.extend(s.conversations);
            batch.question_only_conversations.extend(s.question_only_conversations);
            batch.questions.extend(s.questions);
            batch.pattern_encodings.push(s.pattern_encoding);
            batch.question_pattern_encodings.push(s.question_pattern_encoding);
            batch.patterns.push(s.patterns);
        }
        batch
    }
}
