// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between files on disk and Burn tensor batches.
//
//   datapoint list + DatasetConfig
//       │
//       ▼
//   DatasetLayout      → where each file of a datapoint lives
//       │
//       ▼
//   patterns / vision  → parse specifications, decode renders
//       │
//       ▼
//   PatternCache       → parsed + encoded patterns, captions
//       │
//       ▼
//   GarmentDataset     → implements Burn's Dataset trait
//       │              (sampling, prompts, conversation)
//       ▼
//   GarmentBatcher     → stacks samples into tensor batches

/// Serialisable dataset construction parameters
pub mod config;

/// Datapoint list sources and name helpers
pub mod loader;

/// On-disk file layout of a datapoint
pub mod layout;

/// Specification JSON and panel-class parsing
pub mod patterns;

/// CLIP image preprocessing
pub mod vision;

/// Sample-type distribution and fallbacks
pub mod sampling;

/// Question and answer templates
pub mod prompts;

/// Chat template rendering
pub mod conversation;

/// Per-datapoint pattern cache
pub mod cache;

/// Implements Burn's Dataset trait for garment samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Reproduces recorded train/validation/test splits
pub mod splitter;
