// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits describing garment samples:
// sewing patterns, encodings, captions, sample kinds and the
// collaborator traits the dataset is built against.
//
// Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O
//   - Only data types, enums and traits

/// Typed dataset errors
pub mod error;

/// The five sample kinds and their tags
pub mod sample_type;

/// Sewing patterns, panels, edges and panel classes
pub mod pattern;

/// Feature tensors produced by a garment tokenizer
pub mod encoding;

/// Caption and editing-caption files
pub mod captions;

/// The assembled training sample
pub mod sample;

/// Statistics, marker indices and metrics shared with tokenizers
pub mod tokens;

/// Garment tokenizer and image preprocessor abstractions
pub mod traits;
