// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by several layers:
//
//   garment_tokenizer.rs : reference GarmentTokenizer
//                          Encodes patterns into panel and edge
//                          feature groups and scores predictions.
//
//   tokenizer_store.rs   : language-model tokenizer persistence
//                          Loads/saves tokenizer.json and adds
//                          the garment special tokens to it.
//
//   run_store.rs         : JSON inputs and run outputs
//                          Configs, split files, gt statistics,
//                          sample summaries.
//
//   metrics.rs           : evaluation metrics CSV

/// Reference garment tokenizer
pub mod garment_tokenizer;

/// Tokenizer loading, saving and vocabulary extension
pub mod tokenizer_store;

/// Config, split and sample persistence
pub mod run_store;

/// Pattern metrics CSV logger
pub mod metrics;
