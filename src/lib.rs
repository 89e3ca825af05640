//! Multimodal garment dataset: sewing-pattern specifications,
//! renders and captions turned into question/answer samples
//! for a pattern-generating language model.

pub mod application;
pub mod data;
pub mod domain;
pub mod infra;

#[cfg(test)]
pub(crate) mod test_support;

pub use data::config::DatasetConfig;
pub use data::dataset::GarmentDataset;
pub use domain::error::{DatasetError, Result};
pub use domain::sample::GarmentSample;
pub use domain::sample_type::SampleType;
