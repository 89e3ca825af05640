// ============================================================
// Layer 4 — Sample-Type Sampling Policy
// ============================================================
// Each fetch draws one of the five sample types from a fixed
// categorical distribution, then downgrades the draw when the
// datapoint lacks what that type needs:
//
//   1. editing drawn, no edited pattern      → image
//   2. text type drawn, no captions on disk  → image
//
// Rules are applied in that order.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::error::{DatasetError, Result};
use crate::domain::sample_type::SampleType;

const SUM_TOLERANCE: f64 = 1e-6;

/// Probabilities of the five sample types, in tag order:
/// image, descriptive text, speculative text, image+text, editing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct SamplingRates {
    rates: [f64; 5],
    dist:  WeightedIndex<f64>,
}

impl SamplingRates {
    /// Validate and build the distribution.
    pub fn new(rates: &[f64]) -> Result<Self> {
        let rates: [f64; 5] = rates
            .try_into()
            .map_err(|_| DatasetError::invalid_rates(rates, "expected 5 probabilities"))?;

        if rates.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(DatasetError::invalid_rates(&rates, "probabilities must be finite and >= 0"));
        }
        let sum: f64 = rates.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(DatasetError::invalid_rates(&rates, format!("must sum to 1, got {sum}")));
        }

        let dist = WeightedIndex::new(rates)
            .map_err(|e| DatasetError::invalid_rates(&rates, e.to_string()))?;
        Ok(Self { rates, dist })
    }

    /// All probability mass on one type.
    pub fn only(sample_type: SampleType) -> Result<Self> {
        let mut rates = [0.0; 5];
        rates[sample_type.tag()] = 1.0;
        Self::new(&rates)
    }

    pub fn rates(&self) -> &[f64; 5] {
        &self.rates
    }

    pub fn rate(&self, sample_type: SampleType) -> f64 {
        self.rates[sample_type.tag()]
    }

    /// Draw a sample type before fallbacks.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SampleType> {
        SampleType::try_from(self.dist.sample(rng))
    }
}

impl TryFrom<Vec<f64>> for SamplingRates {
    type Error = DatasetError;

    fn try_from(rates: Vec<f64>) -> Result<Self> {
        Self::new(&rates)
    }
}

impl From<SamplingRates> for Vec<f64> {
    fn from(rates: SamplingRates) -> Self {
        rates.rates.to_vec()
    }
}

impl PartialEq for SamplingRates {
    fn eq(&self, other: &Self) -> bool {
        self.rates == other.rates
    }
}

/// Apply the fallback rules to a drawn type.
pub fn resolve_sample_type(drawn: SampleType, has_edited: bool, has_captions: bool) -> SampleType {
    let mut resolved = drawn;
    if resolved == SampleType::Editing && !has_edited {
        resolved = SampleType::Image;
    }
    if resolved.requires_text() && !has_captions {
        resolved = SampleType::Image;
    }
    if resolved != drawn {
        tracing::debug!("Sample type {} unavailable, falling back to {}", drawn, resolved);
    }
    resolved
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_rejects_wrong_length() {
        assert!(SamplingRates::new(&[0.5, 0.5]).is_err());
    }

    #[test]
    fn test_rejects_bad_sum_and_negatives() {
        assert!(SamplingRates::new(&[0.5, 0.5, 0.5, 0.0, 0.0]).is_err());
        assert!(SamplingRates::new(&[1.5, -0.5, 0.0, 0.0, 0.0]).is_err());
        assert!(SamplingRates::new(&[f64::NAN, 0.0, 0.0, 0.0, 1.0]).is_err());
    }

    #[test]
    fn test_one_hot_always_draws_that_type() {
        let mut rng = StdRng::seed_from_u64(7);
        for t in SampleType::ALL {
            let rates = SamplingRates::only(t).unwrap();
            assert_eq!(rates.rate(t), 1.0);
            assert_eq!(rates.rates().iter().sum::<f64>(), 1.0);
            for _ in 0..20 {
                assert_eq!(rates.draw(&mut rng).unwrap(), t);
            }
        }
    }

    #[test]
    fn test_draw_frequencies_follow_rates() {
        let rates = SamplingRates::new(&[0.5, 0.0, 0.0, 0.5, 0.0]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let mut counts = [0usize; 5];
        for _ in 0..2000 {
            counts[rates.draw(&mut rng).unwrap().tag()] += 1;
        }
        assert_eq!(counts[1] + counts[2] + counts[4], 0);
        assert!(counts[0] > 800 && counts[3] > 800);
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let r: SamplingRates = serde_json::from_str("[0.2, 0.2, 0.2, 0.2, 0.2]").unwrap();
        assert_eq!(r.rate(SampleType::Editing), 0.2);
        assert!(serde_json::from_str::<SamplingRates>("[1.0, 1.0, 0, 0, 0]").is_err());
    }

    #[test]
    fn test_editing_without_edit_falls_back_to_image() {
        assert_eq!(resolve_sample_type(SampleType::Editing, false, true), SampleType::Image);
        assert_eq!(resolve_sample_type(SampleType::Editing, true, false), SampleType::Editing);
    }

    #[test]
    fn test_text_without_captions_falls_back_to_image() {
        for t in [SampleType::DescriptiveText, SampleType::SpeculativeText, SampleType::ImageText] {
            assert_eq!(resolve_sample_type(t, true, false), SampleType::Image);
            assert_eq!(resolve_sample_type(t, false, true), t);
        }
    }
}
