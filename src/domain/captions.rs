// ============================================================
// Layer 3 — Caption Types
// ============================================================
// Text annotations stored next to a datapoint:
//   captions.json          → Captions
//   editing_caption.json   → EditingCaptions

use serde::{Deserialize, Serialize};

use crate::domain::error::{DatasetError, Result};

/// Free-text annotations of a garment.
///
/// Both keys are optional on disk; a sample type that needs a
/// missing key fails when it is drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captions {
    /// What the garment looks like.
    #[serde(default)]
    pub description: Option<String>,

    /// Where or when it would be worn.
    #[serde(default)]
    pub occasion: Option<String>,
}

impl Captions {
    pub fn description_for(&self, datapoint: &str) -> Result<&str> {
        self.description
            .as_deref()
            .ok_or_else(|| DatasetError::MissingCaptionField {
                datapoint: datapoint.to_string(),
                field: "description",
            })
    }

    pub fn occasion_for(&self, datapoint: &str) -> Result<&str> {
        self.occasion
            .as_deref()
            .ok_or_else(|| DatasetError::MissingCaptionField {
                datapoint: datapoint.to_string(),
                field: "occasion",
            })
    }
}

/// Instructions describing an edit in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditingCaptions {
    /// Turns the ground-truth pattern into the edited one.
    pub editing_description_forward: String,

    /// Turns the edited pattern back into the ground truth.
    pub editing_description_reverse: String,
}
