// ============================================================
// Layer 3 — Sample Type
// ============================================================
// The five kinds of training sample the dataset can produce.
// The discriminant is the integer tag returned with every
// sample and the position of the kind in the sampling-rate
// vector.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DatasetError;

/// Kind of conversation a sample is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleType {
    /// Render image only.
    Image = 0,
    /// Free-form garment description.
    DescriptiveText = 1,
    /// Occasion the garment would be worn for.
    SpeculativeText = 2,
    /// Render image plus description.
    ImageText = 3,
    /// Before/after pattern pair with an editing instruction.
    Editing = 4,
}

impl SampleType {
    /// All kinds, in sampling-rate order.
    pub const ALL: [SampleType; 5] = [
        SampleType::Image,
        SampleType::DescriptiveText,
        SampleType::SpeculativeText,
        SampleType::ImageText,
        SampleType::Editing,
    ];

    /// Integer tag returned to callers.
    pub fn tag(self) -> usize {
        self as usize
    }

    /// True for the kinds whose question embeds caption text.
    pub fn requires_text(self) -> bool {
        matches!(
            self,
            SampleType::DescriptiveText | SampleType::SpeculativeText | SampleType::ImageText
        )
    }

    /// True for the kinds that load a render image.
    pub fn uses_image(self) -> bool {
        matches!(self, SampleType::Image | SampleType::ImageText)
    }

    /// Short mode name used in logs and reports.
    pub fn mode_name(self) -> &'static str {
        match self {
            SampleType::Image           => "image",
            SampleType::DescriptiveText => "description",
            SampleType::SpeculativeText => "occasion",
            SampleType::ImageText       => "text_image",
            SampleType::Editing         => "editing",
        }
    }

    /// Mode names of every kind, in tag order.
    pub fn mode_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.mode_name()).collect()
    }
}

impl TryFrom<usize> for SampleType {
    type Error = DatasetError;

    fn try_from(tag: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(tag)
            .copied()
            .ok_or(DatasetError::InvalidSampleType(tag))
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_follow_rate_order() {
        for (i, t) in SampleType::ALL.iter().enumerate() {
            assert_eq!(t.tag(), i);
            assert_eq!(SampleType::try_from(i).unwrap(), *t);
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = SampleType::try_from(5).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidSampleType(5)));
    }

    #[test]
    fn test_requires_text() {
        assert!(!SampleType::Image.requires_text());
        assert!(SampleType::DescriptiveText.requires_text());
        assert!(SampleType::SpeculativeText.requires_text());
        assert!(SampleType::ImageText.requires_text());
        assert!(!SampleType::Editing.requires_text());
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(
            SampleType::mode_names(),
            vec!["image", "description", "occasion", "text_image", "editing"]
        );
    }
}
