// ============================================================
// Layer 4 — Question / Answer Templates
// ============================================================
// Each sample type owns a pool of question templates. One
// question and one answer are drawn uniformly per sample and
// their placeholders filled:
//
//   {sent}     caption text (description, occasion or edit)
//   {pattern}  PATTERN_TOKEN, later swapped for pattern tokens
//
// IMAGE_TOKEN marks where the vision features are spliced in.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::sample_type::SampleType;

pub const IMAGE_TOKEN: &str = "<image>";
pub const PATTERN_TOKEN: &str = "<pattern>";

pub const SHORT_QUESTION_LIST: &[&str] = &[
    "<image>\nCan you estimate the sewing pattern of the garment in this image?",
    "<image>\nWhat is the sewing pattern of the garment shown here?",
    "<image>\nPlease recover the sewing pattern of this garment.",
    "<image>\nGenerate a sewing pattern that reproduces the garment in the picture.",
    "<image>\nWhich sewing pattern would produce this garment?",
];

pub const DESCRIPTIVE_TEXT_QUESTION_LIST: &[&str] = &[
    "Can you generate the sewing pattern of a garment matching this description: {sent}",
    "Here is a garment description: {sent} Please output its sewing pattern.",
    "Design a sewing pattern for the following garment: {sent}",
    "What sewing pattern fits this description? {sent}",
];

pub const SPECULATIVE_TEXT_QUESTION_LIST: &[&str] = &[
    "Design a garment suitable for the following occasion and give its sewing pattern: {sent}",
    "I need an outfit for this: {sent} Can you create a sewing pattern for it?",
    "What garment would you make for this occasion? {sent} Please output the sewing pattern.",
    "Suggest a sewing pattern for something to wear here: {sent}",
];

pub const IMAGE_TEXT_QUESTION_LIST: &[&str] = &[
    "<image>\nThe garment in this image is described as: {sent} What is its sewing pattern?",
    "<image>\nUsing the image and this description, {sent} generate the sewing pattern.",
    "<image>\nHere is a picture of a garment and a description of it: {sent} Please output the sewing pattern.",
];

pub const EDITING_QUESTION_LIST: &[&str] = &[
    "Here is a sewing pattern: {pattern}. Please edit it as follows: {sent} What is the resulting sewing pattern?",
    "Given the sewing pattern {pattern}, apply this change: {sent}",
    "Modify the sewing pattern {pattern} according to the instruction: {sent}",
];

pub const ANSWER_LIST: &[&str] = &[
    "It is {pattern}.",
    "Sure, {pattern}.",
    "Sure, it is {pattern}.",
    "Sure, the sewing pattern is {pattern}.",
    "{pattern}.",
];

/// Question templates used for a sample type.
pub fn question_pool(sample_type: SampleType) -> &'static [&'static str] {
    match sample_type {
        SampleType::Image           => SHORT_QUESTION_LIST,
        SampleType::DescriptiveText => DESCRIPTIVE_TEXT_QUESTION_LIST,
        SampleType::SpeculativeText => SPECULATIVE_TEXT_QUESTION_LIST,
        SampleType::ImageText       => IMAGE_TEXT_QUESTION_LIST,
        SampleType::Editing         => EDITING_QUESTION_LIST,
    }
}

/// Substitute `{sent}` (when given) and `{pattern}` in a template.
pub fn fill(template: &str, sent: Option<&str>) -> String {
    let filled = template.replace("{pattern}", PATTERN_TOKEN);
    match sent {
        Some(text) => filled.replace("{sent}", text),
        None       => filled,
    }
}

/// Draw one question and one answer for a sample type.
pub fn draw_question_answer<R: Rng + ?Sized>(
    rng:         &mut R,
    sample_type: SampleType,
    sent:        Option<&str>,
) -> (String, String) {
    let question = question_pool(sample_type)
        .choose(rng)
        .map(|t| fill(t, sent))
        .unwrap_or_default();
    let answer = ANSWER_LIST
        .choose(rng)
        .map(|t| fill(t, None))
        .unwrap_or_default();
    (question, answer)
}
