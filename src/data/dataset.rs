// ============================================================
// Layer 4 — Garment Dataset
// ============================================================
// Implements Burn's Dataset trait over a list of garment
// datapoints. Every fetch is stochastic:
//
//   index
//     │
//     ▼
//   PatternCache      → gt / edited pattern + encodings, captions
//     │
//     ▼
//   SamplingRates     → draw a sample type, then apply fallbacks
//     │
//     ▼
//   per-type inputs   → render image, caption text, edit direction
//     │
//     ▼
//   prompts + chat    → question / answer through the template
//     │
//     ▼
//   GarmentSample
//
// All randomness comes from one seedable generator. The cache
// and the generator sit behind mutexes because burn shares the
// dataset across loader workers.

use burn::data::dataset::Dataset;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Mutex, MutexGuard, PoisonError},
};
use tokenizers::Tokenizer;

use crate::data::cache::{CacheEntry, PatternCache};
use crate::data::config::DatasetConfig;
use crate::data::conversation::Conversation;
use crate::data::layout::DatasetLayout;
use crate::data::loader::data_name;
use crate::data::prompts::draw_question_answer;
use crate::data::sampling::{resolve_sample_type, SamplingRates};
use crate::data::splitter::{split_from_dict, DataSplit, SplitDict};
use crate::data::vision::{load_rgb, ClipImageProcessor};
use crate::domain::captions::Captions;
use crate::domain::encoding::PatternEncoding;
use crate::domain::error::{DatasetError, Result};
use crate::domain::pattern::{PanelClasses, SewingPattern};
use crate::domain::sample::{GarmentSample, ImageTensor};
use crate::domain::sample_type::SampleType;
use crate::domain::tokens::{GtStats, PanelEdgeTypeIndices, PatternMetrics};
use crate::domain::traits::{GarmentTokenizer, ImagePreprocessor};

pub const BEFORE_PREFIX: &str = "before_";
pub const AFTER_PREFIX:  &str = "after_";

/// Random choices made for one fetch, drawn under a single lock.
struct Draw {
    sample_type: SampleType,
    image_path:  Option<PathBuf>,
    forward:     bool,
    question:    String,
    answer:      String,
}

pub struct GarmentDataset<T: GarmentTokenizer> {
    layout:            DatasetLayout,
    datapoints:        Vec<String>,
    sampling_rates:    SamplingRates,
    editing_flip_prob: f64,
    tokenizer:         T,
    image_processor:   Box<dyn ImagePreprocessor>,
    panel_classes:     Option<PanelClasses>,
    conversation:      Conversation,
    cache:             PatternCache,
    rng:               Mutex<StdRng>,
}

impl<T: GarmentTokenizer> GarmentDataset<T> {
    /// Build the dataset from a config and a garment tokenizer.
    ///
    /// Resolves the datapoint list, the image processor of the
    /// configured vision tower and the optional panel classes.
    /// Nothing per-datapoint is read until the first fetch.
    pub fn new(config: &DatasetConfig, tokenizer: T) -> anyhow::Result<Self> {
        config.validate()?;

        let datapoints      = config.datapoints.resolve()?;
        let image_processor = ClipImageProcessor::from_pretrained(&config.vision_tower, config.image_size)?;

        let panel_classes = match &config.panel_classification {
            Some(path) => Some(PanelClasses::from_file(path)?),
            None       => None,
        };
        if let Some(classes) = &panel_classes {
            tracing::info!("The panel classes in this dataset are: {:?}", classes.classes());
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };

        tracing::info!(
            "Garment dataset ready: {} datapoints, sampling rates {:?}, editing flip prob {}",
            datapoints.len(),
            config.sampling_rate.rates(),
            config.editing_flip_prob
        );

        Ok(Self {
            layout: DatasetLayout::new(
                config.root_dir.clone(),
                config.editing_dir.clone(),
                config.caption_dir.clone(),
            ),
            datapoints,
            sampling_rates: config.sampling_rate.clone(),
            editing_flip_prob: config.editing_flip_prob,
            tokenizer,
            image_processor: Box::new(image_processor),
            panel_classes,
            conversation: Conversation::default(),
            cache: PatternCache::new(),
            rng: Mutex::new(rng),
        })
    }

    /// Replace the image preprocessing stage.
    pub fn with_image_processor(mut self, processor: impl ImagePreprocessor + 'static) -> Self {
        self.image_processor = Box::new(processor);
        self
    }

    /// Replace the chat template.
    pub fn with_conversation(mut self, conversation: Conversation) -> Self {
        self.conversation = conversation;
        self
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ─── Fetch ────────────────────────────────────────────────────────────────

    /// Build one sample for `index`.
    ///
    /// Loads (or reuses) the datapoint's patterns, draws a sample type
    /// and the inputs that type needs, and renders the exchange.
    /// Editing samples rename the cached patterns in place.
    pub fn fetch(&self, index: usize) -> Result<GarmentSample> {
        let datapoint = self.datapoints.get(index).ok_or(DatasetError::IndexOutOfRange {
            index,
            len: self.datapoints.len(),
        })?;
        let name = data_name(datapoint);

        let entry = self.cache.get_or_load(name, || {
            CacheEntry::load(&self.layout, datapoint, &self.tokenizer, self.panel_classes.as_ref())
        })?;

        let draw = self.draw(datapoint, &entry)?;

        let [c, h, w] = self.image_processor.output_shape();
        let image = match &draw.image_path {
            Some(path) => self.image_processor.preprocess(&load_rgb(path)?)?,
            None       => ImageTensor::zeros(c, h, w),
        };

        let (pattern_encoding, question_pattern_encoding, patterns) =
            if draw.sample_type == SampleType::Editing {
                self.editing_inputs(name, &entry, draw.forward)?
            } else {
                (entry.encoding.clone(), PatternEncoding::new(), vec![entry.gt_pattern.clone()])
            };

        let mut conversation = self.conversation.clone();
        let (full, prompt_only) = conversation.render_pair(&draw.question, &draw.answer);

        Ok(GarmentSample {
            pattern_encoding,
            question_pattern_encoding,
            image_path: draw.image_path,
            image,
            conversations: vec![full],
            question_only_conversations: vec![prompt_only],
            questions: vec![draw.question],
            patterns,
            sample_type: draw.sample_type,
        })
    }

    fn draw(&self, datapoint: &str, entry: &CacheEntry) -> Result<Draw> {
        let mut rng = self.rng();

        let drawn = self.sampling_rates.draw(&mut *rng)?;
        let sample_type =
            resolve_sample_type(drawn, entry.edited.is_some(), entry.captions.is_some());

        let image_path = if sample_type.uses_image() {
            self.layout.render_paths(datapoint).choose(&mut *rng).cloned()
        } else {
            None
        };

        let forward =
            sample_type == SampleType::Editing && rng.gen::<f64>() < self.editing_flip_prob;

        let sent = match sample_type {
            SampleType::Image => None,
            SampleType::DescriptiveText | SampleType::ImageText => {
                Some(captions_of(entry, datapoint)?.description_for(datapoint)?.to_string())
            }
            SampleType::SpeculativeText => {
                Some(captions_of(entry, datapoint)?.occasion_for(datapoint)?.to_string())
            }
            SampleType::Editing => {
                let edited = entry
                    .edited
                    .as_ref()
                    .ok_or(DatasetError::InvalidSampleType(sample_type.tag()))?;
                let text = if forward {
                    &edited.captions.editing_description_forward
                } else {
                    &edited.captions.editing_description_reverse
                };
                Some(text.clone())
            }
        };

        let (question, answer) = draw_question_answer(&mut *rng, sample_type, sent.as_deref());
        Ok(Draw { sample_type, image_path, forward, question, answer })
    }

    /// Encodings and patterns of an editing sample.
    ///
    /// Forward goes ground truth → edited, reverse the other way. The
    /// stored patterns get "before_"/"after_" prefixed to their names.
    fn editing_inputs(
        &self,
        name:    &str,
        entry:   &CacheEntry,
        forward: bool,
    ) -> Result<(PatternEncoding, PatternEncoding, Vec<SewingPattern>)> {
        let edited = entry
            .edited
            .as_ref()
            .ok_or(DatasetError::InvalidSampleType(SampleType::Editing.tag()))?;

        let (before, after) = if forward {
            (&entry.encoding, &edited.encoding)
        } else {
            (&edited.encoding, &entry.encoding)
        };
        let encoding = PatternEncoding::concat(before, after)?;

        let patterns = self
            .cache
            .update(name, |cached| tag_editing_pair(cached, forward))
            .unwrap_or_else(|| tag_editing_pair(&mut entry.clone(), forward));

        Ok((encoding, before.clone(), patterns))
    }

    // ─── Accessors ────────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.datapoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datapoints.is_empty()
    }

    pub fn datapoints(&self) -> &[String] {
        &self.datapoints
    }

    /// Datapoint name at `index`.
    pub fn item_info(&self, index: usize) -> Option<&str> {
        self.datapoints.get(index).map(String::as_str)
    }

    pub fn mode_names(&self) -> Vec<&'static str> {
        SampleType::mode_names()
    }

    /// Panel class names, empty when no classification was configured.
    pub fn panel_classes(&self) -> &[String] {
        self.panel_classes.as_ref().map_or(&[], |c| c.classes())
    }

    pub fn cache(&self) -> &PatternCache {
        &self.cache
    }

    pub fn layout(&self) -> &DatasetLayout {
        &self.layout
    }

    pub fn split_from_dict(&self, split: &SplitDict) -> DataSplit {
        split_from_dict(&self.datapoints, split)
    }

    // ─── Garment tokenizer pass-throughs ──────────────────────────────────────

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    pub fn panel_edge_type_indices(&self) -> Option<PanelEdgeTypeIndices> {
        self.tokenizer.panel_edge_type_indices()
    }

    pub fn gt_stats(&self) -> &GtStats {
        self.tokenizer.gt_stats()
    }

    pub fn all_token_names(&self) -> Vec<String> {
        self.tokenizer.all_token_names()
    }

    pub fn set_token_indices(&mut self, token2idx: &HashMap<String, u32>) -> Result<()> {
        self.tokenizer.set_token_indices(token2idx)
    }

    pub fn decode(&self, ids: &[u32], tokenizer: &Tokenizer) -> Result<String> {
        self.tokenizer.decode(ids, tokenizer)
    }

    pub fn evaluate_patterns(
        &self,
        predicted:    &[SewingPattern],
        ground_truth: &[SewingPattern],
    ) -> Result<PatternMetrics> {
        self.tokenizer.evaluate_patterns(predicted, ground_truth)
    }
}

fn captions_of<'a>(entry: &'a CacheEntry, datapoint: &str) -> Result<&'a Captions> {
    entry.captions.as_ref().ok_or_else(|| DatasetError::MissingCaptionField {
        datapoint: datapoint.to_string(),
        field: "captions",
    })
}

/// Prefix the pair's names in place and return `[before, after]`.
fn tag_editing_pair(entry: &mut CacheEntry, forward: bool) -> Vec<SewingPattern> {
    let Some(edited) = entry.edited.as_mut() else {
        return vec![entry.gt_pattern.clone()];
    };
    let (before, after) = if forward {
        (&mut entry.gt_pattern, &mut edited.pattern)
    } else {
        (&mut edited.pattern, &mut entry.gt_pattern)
    };
    before.prefix_name(BEFORE_PREFIX);
    after.prefix_name(AFTER_PREFIX);
    vec![before.clone(), after.clone()]
}

// ─── Burn Dataset Trait Implementation ────────────────────────────────────────
// Burn's data loader ends the epoch at the first None, so None is
// reserved for indices past the end. A datapoint that fails to load
// panics with the cause; `fetch` returns it as an error instead.
impl<T: GarmentTokenizer> Dataset<GarmentSample> for GarmentDataset<T> {
    fn get(&self, index: usize) -> Option<GarmentSample> {
        if index >= self.datapoints.len() {
            return None;
        }
        match self.fetch(index) {
            Ok(sample) => Some(sample),
            Err(e) => {
                tracing::error!("Cannot load sample {}: {}", index, e);
                panic!("sample {index}: {e}");
            }
        }
    }

    fn len(&self) -> usize {
        self.datapoints.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::batcher::{GarmentBatch, GarmentBatcher};
    use crate::infra::garment_tokenizer::BasicGarmentTokenizer;
    use crate::test_support::DatasetFixture;
    use burn::backend::NdArray;
    use burn::data::dataloader::{DataLoader, DataLoaderBuilder};
    use std::{fs, sync::Arc};

    fn dataset(fx: &DatasetFixture, names: &[&str], rates: SamplingRates) -> GarmentDataset<BasicGarmentTokenizer> {
        GarmentDataset::new(&fx.config(names, rates), BasicGarmentTokenizer::default()).unwrap()
    }

    fn rows(enc: &PatternEncoding, key: &str) -> usize {
        enc.get(key).unwrap().rows()
    }

    #[test]
    fn test_image_sample() {
        let fx = DatasetFixture::new();
        fx.add_garment("g1");
        let ds = dataset(&fx, &["g1"], SamplingRates::only(SampleType::Image).unwrap());

        let s = ds.fetch(0).unwrap();
        assert_eq!(s.sample_type, SampleType::Image);
        assert_eq!(s.image.shape(), [3, 32, 32]);
        assert!(!s.image.is_zero());
        assert!(ds.layout().render_paths("g1").contains(s.image_path.as_ref().unwrap()));
        assert_eq!(s.patterns.len(), 1);
        assert_eq!(s.patterns[0].name, "g1");
        assert!(s.question_pattern_encoding.is_empty());
        assert_eq!(s.conversations.len(), 1);
        assert!(s.questions[0].starts_with("<image>"));
        assert!(s.conversations[0].contains(&s.questions[0]));
        assert!(s.question_only_conversations[0].ends_with("ASSISTANT:"));
    }

    #[test]
    fn test_descriptive_text_sample() {
        let fx = DatasetFixture::new();
        fx.add_garment("g1");
        fx.add_captions("g1", Some("a flared midi skirt"), None);
        let ds = dataset(&fx, &["g1"], SamplingRates::only(SampleType::DescriptiveText).unwrap());

        let s = ds.fetch(0).unwrap();
        assert_eq!(s.sample_type, SampleType::DescriptiveText);
        assert!(s.image.is_zero());
        assert!(s.image_path.is_none());
        assert!(s.questions[0].contains("a flared midi skirt"));
    }

    #[test]
    fn test_image_text_sample_uses_both() {
        let fx = DatasetFixture::new();
        fx.add_garment("g1");
        fx.add_captions("g1", Some("a flared midi skirt"), None);
        let ds = dataset(&fx, &["g1"], SamplingRates::only(SampleType::ImageText).unwrap());

        let s = ds.fetch(0).unwrap();
        assert!(!s.image.is_zero());
        assert!(s.questions[0].contains("a flared midi skirt"));
    }

    #[test]
    fn test_speculative_text_needs_occasion() {
        let fx = DatasetFixture::new();
        fx.add_garment("g1");
        fx.add_captions("g1", Some("a flared midi skirt"), None);
        let ds = dataset(&fx, &["g1"], SamplingRates::only(SampleType::SpeculativeText).unwrap());

        assert!(matches!(
            ds.fetch(0),
            Err(DatasetError::MissingCaptionField { field: "occasion", .. })
        ));
    }

    #[test]
    fn test_text_types_fall_back_without_captions() {
        let fx = DatasetFixture::new();
        fx.add_garment("g1");
        for t in [SampleType::DescriptiveText, SampleType::SpeculativeText, SampleType::ImageText] {
            let ds = dataset(&fx, &["g1"], SamplingRates::only(t).unwrap());
            let s = ds.fetch(0).unwrap();
            assert_eq!(s.sample_type, SampleType::Image);
            assert!(!s.image.is_zero());
        }
    }

    #[test]
    fn test_editing_falls_back_without_edit() {
        let fx = DatasetFixture::new();
        fx.add_garment("g1");
        fx.add_captions("g1", Some("a skirt"), Some("a picnic"));
        let ds = dataset(&fx, &["g1"], SamplingRates::only(SampleType::Editing).unwrap());

        let s = ds.fetch(0).unwrap();
        assert_eq!(s.sample_type, SampleType::Image);
        assert_eq!(s.patterns[0].name, "g1");
    }

    #[test]
    fn test_forward_editing_sample() {
        let fx = DatasetFixture::new();
        fx.add_garment("g1");
        fx.add_edit("g1");
        let mut cfg = fx.config(&["g1"], SamplingRates::only(SampleType::Editing).unwrap());
        cfg.editing_flip_prob = 1.0;
        let ds = GarmentDataset::new(&cfg, BasicGarmentTokenizer::default()).unwrap();

        let s = ds.fetch(0).unwrap();
        assert_eq!(s.sample_type, SampleType::Editing);
        assert!(s.image.is_zero());
        assert!(s.questions[0].contains("make it longer"));

        // skirt (7 edges) stacked on shirt (11 edges)
        assert_eq!(rows(&s.pattern_encoding, "edge_type"), 18);
        assert_eq!(rows(&s.pattern_encoding, "panel_translation"), 5);
        assert_eq!(rows(&s.question_pattern_encoding, "edge_type"), 7);

        assert_eq!(s.patterns[0].name, "before_g1");
        assert_eq!(s.patterns[0].num_panels(), 2);
        assert_eq!(s.patterns[1].name, "after_g1");
        assert_eq!(s.patterns[1].num_panels(), 3);
    }

    #[test]
    fn test_reverse_editing_sample() {
        let fx = DatasetFixture::new();
        fx.add_garment("g1");
        fx.add_edit("g1");
        let mut cfg = fx.config(&["g1"], SamplingRates::only(SampleType::Editing).unwrap());
        cfg.editing_flip_prob = 0.0;
        let ds = GarmentDataset::new(&cfg, BasicGarmentTokenizer::default()).unwrap();

        let s = ds.fetch(0).unwrap();
        assert!(s.questions[0].contains("make it shorter"));
        assert_eq!(rows(&s.question_pattern_encoding, "edge_type"), 11);
        assert_eq!(s.patterns[0].num_panels(), 3);
        assert_eq!(s.patterns[0].name, "before_g1");
        assert_eq!(s.patterns[1].num_panels(), 2);
    }

    #[test]
    fn test_editing_prefixes_accumulate_in_cache() {
        let fx = DatasetFixture::new();
        fx.add_garment("g1");
        fx.add_edit("g1");
        let mut cfg = fx.config(&["g1"], SamplingRates::only(SampleType::Editing).unwrap());
        cfg.editing_flip_prob = 1.0;
        let ds = GarmentDataset::new(&cfg, BasicGarmentTokenizer::default()).unwrap();

        ds.fetch(0).unwrap();
        let s = ds.fetch(0).unwrap();
        assert_eq!(s.patterns[0].name, "before_before_g1");
        assert_eq!(ds.cache().get("g1").unwrap().gt_pattern.name, "before_before_g1");
    }

    #[test]
    fn test_cache_reused_across_fetches() {
        let fx = DatasetFixture::new();
        fx.add_garment("g1");
        let ds = dataset(&fx, &["g1"], SamplingRates::only(SampleType::Image).unwrap());

        let first = ds.fetch(0).unwrap();
        let snapshot = ds.cache().get("g1").unwrap();

        // files gone: a second fetch must not touch the specification
        fs::remove_file(ds.layout().spec_path("g1")).unwrap();
        let second = ds.fetch(0).unwrap();

        assert_eq!(ds.cache().len(), 1);
        assert_eq!(ds.cache().get("g1").unwrap(), snapshot);
        assert_eq!(first.pattern_encoding, second.pattern_encoding);
    }

    #[test]
    fn test_index_out_of_range() {
        let fx = DatasetFixture::new();
        fx.add_garment("g1");
        let ds = dataset(&fx, &["g1"], SamplingRates::only(SampleType::Image).unwrap());

        assert!(matches!(ds.fetch(3), Err(DatasetError::IndexOutOfRange { index: 3, len: 1 })));
        assert!(ds.get(3).is_none());
        assert_eq!(Dataset::len(&ds), 1);
    }

    fn loader(ds: GarmentDataset<BasicGarmentTokenizer>) -> Arc<dyn DataLoader<GarmentBatch<NdArray>>> {
        DataLoaderBuilder::new(GarmentBatcher::<NdArray>::new(Default::default()))
            .batch_size(1)
            .build(ds)
    }

    #[test]
    fn test_loader_yields_every_datapoint() {
        let fx = DatasetFixture::new();
        for name in ["g1", "g2", "g3"] {
            fx.add_garment(name);
        }
        let ds = dataset(&fx, &["g1", "g2", "g3"], SamplingRates::only(SampleType::Image).unwrap());

        let seen: usize = loader(ds).iter().map(|b| b.batch_size()).sum();
        assert_eq!(seen, 3);
    }

    #[test]
    #[should_panic(expected = "sample 1")]
    fn test_loader_stops_loudly_on_missing_datapoint() {
        let fx = DatasetFixture::new();
        for name in ["g1", "g3", "g4"] {
            fx.add_garment(name);
        }
        let ds = dataset(
            &fx,
            &["g1", "missing", "g3", "g4"],
            SamplingRates::only(SampleType::Image).unwrap(),
        );

        let seen: usize = loader(ds).iter().map(|b| b.batch_size()).sum();
        assert_eq!(seen, 3);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let fx = DatasetFixture::new();
        fx.add_garment("g1");
        fx.add_edit("g1");
        fx.add_captions("g1", Some("a skirt"), Some("a picnic"));
        let rates = SamplingRates::new(&[0.2, 0.2, 0.2, 0.2, 0.2]).unwrap();

        let run = || {
            let ds = dataset(&fx, &["g1"], rates.clone());
            (0..10)
                .map(|_| {
                    let s = ds.fetch(0).unwrap();
                    (s.sample_type, s.questions[0].clone())
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_accessors_and_split() {
        let fx = DatasetFixture::new();
        let classes = fx.path().join("classes.json");
        fs::write(&classes, r#"{"front": ["skirt_front"], "back": ["skirt_back"]}"#).unwrap();

        let mut cfg = fx.config(&["a/g1", "g2", "g3"], SamplingRates::only(SampleType::Image).unwrap());
        cfg.panel_classification = Some(classes);
        let ds = GarmentDataset::new(&cfg, BasicGarmentTokenizer::default()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.item_info(0), Some("a/g1"));
        assert_eq!(ds.item_info(9), None);
        assert_eq!(ds.mode_names().len(), 5);
        assert_eq!(ds.panel_classes().to_vec(), vec!["front".to_string(), "back".to_string()]);

        let split = ds.split_from_dict(&SplitDict {
            train:      vec!["g3".into()],
            validation: vec!["g2".into()],
            test:       vec![],
        });
        assert_eq!(split.train, vec!["g3".to_string()]);
        assert_eq!(split.validation, vec!["g2".to_string()]);
        assert!(split.test.is_none());
    }

    struct GrayProcessor;

    impl ImagePreprocessor for GrayProcessor {
        fn preprocess(&self, _image: &image::RgbImage) -> Result<ImageTensor> {
            Ok(ImageTensor::zeros(1, 4, 4))
        }

        fn output_shape(&self) -> [usize; 3] {
            [1, 4, 4]
        }
    }

    #[test]
    fn test_custom_collaborators() {
        let fx = DatasetFixture::new();
        fx.add_garment("g1");
        let conversation = Conversation {
            system: "SYS".into(),
            ..Conversation::default()
        };
        let ds = dataset(&fx, &["g1"], SamplingRates::only(SampleType::Image).unwrap())
            .with_image_processor(GrayProcessor)
            .with_conversation(conversation);

        let s = ds.fetch(0).unwrap();
        assert_eq!(s.image.shape(), [1, 4, 4]);
        assert!(s.conversations[0].starts_with("SYS USER:"));
    }

    #[test]
    fn test_token_pass_throughs() {
        let fx = DatasetFixture::new();
        let mut ds = dataset(&fx, &["g1"], SamplingRates::only(SampleType::Image).unwrap());
        assert!(ds.panel_edge_type_indices().is_none());

        let map: HashMap<String, u32> = ds
            .all_token_names()
            .into_iter()
            .enumerate()
            .map(|(i, n)| (n, i as u32 + 100))
            .collect();
        ds.set_token_indices(&map).unwrap();
        assert_eq!(ds.panel_edge_type_indices().unwrap().pattern_start, 100);
        assert_eq!(ds.gt_stats(), &GtStats::default());
    }
}
