// Fixtures shared by the unit tests: two small specifications, a
// word-level language tokenizer, and an on-disk dataset builder.

use image::{Rgb, RgbImage};
use std::{fs, path::Path};
use tempfile::TempDir;

use crate::data::config::DatasetConfig;
use crate::data::layout::DatasetLayout;
use crate::data::loader::DatapointSource;
use crate::data::sampling::SamplingRates;
use crate::domain::pattern::SewingPattern;

pub const SKIRT_SPEC: &str = r#"{
    "pattern": {
        "panels": {
            "skirt_front": {
                "translation": [0.0, -20.0, 15.0],
                "rotation": [0.0, 0.0, 0.0],
                "vertices": [[0, 0], [50, 0], [45, 60], [5, 60]],
                "edges": [
                    {"endpoints": [0, 1]},
                    {"endpoints": [1, 2], "curvature": [0.5, 0.1]},
                    {"endpoints": [2, 3], "curvature": {"type": "circle", "params": [40.0, 0, 1]}},
                    {"endpoints": [3, 0], "curvature": {"type": "cubic", "params": [[0.3, 0.1], [0.7, -0.1]]}}
                ]
            },
            "skirt_back": {
                "translation": [0.0, -20.0, -15.0],
                "vertices": [[0, 0], [50, 0], [25, 60]],
                "edges": [
                    {"endpoints": [0, 1]},
                    {"endpoints": [1, 2]},
                    {"endpoints": [2, 0], "curvature": {"type": "quadratic", "params": [[0.5, 0.2]]}}
                ]
            }
        },
        "stitches": [
            [{"panel": "skirt_front", "edge": 1}, {"panel": "skirt_back", "edge": 1}]
        ],
        "panel_order": ["skirt_back", "skirt_front"]
    }
}"#;

/// Three-panel pattern sharing no panel names with [`SKIRT_SPEC`].
pub const SHIRT_SPEC: &str = r#"{
    "pattern": {
        "panels": {
            "front": {
                "translation": [0.0, 30.0, 10.0],
                "rotation": [0.0, 0.0, 0.0],
                "vertices": [[0, 0], [40, 0], [40, 50], [0, 50]],
                "edges": [
                    {"endpoints": [0, 1]},
                    {"endpoints": [1, 2]},
                    {"endpoints": [2, 3], "curvature": [0.5, -0.2]},
                    {"endpoints": [3, 0]}
                ]
            },
            "back": {
                "translation": [0.0, 30.0, -10.0],
                "rotation": [0.0, 180.0, 0.0],
                "vertices": [[0, 0], [40, 0], [40, 55], [0, 55]],
                "edges": [
                    {"endpoints": [0, 1]},
                    {"endpoints": [1, 2]},
                    {"endpoints": [2, 3]},
                    {"endpoints": [3, 0]}
                ]
            },
            "sleeve": {
                "translation": [25.0, 45.0, 0.0],
                "rotation": [0.0, 0.0, 90.0],
                "vertices": [[0, 0], [20, 0], [10, 30]],
                "edges": [
                    {"endpoints": [0, 1], "curvature": {"type": "circle", "params": [15.0, 0, 0]}},
                    {"endpoints": [1, 2]},
                    {"endpoints": [2, 0]}
                ]
            }
        },
        "stitches": [
            [{"panel": "front", "edge": 1}, {"panel": "back", "edge": 3}],
            [{"panel": "front", "edge": 3}, {"panel": "back", "edge": 1}]
        ]
    }
}"#;

pub fn skirt_pattern() -> SewingPattern {
    SewingPattern::from_json_str(SKIRT_SPEC, "skirt", Path::new("skirt.json")).unwrap()
}

pub fn shirt_pattern() -> SewingPattern {
    SewingPattern::from_json_str(SHIRT_SPEC, "shirt", Path::new("shirt.json")).unwrap()
}

/// Whitespace-split word-level tokenizer over `words` plus `[UNK]`.
pub fn word_level_tokenizer(words: &[&str]) -> tokenizers::Tokenizer {
    let mut vocab = serde_json::Map::new();
    vocab.insert("[UNK]".into(), 0.into());
    for (i, w) in words.iter().enumerate() {
        vocab.insert((*w).to_string(), (i + 1).into());
    }
    let json = serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": null,
        "decoder": null,
        "model": { "type": "WordLevel", "vocab": vocab, "unk_token": "[UNK]" }
    });
    json.to_string().parse::<tokenizers::Tokenizer>().unwrap()
}

// ─── DatasetFixture ───────────────────────────────────────────────────────────

/// Temporary root/editing/caption directories filled on demand.
pub struct DatasetFixture {
    dir: TempDir,
}

impl DatasetFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        for sub in ["root", "edit", "caption"] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn layout(&self) -> DatasetLayout {
        DatasetLayout::new(
            self.dir.path().join("root"),
            self.dir.path().join("edit"),
            self.dir.path().join("caption"),
        )
    }

    /// Specification plus front (red) and back (blue) renders.
    pub fn add_garment(&self, name: &str) {
        let layout = self.layout();
        fs::create_dir_all(layout.root_dir.join(name)).unwrap();
        fs::write(layout.spec_path(name), SKIRT_SPEC).unwrap();

        let [front, back] = layout.render_paths(name);
        RgbImage::from_pixel(48, 32, Rgb([200, 40, 40])).save(front).unwrap();
        RgbImage::from_pixel(48, 32, Rgb([40, 40, 200])).save(back).unwrap();
    }

    /// Edited specification and its two-way editing captions.
    pub fn add_edit(&self, name: &str) {
        let layout = self.layout();
        fs::create_dir_all(layout.editing_dir.join(name)).unwrap();
        fs::write(layout.edited_spec_path(name), SHIRT_SPEC).unwrap();
        fs::write(
            layout.editing_caption_path(name),
            r#"{"editing_description_forward": "make it longer",
                "editing_description_reverse": "make it shorter"}"#,
        )
        .unwrap();
    }

    pub fn add_captions(&self, name: &str, description: Option<&str>, occasion: Option<&str>) {
        let layout = self.layout();
        fs::create_dir_all(layout.caption_dir.join(name)).unwrap();
        let mut json = serde_json::Map::new();
        if let Some(d) = description {
            json.insert("description".into(), d.into());
        }
        if let Some(o) = occasion {
            json.insert("occasion".into(), o.into());
        }
        fs::write(layout.caption_path(name), serde_json::Value::Object(json).to_string()).unwrap();
    }

    /// Seeded config over inline `names` with 32px images.
    pub fn config(&self, names: &[&str], rates: SamplingRates) -> DatasetConfig {
        let layout = self.layout();
        let mut cfg = DatasetConfig::new(
            layout.root_dir,
            layout.editing_dir,
            layout.caption_dir,
            rates,
            DatapointSource::Inline(names.iter().map(|n| n.to_string()).collect()),
        );
        cfg.vision_tower = "missing-vision-tower".into();
        cfg.image_size = 32;
        cfg.seed = Some(7);
        cfg
    }
}
