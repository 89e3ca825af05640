// ============================================================
// Layer 4 — Ground-Truth Cache
// ============================================================
// Parsing and encoding a pattern is the expensive part of a
// fetch, so each datapoint is loaded once and kept:
//
//   name → CacheEntry { gt pattern + encoding,
//                       edited pattern + encoding + captions?,
//                       captions? }
//
// Entries are never evicted. Loading runs outside the lock; two
// threads missing on the same key both load and the first insert
// is kept.

use serde::de::DeserializeOwned;
use std::{
    collections::HashMap,
    fs,
    path::Path,
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::data::layout::DatasetLayout;
use crate::data::loader::data_name;
use crate::domain::captions::{Captions, EditingCaptions};
use crate::domain::encoding::PatternEncoding;
use crate::domain::error::Result;
use crate::domain::pattern::{PanelClasses, SewingPattern};
use crate::domain::traits::GarmentTokenizer;

/// Edited counterpart of a ground-truth pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct EditedPattern {
    pub pattern:  SewingPattern,
    pub encoding: PatternEncoding,
    pub captions: EditingCaptions,
}

/// Everything loaded for one datapoint.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub gt_pattern: SewingPattern,
    pub encoding:   PatternEncoding,
    pub edited:     Option<EditedPattern>,
    pub captions:   Option<Captions>,
}

impl CacheEntry {
    /// Read, parse and encode all files of a datapoint.
    ///
    /// The ground-truth specification is required. The editing pair
    /// needs both its specification and caption file; either missing
    /// means no edit. A missing caption file means no captions.
    pub fn load<T: GarmentTokenizer + ?Sized>(
        layout:     &DatasetLayout,
        datapoint:  &str,
        tokenizer:  &T,
        classifier: Option<&PanelClasses>,
    ) -> Result<Self> {
        let name = data_name(datapoint);

        let mut gt_pattern =
            SewingPattern::from_file(&layout.spec_path(datapoint), classifier, Some(name))?;
        gt_pattern.name = name.to_string();
        let encoding = tokenizer.encode(&gt_pattern)?;

        let edited_spec    = layout.edited_spec_path(name);
        let editing_labels = layout.editing_caption_path(name);
        let edited = if edited_spec.is_file() && editing_labels.is_file() {
            let mut pattern = SewingPattern::from_file(&edited_spec, classifier, Some(name))?;
            pattern.name = name.to_string();
            let encoding = tokenizer.encode(&pattern)?;
            let captions = read_json::<EditingCaptions>(&editing_labels)?;
            Some(EditedPattern { pattern, encoding, captions })
        } else {
            None
        };

        let caption_file = layout.caption_path(name);
        let captions = if caption_file.is_file() {
            Some(read_json::<Captions>(&caption_file)?)
        } else {
            None
        };

        tracing::debug!(
            "Loaded datapoint '{}' (edited: {}, captions: {})",
            name,
            edited.is_some(),
            captions.is_some()
        );

        Ok(Self { gt_pattern, encoding, edited, captions })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

// ─── PatternCache ─────────────────────────────────────────────────────────────

/// Lazily filled map of datapoint name to [`CacheEntry`].
#[derive(Debug, Default)]
pub struct PatternCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // entries are only replaced whole, so a poisoned map is still consistent
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Snapshot of a cached entry.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.lock().get(key).cloned()
    }

    /// Return the cached entry for `key`, loading it with `load` on a miss.
    pub fn get_or_load<F>(&self, key: &str, load: F) -> Result<CacheEntry>
    where
        F: FnOnce() -> Result<CacheEntry>,
    {
        if let Some(entry) = self.get(key) {
            return Ok(entry);
        }

        let loaded = load()?;
        let mut entries = self.lock();
        let entry = entries.entry(key.to_string()).or_insert(loaded);
        Ok(entry.clone())
    }

    /// Run `f` on the cached entry in place. None if `key` is not cached.
    pub fn update<R>(&self, key: &str, f: impl FnOnce(&mut CacheEntry) -> R) -> Option<R> {
        self.lock().get_mut(key).map(f)
    }
}
