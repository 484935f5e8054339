// libarud/src/processor.rs
//
// Processor: the public facade. Composes the text normalizer and pattern
// extractor with the shared `ScansionMatcher` from core, and memoizes text →
// pattern conversions.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};

use libarud_core::{ArudError, PoemAnalysis, ScannedVerse, ScansionMatcher};
use lru::LruCache;
use tracing::{debug, trace};

use crate::config::ArudiConfig;
use crate::extractor::extract;
use crate::normalizer::TextNormalizer;

const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

type CacheKey = (String, bool, bool);

pub struct Processor {
    normalizer: TextNormalizer,
    matcher: ScansionMatcher,
    saturate: bool,
    restrict_rhyme: bool,
    cache: Mutex<LruCache<CacheKey, (String, String)>>,
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor {
    /// Processor with the classical catalog and default settings.
    pub fn new() -> Self {
        Self::with_config(ArudiConfig::default())
    }

    /// Build from a full configuration; `custom_spellings` are registered on
    /// top of the built-in table.
    pub fn with_config(config: ArudiConfig) -> Self {
        let ArudiConfig {
            base,
            saturate,
            restrict_rhyme,
            custom_spellings,
        } = config;

        let mut normalizer = TextNormalizer::new();
        for (word, replacement) in &custom_spellings {
            normalizer.register_custom_spelling(word, replacement);
        }

        let capacity = NonZeroUsize::new(base.max_cache_size).unwrap_or(DEFAULT_CACHE_CAPACITY);

        Self {
            normalizer,
            matcher: ScansionMatcher::new(base),
            saturate,
            restrict_rhyme,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn matcher(&self) -> &ScansionMatcher {
        &self.matcher
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Arudi spelling and binary pattern of one hemistich.
    pub fn normalize_and_extract(
        &self,
        text: &str,
        saturate: bool,
        restrict_rhyme: bool,
    ) -> (String, String) {
        let key = (text.to_string(), saturate, restrict_rhyme);
        if let Some(hit) = self.cache().get(&key) {
            return hit.clone();
        }

        let normalized = self.normalizer.normalize(text);
        let result = extract(&normalized, saturate, restrict_rhyme);
        trace!(text, arudi = %result.0, pattern = %result.1, "converted");

        self.cache().put(key, result.clone());
        result
    }

    /// [`Self::normalize_and_extract`] with the configured flags.
    pub fn prepare_text(&self, text: &str) -> (String, String) {
        self.normalize_and_extract(text, self.saturate, self.restrict_rhyme)
    }

    /// Add or override one Arudi spelling. Cached conversions are dropped.
    pub fn register_custom_spelling(&mut self, word: &str, replacement: &str) {
        debug!(word, replacement, "custom spelling");
        self.normalizer.register_custom_spelling(word, replacement);
        self.clear_cache();
    }

    /// Convert every verse, then detect one meter for the whole poem (unless
    /// `forced_meter` is given) and diagnose each verse against it.
    ///
    /// An empty ʿajuz text marks a single-hemistich verse.
    pub fn analyze_poem<S: AsRef<str>>(
        &self,
        verses: &[(S, S)],
        forced_meter: Option<&str>,
    ) -> Result<PoemAnalysis, ArudError> {
        let scanned: Vec<ScannedVerse> = verses
            .iter()
            .map(|(sadr, ajuz)| self.scan_verse(sadr.as_ref(), ajuz.as_ref()))
            .collect();
        self.matcher.analyze_verses(&scanned, forced_meter)
    }

    /// Names of the top-level catalog meters, in catalog order.
    pub fn list_meters(&self) -> Vec<&'static str> {
        self.matcher.catalog().names()
    }

    pub fn cache_size(&self) -> usize {
        self.cache().len()
    }

    pub fn clear_cache(&self) {
        self.cache().clear();
    }

    fn scan_verse(&self, sadr: &str, ajuz: &str) -> ScannedVerse {
        let (sadr_arudi, sadr_pattern) = self.prepare_text(sadr);
        let (ajuz_arudi, ajuz_pattern) = if ajuz.trim().is_empty() {
            (String::new(), String::new())
        } else {
            self.prepare_text(ajuz)
        };
        ScannedVerse {
            sadr_text: sadr.to_string(),
            ajuz_text: ajuz.to_string(),
            sadr_arudi,
            ajuz_arudi,
            sadr_pattern,
            ajuz_pattern,
        }
    }

    fn cache(&self) -> MutexGuard<'_, LruCache<CacheKey, (String, String)>> {
        // a panic mid-insert cannot leave the cache inconsistent
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
