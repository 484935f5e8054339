//! libarud-core
//!
//! Language-agnostic prosody model shared by the `libarud` crate: metrical
//! feet, Zihaf/Ellah transformations, meter definitions, pattern generation,
//! similarity scoring and scansion matching. Everything here works on ASCII
//! bit strings (`1` = mutaharrik, `0` = sakin); turning Arabic text into such
//! strings is the job of the language crate.
//!
//! Public API:
//! - `Zihaf` - Named foot transformation, applied as a pure function
//! - `Tafeela` / `Foot` - Catalog foot and one concrete form of it
//! - `Bahr` - Meter definition (feet, endings, Hashw bans, sub-meters)
//! - `Catalog` - Ordered meters with lazily generated pattern universes
//! - `ScansionMatcher` - Meter detection and foot-by-foot diagnosis
//! - `Config` - Scoring and ranking configuration
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod zihaf;
pub use zihaf::{Op, Zihaf};

pub mod tafeela;
pub use tafeela::{Foot, Tafeela};

pub mod bahr;
pub use bahr::{classical_meters, Bahr, Endings, Shatr};

pub mod patterns;
pub use patterns::{generate, HemistichPattern, PatternUniverse};

pub mod catalog;
pub use catalog::Catalog;

pub mod similarity;

pub mod matcher;
pub use matcher::{
    ComponentMatch, FootDiagnosis, FootStatus, MeterCandidate, PoemAnalysis, ScannedVerse,
    ScansionMatcher, VerseAnalysis,
};

pub mod error;
pub use error::ArudError;

/// Generic configuration for scansion.
///
/// Only language-agnostic fields live here. Text handling options
/// (saturation, restricted rhyme, custom spellings) belong in `ArudiConfig`
/// in the `libarud` crate, which flattens this struct into its own.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Power applied to the raw similarity ratio.
    /// Default: 6. Higher values punish near-misses harder.
    pub similarity_exponent: i32,

    /// Decimals kept when comparing detection scores.
    /// Default: 3. Meters within this precision fall through to the
    /// pair-validity and priority tie-breaks.
    pub score_precision: u32,

    // Cache Management
    /// Maximum number of entries in the text -> pattern cache
    pub max_cache_size: usize,

    /// Tie-break weight per meter; missing meters weigh 0.
    /// Kept last so TOML emits it as a trailing table.
    pub meter_priority: BTreeMap<String, i32>,
}

impl Default for Config {
    fn default() -> Self {
        let meter_priority = [
            ("rajaz", 20),
            ("kamel", 10),
            ("hazaj", 20),
            ("wafer", 10),
            ("saree", 20),
            ("munsareh", 10),
            ("baseet", 10),
            ("ramal", 15),
            ("mutadarak", 15),
            ("mutakareb", 15),
        ]
        .into_iter()
        .map(|(name, weight)| (name.to_string(), weight))
        .collect();

        Self {
            similarity_exponent: 6,
            score_precision: 3,
            // 1000 lines covers a long qasida with room to spare
            max_cache_size: 1000,
            meter_priority,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Tie-break weight for `meter`.
    pub fn priority(&self, meter: &str) -> i32 {
        self.meter_priority.get(meter).copied().unwrap_or(0)
    }

    /// Set the tie-break weight for one meter.
    pub fn set_priority(&mut self, meter: &str, weight: i32) {
        self.meter_priority.insert(meter.to_string(), weight);
    }
}
