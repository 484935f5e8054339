/// Arudi-specific configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All generic options from `libarud_core::Config` (flattened via serde)
/// - Default scansion flags (saturation, restricted rhyme)
/// - Extra entries for the Arudi spelling table
///
/// # Example
///
/// ```rust
/// use libarud::ArudiConfig;
///
/// let config = ArudiConfig::default();
/// let base_config = config.into_base();
/// // Use base_config with ScansionMatcher::new()
/// ```
use std::collections::BTreeMap;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ArudiConfig {
    /// Base configuration fields (scoring, priorities, cache size)
    #[serde(flatten)]
    pub base: libarud_core::Config,

    // Scansion defaults, used when a caller does not pass its own flags
    pub saturate: bool,       // lengthen the final vowel (Ishbāʿ)
    pub restrict_rhyme: bool, // read the final letter as sakin (Qāfiya Muqayyada)

    /// Bare word → vocalized Arudi spelling, added on top of the built-in table.
    pub custom_spellings: BTreeMap<String, String>,
}

impl Default for ArudiConfig {
    fn default() -> Self {
        Self {
            base: libarud_core::Config::default(),
            saturate: true,
            restrict_rhyme: false,
            custom_spellings: BTreeMap::new(),
        }
    }
}

impl ArudiConfig {
    /// Convert this config into the base config for use with `ScansionMatcher::new()`
    pub fn into_base(self) -> libarud_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &libarud_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut libarud_core::Config {
        &mut self.base
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("writing config {}", path.display()))
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
