/// Sanskrit-specific configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All generic options from `libdevanagari_core::Config` (flattened via serde)
/// - The named profile the settings were derived from
/// - The retroflex `ड` cycle variant
/// - The key that attaches a virama after a consonant
///
/// # Example
///
/// ```rust
/// use libsanskrit::{Profile, SanskritConfig};
///
/// let config = SanskritConfig::for_profile(Profile::SwarLock);
/// assert!(config.base().conjunct_ligatures);
/// ```
use libdevanagari_core::RuleOrder;
use serde::{Deserialize, Serialize};

/// Length of the `ड` aspirate/nukta cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetroflexCycle {
    /// ड ↔ ढ
    TwoState,
    /// ड → ढ → ड़ → ढ़ → ड
    FourState,
}

/// Named rule-set profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Shift forces a fresh vowel; two-state ड cycle; no conjuncts.
    #[default]
    Uniform,
    /// Vowel lengthening wins over shift; four-state ड cycle; conjuncts on.
    SwarLock,
}

impl Profile {
    pub fn rule_order(&self) -> RuleOrder {
        match self {
            Profile::Uniform => RuleOrder::ShiftFirst,
            Profile::SwarLock => RuleOrder::LockFirst,
        }
    }

    pub fn retroflex_cycle(&self) -> RetroflexCycle {
        match self {
            Profile::Uniform => RetroflexCycle::TwoState,
            Profile::SwarLock => RetroflexCycle::FourState,
        }
    }

    pub fn conjunct_ligatures(&self) -> bool {
        matches!(self, Profile::SwarLock)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SanskritConfig {
    /// Profile these settings were derived from (informational once loaded)
    pub profile: Profile,

    /// Variant of the ड cycle
    pub retroflex_cycle: RetroflexCycle,

    /// Key that attaches a virama after a consonant
    pub virama_key: char,

    /// Base configuration fields (rule order, punctuation keys, etc.)
    #[serde(flatten)]
    pub base: libdevanagari_core::Config,
}

impl Default for SanskritConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

impl SanskritConfig {
    /// Configuration with every profile-driven field set from `profile`.
    pub fn for_profile(profile: Profile) -> Self {
        let mut config = Self {
            profile,
            retroflex_cycle: profile.retroflex_cycle(),
            virama_key: 'q',
            base: libdevanagari_core::Config::default(),
        };
        config.apply_profile(profile);
        config
    }

    /// Overwrite the profile-driven fields, leaving the rest untouched.
    pub fn apply_profile(&mut self, profile: Profile) {
        self.profile = profile;
        self.retroflex_cycle = profile.retroflex_cycle();
        self.base.rule_order = profile.rule_order();
        self.base.conjunct_ligatures = profile.conjunct_ligatures();
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Convert this config into the base config.
    pub fn into_base(self) -> libdevanagari_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &libdevanagari_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut libdevanagari_core::Config {
        &mut self.base
    }
}
