//! Timing, particle and element-id configuration.
//!
//! Every value has a default matching the shipped page; a host can overlay a
//! partial JSON document through `start_splash_with_config` (feature `serde_json`).

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Particle counts for both screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParticleBudget {
    pub screen1: usize,
    pub screen2: usize,
}

impl Default for ParticleBudget {
    fn default() -> Self {
        Self { screen1: 60, screen2: 28 }
    }
}

impl ParticleBudget {
    /// Reduced counts applied on low-memory devices.
    pub const LOW_MEMORY: ParticleBudget = ParticleBudget { screen1: 30, screen2: 15 };
}

/// DOM ids the splash binds to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementIds {
    pub screen1: String,
    pub screen2: String,
    pub headline: String,
    pub particles1: String,
    pub particles2: String,
    pub typed_headline: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            screen1: "screen1".into(),
            screen2: "screen2".into(),
            headline: "headline1".into(),
            particles1: "particles1".into(),
            particles2: "particles2".into(),
            typed_headline: "typed-headline".into(),
        }
    }
}

/// Typewriter pacing (all in milliseconds) and target text.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TypingConfig {
    pub text: String,
    pub type_speed_ms: u32,
    pub pause_after_type_ms: u32,
    pub delete_speed_ms: u32,
    pub pause_after_delete_ms: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            text: "Academy Under Construction".into(),
            type_speed_ms: 80,
            pause_after_type_ms: 900,
            delete_speed_ms: 40,
            pause_after_delete_ms: 600,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SplashConfig {
    /// Screen 1 fade-out before screen 2 is revealed.
    pub screen1_fade_ms: u32,
    /// Buffer between screen 2 reveal and the first typed character.
    pub screen2_fade_delay_ms: u32,
    pub particles: ParticleBudget,
    pub low_memory_particles: ParticleBudget,
    /// Devices reporting less memory than this (GB) get `low_memory_particles`.
    pub low_memory_threshold_gb: f64,
    pub low_memory_delay_ms: u32,
    pub typing: TypingConfig,
    pub ids: ElementIds,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            screen1_fade_ms: 800,
            screen2_fade_delay_ms: 250,
            particles: ParticleBudget::default(),
            low_memory_particles: ParticleBudget::LOW_MEMORY,
            low_memory_threshold_gb: 4.0,
            low_memory_delay_ms: 100,
            typing: TypingConfig::default(),
            ids: ElementIds::default(),
        }
    }
}

#[cfg(feature = "serde_json")]
impl SplashConfig {
    /// Parse a (possibly partial) JSON overlay; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, crate::error::SplashError> {
        serde_json::from_str(json).map_err(|e| crate::error::SplashError::Config(e.to_string()))
    }
}
