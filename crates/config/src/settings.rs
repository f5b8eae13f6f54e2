//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::ConfigError;

/// Main settings for the voice tour engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Recognition engine configuration
    #[serde(default)]
    pub recognition: RecognitionConfig,

    /// Command matching configuration
    #[serde(default)]
    pub matching: MatchingConfig,

    /// UI feedback timing configuration
    #[serde(default)]
    pub feedback: FeedbackConfig,

    /// Viewer control configuration
    #[serde(default)]
    pub viewer: ViewerConfig,

    /// Synonym substitutions applied during normalization, in order
    #[serde(default = "default_synonym_rules")]
    pub synonyms: Vec<SynonymRule>,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from an optional TOML file layered with environment
    /// variables (`VOICE_TOUR__SECTION__FIELD`)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        let config = builder
            .add_source(Environment::with_prefix("VOICE_TOUR").separator("__"))
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;
        if settings.synonyms.is_empty() {
            settings.synonyms = default_synonym_rules();
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.matching.direct_distance_max > self.matching.ambiguous_distance_max {
            return Err(ConfigError::InvalidValue {
                field: "matching.direct_distance_max".to_string(),
                message: "must not exceed matching.ambiguous_distance_max".to_string(),
            });
        }

        if self.matching.hfov_min >= self.matching.hfov_max {
            return Err(ConfigError::InvalidValue {
                field: "matching.hfov_min".to_string(),
                message: "must be below matching.hfov_max".to_string(),
            });
        }

        if self.matching.zoom_step_degrees <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "matching.zoom_step_degrees".to_string(),
                message: "must be positive".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.feedback.echo_overlap_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "feedback.echo_overlap_threshold".to_string(),
                message: "must be within 0.0..=1.0".to_string(),
            });
        }

        // Duplicate patterns are legal but only the first entry ever fires
        let mut seen = HashSet::new();
        for rule in &self.synonyms {
            if !seen.insert(rule.pattern.as_str()) {
                tracing::warn!(pattern = %rule.pattern, "Duplicate synonym pattern, first entry wins");
            }
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recognition: RecognitionConfig::default(),
            matching: MatchingConfig::default(),
            feedback: FeedbackConfig::default(),
            viewer: ViewerConfig::default(),
            synonyms: default_synonym_rules(),
        }
    }
}

/// Recognition engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// Recognition language (BCP 47 tag)
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Report interim (non-final) results
    #[serde(default = "default_true")]
    pub interim_results: bool,

    /// Keep the engine session open across results
    #[serde(default)]
    pub continuous: bool,

    /// Restart the engine automatically after every utterance
    #[serde(default)]
    pub always_on: bool,
}

fn default_lang() -> String {
    "en-US".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            interim_results: true,
            continuous: false,
            always_on: false,
        }
    }
}

/// Command matching configuration
///
/// The distance thresholds mirror the shipped behavior (3 / 6). They are
/// tunable, not load-bearing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Maximum edit distance for a direct scene match
    #[serde(default = "default_direct_distance")]
    pub direct_distance_max: usize,

    /// Maximum edit distance for a disambiguation candidate
    #[serde(default = "default_ambiguous_distance")]
    pub ambiguous_distance_max: usize,

    /// Field-of-view change per zoom command, in degrees
    #[serde(default = "default_zoom_step")]
    pub zoom_step_degrees: f64,

    /// Field-of-view floor clamp, in degrees
    #[serde(default = "default_hfov_min")]
    pub hfov_min: f64,

    /// Field-of-view ceiling clamp, in degrees
    #[serde(default = "default_hfov_max")]
    pub hfov_max: f64,
}

fn default_direct_distance() -> usize {
    3
}
fn default_ambiguous_distance() -> usize {
    6
}
fn default_zoom_step() -> f64 {
    10.0
}
fn default_hfov_min() -> f64 {
    30.0
}
fn default_hfov_max() -> f64 {
    120.0
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            direct_distance_max: default_direct_distance(),
            ambiguous_distance_max: default_ambiguous_distance(),
            zoom_step_degrees: default_zoom_step(),
            hfov_min: default_hfov_min(),
            hfov_max: default_hfov_max(),
        }
    }
}

/// UI feedback timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Mic success display window after navigation commands (ms)
    #[serde(default = "default_success_hold")]
    pub success_hold_ms: u64,

    /// Mic success display window after viewer-control commands (ms)
    #[serde(default = "default_control_hold")]
    pub control_hold_ms: u64,

    /// Mic error display window (ms)
    #[serde(default = "default_error_hold")]
    pub error_hold_ms: u64,

    /// Toast auto-dismiss window (ms)
    #[serde(default = "default_toast")]
    pub toast_ms: u64,

    /// HUD auto-hide window (ms)
    #[serde(default = "default_hud_hide")]
    pub hud_hide_ms: u64,

    /// Token-overlap ratio above which an utterance is treated as an echo of
    /// the question just asked
    #[serde(default = "default_echo_overlap")]
    pub echo_overlap_threshold: f64,
}

fn default_success_hold() -> u64 {
    1000
}
fn default_control_hold() -> u64 {
    800
}
fn default_error_hold() -> u64 {
    2000
}
fn default_toast() -> u64 {
    3000
}
fn default_hud_hide() -> u64 {
    5000
}
fn default_echo_overlap() -> f64 {
    0.6
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            success_hold_ms: default_success_hold(),
            control_hold_ms: default_control_hold(),
            error_hold_ms: default_error_hold(),
            toast_ms: default_toast(),
            hud_hide_ms: default_hud_hide(),
            echo_overlap_threshold: default_echo_overlap(),
        }
    }
}

/// Viewer control configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Auto-rotate rate in degrees per second
    #[serde(default = "default_auto_rotate_rate")]
    pub auto_rotate_rate: f64,
}

fn default_auto_rotate_rate() -> f64 {
    2.0
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            auto_rotate_rate: default_auto_rotate_rate(),
        }
    }
}

/// One synonym substitution: `pattern` rewritten to `replacement`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SynonymRule {
    pub pattern: String,
    pub replacement: String,
}

impl SynonymRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// The shipped room/feature synonym table
pub fn default_synonym_rules() -> Vec<SynonymRule> {
    [
        ("hall", "living room"),
        ("lobby", "living room"),
        ("lounge", "living room"),
        ("washroom", "bathroom"),
        ("toilet", "bathroom"),
        ("master", "bedroom 1"),
        ("rasoi", "kitchen"),
        ("kitchenet", "kitchen"),
        ("kaksha", "room"),
        ("bagicha", "garden"),
        ("balconi", "balcony"),
        ("pooja", "prayer room"),
        ("mandir", "prayer room"),
        ("dining", "dining room"),
    ]
    .into_iter()
    .map(|(p, r)| SynonymRule::new(p, r))
    .collect()
}
