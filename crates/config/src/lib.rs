//! Configuration for the voice tour engine
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables with the `VOICE_TOUR` prefix (nested fields use a
//! `__` separator, e.g. `VOICE_TOUR_MATCHING__DIRECT_DISTANCE_MAX`).

mod settings;

pub use settings::{
    default_synonym_rules, FeedbackConfig, MatchingConfig, RecognitionConfig, Settings,
    SynonymRule, ViewerConfig,
};

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
