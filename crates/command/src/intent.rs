//! Fixed intent matching
//!
//! Intents are matched by substring containment against the normalized
//! transcript, evaluated in a fixed priority order. The order is part of the
//! contract: earlier rules shadow later ones on overlapping substrings.

use serde::{Deserialize, Serialize};

/// A fixed, enumerable voice command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceIntent {
    /// Advance to the next scene
    NextScene,
    /// Go back to the previous scene
    PreviousScene,
    /// Open the help overlay
    Help,
    /// Narrow the field of view
    ZoomIn,
    /// Widen the field of view
    ZoomOut,
    /// Enable auto-rotation
    AutoRotateOn,
    /// Disable auto-rotation
    AutoRotateOff,
    /// Switch to best quality
    QualityBest,
    /// Switch to eco quality
    QualityEco,
    /// Switch to automatic quality
    QualityAuto,
    /// Enter fullscreen
    Fullscreen,
    /// Copy a deep link to the current view
    Share,
}

/// One priority-ordered matching rule
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: VoiceIntent,
    /// Any of these substrings triggers the intent
    pub patterns: &'static [&'static str],
}

/// The canonical intent order
///
/// "zoom in" sits above any later rule that could contain "zoom"; the same
/// shadowing argument fixes the position of every entry.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: VoiceIntent::NextScene,
        patterns: &["next"],
    },
    IntentRule {
        intent: VoiceIntent::PreviousScene,
        patterns: &["previous", "prev"],
    },
    IntentRule {
        intent: VoiceIntent::Help,
        patterns: &["help"],
    },
    IntentRule {
        intent: VoiceIntent::ZoomIn,
        patterns: &["zoom in"],
    },
    IntentRule {
        intent: VoiceIntent::ZoomOut,
        patterns: &["zoom out"],
    },
    IntentRule {
        intent: VoiceIntent::AutoRotateOn,
        patterns: &["rotate on", "auto rotate"],
    },
    IntentRule {
        intent: VoiceIntent::AutoRotateOff,
        patterns: &["rotate off", "stop rotate"],
    },
    IntentRule {
        intent: VoiceIntent::QualityBest,
        patterns: &["best quality"],
    },
    IntentRule {
        intent: VoiceIntent::QualityEco,
        patterns: &["eco quality", "low quality"],
    },
    IntentRule {
        intent: VoiceIntent::QualityAuto,
        patterns: &["normal quality", "auto quality"],
    },
    IntentRule {
        intent: VoiceIntent::Fullscreen,
        patterns: &["fullscreen"],
    },
    IntentRule {
        intent: VoiceIntent::Share,
        patterns: &["share"],
    },
];

/// Match the normalized transcript against the fixed intent list
///
/// First match wins; later rules are not evaluated.
pub fn match_intent(text: &str) -> Option<VoiceIntent> {
    for rule in INTENT_RULES {
        if rule.patterns.iter().any(|p| text.contains(p)) {
            return Some(rule.intent);
        }
    }
    None
}

/// Does the transcript ask for scene navigation ("show ..." / "go ...")?
pub fn has_navigation_cue(text: &str) -> bool {
    text.contains("show") || text.contains("go")
}
