//! The end-to-end command interpreter

use voice_tour_config::Settings;
use voice_tour_core::Scene;

use crate::intent::{has_navigation_cue, match_intent, VoiceIntent};
use crate::normalize::{normalize, SynonymTable};
use crate::resolver::{resolve_scene, strip_fillers, ResolverThresholds, SceneResolution};

/// The result of interpreting one finalized transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A fixed intent matched
    Intent(VoiceIntent),
    /// A scene resolved directly
    SceneMatch { index: usize },
    /// Two candidate scenes; surface a "did you mean" prompt
    Ambiguous { first: usize, second: usize },
    /// A navigation phrase that matched nothing
    NoMatch { query: String },
    /// Not a known command and not a navigation phrase
    Unrecognized,
}

/// Stateless interpreter: normalization table plus resolver thresholds
#[derive(Debug, Clone)]
pub struct CommandInterpreter {
    synonyms: SynonymTable,
    thresholds: ResolverThresholds,
}

impl CommandInterpreter {
    pub fn new(synonyms: SynonymTable, thresholds: ResolverThresholds) -> Self {
        Self {
            synonyms,
            thresholds,
        }
    }

    /// Build from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            synonyms: SynonymTable::from_rules(&settings.synonyms),
            thresholds: ResolverThresholds::from(&settings.matching),
        }
    }

    /// Normalize a raw transcript with this interpreter's synonym table
    pub fn normalize(&self, raw: &str) -> String {
        normalize(raw, &self.synonyms)
    }

    /// Interpret one raw transcript against the scene list
    pub fn interpret(&self, raw: &str, scenes: &[Scene]) -> CommandOutcome {
        let text = self.normalize(raw);

        if let Some(intent) = match_intent(&text) {
            return CommandOutcome::Intent(intent);
        }

        if has_navigation_cue(&text) {
            let query = strip_fillers(&text);
            return match resolve_scene(&query, scenes, self.thresholds) {
                SceneResolution::Match { index } => CommandOutcome::SceneMatch { index },
                SceneResolution::Ambiguous { first, second } => {
                    CommandOutcome::Ambiguous { first, second }
                }
                SceneResolution::NoMatch => CommandOutcome::NoMatch { query },
            };
        }

        CommandOutcome::Unrecognized
    }
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self {
            synonyms: SynonymTable::default(),
            thresholds: ResolverThresholds::default(),
        }
    }
}
