//! Voice command resolution pipeline
//!
//! Turns one finalized transcript into a command outcome in three stages:
//! - Normalization: lowercase, strip punctuation, synonym substitution
//! - Intent matching: ordered substring predicates, first match wins
//! - Fuzzy scene resolution: Levenshtein distance against scene titles with
//!   a direct / disambiguate / no-match decision policy
//!
//! Every stage is pure; the stateful dispatch lives in `voice-tour-session`.

pub mod intent;
pub mod interpreter;
pub mod normalize;
pub mod resolver;

pub use intent::{has_navigation_cue, match_intent, VoiceIntent, INTENT_RULES};
pub use interpreter::{CommandInterpreter, CommandOutcome};
pub use normalize::{normalize, SynonymTable};
pub use resolver::{
    levenshtein, rank_candidates, resolve_scene, strip_fillers, MatchCandidate, ResolverThresholds,
    SceneResolution, FILLER_WORDS,
};
