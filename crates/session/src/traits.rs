//! External collaborator traits
//!
//! The recognition engine, synthesis engine, and panorama viewer are owned by
//! the embedding application; the session only orchestrates them. Engine
//! events are pushed into the session by whoever wires up the callbacks.

use async_trait::async_trait;
use thiserror::Error;

use voice_tour_core::{CameraPose, Utterance};

use crate::assistant::RentalPreferences;
use crate::SessionError;

/// Fault raised by `RecognitionEngine::start`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Recognition already started")]
    AlreadyStarted,

    #[error("Microphone permission denied")]
    PermissionDenied,

    #[error("Recognition engine unavailable")]
    Unavailable,

    #[error("Recognition engine fault: {0}")]
    Other(String),
}

/// Handle to a speech recognition engine
///
/// Implementations wrap a platform recognizer (e.g. the Web Speech API behind
/// a WebView bridge). `start` may fail; the session catches and logs every
/// failure without crashing the state machine.
pub trait RecognitionEngine: Send + Sync {
    fn start(&self) -> Result<(), EngineError>;
    fn stop(&self);
    fn set_continuous(&self, continuous: bool);
    fn set_interim_results(&self, interim: bool);
    fn set_lang(&self, lang: &str);
}

/// Error codes reported by the recognition engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionErrorCode {
    NotAllowed,
    ServiceNotAllowed,
    NoSpeech,
    Aborted,
    AudioCapture,
    Network,
    Other(String),
}

impl RecognitionErrorCode {
    /// Permission denials are terminal for the session
    pub fn is_permission_denial(&self) -> bool {
        matches!(
            self,
            RecognitionErrorCode::NotAllowed | RecognitionErrorCode::ServiceNotAllowed
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecognitionErrorCode::NotAllowed => "not-allowed",
            RecognitionErrorCode::ServiceNotAllowed => "service-not-allowed",
            RecognitionErrorCode::NoSpeech => "no-speech",
            RecognitionErrorCode::Aborted => "aborted",
            RecognitionErrorCode::AudioCapture => "audio-capture",
            RecognitionErrorCode::Network => "network",
            RecognitionErrorCode::Other(code) => code,
        }
    }
}

/// One recognition engine event
#[derive(Debug, Clone)]
pub enum RecognitionEvent {
    /// The engine began capturing audio
    Started,
    /// A transcript (interim or final) is available
    Result(Utterance),
    /// The engine reported an error
    Error(RecognitionErrorCode),
    /// The engine session ended
    Ended,
}

/// Handle to a speech synthesis engine
pub trait SynthesisEngine: Send + Sync {
    /// Queue an utterance for playback
    fn speak(&self, text: &str);
    /// Cancel any in-flight utterance; must be idempotent
    fn cancel(&self);
}

/// One synthesis engine event, per utterance
#[derive(Debug, Clone)]
pub enum SynthesisEvent {
    /// The utterance finished playing
    Ended,
    /// Playback failed
    Error(String),
}

/// Handle to the panorama viewer
pub trait PanoramaViewer: Send + Sync {
    fn yaw(&self) -> f64;
    fn pitch(&self) -> f64;
    fn hfov(&self) -> f64;
    fn set_hfov(&self, hfov: f64);
    fn start_auto_rotate(&self, rate_deg_per_sec: f64);
    fn stop_auto_rotate(&self);
    fn enter_fullscreen(&self);

    /// Current camera pose
    fn pose(&self) -> CameraPose {
        CameraPose::new(self.yaw(), self.pitch(), self.hfov())
    }
}

/// Receives the assistant's final ordered answer set
///
/// Plain data hand-off boundary; persistence is out of core scope.
#[async_trait]
pub trait PreferenceSink: Send + Sync {
    async fn save(&self, preferences: &RentalPreferences) -> Result<(), SessionError>;
}
