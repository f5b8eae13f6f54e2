//! Voice session orchestration
//!
//! Features:
//! - Recognition lifecycle state machine with always-on auto-restart
//! - Action dispatch from resolved commands to the panorama viewer
//! - Scoped timers for mic-state reset, toast dismissal, and HUD auto-hide
//! - Speech feedback coordination (never transcribe our own voice)
//! - The scripted rental preference interview

pub mod assistant;
pub mod feedback;
pub mod lifecycle;
pub mod timer;
pub mod traits;

pub use assistant::{
    InterviewEvent, InterviewScript, RecordedAnswer, RentalInterview, RentalPreferences,
};
pub use feedback::SpeechFeedback;
pub use lifecycle::{MicState, SessionEvent, TourSession};
pub use timer::ScopedTimer;
pub use traits::{
    EngineError, PanoramaViewer, PreferenceSink, RecognitionEngine, RecognitionErrorCode,
    RecognitionEvent, SynthesisEngine, SynthesisEvent,
};

use thiserror::Error;

/// Session errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Recognition engine unavailable")]
    EngineUnavailable,

    #[error("Voice input disabled: permission denied")]
    PermissionDenied,

    #[error("Session closed")]
    Closed,

    #[error("Scene index {0} out of range")]
    SceneOutOfRange(usize),

    #[error("Engine error: {0}")]
    Engine(#[from] traits::EngineError),

    #[error("Preference sink error: {0}")]
    Sink(String),
}

impl From<SessionError> for voice_tour_core::Error {
    fn from(err: SessionError) -> Self {
        voice_tour_core::Error::Session(err.to_string())
    }
}
