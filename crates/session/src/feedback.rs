//! Speech feedback coordination
//!
//! Serializes synthesized speech with recognition so the engine never
//! transcribes the system's own voice. While the speaking flag is raised the
//! session discards recognition results; when the utterance finishes (or
//! fails) the coordinator authorizes exactly one recognition restart.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::traits::{SynthesisEngine, SynthesisEvent};

/// Coordinates one synthesis engine with the recognition lifecycle
pub struct SpeechFeedback {
    synth: Arc<dyn SynthesisEngine>,
    speaking: Mutex<bool>,
    /// A restart is owed for the current utterance cycle
    resume_pending: Mutex<bool>,
}

impl SpeechFeedback {
    pub fn new(synth: Arc<dyn SynthesisEngine>) -> Self {
        Self {
            synth,
            speaking: Mutex::new(false),
            resume_pending: Mutex::new(false),
        }
    }

    /// Speak `text`, cancelling any in-flight utterance first
    pub fn speak(&self, text: &str) {
        self.synth.cancel();
        *self.speaking.lock() = true;
        *self.resume_pending.lock() = true;
        self.synth.speak(text);
    }

    /// Cancel playback and drop any owed restart
    pub fn cancel(&self) {
        self.synth.cancel();
        *self.speaking.lock() = false;
        *self.resume_pending.lock() = false;
    }

    /// Is an utterance currently playing?
    pub fn is_speaking(&self) -> bool {
        *self.speaking.lock()
    }

    /// Feed a synthesis event; returns true when listening should resume
    ///
    /// Returns true at most once per `speak` call, for both completion and
    /// failure — a playback fault must never strand the session muted.
    pub fn on_synthesis_event(&self, event: SynthesisEvent) -> bool {
        if let SynthesisEvent::Error(reason) = &event {
            tracing::warn!(%reason, "Speech synthesis failed");
        }

        *self.speaking.lock() = false;

        let mut pending = self.resume_pending.lock();
        if *pending {
            *pending = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeSynth {
        spoken: Mutex<Vec<String>>,
        cancels: AtomicUsize,
    }

    impl SynthesisEngine for FakeSynth {
        fn speak(&self, text: &str) {
            self.spoken.lock().push(text.to_string());
        }
        fn cancel(&self) {
            self.cancels.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_speak_raises_flag_and_cancels_inflight() {
        let synth = Arc::new(FakeSynth::default());
        let feedback = SpeechFeedback::new(synth.clone());

        feedback.speak("hello");
        assert!(feedback.is_speaking());
        assert_eq!(synth.cancels.load(Ordering::SeqCst), 1);
        assert_eq!(synth.spoken.lock().as_slice(), ["hello".to_string()]);
    }

    #[test]
    fn test_resume_authorized_exactly_once() {
        let feedback = SpeechFeedback::new(Arc::new(FakeSynth::default()));

        feedback.speak("question one");
        assert!(feedback.on_synthesis_event(SynthesisEvent::Ended));
        // A duplicate end event does not authorize a second restart.
        assert!(!feedback.on_synthesis_event(SynthesisEvent::Ended));
    }

    #[test]
    fn test_error_still_resumes() {
        let feedback = SpeechFeedback::new(Arc::new(FakeSynth::default()));

        feedback.speak("question");
        assert!(feedback.on_synthesis_event(SynthesisEvent::Error("engine fault".into())));
        assert!(!feedback.is_speaking());
    }

    #[test]
    fn test_cancel_drops_owed_restart() {
        let feedback = SpeechFeedback::new(Arc::new(FakeSynth::default()));

        feedback.speak("question");
        feedback.cancel();
        assert!(!feedback.on_synthesis_event(SynthesisEvent::Ended));
    }
}
