//! Voice rental assistant
//!
//! Runs an ordered question script over the recognition engine, speaking each
//! question through the feedback coordinator and recording one answer per
//! question. Utterances that echo the question just asked are rejected and
//! the user is reprompted; the script never advances on an echo.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use voice_tour_config::Settings;

use crate::feedback::SpeechFeedback;
use crate::traits::{
    PreferenceSink, RecognitionEngine, RecognitionEvent, SynthesisEngine, SynthesisEvent,
};

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9 ]").expect("static pattern"));

/// Spoken when an utterance is rejected as an echo of the question
const REPROMPT: &str = "Please answer the question so I can continue.";

/// Question fragments that mark an utterance as an echo regardless of the
/// overlap ratio
const ECHO_FRAGMENTS: &[&str] = &[
    "how many",
    "what is your budget",
    "which location",
    "amenities",
    "are you looking",
];

/// The ordered interview script
///
/// The final entry is a sign-off, not a question: the interview completes
/// once the last real question has been answered.
#[derive(Debug, Clone)]
pub struct InterviewScript {
    questions: Vec<String>,
}

impl InterviewScript {
    /// Build a script; needs at least one question plus the sign-off
    pub fn new(questions: Vec<String>) -> Self {
        assert!(questions.len() >= 2, "script needs a question and a sign-off");
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, index: usize) -> Option<&str> {
        self.questions.get(index).map(String::as_str)
    }

    /// Number of questions that collect an answer
    pub fn answer_count(&self) -> usize {
        self.questions.len() - 1
    }
}

impl Default for InterviewScript {
    fn default() -> Self {
        Self::new(vec![
            "Hello! I'm Aria, your AI rental assistant. Let's find your ideal rental property. \
             First, which sector are you interested in?"
                .to_string(),
            "What is your budget range for the rent?".to_string(),
            "How many bedrooms or what property size do you prefer?".to_string(),
            "Are there any specific amenities or features you want?".to_string(),
            "Thank you for sharing all the details. I'll save your preferences now.".to_string(),
        ])
    }
}

/// One recorded answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedAnswer {
    pub question_index: usize,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// The ordered preference set handed off when the interview completes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalPreferences {
    pub location: String,
    pub budget: String,
    pub size: String,
    pub amenities: Vec<String>,
    pub furnishing: String,
    pub property_type: String,
}

impl RentalPreferences {
    /// Fold the ordered answers into the preference record
    pub fn from_answers(answers: &[RecordedAnswer]) -> Self {
        let answer = |i: usize| answers.get(i).map(|a| a.text.clone()).unwrap_or_default();
        Self {
            location: answer(0),
            budget: answer(1),
            size: answer(2),
            amenities: answers
                .get(3)
                .map(|a| vec![a.text.clone()])
                .unwrap_or_default(),
            furnishing: String::new(),
            property_type: String::new(),
        }
    }

    /// Derive the property search query: "<size> in <location>"
    pub fn search_query(&self) -> String {
        format!("{} in {}", self.size, self.location)
            .trim()
            .to_string()
    }
}

/// Events surfaced to interview observers
#[derive(Debug, Clone)]
pub enum InterviewEvent {
    Started { session_id: String },
    QuestionAsked { index: usize, text: String },
    /// Recognition resumed; play the ready cue
    ListeningStarted,
    AnswerRecorded { index: usize, text: String },
    EchoRejected { text: String, ratio: f64 },
    Reprompted,
    Completed {
        preferences: RentalPreferences,
        search_query: String,
    },
    VoiceDisabled { reason: String },
    SaveFailed { reason: String },
}

/// Voice-driven preference interview
pub struct RentalInterview {
    session_id: String,
    script: InterviewScript,
    echo_threshold: f64,
    engine: Arc<dyn RecognitionEngine>,
    feedback: SpeechFeedback,
    sink: Arc<dyn PreferenceSink>,

    position: Mutex<usize>,
    answers: Mutex<Vec<RecordedAnswer>>,
    recognizing: Mutex<bool>,
    voice_disabled: Mutex<bool>,
    completed: Mutex<bool>,
    closed: Mutex<bool>,

    event_tx: broadcast::Sender<InterviewEvent>,
}

impl RentalInterview {
    pub fn new(
        settings: &Settings,
        script: InterviewScript,
        engine: Arc<dyn RecognitionEngine>,
        synth: Arc<dyn SynthesisEngine>,
        sink: Arc<dyn PreferenceSink>,
    ) -> Self {
        engine.set_lang(&settings.recognition.lang);
        engine.set_interim_results(false);
        engine.set_continuous(false);

        let (event_tx, _) = broadcast::channel(64);

        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            script,
            echo_threshold: settings.feedback.echo_overlap_threshold,
            engine,
            feedback: SpeechFeedback::new(synth),
            sink,
            position: Mutex::new(0),
            answers: Mutex::new(Vec::new()),
            recognizing: Mutex::new(false),
            voice_disabled: Mutex::new(false),
            completed: Mutex::new(false),
            closed: Mutex::new(false),
            event_tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InterviewEvent> {
        self.event_tx.subscribe()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Current script position
    pub fn position(&self) -> usize {
        *self.position.lock()
    }

    pub fn is_completed(&self) -> bool {
        *self.completed.lock()
    }

    pub fn is_speaking(&self) -> bool {
        self.feedback.is_speaking()
    }

    /// Answers recorded so far, in script order
    pub fn answers(&self) -> Vec<RecordedAnswer> {
        self.answers.lock().clone()
    }

    /// Begin the interview: speak the first question
    pub fn start(&self) {
        let _ = self.event_tx.send(InterviewEvent::Started {
            session_id: self.session_id.clone(),
        });
        self.ask(0);
    }

    /// Feed one recognition engine event
    pub async fn handle_recognition_event(&self, event: RecognitionEvent) {
        if *self.closed.lock() || *self.completed.lock() {
            return;
        }

        match event {
            RecognitionEvent::Started => {
                *self.recognizing.lock() = true;
            }
            RecognitionEvent::Result(utterance) => {
                if self.feedback.is_speaking() {
                    // Ignore the bot's own voice.
                    return;
                }
                if utterance.is_final && !utterance.is_empty() {
                    self.process_answer(utterance.text.trim()).await;
                }
            }
            RecognitionEvent::Error(code) => {
                tracing::warn!(session_id = %self.session_id, code = code.as_str(), "Recognition error");
                if code.is_permission_denial() {
                    *self.voice_disabled.lock() = true;
                    *self.recognizing.lock() = false;
                    let _ = self.event_tx.send(InterviewEvent::VoiceDisabled {
                        reason: code.as_str().to_string(),
                    });
                } else if !*self.recognizing.lock() {
                    self.safe_start_recognition();
                }
            }
            RecognitionEvent::Ended => {
                *self.recognizing.lock() = false;
                if !self.feedback.is_speaking() {
                    self.safe_start_recognition();
                }
            }
        }
    }

    /// Feed a synthesis event; listening resumes exactly once per utterance
    pub fn handle_synthesis_event(&self, event: SynthesisEvent) {
        if *self.closed.lock() {
            return;
        }
        if self.feedback.on_synthesis_event(event) && !*self.completed.lock() {
            self.safe_start_recognition();
        }
    }

    /// Tear down: stop the engine and cancel playback, exactly once
    pub fn shutdown(&self) {
        {
            let mut closed = self.closed.lock();
            if *closed {
                return;
            }
            *closed = true;
        }
        tracing::debug!(session_id = %self.session_id, "Interview shutting down");
        self.engine.stop();
        self.feedback.cancel();
        *self.recognizing.lock() = false;
    }

    fn ask(&self, index: usize) {
        if let Some(text) = self.script.question(index) {
            let _ = self.event_tx.send(InterviewEvent::QuestionAsked {
                index,
                text: text.to_string(),
            });
            self.feedback.speak(text);
        }
    }

    /// Start recognition under the re-entrancy and mute guards
    fn safe_start_recognition(&self) {
        if *self.recognizing.lock()
            || self.feedback.is_speaking()
            || *self.voice_disabled.lock()
            || *self.completed.lock()
            || *self.closed.lock()
        {
            return;
        }
        match self.engine.start() {
            Ok(()) => {
                *self.recognizing.lock() = true;
                let _ = self.event_tx.send(InterviewEvent::ListeningStarted);
            }
            Err(e) => {
                tracing::warn!(session_id = %self.session_id, error = %e, "Recognition start fault");
            }
        }
    }

    async fn process_answer(&self, speech: &str) {
        let index = *self.position.lock();
        let question = match self.script.question(index) {
            Some(q) => q,
            None => return,
        };

        let ratio = overlap_ratio(speech, question);
        let normalized = sanitize(speech);
        let echoed = ECHO_FRAGMENTS.iter().any(|f| normalized.contains(f));

        if ratio > self.echo_threshold || echoed {
            tracing::debug!(
                session_id = %self.session_id,
                ratio = format!("{ratio:.2}"),
                "Ignoring repeated or similar input"
            );
            let _ = self.event_tx.send(InterviewEvent::EchoRejected {
                text: speech.to_string(),
                ratio,
            });
            let _ = self.event_tx.send(InterviewEvent::Reprompted);
            self.feedback.speak(REPROMPT);
            return;
        }

        self.answers.lock().push(RecordedAnswer {
            question_index: index,
            text: speech.to_string(),
            at: Utc::now(),
        });
        let _ = self.event_tx.send(InterviewEvent::AnswerRecorded {
            index,
            text: speech.to_string(),
        });

        let next = index + 1;
        *self.position.lock() = next;

        if next == self.script.len() - 1 {
            // Last real question answered: sign off and hand the answers over.
            self.ask(next);
            self.complete().await;
        } else {
            self.ask(next);
        }
    }

    async fn complete(&self) {
        let preferences = RentalPreferences::from_answers(&self.answers.lock());
        let search_query = preferences.search_query();

        if let Err(e) = self.sink.save(&preferences).await {
            tracing::error!(session_id = %self.session_id, error = %e, "Failed to save preferences");
            let _ = self.event_tx.send(InterviewEvent::SaveFailed {
                reason: e.to_string(),
            });
        }

        *self.completed.lock() = true;
        self.engine.stop();

        let _ = self.event_tx.send(InterviewEvent::Completed {
            preferences,
            search_query,
        });
    }
}

impl Drop for RentalInterview {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Lowercase and strip everything outside `[a-z0-9 ]`
fn sanitize(text: &str) -> String {
    NON_ALNUM.replace_all(&text.to_lowercase(), "").into_owned()
}

/// Token-set overlap between an utterance and a question, measured over the
/// question's token count
fn overlap_ratio(speech: &str, question: &str) -> f64 {
    let speech_tokens: std::collections::HashSet<String> =
        sanitize(speech).split_whitespace().map(String::from).collect();
    let question_tokens: std::collections::HashSet<String> =
        sanitize(question).split_whitespace().map(String::from).collect();

    let overlap = speech_tokens
        .iter()
        .filter(|t| question_tokens.contains(*t))
        .count();

    overlap as f64 / question_tokens.len().max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_ratio_echo() {
        let question = "What is your budget range for the rent?";
        let echo = "what is your budget range for the rent";
        assert!(overlap_ratio(echo, question) > 0.9);
    }

    #[test]
    fn test_overlap_ratio_genuine_answer() {
        let question = "What is your budget range for the rent?";
        let answer = "around twenty thousand";
        assert!(overlap_ratio(answer, question) < 0.2);
    }

    #[test]
    fn test_sanitize_strips_punctuation() {
        assert_eq!(sanitize("Sector 21, please!"), "sector 21 please");
    }

    #[test]
    fn test_preferences_from_answers() {
        let answers: Vec<RecordedAnswer> = ["Sector 45", "20000", "2 bedrooms", "parking"]
            .iter()
            .enumerate()
            .map(|(i, text)| RecordedAnswer {
                question_index: i,
                text: text.to_string(),
                at: Utc::now(),
            })
            .collect();

        let prefs = RentalPreferences::from_answers(&answers);
        assert_eq!(prefs.location, "Sector 45");
        assert_eq!(prefs.budget, "20000");
        assert_eq!(prefs.size, "2 bedrooms");
        assert_eq!(prefs.amenities, vec!["parking".to_string()]);
        assert_eq!(prefs.search_query(), "2 bedrooms in Sector 45");
    }

    #[test]
    fn test_preferences_tolerate_missing_answers() {
        let prefs = RentalPreferences::from_answers(&[]);
        assert_eq!(prefs.location, "");
        assert!(prefs.amenities.is_empty());
        assert_eq!(prefs.search_query(), "in");
    }

    #[test]
    fn test_default_script_shape() {
        let script = InterviewScript::default();
        assert_eq!(script.len(), 5);
        assert_eq!(script.answer_count(), 4);
        assert!(script.question(0).unwrap().contains("sector"));
    }
}
