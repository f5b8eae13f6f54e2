//! Recognition lifecycle and action dispatch for the tour viewer
//!
//! `TourSession` owns the single recognition engine handle and drives it
//! through the mic states. Engine events are pushed in by the embedding
//! application; resolved commands are dispatched to the panorama viewer and
//! surfaced to observers on a broadcast channel.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use voice_tour_command::{CommandInterpreter, CommandOutcome, VoiceIntent};
use voice_tour_config::Settings;
use voice_tour_core::{filter_scenes, DeepLink, QualityTier, Scene, Utterance};

use crate::feedback::SpeechFeedback;
use crate::timer::ScopedTimer;
use crate::traits::{
    PanoramaViewer, RecognitionEngine, RecognitionEvent, SynthesisEvent,
};
use crate::SessionError;

/// Finite-state representation of the recognition lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MicState {
    #[default]
    Idle,
    Listening,
    Processing,
    Success,
    Error,
}

/// Events surfaced to session observers
#[derive(Debug, Clone)]
pub enum SessionEvent {
    StateChanged { old: MicState, new: MicState },
    Transcript(Utterance),
    SceneChanged { index: usize, title: String },
    Toast(String),
    ToastCleared,
    HudShown,
    HudHidden,
    HelpRequested,
    QualityChanged(QualityTier),
    AutoRotateChanged(bool),
    ShareLink(String),
    VoiceDisabled { reason: String },
}

/// Voice-driven tour session
///
/// Owns the recognition engine handle exclusively; the matcher, resolver, and
/// UI never touch the engine directly.
pub struct TourSession {
    session_id: String,
    settings: Settings,
    scenes: Vec<Scene>,
    engine: Option<Arc<dyn RecognitionEngine>>,
    viewer: Arc<dyn PanoramaViewer>,
    feedback: Option<Arc<SpeechFeedback>>,
    interpreter: CommandInterpreter,

    state: Mutex<MicState>,
    recognizing: Mutex<bool>,
    always_on: Mutex<bool>,
    voice_disabled: Mutex<bool>,
    closed: Mutex<bool>,

    active_scene: Mutex<usize>,
    quality: Mutex<QualityTier>,
    auto_rotate: Mutex<bool>,

    mic_reset_timer: ScopedTimer,
    toast_timer: ScopedTimer,
    hud_timer: ScopedTimer,

    event_tx: broadcast::Sender<SessionEvent>,
    weak_self: Weak<TourSession>,
}

impl TourSession {
    /// Create a session over an immutable scene list
    ///
    /// `engine` is `None` when the runtime has no recognition API; the
    /// session then works as a plain viewer controller with voice disabled.
    pub fn new(
        settings: Settings,
        scenes: Vec<Scene>,
        engine: Option<Arc<dyn RecognitionEngine>>,
        viewer: Arc<dyn PanoramaViewer>,
        feedback: Option<Arc<SpeechFeedback>>,
    ) -> Arc<Self> {
        let session_id = uuid::Uuid::new_v4().to_string();
        let always_on = settings.recognition.always_on;

        match &engine {
            Some(engine) => {
                engine.set_lang(&settings.recognition.lang);
                engine.set_interim_results(settings.recognition.interim_results);
                engine.set_continuous(settings.recognition.continuous || always_on);
            }
            None => {
                tracing::warn!(session_id = %session_id, "Speech recognition not supported, voice input disabled");
            }
        }

        let voice_disabled = engine.is_none();
        let interpreter = CommandInterpreter::from_settings(&settings);
        let (event_tx, _) = broadcast::channel(64);

        Arc::new_cyclic(|weak| Self {
            session_id,
            settings,
            scenes,
            engine,
            viewer,
            feedback,
            interpreter,
            state: Mutex::new(MicState::Idle),
            recognizing: Mutex::new(false),
            always_on: Mutex::new(always_on),
            voice_disabled: Mutex::new(voice_disabled),
            closed: Mutex::new(false),
            active_scene: Mutex::new(0),
            quality: Mutex::new(QualityTier::Auto),
            auto_rotate: Mutex::new(false),
            mic_reset_timer: ScopedTimer::new(),
            toast_timer: ScopedTimer::new(),
            hud_timer: ScopedTimer::new(),
            event_tx,
            weak_self: weak.clone(),
        })
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn state(&self) -> MicState {
        *self.state.lock()
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn active_scene(&self) -> usize {
        *self.active_scene.lock()
    }

    pub fn quality(&self) -> QualityTier {
        *self.quality.lock()
    }

    pub fn auto_rotate(&self) -> bool {
        *self.auto_rotate.lock()
    }

    pub fn always_on(&self) -> bool {
        *self.always_on.lock()
    }

    pub fn is_listening(&self) -> bool {
        *self.recognizing.lock()
    }

    /// Is voice input permanently disabled for this session?
    pub fn voice_disabled(&self) -> bool {
        *self.voice_disabled.lock()
    }

    /// Scene indices whose titles contain the query, case-insensitive
    pub fn search_scenes(&self, query: &str) -> Vec<usize> {
        filter_scenes(&self.scenes, query)
    }

    /// Start a recognition session
    ///
    /// No-op while one is already active. An engine fault is caught and
    /// logged; the state machine is left unchanged.
    pub fn start_listening(&self) -> Result<(), SessionError> {
        if *self.closed.lock() {
            return Err(SessionError::Closed);
        }
        let engine = self.engine.as_ref().ok_or(SessionError::EngineUnavailable)?;
        if *self.voice_disabled.lock() {
            return Err(SessionError::PermissionDenied);
        }
        if *self.recognizing.lock() {
            return Ok(());
        }
        if self.feedback_speaking() {
            // Deferred: the feedback completion path restarts.
            return Ok(());
        }

        match engine.start() {
            Ok(()) => {
                *self.recognizing.lock() = true;
                self.transition(MicState::Listening);
                self.show_hud();
            }
            Err(e) => {
                tracing::warn!(session_id = %self.session_id, error = %e, "Recognition start fault");
            }
        }
        Ok(())
    }

    /// Stop listening; turning the mic off by hand also disables always-on
    pub fn stop_listening(&self) {
        *self.always_on.lock() = false;
        if let Some(engine) = &self.engine {
            engine.set_continuous(self.settings.recognition.continuous);
            engine.stop();
        }
    }

    /// Toggle the microphone
    pub fn toggle_mic(&self) -> Result<(), SessionError> {
        if *self.recognizing.lock() {
            self.stop_listening();
            Ok(())
        } else {
            self.start_listening()
        }
    }

    /// Enable or disable always-on mode
    ///
    /// Enabling while idle starts listening immediately.
    pub fn set_always_on(&self, enabled: bool) {
        if enabled && *self.voice_disabled.lock() {
            return;
        }
        *self.always_on.lock() = enabled;
        if let Some(engine) = &self.engine {
            engine.set_continuous(self.settings.recognition.continuous || enabled);
        }
        if enabled && !*self.recognizing.lock() && !self.feedback_speaking() {
            let _ = self.start_listening();
        }
    }

    /// Feed one recognition engine event into the state machine
    pub fn handle_recognition_event(&self, event: RecognitionEvent) {
        if *self.closed.lock() {
            return;
        }

        match event {
            RecognitionEvent::Started => {
                *self.recognizing.lock() = true;
                if self.state() == MicState::Idle {
                    self.transition(MicState::Listening);
                }
            }
            RecognitionEvent::Result(utterance) => {
                if self.feedback_speaking() {
                    // Never transcribe our own voice.
                    return;
                }
                let _ = self.event_tx.send(SessionEvent::Transcript(utterance.clone()));
                if utterance.is_final {
                    self.process_command(&utterance.text);
                }
            }
            RecognitionEvent::Error(code) => {
                tracing::warn!(session_id = %self.session_id, code = code.as_str(), "Recognition error");
                if code.is_permission_denial() {
                    self.disable_voice(code.as_str());
                } else {
                    self.transition(MicState::Error);
                    self.arm_mic_reset(self.settings.feedback.error_hold_ms);
                }
            }
            RecognitionEvent::Ended => {
                *self.recognizing.lock() = false;
                let always_on = *self.always_on.lock() && !*self.voice_disabled.lock();

                if always_on && !self.feedback_speaking() {
                    if self.try_restart() {
                        if self.state() == MicState::Idle {
                            self.transition(MicState::Listening);
                        }
                        return;
                    }
                }
                if self.state() == MicState::Listening {
                    self.transition(MicState::Idle);
                }
            }
        }
    }

    /// Feed a synthesis event (sessions with attached speech feedback)
    pub fn handle_synthesis_event(&self, event: SynthesisEvent) {
        if *self.closed.lock() {
            return;
        }
        let resume = match &self.feedback {
            Some(feedback) => feedback.on_synthesis_event(event),
            None => false,
        };
        if resume && *self.always_on.lock() {
            let _ = self.start_listening();
        }
    }

    /// Navigate relative to the active scene, wrapping at both ends
    pub fn navigate_relative(&self, delta: isize) {
        if self.scenes.is_empty() {
            return;
        }
        let count = self.scenes.len() as isize;
        let current = *self.active_scene.lock() as isize;
        let next = (current + delta).rem_euclid(count) as usize;
        self.set_active_scene(next);
    }

    /// Jump to a scene by index
    pub fn go_to_scene(&self, index: usize) -> Result<(), SessionError> {
        if index >= self.scenes.len() {
            return Err(SessionError::SceneOutOfRange(index));
        }
        self.set_active_scene(index);
        Ok(())
    }

    /// Build a deep link for the current view
    pub fn share_link(&self) -> DeepLink {
        DeepLink::new(*self.active_scene.lock(), self.viewer.pose())
    }

    /// Tear the session down: stop the engine, cancel synthesis, clear timers
    ///
    /// Idempotent; every exit path funnels here exactly once.
    pub fn shutdown(&self) {
        {
            let mut closed = self.closed.lock();
            if *closed {
                return;
            }
            *closed = true;
        }

        tracing::debug!(session_id = %self.session_id, "Session shutting down");

        self.mic_reset_timer.cancel();
        self.toast_timer.cancel();
        self.hud_timer.cancel();

        if let Some(engine) = &self.engine {
            engine.stop();
        }
        if let Some(feedback) = &self.feedback {
            feedback.cancel();
        }

        *self.recognizing.lock() = false;
        *self.state.lock() = MicState::Idle;
    }

    fn feedback_speaking(&self) -> bool {
        self.feedback
            .as_ref()
            .map(|f| f.is_speaking())
            .unwrap_or(false)
    }

    /// Attempt an engine restart under the mutual-exclusion guard
    fn try_restart(&self) -> bool {
        if *self.recognizing.lock() {
            return true;
        }
        let Some(engine) = &self.engine else {
            return false;
        };
        match engine.start() {
            Ok(()) => {
                *self.recognizing.lock() = true;
                true
            }
            Err(e) => {
                tracing::warn!(session_id = %self.session_id, error = %e, "Recognition restart fault");
                false
            }
        }
    }

    /// Permission denial: terminal for the session
    fn disable_voice(&self, code: &str) {
        *self.voice_disabled.lock() = true;
        *self.always_on.lock() = false;
        *self.recognizing.lock() = false;
        self.mic_reset_timer.cancel();
        self.transition(MicState::Idle);
        let _ = self.event_tx.send(SessionEvent::VoiceDisabled {
            reason: code.to_string(),
        });
    }

    /// The single state transition point
    fn transition(&self, new: MicState) {
        let old = {
            let mut state = self.state.lock();
            if *state == new {
                return;
            }
            let old = *state;
            *state = new;
            old
        };
        tracing::debug!(session_id = %self.session_id, ?old, ?new, "Mic state transition");
        let _ = self.event_tx.send(SessionEvent::StateChanged { old, new });
    }

    fn process_command(&self, raw: &str) {
        self.transition(MicState::Processing);
        let outcome = self.interpreter.interpret(raw, &self.scenes);
        tracing::debug!(session_id = %self.session_id, transcript = raw, ?outcome, "Voice command resolved");
        self.dispatch(outcome);
    }

    fn dispatch(&self, outcome: CommandOutcome) {
        let feedback = &self.settings.feedback;
        match outcome {
            CommandOutcome::Intent(intent) => self.dispatch_intent(intent),
            CommandOutcome::SceneMatch { index } => {
                self.set_active_scene(index);
                self.succeed(feedback.success_hold_ms);
            }
            CommandOutcome::Ambiguous { first, second } => {
                self.show_toast(format!(
                    "Did you mean {} or {}?",
                    self.scenes[first].title, self.scenes[second].title
                ));
                self.fail(feedback.error_hold_ms);
            }
            CommandOutcome::NoMatch { query } => {
                self.show_toast(format!(
                    "Couldn't find \"{query}\". Try saying the room name clearly."
                ));
                self.fail(feedback.error_hold_ms);
            }
            CommandOutcome::Unrecognized => {
                self.show_toast("Command not recognized. Say \"help\" for examples.".to_string());
                self.fail(feedback.error_hold_ms);
            }
        }
    }

    fn dispatch_intent(&self, intent: VoiceIntent) {
        let matching = &self.settings.matching;
        let feedback = &self.settings.feedback;

        match intent {
            VoiceIntent::NextScene => {
                self.navigate_relative(1);
                self.succeed(feedback.success_hold_ms);
            }
            VoiceIntent::PreviousScene => {
                self.navigate_relative(-1);
                self.succeed(feedback.success_hold_ms);
            }
            VoiceIntent::Help => {
                let _ = self.event_tx.send(SessionEvent::HelpRequested);
                self.succeed(feedback.success_hold_ms);
            }
            VoiceIntent::ZoomIn => {
                let hfov = (self.viewer.hfov() - matching.zoom_step_degrees).max(matching.hfov_min);
                self.viewer.set_hfov(hfov);
                self.succeed(feedback.control_hold_ms);
            }
            VoiceIntent::ZoomOut => {
                let hfov = (self.viewer.hfov() + matching.zoom_step_degrees).min(matching.hfov_max);
                self.viewer.set_hfov(hfov);
                self.succeed(feedback.control_hold_ms);
            }
            VoiceIntent::AutoRotateOn => {
                *self.auto_rotate.lock() = true;
                self.viewer
                    .start_auto_rotate(self.settings.viewer.auto_rotate_rate);
                let _ = self.event_tx.send(SessionEvent::AutoRotateChanged(true));
                self.show_toast("Auto-rotate on".to_string());
                self.succeed(feedback.control_hold_ms);
            }
            VoiceIntent::AutoRotateOff => {
                *self.auto_rotate.lock() = false;
                self.viewer.stop_auto_rotate();
                let _ = self.event_tx.send(SessionEvent::AutoRotateChanged(false));
                self.show_toast("Auto-rotate off".to_string());
                self.succeed(feedback.control_hold_ms);
            }
            VoiceIntent::QualityBest => self.set_quality(QualityTier::Best),
            VoiceIntent::QualityEco => self.set_quality(QualityTier::Eco),
            VoiceIntent::QualityAuto => self.set_quality(QualityTier::Auto),
            VoiceIntent::Fullscreen => {
                self.viewer.enter_fullscreen();
                self.succeed(feedback.control_hold_ms);
            }
            VoiceIntent::Share => {
                let link = self.share_link();
                let _ = self.event_tx.send(SessionEvent::ShareLink(link.to_query()));
                self.show_toast("Link ready".to_string());
                self.succeed(feedback.control_hold_ms);
            }
        }
    }

    fn set_quality(&self, tier: QualityTier) {
        *self.quality.lock() = tier;
        let _ = self.event_tx.send(SessionEvent::QualityChanged(tier));
        self.show_toast(format!("Quality: {}", tier.display_name()));
        self.succeed(self.settings.feedback.control_hold_ms);
    }

    fn set_active_scene(&self, index: usize) {
        *self.active_scene.lock() = index;
        let title = self.scenes[index].title.clone();
        let _ = self.event_tx.send(SessionEvent::SceneChanged {
            index,
            title: title.clone(),
        });
        self.show_toast(format!("Showing {title}"));
    }

    fn succeed(&self, hold_ms: u64) {
        self.transition(MicState::Success);
        self.arm_mic_reset(hold_ms);
    }

    fn fail(&self, hold_ms: u64) {
        self.transition(MicState::Error);
        self.arm_mic_reset(hold_ms);
    }

    fn arm_mic_reset(&self, hold_ms: u64) {
        let weak = self.weak_self.clone();
        self.mic_reset_timer
            .arm(Duration::from_millis(hold_ms), async move {
                if let Some(session) = weak.upgrade() {
                    session.on_mic_reset();
                }
            });
    }

    fn on_mic_reset(&self) {
        if *self.closed.lock() {
            return;
        }
        if !matches!(self.state(), MicState::Success | MicState::Error) {
            return;
        }

        let always_on = *self.always_on.lock() && !*self.voice_disabled.lock();
        if always_on && !self.feedback_speaking() && self.try_restart() {
            self.transition(MicState::Listening);
        } else {
            self.transition(MicState::Idle);
        }
    }

    fn show_toast(&self, message: String) {
        let _ = self.event_tx.send(SessionEvent::Toast(message));

        let weak = self.weak_self.clone();
        self.toast_timer.arm(
            Duration::from_millis(self.settings.feedback.toast_ms),
            async move {
                if let Some(session) = weak.upgrade() {
                    if !*session.closed.lock() {
                        let _ = session.event_tx.send(SessionEvent::ToastCleared);
                    }
                }
            },
        );
    }

    fn show_hud(&self) {
        let _ = self.event_tx.send(SessionEvent::HudShown);

        let weak = self.weak_self.clone();
        self.hud_timer.arm(
            Duration::from_millis(self.settings.feedback.hud_hide_ms),
            async move {
                if let Some(session) = weak.upgrade() {
                    if !*session.closed.lock() {
                        let _ = session.event_tx.send(SessionEvent::HudHidden);
                    }
                }
            },
        );
    }
}

impl Drop for TourSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeEngine {
        starts: AtomicUsize,
        stops: AtomicUsize,
    }

    impl RecognitionEngine for FakeEngine {
        fn start(&self) -> Result<(), crate::EngineError> {
            self.starts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        fn stop(&self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
        fn set_continuous(&self, _continuous: bool) {}
        fn set_interim_results(&self, _interim: bool) {}
        fn set_lang(&self, _lang: &str) {}
    }

    struct FakeViewer {
        hfov: Mutex<f64>,
        auto_rotating: Mutex<bool>,
        fullscreens: AtomicUsize,
    }

    impl Default for FakeViewer {
        fn default() -> Self {
            Self {
                hfov: Mutex::new(100.0),
                auto_rotating: Mutex::new(false),
                fullscreens: AtomicUsize::new(0),
            }
        }
    }

    impl PanoramaViewer for FakeViewer {
        fn yaw(&self) -> f64 {
            15.4
        }
        fn pitch(&self) -> f64 {
            -3.2
        }
        fn hfov(&self) -> f64 {
            *self.hfov.lock()
        }
        fn set_hfov(&self, hfov: f64) {
            *self.hfov.lock() = hfov;
        }
        fn start_auto_rotate(&self, _rate: f64) {
            *self.auto_rotating.lock() = true;
        }
        fn stop_auto_rotate(&self) {
            *self.auto_rotating.lock() = false;
        }
        fn enter_fullscreen(&self) {
            self.fullscreens.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn scenes() -> Vec<Scene> {
        vec![
            Scene::new(1, "Living Room", "https://cdn.example/1.jpg"),
            Scene::new(2, "Kitchen", "https://cdn.example/2.jpg"),
            Scene::new(3, "Balcony", "https://cdn.example/3.jpg"),
        ]
    }

    fn session_with(
        engine: Arc<FakeEngine>,
        viewer: Arc<FakeViewer>,
        always_on: bool,
    ) -> Arc<TourSession> {
        let mut settings = Settings::new();
        settings.recognition.always_on = always_on;
        TourSession::new(settings, scenes(), Some(engine), viewer, None)
    }

    fn final_result(text: &str) -> RecognitionEvent {
        RecognitionEvent::Result(Utterance::final_result(text))
    }

    #[tokio::test]
    async fn test_initial_state() {
        let session = session_with(Arc::default(), Arc::default(), false);
        assert_eq!(session.state(), MicState::Idle);
        assert_eq!(session.active_scene(), 0);
        assert!(!session.voice_disabled());
    }

    #[tokio::test]
    async fn test_start_is_mutually_exclusive() {
        let engine = Arc::new(FakeEngine::default());
        let session = session_with(engine.clone(), Arc::default(), false);

        session.start_listening().unwrap();
        session.start_listening().unwrap();

        assert_eq!(engine.starts.load(Ordering::SeqCst), 1);
        assert_eq!(session.state(), MicState::Listening);
    }

    #[tokio::test]
    async fn test_navigation_wraps_both_ways() {
        let session = session_with(Arc::default(), Arc::default(), false);

        session.navigate_relative(-1);
        assert_eq!(session.active_scene(), 2);

        session.navigate_relative(1);
        assert_eq!(session.active_scene(), 0);
    }

    #[tokio::test]
    async fn test_next_command_advances_scene() {
        let session = session_with(Arc::default(), Arc::default(), false);
        session.start_listening().unwrap();

        session.handle_recognition_event(final_result("next"));

        assert_eq!(session.active_scene(), 1);
        assert_eq!(session.state(), MicState::Success);
    }

    #[tokio::test]
    async fn test_zoom_clamps_to_floor() {
        let viewer = Arc::new(FakeViewer::default());
        let session = session_with(Arc::default(), viewer.clone(), false);
        session.start_listening().unwrap();

        for _ in 0..10 {
            session.handle_recognition_event(final_result("zoom in"));
        }
        assert_eq!(*viewer.hfov.lock(), 30.0);

        for _ in 0..12 {
            session.handle_recognition_event(final_result("zoom out"));
        }
        assert_eq!(*viewer.hfov.lock(), 120.0);
    }

    #[tokio::test]
    async fn test_quality_command() {
        let session = session_with(Arc::default(), Arc::default(), false);
        session.start_listening().unwrap();

        session.handle_recognition_event(final_result("best quality"));
        assert_eq!(session.quality(), QualityTier::Best);

        session.handle_recognition_event(final_result("low quality"));
        assert_eq!(session.quality(), QualityTier::Eco);
    }

    #[tokio::test]
    async fn test_fuzzy_scene_command() {
        let session = session_with(Arc::default(), Arc::default(), false);
        session.start_listening().unwrap();

        session.handle_recognition_event(final_result("show kichen"));

        assert_eq!(session.active_scene(), 1);
        assert_eq!(session.state(), MicState::Success);
    }

    #[tokio::test]
    async fn test_unrecognized_command_is_error() {
        let session = session_with(Arc::default(), Arc::default(), false);
        session.start_listening().unwrap();

        session.handle_recognition_event(final_result("make me a sandwich"));

        assert_eq!(session.state(), MicState::Error);
        assert_eq!(session.active_scene(), 0);
    }

    #[tokio::test]
    async fn test_share_link_rounds_pose() {
        let session = session_with(Arc::default(), Arc::default(), false);
        session.navigate_relative(1);

        let link = session.share_link();
        assert_eq!(link.to_query(), "scene=1&yaw=15&pitch=-3&fov=100");
    }

    #[tokio::test]
    async fn test_permission_denial_is_terminal() {
        let engine = Arc::new(FakeEngine::default());
        let session = session_with(engine.clone(), Arc::default(), true);
        session.start_listening().unwrap();

        session.handle_recognition_event(RecognitionEvent::Error(
            crate::RecognitionErrorCode::NotAllowed,
        ));
        session.handle_recognition_event(RecognitionEvent::Ended);

        assert!(session.voice_disabled());
        assert!(!session.always_on());
        assert_eq!(session.state(), MicState::Idle);
        // The initial start is the only one ever issued.
        assert_eq!(engine.starts.load(Ordering::SeqCst), 1);
        assert!(session.start_listening().is_err());
    }

    #[tokio::test]
    async fn test_engine_unavailable() {
        let viewer: Arc<FakeViewer> = Arc::default();
        let session = TourSession::new(Settings::new(), scenes(), None, viewer, None);

        assert!(session.voice_disabled());
        assert!(matches!(
            session.start_listening(),
            Err(SessionError::EngineUnavailable)
        ));
        // The rest of the session still works.
        session.navigate_relative(1);
        assert_eq!(session.active_scene(), 1);
    }
}
