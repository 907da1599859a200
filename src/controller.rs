//! Form state and the single-request lifecycle behind the translator window.
//!
//! The controller never touches the network itself. [`TranslationFormController::begin_submit`]
//! hands out a [`Submission`] and flips the form into `Sending`; whoever runs the request
//! reports back through [`TranslationFormController::finish_submit`]. The UI does that across
//! a channel, tests and simple callers can use [`TranslationFormController::submit`].

use crate::backend::{TranslateRequest, TranslationBackend};
use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::error::{ClipboardError, TranslateError};
use crate::languages::Language;
use std::time::{Duration, Instant};

pub const MAX_INPUT_CHARS: usize = 5000;

pub const UNREACHABLE_MESSAGE: &str =
    "Error: Unable to connect to translation service. Make sure the backend is running.";

/// Where the current (or last) translate action stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Sending { ticket: u64 },
    Succeeded { text: String },
    Failed { message: String },
}

/// One request handed out by `begin_submit`; `ticket` must come back with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: u64,
    pub request: TranslateRequest,
}

/// Deadline for the "Copied!" affordance. Re-arming replaces the old deadline,
/// so an earlier copy can never reset a later one.
#[derive(Debug, Clone)]
pub struct ConfirmationTimer {
    window: Duration,
    deadline: Option<Instant>,
}

impl ConfirmationTimer {
    pub fn new(window: Duration) -> Self {
        Self { window, deadline: None }
    }

    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.deadline.map_or(false, |d| now < d)
    }

    /// Drops an expired deadline. Returns true if that flipped the flag off.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.filter(|d| now < *d).map(|d| d - now)
    }
}

pub struct TranslationFormController {
    input_text: String,
    source: Language,
    target: Language,
    phase: Phase,
    copy: ConfirmationTimer,
    next_ticket: u64,
}

impl Default for TranslationFormController {
    fn default() -> Self {
        Self::new(Language::DEFAULT_SOURCE, Language::DEFAULT_TARGET, Duration::from_millis(2000))
    }
}

impl TranslationFormController {
    pub fn new(source: Language, target: Language, copy_window: Duration) -> Self {
        Self {
            input_text: String::new(),
            source,
            target,
            phase: Phase::Idle,
            copy: ConfirmationTimer::new(copy_window),
            next_ticket: 1,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.default_source, cfg.default_target, cfg.copy_confirm_window())
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn source_language(&self) -> Language {
        self.source
    }

    pub fn target_language(&self) -> Language {
        self.target
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Sending { .. })
    }

    /// Translation or error text to show; empty while idle or sending.
    pub fn translated_text(&self) -> &str {
        match &self.phase {
            Phase::Succeeded { text } => text,
            Phase::Failed { message } => message,
            Phase::Idle | Phase::Sending { .. } => "",
        }
    }

    pub fn char_count(&self) -> usize {
        self.input_text.chars().count()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.input_text.trim().is_empty()
    }

    pub fn set_text(&mut self, raw: &str) {
        self.input_text = match raw.char_indices().nth(MAX_INPUT_CHARS) {
            Some((cut, _)) => raw[..cut].to_string(),
            None => raw.to_string(),
        };
    }

    pub fn set_source_language(&mut self, lang: Language) {
        self.source = lang;
    }

    pub fn set_target_language(&mut self, lang: Language) {
        self.target = lang;
    }

    /// Ignored while a request is in flight; returns whether the swap happened.
    pub fn swap_languages(&mut self) -> bool {
        if self.is_loading() {
            log::debug!("Swap ignored while a translation is in flight");
            return false;
        }
        std::mem::swap(&mut self.source, &mut self.target);
        self.phase = Phase::Idle;
        true
    }

    /// Empties input and output. An in-flight request keeps running and still lands.
    pub fn clear(&mut self) {
        self.input_text.clear();
        if !self.is_loading() {
            self.phase = Phase::Idle;
        }
    }

    pub fn begin_submit(&mut self) -> Option<Submission> {
        if !self.can_submit() {
            return None;
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.phase = Phase::Sending { ticket };
        Some(Submission {
            ticket,
            request: TranslateRequest {
                text: self.input_text.trim().to_string(),
                source_language: self.source,
                target_language: self.target,
            },
        })
    }

    /// Applies the outcome of `ticket`. Outcomes for anything but the pending ticket are dropped.
    pub fn finish_submit(&mut self, ticket: u64, outcome: Result<String, TranslateError>) -> bool {
        if self.phase != (Phase::Sending { ticket }) {
            log::warn!("Dropping outcome for stale request #{}", ticket);
            return false;
        }
        self.phase = match outcome {
            Ok(text) => {
                log::info!("Request #{} translated ({} chars)", ticket, text.chars().count());
                Phase::Succeeded { text }
            }
            Err(e) if e.is_transport() => {
                log::error!("Request #{} failed: {}", ticket, e);
                Phase::Failed { message: UNREACHABLE_MESSAGE.to_string() }
            }
            Err(e) => {
                log::warn!("Request #{} rejected by backend: {}", ticket, e);
                Phase::Failed { message: format!("Error: {}", e) }
            }
        };
        true
    }

    /// Runs one whole submission against `backend`. Returns false if nothing was sent.
    pub async fn submit<B>(&mut self, backend: &B) -> bool
    where
        B: TranslationBackend + ?Sized,
    {
        let Some(sub) = self.begin_submit() else {
            return false;
        };
        let outcome = backend.translate(&sub.request).await;
        self.finish_submit(sub.ticket, outcome)
    }

    pub fn copy_result(&mut self, clipboard: &dyn Clipboard, now: Instant) -> Result<(), ClipboardError> {
        match clipboard.write_text(self.translated_text()) {
            Ok(()) => {
                self.copy.arm(now);
                Ok(())
            }
            Err(e) => {
                log::warn!("Copy failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn is_copy_confirmed(&self, now: Instant) -> bool {
        self.copy.is_active(now)
    }

    /// Expires the copy confirmation; call once per frame.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.copy.tick(now)
    }

    pub fn copy_confirm_remaining(&self, now: Instant) -> Option<Duration> {
        self.copy.remaining(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::sync::Mutex;

    enum Canned {
        Ok(&'static str),
        Backend(&'static str),
        Unreachable,
    }

    struct StubBackend {
        reply: Canned,
        seen: Mutex<Vec<TranslateRequest>>,
    }

    impl StubBackend {
        fn new(reply: Canned) -> Self {
            Self { reply, seen: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl TranslationBackend for StubBackend {
        async fn translate(&self, req: &TranslateRequest) -> Result<String, TranslateError> {
            self.seen.lock().unwrap().push(req.clone());
            match self.reply {
                Canned::Ok(t) => Ok(t.to_string()),
                Canned::Backend(m) => Err(TranslateError::Backend(m.to_string())),
                Canned::Unreachable => Err(TranslateError::MalformedResponse("connection reset".into())),
            }
        }
    }

    #[derive(Default)]
    struct RecordingClipboard {
        last: RefCell<Option<String>>,
        fail: bool,
    }

    impl Clipboard for RecordingClipboard {
        fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError("no display".into()));
            }
            *self.last.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    fn hello_form() -> TranslationFormController {
        let mut form = TranslationFormController::default();
        form.set_text("Hello");
        form
    }

    #[test]
    fn long_input_is_cut_to_limit() {
        let mut form = TranslationFormController::default();
        form.set_text(&"é".repeat(MAX_INPUT_CHARS + 123));
        assert_eq!(form.char_count(), MAX_INPUT_CHARS);

        form.set_text(&"a".repeat(MAX_INPUT_CHARS));
        assert_eq!(form.char_count(), MAX_INPUT_CHARS);
    }

    #[test]
    fn swapping_twice_restores_languages() {
        let mut form = TranslationFormController::new(Language::German, Language::Korean, Duration::from_secs(2));
        assert!(form.swap_languages());
        assert_eq!((form.source_language(), form.target_language()), (Language::Korean, Language::German));
        assert!(form.swap_languages());
        assert_eq!((form.source_language(), form.target_language()), (Language::German, Language::Korean));
    }

    #[tokio::test]
    async fn swap_drops_stale_translation() {
        let mut form = hello_form();
        form.submit(&StubBackend::new(Canned::Ok("Bonjour"))).await;
        form.swap_languages();
        assert_eq!(form.translated_text(), "");
        assert_eq!(form.phase(), &Phase::Idle);
    }

    #[test]
    fn swap_is_refused_while_sending() {
        let mut form = hello_form();
        let sub = form.begin_submit().unwrap();
        assert!(!form.swap_languages());
        assert_eq!(form.source_language(), Language::English);
        assert_eq!(sub.request.target_language, Language::French);
    }

    #[tokio::test]
    async fn blank_input_sends_nothing() {
        let backend = StubBackend::new(Canned::Ok("x"));
        let mut form = TranslationFormController::default();
        form.set_text("   \n\t ");
        assert!(!form.can_submit());
        assert!(!form.submit(&backend).await);
        assert!(backend.seen.lock().unwrap().is_empty());
        assert_eq!(form.phase(), &Phase::Idle);
    }

    #[test]
    fn only_one_request_in_flight() {
        let mut form = hello_form();
        let first = form.begin_submit().unwrap();
        assert!(form.is_loading());
        assert!(!form.can_submit());
        assert!(form.begin_submit().is_none());

        assert!(form.finish_submit(first.ticket, Ok("Bonjour".into())));
        assert!(!form.is_loading());
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn stale_outcome_is_ignored() {
        let mut form = hello_form();
        let sub = form.begin_submit().unwrap();
        assert!(!form.finish_submit(sub.ticket + 7, Ok("wrong".into())));
        assert!(form.is_loading());
        assert!(form.finish_submit(sub.ticket, Ok("Bonjour".into())));
        assert!(!form.finish_submit(sub.ticket, Ok("again".into())));
        assert_eq!(form.translated_text(), "Bonjour");
    }

    #[test]
    fn sending_hides_previous_result() {
        let mut form = hello_form();
        let sub = form.begin_submit().unwrap();
        form.finish_submit(sub.ticket, Ok("Bonjour".into()));
        form.begin_submit().unwrap();
        assert_eq!(form.translated_text(), "");
    }

    #[tokio::test]
    async fn hello_english_to_french() {
        let backend = StubBackend::new(Canned::Ok("Bonjour"));
        let mut form = hello_form();
        form.set_text("  Hello  ");
        assert!(form.submit(&backend).await);
        assert_eq!(form.translated_text(), "Bonjour");
        assert!(!form.is_loading());

        let seen = backend.seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            &[TranslateRequest {
                text: "Hello".into(),
                source_language: Language::English,
                target_language: Language::French,
            }]
        );
    }

    #[tokio::test]
    async fn backend_error_is_shown() {
        let mut form = hello_form();
        form.submit(&StubBackend::new(Canned::Backend("quota exceeded"))).await;
        assert!(form.translated_text().contains("quota exceeded"));
        assert!(matches!(form.phase(), Phase::Failed { .. }));
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn unreachable_backend_shows_fixed_message() {
        let mut form = hello_form();
        form.submit(&StubBackend::new(Canned::Unreachable)).await;
        assert_eq!(form.translated_text(), UNREACHABLE_MESSAGE);
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn clear_keeps_languages() {
        let mut form = hello_form();
        form.set_target_language(Language::Italian);
        form.submit(&StubBackend::new(Canned::Ok("Ciao"))).await;
        form.clear();
        assert_eq!(form.input_text(), "");
        assert_eq!(form.translated_text(), "");
        assert_eq!(form.target_language(), Language::Italian);
    }

    #[test]
    fn clear_while_sending_keeps_request_pending() {
        let mut form = hello_form();
        let sub = form.begin_submit().unwrap();
        form.clear();
        assert!(form.is_loading());
        assert!(form.finish_submit(sub.ticket, Ok("Bonjour".into())));
        assert_eq!(form.translated_text(), "Bonjour");
    }

    #[test]
    fn copy_confirmation_lasts_two_seconds() {
        let clip = RecordingClipboard::default();
        let mut form = hello_form();
        let sub = form.begin_submit().unwrap();
        form.finish_submit(sub.ticket, Ok("Bonjour".into()));

        let t0 = Instant::now();
        form.copy_result(&clip, t0).unwrap();
        assert_eq!(clip.last.borrow().as_deref(), Some("Bonjour"));
        assert!(form.is_copy_confirmed(t0));
        assert!(form.is_copy_confirmed(t0 + Duration::from_millis(1999)));
        assert!(!form.tick(t0 + Duration::from_millis(1000)));
        assert!(form.tick(t0 + Duration::from_millis(2000)));
        assert!(!form.is_copy_confirmed(t0 + Duration::from_millis(2000)));
    }

    #[test]
    fn second_copy_extends_confirmation() {
        let clip = RecordingClipboard::default();
        let mut form = TranslationFormController::default();
        let t0 = Instant::now();
        form.copy_result(&clip, t0).unwrap();
        form.copy_result(&clip, t0 + Duration::from_millis(1500)).unwrap();

        let later = t0 + Duration::from_millis(2500);
        assert!(!form.tick(later));
        assert!(form.is_copy_confirmed(later));
        assert_eq!(form.copy_confirm_remaining(later), Some(Duration::from_millis(1000)));
        assert!(!form.is_copy_confirmed(t0 + Duration::from_millis(3500)));
    }

    #[test]
    fn failed_copy_is_not_confirmed() {
        let clip = RecordingClipboard { fail: true, ..Default::default() };
        let mut form = TranslationFormController::default();
        let now = Instant::now();
        assert!(form.copy_result(&clip, now).is_err());
        assert!(!form.is_copy_confirmed(now));
    }
}
