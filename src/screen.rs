//! Player screen
//!
//! One listening session: the timeline built once and shared, the playback
//! controller, the transport, the language selection and the three views.
//! Errors from user actions and status polling are logged and kept as a
//! notice line; they never end the session.

use std::str::FromStr;
use std::sync::Arc;

use crate::language::LanguageSelection;
use crate::player::{
    AudioSource, MediaEngine, PlaybackController, PlaybackState, PlayerError, PlayerResult,
    Transport,
};
use crate::transcript::{Language, Timeline};
use crate::view::{ControlsView, HeaderView, TextRenderer, TranscriptView};

/// Lines moved by one scroll command
pub const SCROLL_STEP: isize = 5;

/// A user command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    TogglePlay,
    Rewind,
    Forward,
    /// Zero-based phrase index
    TapPhrase(usize),
    SelectLanguage(Language),
    Scroll(isize),
    Quit,
}

impl UserAction {
    /// Parse one line of terminal input. Phrase numbers are 1-based.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim().to_lowercase();
        match input.as_str() {
            "p" | "play" | "pause" => Some(Self::TogglePlay),
            "r" | "b" => Some(Self::Rewind),
            "f" | "n" => Some(Self::Forward),
            "u" => Some(Self::Scroll(-SCROLL_STEP)),
            "d" => Some(Self::Scroll(SCROLL_STEP)),
            "q" | "quit" => Some(Self::Quit),
            other => {
                if let Ok(number) = other.parse::<usize>() {
                    return number.checked_sub(1).map(Self::TapPhrase);
                }
                Language::from_str(other).ok().map(Self::SelectLanguage)
            }
        }
    }
}

/// The player screen
pub struct PlayerScreen<E: MediaEngine> {
    timeline: Arc<Timeline>,
    controller: PlaybackController<E>,
    transport: Transport,
    selection: LanguageSelection,
    header: HeaderView,
    transcript: TranscriptView,
    renderer: TextRenderer,
    notice: Option<String>,
    /// Phrase the list was last auto-scrolled to
    scrolled_to: Option<usize>,
}

impl<E: MediaEngine> PlayerScreen<E> {
    pub fn new(
        timeline: Arc<Timeline>,
        language: Language,
        transport: Transport,
        renderer: TextRenderer,
    ) -> Self {
        let selection = LanguageSelection::new(language);
        Self {
            controller: PlaybackController::new(timeline.clone()),
            transport,
            header: HeaderView::new(selection.clone()),
            transcript: TranscriptView::new(timeline.clone(), selection.clone()),
            selection,
            renderer,
            timeline,
            notice: None,
            scrolled_to: None,
        }
    }

    /// Load the recording. A failure is kept as the notice and returned.
    pub fn mount(&mut self, engine: E, source: &AudioSource) -> PlayerResult<()> {
        self.controller.load(engine, source).inspect_err(|e| {
            self.notice = Some(e.to_string());
        })
    }

    /// End the session
    pub fn unmount(&mut self) -> PlayerResult<()> {
        self.controller.teardown()
    }

    /// Handle a line of terminal input. Returns false once the user quit.
    pub fn handle_input(&mut self, input: &str) -> bool {
        match UserAction::parse(input) {
            Some(action) => self.handle(action),
            None => {
                if !input.trim().is_empty() {
                    self.notice = Some(format!("Unknown command: {}", input.trim()));
                }
                true
            }
        }
    }

    /// Handle one action. Returns false once the user quit.
    pub fn handle(&mut self, action: UserAction) -> bool {
        let result = match action {
            UserAction::TogglePlay => self.transport.toggle_play(&mut self.controller).map(|_| ()),
            UserAction::Rewind => self.transport.rewind(&mut self.controller).map(|_| ()),
            UserAction::Forward => self.transport.forward(&mut self.controller).map(|_| ()),
            UserAction::TapPhrase(index) => match self.transcript.tap(index) {
                Some(index) => self
                    .transport
                    .tap_phrase(&mut self.controller, index)
                    .map(|_| ()),
                None => Err(PlayerError::PhraseOutOfRange(index)),
            },
            UserAction::SelectLanguage(language) => {
                if self.header.press(language) {
                    self.scrolled_to = None;
                }
                Ok(())
            }
            UserAction::Scroll(delta) => {
                self.transcript.scroll_by(delta);
                Ok(())
            }
            UserAction::Quit => {
                if let Err(e) = self.unmount() {
                    log::warn!("{}", e);
                }
                return false;
            }
        };

        match result {
            Ok(()) => self.notice = None,
            Err(e) => {
                log::warn!("{:?} failed: {}", action, e);
                self.notice = Some(e.to_string());
            }
        }
        true
    }

    /// Poll the engine once. Returns true if the current phrase changed.
    pub fn tick(&mut self) -> bool {
        if !self.controller.is_ready() {
            return false;
        }
        let before = self.controller.state().current_phrase_index;
        match self.controller.poll() {
            Ok(_) => self.controller.state().current_phrase_index != before,
            Err(e) => {
                self.notice = Some(e.to_string());
                false
            }
        }
    }

    /// Render the screen, auto-scrolling to the current phrase when it changed
    pub fn frame(&mut self) -> String {
        let current = self.controller.state().current_phrase_index;
        let content = self.renderer.layout(&mut self.transcript, current);

        if self.scrolled_to != Some(current) && !self.timeline.is_empty() {
            match self.transcript.scroll_to(current) {
                Ok(_) => self.scrolled_to = Some(current),
                Err(e) => log::warn!("Skipping auto-scroll: {}", e),
            }
        }

        let controls = ControlsView::from_state(self.controller.state());
        self.renderer.compose(
            &self.header,
            &self.transcript,
            &content,
            &controls,
            self.notice.as_deref(),
        )
    }

    /// Status message for the last failed action, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn state(&self) -> &PlaybackState {
        self.controller.state()
    }

    pub fn is_ready(&self) -> bool {
        self.controller.is_ready()
    }

    pub fn is_released(&self) -> bool {
        self.controller.is_released()
    }

    pub fn language(&self) -> Language {
        self.selection.get()
    }

    pub fn timeline(&self) -> &Arc<Timeline> {
        &self.timeline
    }

    pub fn transcript(&self) -> &TranscriptView {
        &self.transcript
    }

    /// The loaded engine, if any
    pub fn engine(&mut self) -> Option<&mut E> {
        self.controller.engine()
    }
}
