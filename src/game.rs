use crate::error::ValidationError;
use crate::mode::{ModeChoice, Roster};
use crate::scoring::Outcome;
use crate::session::{Event, Quiz, Stage};
use crate::settings::Settings;
use crate::timer::{Countdown, Deferral, TimerEvent, AUTO_ADVANCE_DELAY, FEEDBACK_DELAY};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info};

/// Audible feedback the presentation may play. Only queued while sound is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Click,
    Correct,
    Incorrect,
}

/// The user-facing controls over one quiz.
///
/// Owns the state machine, the countdown of the current word and the pending
/// advance. Only one countdown exists at a time and it is replaced only after
/// the previous word has been advanced past.
#[derive(Debug)]
pub struct Game<R: Rng = StdRng> {
    quiz: Quiz,
    settings: Settings,
    roster: Roster,
    countdown: Option<Countdown>,
    deferral: Option<Deferral>,
    error: Option<ValidationError>,
    cues: Vec<Cue>,
    rng: R,
}

impl Game<StdRng> {
    pub fn new(settings: Settings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(settings: Settings, rng: R) -> Self {
        Self {
            quiz: Quiz::new(),
            settings,
            roster: Roster::default(),
            countdown: None,
            deferral: None,
            error: None,
            cues: Vec::new(),
            rng,
        }
    }

    /// Validate and sample a word list. Only the input stage accepts one;
    /// anywhere else this does nothing and returns `Ok`.
    pub fn submit_words(&mut self, raw: &str) -> Result<(), ValidationError> {
        if self.quiz.stage() != Stage::Input {
            return Ok(());
        }
        match std::mem::take(&mut self.quiz).submit_words(raw, &mut self.rng) {
            Ok(quiz) => {
                info!(theme = quiz.theme(), words = quiz.total_words(), "word list accepted");
                self.quiz = quiz;
                self.error = None;
                self.cue(Cue::Click);
                Ok(())
            }
            Err((quiz, err)) => {
                debug!(%err, "word list rejected");
                self.quiz = quiz;
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub fn select_mode(&mut self, choice: ModeChoice) {
        self.dispatch(Event::ModeSelected(choice));
        if self.quiz.stage() == Stage::Playing {
            self.cue(Cue::Click);
            self.begin_word();
        }
    }

    pub fn select_solo(&mut self) {
        self.select_mode(ModeChoice::Solo);
    }

    pub fn select_duel(&mut self, turn_based: bool) {
        let choice = ModeChoice::duel(&self.roster, turn_based);
        self.select_mode(choice);
    }

    /// Judge the current word. Returns false when the word was already
    /// resolved or the outcome does not fit the mode.
    pub fn answer(&mut self, outcome: Outcome) -> bool {
        if self.quiz.stage() != Stage::Playing || self.quiz.is_resolved() {
            debug!(?outcome, "answer ignored");
            return false;
        }
        let word_index = self.quiz.current_index();
        self.dispatch(Event::Answer {
            word_index,
            outcome,
        });
        if !self.quiz.is_resolved() {
            return false;
        }

        if let Some(countdown) = self.countdown.as_mut() {
            if let Some(TimerEvent::Cancelled { .. }) = countdown.cancel() {
                debug!(word_index, "countdown cancelled by answer");
            }
        }
        let credited = matches!(outcome, Outcome::Correct | Outcome::CorrectBy(_));
        self.cue(if credited { Cue::Correct } else { Cue::Incorrect });

        let solo = self.quiz.mode().is_some_and(|mode| mode.is_solo());
        self.deferral = match (solo, self.settings.auto_advance) {
            (true, true) => Some(Deferral::new(word_index, AUTO_ADVANCE_DELAY)),
            // waits for next_word()
            (true, false) => None,
            (false, _) => Some(Deferral::new(word_index, FEEDBACK_DELAY)),
        };
        true
    }

    /// Move past a resolved word without waiting for the feedback pause
    pub fn next_word(&mut self) {
        if self.quiz.stage() != Stage::Playing || !self.quiz.is_resolved() {
            return;
        }
        if let Some(deferral) = self.deferral.as_mut() {
            deferral.cancel();
        }
        let word_index = self.quiz.current_index();
        self.advance(word_index);
    }

    /// Feed elapsed wall time to the countdown and the pending advance
    pub fn on_tick(&mut self, dt: Duration) {
        let fired = self
            .deferral
            .as_mut()
            .and_then(|deferral| deferral.advance(dt));
        if let Some(word_index) = fired {
            self.advance(word_index);
            return;
        }

        let events = self
            .countdown
            .as_mut()
            .map(|countdown| countdown.advance(dt))
            .unwrap_or_default();
        for event in events {
            match event {
                TimerEvent::Tick {
                    word_index,
                    remaining,
                } => debug!(word_index, remaining, "tick"),
                TimerEvent::Timeout { word_index } => self.on_timeout(word_index),
                TimerEvent::Cancelled { .. } => {}
            }
        }
    }

    fn on_timeout(&mut self, word_index: usize) {
        let was_resolved = self.quiz.is_resolved();
        self.dispatch(Event::Timeout { word_index });
        if was_resolved || !self.quiz.is_resolved() {
            return;
        }
        info!(word_index, "time is up");
        self.cue(Cue::Incorrect);
        self.deferral = Some(Deferral::new(word_index, FEEDBACK_DELAY));
    }

    fn advance(&mut self, word_index: usize) {
        let before = self.quiz.current_index();
        self.dispatch(Event::Advance { word_index });
        if self.quiz.current_index() == before {
            return;
        }
        self.deferral = None;
        self.countdown = None;
        if self.quiz.stage() == Stage::Playing {
            self.begin_word();
        }
    }

    fn begin_word(&mut self) {
        let word_index = self.quiz.current_index();
        let limit = self.settings.time_limit.secs();
        debug!(word_index, limit, "word started");
        self.countdown = Some(Countdown::start(word_index, limit));
        self.deferral = None;
    }

    pub fn restart(&mut self) {
        self.cue(Cue::Click);
        self.countdown = None;
        self.deferral = None;
        self.error = None;
        self.dispatch(Event::Restart);
    }

    pub fn play_again(&mut self) {
        if self.quiz.stage() != Stage::Finished {
            return;
        }
        self.cue(Cue::Click);
        self.dispatch(Event::PlayAgain);
        self.begin_word();
    }

    /// New settings apply from the next word on
    pub fn update_settings(&mut self, settings: Settings) {
        debug!(?settings, "settings updated");
        self.settings = settings;
    }

    fn dispatch(&mut self, event: Event) {
        let before = self.quiz.stage();
        self.quiz = std::mem::take(&mut self.quiz).reduce(event);
        let after = self.quiz.stage();
        if before != after {
            info!(from = %before, to = %after, "stage changed");
        }
    }

    fn cue(&mut self, cue: Cue) {
        if self.settings.sound_enabled {
            self.cues.push(cue);
        }
    }

    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// A resolved solo word waiting for the user to move on
    pub fn awaiting_next(&self) -> bool {
        self.quiz.stage() == Stage::Playing
            && self.quiz.is_resolved()
            && !self.deferral.as_ref().is_some_and(Deferral::is_pending)
    }

    pub fn advance_pending(&self) -> bool {
        self.deferral.as_ref().is_some_and(Deferral::is_pending)
    }
}
