use crate::celebration::{Celebration, PERFECT_HEADLINES};
use crate::game::{Cue, Game};
use crate::scoring::{Outcome, Report, Verdict};
use crate::session::Stage;
use crate::settings::Settings;
use crate::word_pool::{self, WordList};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::seq::SliceRandom;
use std::time::Duration;
use tracing::debug;

/// Rows of the settings panel, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SettingRow {
    #[strum(to_string = "Sound effects")]
    Sound,
    #[strum(to_string = "Animations")]
    Animations,
    #[strum(to_string = "Visual theme")]
    Theme,
    #[strum(to_string = "Time limit per word")]
    TimeLimit,
    #[strum(to_string = "Auto-advance to next word")]
    AutoAdvance,
}

impl SettingRow {
    pub const ALL: [SettingRow; 5] = [
        SettingRow::Sound,
        SettingRow::Animations,
        SettingRow::Theme,
        SettingRow::TimeLimit,
        SettingRow::AutoAdvance,
    ];

    /// Settings with this row toggled or cycled to its next value
    pub fn bump(self, settings: Settings) -> Settings {
        let mut next = settings;
        match self {
            SettingRow::Sound => next.sound_enabled = !settings.sound_enabled,
            SettingRow::Animations => next.animations_enabled = !settings.animations_enabled,
            SettingRow::Theme => next.visual_theme = settings.visual_theme.cycle(),
            SettingRow::TimeLimit => next.time_limit = settings.time_limit.cycle(),
            SettingRow::AutoAdvance => next.auto_advance = !settings.auto_advance,
        }
        next
    }

    pub fn value(self, settings: &Settings) -> String {
        let on_off = |b: bool| if b { "ON" } else { "OFF" }.to_string();
        match self {
            SettingRow::Sound => on_off(settings.sound_enabled),
            SettingRow::Animations => on_off(settings.animations_enabled),
            SettingRow::Theme => settings.visual_theme.to_string(),
            SettingRow::TimeLimit => settings.time_limit.to_string(),
            SettingRow::AutoAdvance => on_off(settings.auto_advance),
        }
    }
}

/// Terminal front end over one [`Game`]
#[derive(Debug)]
pub struct App {
    pub game: Game,
    /// JSON being typed or pasted on the input screen
    pub buffer: String,
    pub preset_index: Option<usize>,
    presets: Vec<WordList>,
    /// Selected row while the settings panel is open
    pub settings_cursor: Option<usize>,
    pub roster_cursor: usize,
    /// Name being typed while renaming or adding a duel player
    pub name_edit: Option<String>,
    pub celebration: Celebration,
    pub should_quit: bool,
    width: u16,
    height: u16,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self::with_game(Game::new(settings))
    }

    pub fn with_game(game: Game) -> Self {
        Self {
            game,
            buffer: String::new(),
            preset_index: None,
            presets: word_pool::presets(),
            settings_cursor: None,
            roster_cursor: 0,
            name_edit: None,
            celebration: Celebration::default(),
            should_quit: false,
            width: 80,
            height: 24,
        }
    }

    /// Pre-fill the input buffer, e.g. from a file given on the command line
    pub fn with_buffer(mut self, text: String) -> Self {
        self.buffer = text;
        self
    }

    pub fn stage(&self) -> Stage {
        self.game.quiz().stage()
    }

    pub fn presets(&self) -> &[WordList] {
        &self.presets
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn take_cues(&mut self) -> Vec<Cue> {
        self.game.take_cues()
    }

    pub fn on_tick(&mut self, dt: Duration) {
        let before = self.stage();
        self.game.on_tick(dt);
        self.celebration.update(dt);
        self.after_transition(before);
    }

    pub fn on_paste(&mut self, text: &str) {
        if let Some(name) = self.name_edit.as_mut() {
            name.push_str(text.lines().next().unwrap_or_default());
        } else if self.stage() == Stage::Input && self.settings_cursor.is_none() {
            self.buffer.push_str(text);
            self.game.clear_error();
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::F(2) {
            self.toggle_settings();
            return;
        }

        let before = self.stage();
        if self.settings_cursor.is_some() {
            self.on_settings_key(key);
        } else if self.name_edit.is_some() {
            self.on_name_key(key);
        } else {
            match before {
                Stage::Input => self.on_input_key(key),
                Stage::ModeSelect => self.on_mode_key(key),
                Stage::Playing => self.on_playing_key(key),
                Stage::Finished => self.on_results_key(key),
            }
        }
        self.after_transition(before);
    }

    fn toggle_settings(&mut self) {
        self.settings_cursor = match self.settings_cursor {
            Some(_) => None,
            None => Some(0),
        };
    }

    fn on_settings_key(&mut self, key: KeyEvent) {
        let cursor = self.settings_cursor.unwrap_or(0);
        match key.code {
            KeyCode::Esc => self.settings_cursor = None,
            KeyCode::Up => self.settings_cursor = Some(cursor.saturating_sub(1)),
            KeyCode::Down => {
                self.settings_cursor = Some((cursor + 1).min(SettingRow::ALL.len() - 1))
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                let row = SettingRow::ALL[cursor];
                let next = row.bump(*self.game.settings());
                self.game.update_settings(next);
                if !next.animations_enabled {
                    self.celebration.stop();
                }
            }
            _ => {}
        }
    }

    fn on_input_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('s') if ctrl => {
                let raw = self.buffer.clone();
                if self.game.submit_words(&raw).is_ok() {
                    self.roster_cursor = 0;
                }
            }
            KeyCode::Char('e') if ctrl => {
                self.buffer = word_pool::example().to_pretty_json();
                self.game.clear_error();
            }
            KeyCode::Char('u') if ctrl => {
                self.buffer.clear();
                self.preset_index = None;
                self.game.clear_error();
            }
            KeyCode::Tab => self.cycle_preset(),
            KeyCode::Enter => self.buffer.push('\n'),
            KeyCode::Backspace => {
                self.buffer.pop();
                self.game.clear_error();
            }
            KeyCode::Char(c) if !ctrl => {
                self.buffer.push(c);
                self.game.clear_error();
            }
            _ => {}
        }
    }

    fn cycle_preset(&mut self) {
        if self.presets.is_empty() {
            return;
        }
        let next = self
            .preset_index
            .map_or(0, |i| (i + 1) % self.presets.len());
        self.preset_index = Some(next);
        self.buffer = self.presets[next].to_pretty_json();
        self.game.clear_error();
    }

    fn on_mode_key(&mut self, key: KeyEvent) {
        let players = self.game.roster().len();
        match key.code {
            KeyCode::Esc => self.game.restart(),
            KeyCode::Char('s') => self.game.select_solo(),
            KeyCode::Char('t') => self.game.select_duel(true),
            KeyCode::Char('f') => self.game.select_duel(false),
            KeyCode::Up => self.roster_cursor = self.roster_cursor.saturating_sub(1),
            KeyCode::Down => self.roster_cursor = (self.roster_cursor + 1).min(players - 1),
            KeyCode::Char('a') => {
                if self.game.roster().len() < crate::mode::MAX_PLAYERS {
                    self.name_edit = Some(String::new());
                    self.roster_cursor = players;
                }
            }
            KeyCode::Char('e') => {
                self.name_edit = self.game.roster().names().get(self.roster_cursor).cloned();
            }
            KeyCode::Char('d') => {
                if self.game.roster_mut().remove(self.roster_cursor) {
                    let len = self.game.roster().len();
                    self.roster_cursor = self.roster_cursor.min(len - 1);
                }
            }
            _ => {}
        }
    }

    fn on_name_key(&mut self, key: KeyEvent) {
        let Some(name) = self.name_edit.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => name.push(c),
            KeyCode::Backspace => {
                name.pop();
            }
            KeyCode::Esc => {
                self.name_edit = None;
                self.roster_cursor = self.roster_cursor.min(self.game.roster().len() - 1);
            }
            KeyCode::Enter => {
                let name = name.clone();
                let roster = self.game.roster_mut();
                let accepted = if self.roster_cursor >= roster.len() {
                    roster.add(&name)
                } else {
                    roster.rename(self.roster_cursor, &name)
                };
                debug!(accepted, name = %name, "roster edit");
                if accepted {
                    self.name_edit = None;
                }
                self.roster_cursor = self.roster_cursor.min(self.game.roster().len());
            }
            _ => {}
        }
    }

    fn on_playing_key(&mut self, key: KeyEvent) {
        let free_for_all = self
            .game
            .quiz()
            .mode()
            .and_then(|mode| mode.duel())
            .is_some_and(|duel| !duel.turn_based);

        match key.code {
            KeyCode::Esc => self.game.restart(),
            KeyCode::Enter | KeyCode::Char(' ') => self.game.next_word(),
            KeyCode::Char('y') if !free_for_all => {
                self.game.answer(Outcome::Correct);
            }
            KeyCode::Char('n') if !free_for_all => {
                self.game.answer(Outcome::Incorrect);
            }
            KeyCode::Char('0') if free_for_all => {
                self.game.answer(Outcome::NobodyCorrect);
            }
            KeyCode::Char(c @ '1'..='9') if free_for_all => {
                let idx = c as usize - '1' as usize;
                self.game.answer(Outcome::CorrectBy(idx));
            }
            _ => {}
        }
    }

    fn on_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('p') => self.game.play_again(),
            KeyCode::Char('r') | KeyCode::Char('n') | KeyCode::Esc => self.game.restart(),
            KeyCode::Char('t') => self.share(),
            _ => {}
        }
    }

    /// Open a pre-filled post with the result in the browser
    fn share(&self) {
        let Some(url) = self.share_url() else {
            return;
        };
        if webbrowser::Browser::is_available() {
            if let Err(err) = webbrowser::open(&url) {
                debug!(%err, "could not open browser");
            }
        }
    }

    pub fn share_url(&self) -> Option<String> {
        self.share_text().map(|text| {
            format!(
                "https://twitter.com/intent/tweet?text={}",
                urlencoding::encode(&text)
            )
        })
    }

    pub fn share_text(&self) -> Option<String> {
        let quiz = self.game.quiz();
        quiz.report().map(|report| report.share_text(quiz.theme()))
    }

    fn after_transition(&mut self, before: Stage) {
        let now = self.stage();
        if now == before {
            return;
        }
        if now == Stage::Input {
            self.preset_index = None;
            self.name_edit = None;
        }
        if now != Stage::Finished {
            self.celebration.stop();
            return;
        }
        if !self.game.settings().animations_enabled {
            return;
        }
        if let Some(headline) = self.game.quiz().report().as_ref().and_then(headline) {
            self.celebration.start(&headline, self.width, self.height);
        }
    }
}

/// Fireworks text for results worth celebrating
fn headline(report: &Report) -> Option<String> {
    match report {
        Report::Solo(solo) if solo.percentage == 100 => PERFECT_HEADLINES
            .choose(&mut rand::thread_rng())
            .map(|s| s.to_string()),
        Report::Duel(duel) => match &duel.verdict {
            Verdict::Winner(name) => Some(format!("{} WINS!", name.to_uppercase())),
            Verdict::Draw => None,
        },
        Report::Solo(_) => None,
    }
}
