//! The quiz state machine.
//!
//! `Quiz::reduce` is a pure `(state, event) -> state` function. Stages move
//! `Input -> ModeSelect -> Playing -> Finished`; `Restart` goes back to
//! `Input` from anywhere and `PlayAgain` goes from `Finished` back to
//! `Playing` with the same words. Events that do not apply to the current
//! stage or word are ignored and return the state unchanged.
//!
//! Each word is resolved at most once: `Answer` and `Timeout` only land while
//! the current word has no resolution, and `Advance` only moves on from a
//! resolved word. Both carry the word index they were issued for, so a stale
//! timer or a repeated click aimed at an earlier word is dropped.

use crate::error::ValidationError;
use crate::mode::{GameMode, ModeChoice};
use crate::scoring::{Outcome, Report};
use crate::word_pool::{self, Deck};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Stage {
    Input,
    ModeSelect,
    Playing,
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    WordsSubmitted(Deck),
    ModeSelected(ModeChoice),
    Answer { word_index: usize, outcome: Outcome },
    Timeout { word_index: usize },
    Advance { word_index: usize },
    Restart,
    PlayAgain,
}

/// How the current word was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub word_index: usize,
    pub outcome: Outcome,
    pub timed_out: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    stage: Stage,
    theme: String,
    words: Vec<String>,
    current_index: usize,
    mode: Option<GameMode>,
    resolution: Option<Resolution>,
}

impl Default for Quiz {
    fn default() -> Self {
        Self::new()
    }
}

impl Quiz {
    pub fn new() -> Self {
        Self {
            stage: Stage::Input,
            theme: String::new(),
            words: Vec::new(),
            current_index: 0,
            mode: None,
            resolution: None,
        }
    }

    pub fn reduce(self, event: Event) -> Self {
        match (self.stage, event) {
            (_, Event::Restart) => Quiz::new(),

            (Stage::Input, Event::WordsSubmitted(deck)) if !deck.words.is_empty() => Self {
                stage: Stage::ModeSelect,
                theme: deck.theme,
                words: deck.words,
                current_index: 0,
                mode: None,
                resolution: None,
            },

            (Stage::ModeSelect, Event::ModeSelected(choice)) => match GameMode::from_choice(&choice) {
                Some(mode) => Self {
                    stage: Stage::Playing,
                    current_index: 0,
                    mode: Some(mode),
                    resolution: None,
                    ..self
                },
                None => self,
            },

            (Stage::Playing, Event::Answer { word_index, outcome }) => {
                self.resolve(word_index, outcome, false)
            }

            (Stage::Playing, Event::Timeout { word_index }) => {
                let Some(outcome) = self.mode.as_ref().map(GameMode::missed) else {
                    return self;
                };
                self.resolve(word_index, outcome, true)
            }

            (Stage::Playing, Event::Advance { word_index }) => self.advance(word_index),

            (Stage::Finished, Event::PlayAgain) => Self {
                stage: Stage::Playing,
                current_index: 0,
                mode: self.mode.as_ref().map(GameMode::reset),
                resolution: None,
                ..self
            },

            (_, _) => self,
        }
    }

    fn resolve(self, word_index: usize, outcome: Outcome, timed_out: bool) -> Self {
        if word_index != self.current_index || self.resolution.is_some() {
            return self;
        }
        let Some(scored) = self.mode.as_ref().and_then(|mode| mode.score(outcome)) else {
            return self;
        };
        Self {
            mode: Some(scored),
            resolution: Some(Resolution {
                word_index,
                outcome,
                timed_out,
            }),
            ..self
        }
    }

    fn advance(self, word_index: usize) -> Self {
        if word_index != self.current_index || self.resolution.is_none() {
            return self;
        }
        if self.current_index + 1 < self.words.len() {
            Self {
                current_index: self.current_index + 1,
                resolution: None,
                ..self
            }
        } else {
            Self {
                stage: Stage::Finished,
                current_index: self.words.len(),
                resolution: None,
                ..self
            }
        }
    }

    /// Parse, sample and submit a pasted word list. On error the state is
    /// handed back untouched alongside the error.
    ///
    /// Outside [`Stage::Input`] nothing is parsed and the state comes back
    /// unchanged as `Ok`; check [`Quiz::stage`] to tell the two apart.
    pub fn submit_words<R: Rng + ?Sized>(
        self,
        raw: &str,
        rng: &mut R,
    ) -> Result<Self, (Self, ValidationError)> {
        if self.stage != Stage::Input {
            return Ok(self);
        }
        match word_pool::sample(raw, rng) {
            Ok(deck) => Ok(self.reduce(Event::WordsSubmitted(deck))),
            Err(err) => Err((self, err)),
        }
    }

    pub fn select_mode(self, choice: ModeChoice) -> Self {
        self.reduce(Event::ModeSelected(choice))
    }

    /// Resolve the current word and move on in one step. A word that is
    /// already resolved, e.g. by a timeout, is left as it is.
    pub fn answer(self, outcome: Outcome) -> Self {
        if self.is_resolved() {
            return self;
        }
        let word_index = self.current_index;
        let answered = self.reduce(Event::Answer {
            word_index,
            outcome,
        });
        if !answered.is_resolved() {
            return answered;
        }
        answered.reduce(Event::Advance { word_index })
    }

    pub fn restart(self) -> Self {
        self.reduce(Event::Restart)
    }

    pub fn play_again(self) -> Self {
        self.reduce(Event::PlayAgain)
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_word(&self) -> Option<&str> {
        match self.stage {
            Stage::Playing => self.words.get(self.current_index).map(String::as_str),
            _ => None,
        }
    }

    pub fn total_words(&self) -> usize {
        self.words.len()
    }

    pub fn mode(&self) -> Option<&GameMode> {
        self.mode.as_ref()
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    /// Solo correct count; zero outside solo
    pub fn correct_answers(&self) -> u32 {
        match self.mode {
            Some(GameMode::Solo { correct }) => correct,
            _ => 0,
        }
    }

    /// Completed share of the round, 0.0..=1.0
    pub fn progress(&self) -> f64 {
        if self.words.is_empty() {
            return 0.0;
        }
        let done = self.current_index + usize::from(self.is_resolved());
        done.min(self.words.len()) as f64 / self.words.len() as f64
    }

    pub fn report(&self) -> Option<Report> {
        match (self.stage, &self.mode) {
            (Stage::Finished, Some(mode)) => Some(Report::new(mode, self.words.len())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Roster;
    use crate::scoring::Verdict;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn deck(words: &[&str]) -> Deck {
        Deck {
            theme: "Animals".to_string(),
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    fn playing(words: &[&str], choice: ModeChoice) -> Quiz {
        Quiz::new()
            .reduce(Event::WordsSubmitted(deck(words)))
            .select_mode(choice)
    }

    fn turn_based() -> ModeChoice {
        ModeChoice::duel(&Roster::default(), true)
    }

    #[test]
    fn starts_in_input() {
        let quiz = Quiz::new();
        assert_eq!(quiz.stage(), Stage::Input);
        assert_eq!(quiz.current_word(), None);
        assert_eq!(quiz.report(), None);
    }

    #[test]
    fn submit_words_moves_to_mode_select() {
        let mut rng = StdRng::seed_from_u64(3);
        let quiz = Quiz::new()
            .submit_words(r#"{"theme":"Animals","words":["Cat","Dog"]}"#, &mut rng)
            .unwrap();
        assert_eq!(quiz.stage(), Stage::ModeSelect);
        assert_eq!(quiz.theme(), "Animals");
        assert_eq!(quiz.total_words(), 2);
    }

    #[test]
    fn invalid_submission_keeps_state() {
        let mut rng = StdRng::seed_from_u64(3);
        let (quiz, err) = Quiz::new()
            .submit_words(r#"{"words":["Cat"]}"#, &mut rng)
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingTheme);
        assert_eq!(quiz, Quiz::new());
    }

    #[test]
    fn events_outside_their_stage_are_ignored() {
        let quiz = Quiz::new();
        assert_eq!(quiz.clone().select_mode(ModeChoice::Solo), quiz);
        assert_eq!(quiz.clone().answer(Outcome::Correct), quiz);
        assert_eq!(quiz.clone().play_again(), quiz);

        let selecting = quiz.reduce(Event::WordsSubmitted(deck(&["a"])));
        assert_eq!(
            selecting.clone().reduce(Event::WordsSubmitted(deck(&["b"]))),
            selecting
        );
    }

    #[test]
    fn duel_with_too_few_players_stays_in_mode_select() {
        let quiz = Quiz::new().reduce(Event::WordsSubmitted(deck(&["a"])));
        let choice = ModeChoice::Duel {
            names: vec!["Solo act".to_string()],
            turn_based: true,
        };
        assert_eq!(quiz.clone().select_mode(choice), quiz);
    }

    #[test]
    fn solo_end_to_end() {
        let quiz = playing(&["Cat", "Dog"], ModeChoice::Solo)
            .answer(Outcome::Correct)
            .answer(Outcome::Incorrect);

        assert_eq!(quiz.stage(), Stage::Finished);
        assert_eq!(quiz.correct_answers(), 1);
        let report = assert_matches!(quiz.report(), Some(Report::Solo(r)) => r);
        assert_eq!(report.correct, 1);
        assert_eq!(report.total, 2);
        assert_eq!(report.percentage, 50);
    }

    #[test]
    fn second_answer_for_same_word_is_dropped() {
        let quiz = playing(&["Cat", "Dog", "Eel"], ModeChoice::Solo);
        let quiz = quiz
            .reduce(Event::Answer {
                word_index: 0,
                outcome: Outcome::Correct,
            })
            .reduce(Event::Answer {
                word_index: 0,
                outcome: Outcome::Correct,
            })
            .reduce(Event::Timeout { word_index: 0 });
        assert_eq!(quiz.correct_answers(), 1);
        assert_matches!(
            quiz.resolution(),
            Some(Resolution {
                word_index: 0,
                outcome: Outcome::Correct,
                timed_out: false
            })
        );

        let quiz = quiz.reduce(Event::Advance { word_index: 0 });
        assert_eq!(quiz.current_index(), 1);
        let quiz = quiz.reduce(Event::Answer {
            word_index: 0,
            outcome: Outcome::Correct,
        });
        assert_eq!(quiz.correct_answers(), 1);
        assert!(!quiz.is_resolved());
    }

    #[test]
    fn timeout_then_late_answer_keeps_timeout() {
        let quiz = playing(&["Cat", "Dog"], ModeChoice::Solo)
            .reduce(Event::Timeout { word_index: 0 })
            .reduce(Event::Answer {
                word_index: 0,
                outcome: Outcome::Correct,
            });
        assert_eq!(quiz.correct_answers(), 0);
        assert_matches!(quiz.resolution(), Some(Resolution { timed_out: true, .. }));
    }

    #[test]
    fn answer_after_timeout_leaves_word_in_place() {
        let quiz = playing(&["Cat", "Dog", "Eel"], ModeChoice::Solo)
            .reduce(Event::Timeout { word_index: 0 });
        let after = quiz.clone().answer(Outcome::Correct);
        assert_eq!(after, quiz);
        assert_eq!(after.current_index(), 0);
        assert_eq!(after.correct_answers(), 0);
    }

    #[test]
    fn answer_with_wrong_outcome_does_not_advance() {
        let quiz = playing(&["Cat", "Dog"], ModeChoice::Solo);
        assert_eq!(quiz.clone().answer(Outcome::NobodyCorrect), quiz);
    }

    #[test]
    fn free_for_all_second_credit_is_dropped() {
        let ffa = ModeChoice::duel(&Roster::default(), false);
        let credit_first = Event::Answer {
            word_index: 0,
            outcome: Outcome::CorrectBy(0),
        };
        let quiz = playing(&["Cat", "Dog"], ffa)
            .reduce(credit_first.clone())
            .reduce(credit_first)
            .reduce(Event::Timeout { word_index: 0 });

        let duel = quiz.mode().and_then(GameMode::duel).unwrap();
        let scores: Vec<u32> = duel.players.iter().map(|p| p.score).collect();
        assert_eq!(scores, [1, 0]);
        assert_matches!(
            quiz.resolution(),
            Some(Resolution {
                outcome: Outcome::CorrectBy(0),
                timed_out: false,
                ..
            })
        );
    }

    #[test]
    fn submit_words_outside_input_is_ignored() {
        let mut rng = StdRng::seed_from_u64(3);
        let quiz = playing(&["Cat"], ModeChoice::Solo);
        let after = quiz
            .clone()
            .submit_words("not even json", &mut rng)
            .unwrap();
        assert_eq!(after, quiz);
    }

    #[test]
    fn advance_requires_resolution_and_matching_index() {
        let quiz = playing(&["Cat", "Dog"], ModeChoice::Solo);
        let unchanged = quiz.clone().reduce(Event::Advance { word_index: 0 });
        assert_eq!(unchanged, quiz);

        let resolved = quiz.reduce(Event::Answer {
            word_index: 0,
            outcome: Outcome::Incorrect,
        });
        assert_eq!(
            resolved.clone().reduce(Event::Advance { word_index: 1 }),
            resolved
        );
    }

    #[test]
    fn turn_based_turn_is_k_mod_n() {
        let names = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let words: Vec<String> = (0..7).map(|i| format!("w{i}")).collect();
        let word_refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let mut quiz = playing(
            &word_refs,
            ModeChoice::Duel {
                names,
                turn_based: true,
            },
        );
        for k in 0..6 {
            let outcome = if k % 2 == 0 {
                Outcome::Correct
            } else {
                Outcome::Incorrect
            };
            quiz = quiz.answer(outcome);
            let duel = quiz.mode().unwrap().duel().unwrap();
            assert_eq!(duel.current_player, (k + 1) % 3);
        }
    }

    #[test]
    fn timeouts_rotate_turns_too() {
        let quiz = playing(&["a", "b", "c"], turn_based())
            .reduce(Event::Timeout { word_index: 0 })
            .reduce(Event::Advance { word_index: 0 });
        assert_eq!(quiz.mode().unwrap().duel().unwrap().current_player, 1);
    }

    #[test]
    fn turn_based_duel_draw() {
        let quiz = playing(&["a", "b"], turn_based())
            .answer(Outcome::Correct)
            .answer(Outcome::Correct);
        assert_eq!(quiz.stage(), Stage::Finished);
        let duel = assert_matches!(quiz.report(), Some(Report::Duel(d)) => d);
        let scores: Vec<u32> = duel.standings.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![1, 1]);
        assert_eq!(duel.verdict, Verdict::Draw);
    }

    #[test]
    fn wrong_outcome_for_mode_does_not_latch() {
        let quiz = playing(&["a"], ModeChoice::duel(&Roster::default(), false));
        let quiz = quiz.reduce(Event::Answer {
            word_index: 0,
            outcome: Outcome::Correct,
        });
        assert!(!quiz.is_resolved());
        let quiz = quiz.answer(Outcome::CorrectBy(1));
        assert_eq!(quiz.stage(), Stage::Finished);
    }

    #[test]
    fn play_again_keeps_words_and_resets_scores() {
        let finished = playing(&["a", "b"], ModeChoice::duel(&Roster::default(), false))
            .answer(Outcome::CorrectBy(0))
            .answer(Outcome::CorrectBy(1));
        let again = finished.clone().play_again();

        assert_eq!(again.stage(), Stage::Playing);
        assert_eq!(again.theme(), finished.theme());
        assert_eq!(again.words(), finished.words());
        assert_eq!(again.current_index(), 0);
        let duel = again.mode().unwrap().duel().unwrap();
        assert!(duel.players.iter().all(|p| p.score == 0));
    }

    #[test]
    fn restart_clears_everything() {
        let quiz = playing(&["a", "b"], ModeChoice::Solo)
            .answer(Outcome::Correct)
            .restart();
        assert_eq!(quiz, Quiz::new());
    }

    #[test]
    fn progress_counts_resolved_word() {
        let quiz = playing(&["a", "b", "c", "d"], ModeChoice::Solo);
        assert_eq!(quiz.progress(), 0.0);
        let quiz = quiz.reduce(Event::Answer {
            word_index: 0,
            outcome: Outcome::Correct,
        });
        assert_eq!(quiz.progress(), 0.25);
    }
}
