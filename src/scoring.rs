use crate::mode::{Duel, GameMode, Player};
use crate::util::percentage;
use itertools::Itertools;

/// How a single word was resolved
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    /// Free-for-all: this player knew the word
    CorrectBy(usize),
    /// Free-for-all: nobody knew the word
    NobodyCorrect,
}

impl GameMode {
    /// Whether `outcome` makes sense in this mode
    pub fn accepts(&self, outcome: Outcome) -> bool {
        match (self, outcome) {
            (GameMode::Solo { .. }, Outcome::Correct | Outcome::Incorrect) => true,
            (GameMode::Duel(duel), Outcome::Correct | Outcome::Incorrect) => duel.turn_based,
            (GameMode::Duel(duel), Outcome::CorrectBy(idx)) => {
                !duel.turn_based && idx < duel.players.len()
            }
            (GameMode::Duel(duel), Outcome::NobodyCorrect) => !duel.turn_based,
            (GameMode::Solo { .. }, _) => false,
        }
    }

    /// The outcome recorded when the countdown runs out
    pub fn missed(&self) -> Outcome {
        match self {
            GameMode::Duel(Duel {
                turn_based: false, ..
            }) => Outcome::NobodyCorrect,
            _ => Outcome::Incorrect,
        }
    }

    /// Apply one resolution, producing the next snapshot. `None` when the
    /// outcome does not fit the mode.
    pub fn score(&self, outcome: Outcome) -> Option<GameMode> {
        if !self.accepts(outcome) {
            return None;
        }

        let next = match self {
            GameMode::Solo { correct } => GameMode::Solo {
                correct: correct + u32::from(outcome == Outcome::Correct),
            },
            GameMode::Duel(duel) if duel.turn_based => {
                let players = if outcome == Outcome::Correct {
                    credit(&duel.players, duel.current_player)
                } else {
                    duel.players.clone()
                };
                GameMode::Duel(Duel {
                    players,
                    turn_based: true,
                    current_player: (duel.current_player + 1) % duel.players.len(),
                })
            }
            GameMode::Duel(duel) => {
                let players = match outcome {
                    Outcome::CorrectBy(idx) => credit(&duel.players, idx),
                    _ => duel.players.clone(),
                };
                GameMode::Duel(Duel {
                    players,
                    turn_based: false,
                    current_player: duel.current_player,
                })
            }
        };
        Some(next)
    }
}

fn credit(players: &[Player], idx: usize) -> Vec<Player> {
    players
        .iter()
        .enumerate()
        .map(|(i, p)| Player {
            name: p.name.clone(),
            score: if i == idx { p.score + 1 } else { p.score },
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Performance {
    #[strum(to_string = "Fantastic! You're an expert!")]
    Expert,
    #[strum(to_string = "Very well done! Excellent knowledge!")]
    Great,
    #[strum(to_string = "Good job! Keep learning!")]
    Good,
    #[strum(to_string = "Not bad! There's room to grow!")]
    Fair,
    #[strum(to_string = "Keep studying! You'll get better!")]
    KeepStudying,
}

impl Performance {
    pub fn from_percentage(pct: u32) -> Self {
        match pct {
            90.. => Performance::Expert,
            70..=89 => Performance::Great,
            50..=69 => Performance::Good,
            30..=49 => Performance::Fair,
            _ => Performance::KeepStudying,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoloReport {
    pub correct: u32,
    pub total: usize,
    pub percentage: u32,
    pub performance: Performance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    /// 1-based; tied scores share a rank
    pub rank: usize,
    pub name: String,
    pub score: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Winner(String),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuelReport {
    pub standings: Vec<Standing>,
    pub verdict: Verdict,
}

/// End-of-game summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Solo(SoloReport),
    Duel(DuelReport),
}

impl Report {
    pub fn new(mode: &GameMode, total: usize) -> Self {
        match mode {
            GameMode::Solo { correct } => {
                let pct = percentage(*correct, total);
                Report::Solo(SoloReport {
                    correct: *correct,
                    total,
                    percentage: pct,
                    performance: Performance::from_percentage(pct),
                })
            }
            GameMode::Duel(duel) => Report::Duel(rank(&duel.players, total)),
        }
    }

    /// One-line summary suitable for sharing
    pub fn share_text(&self, theme: &str) -> String {
        match self {
            Report::Solo(solo) => format!(
                "I just tested my vocabulary on \"{}\" and knew {} of {} words!",
                theme, solo.correct, solo.total
            ),
            Report::Duel(duel) => {
                let leader = duel.standings.first();
                let (name, score) = leader.map_or(("", 0), |s| (s.name.as_str(), s.score));
                match duel.verdict {
                    Verdict::Draw => format!(
                        "Duel on \"{}\": {} tied with {} points!",
                        theme, name, score
                    ),
                    Verdict::Winner(_) => format!(
                        "Duel on \"{}\": {} won with {} points!",
                        theme, name, score
                    ),
                }
            }
        }
    }
}

/// Highest score first; equal scores keep their seating order.
fn rank(players: &[Player], total: usize) -> DuelReport {
    let sorted: Vec<&Player> = players
        .iter()
        .sorted_by(|a, b| b.score.cmp(&a.score))
        .collect();

    let mut standings: Vec<Standing> = Vec::with_capacity(sorted.len());
    for (pos, player) in sorted.iter().enumerate() {
        let rank = match standings.last() {
            Some(prev) if prev.score == player.score => prev.rank,
            _ => pos + 1,
        };
        standings.push(Standing {
            rank,
            name: player.name.clone(),
            score: player.score,
            percentage: percentage(player.score, total),
        });
    }

    let verdict = match (standings.first(), standings.get(1)) {
        (Some(first), Some(second)) if first.score == second.score => Verdict::Draw,
        (Some(first), _) => Verdict::Winner(first.name.clone()),
        (None, _) => Verdict::Draw,
    };

    DuelReport { standings, verdict }
}
