use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 2;
/// Free-for-all credits players with the digit keys 1-9
pub const MAX_PLAYERS: usize = 9;
pub const MAX_NAME_LEN: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: u32,
}

impl Player {
    /// A fresh player with zero score; `None` for a blank name
    pub fn new(name: &str) -> Option<Self> {
        clean_name(name).map(|name| Self { name, score: 0 })
    }
}

fn clean_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_NAME_LEN).collect())
}

/// Duel player list being edited before the game starts.
///
/// Invalid edits (blank names, shrinking below two players, growing past
/// nine) are ignored and reported through the `bool` return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            names: vec!["Player 1".to_string(), "Player 2".to_string()],
        }
    }
}

impl Roster {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn add(&mut self, name: &str) -> bool {
        if self.names.len() >= MAX_PLAYERS {
            return false;
        }
        match clean_name(name) {
            Some(name) => {
                self.names.push(name);
                true
            }
            None => false,
        }
    }

    /// Append a player named after its seat number
    pub fn add_default(&mut self) -> bool {
        let name = format!("Player {}", self.names.len() + 1);
        self.add(&name)
    }

    pub fn remove(&mut self, idx: usize) -> bool {
        if self.names.len() <= MIN_PLAYERS || idx >= self.names.len() {
            return false;
        }
        self.names.remove(idx);
        true
    }

    pub fn rename(&mut self, idx: usize, name: &str) -> bool {
        match (self.names.get_mut(idx), clean_name(name)) {
            (Some(slot), Some(name)) => {
                *slot = name;
                true
            }
            _ => false,
        }
    }
}

/// What the user picked on the mode screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeChoice {
    Solo,
    Duel { names: Vec<String>, turn_based: bool },
}

impl ModeChoice {
    pub fn duel(roster: &Roster, turn_based: bool) -> Self {
        ModeChoice::Duel {
            names: roster.names().to_vec(),
            turn_based,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duel {
    pub players: Vec<Player>,
    pub turn_based: bool,
    pub current_player: usize,
}

impl Duel {
    pub fn current(&self) -> Option<&Player> {
        if self.turn_based {
            self.players.get(self.current_player)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameMode {
    Solo { correct: u32 },
    Duel(Duel),
}

impl GameMode {
    /// Build a mode with zeroed scores. Blank names are dropped; a duel with
    /// fewer than two players left is rejected.
    pub fn from_choice(choice: &ModeChoice) -> Option<Self> {
        match choice {
            ModeChoice::Solo => Some(GameMode::Solo { correct: 0 }),
            ModeChoice::Duel { names, turn_based } => {
                let players: Vec<Player> = names
                    .iter()
                    .filter_map(|name| Player::new(name))
                    .take(MAX_PLAYERS)
                    .collect();
                if players.len() < MIN_PLAYERS {
                    return None;
                }
                Some(GameMode::Duel(Duel {
                    players,
                    turn_based: *turn_based,
                    current_player: 0,
                }))
            }
        }
    }

    /// Same mode and players, every score back to zero and the turn back to
    /// the first player
    pub fn reset(&self) -> Self {
        match self {
            GameMode::Solo { .. } => GameMode::Solo { correct: 0 },
            GameMode::Duel(duel) => GameMode::Duel(Duel {
                players: duel
                    .players
                    .iter()
                    .map(|p| Player {
                        name: p.name.clone(),
                        score: 0,
                    })
                    .collect(),
                turn_based: duel.turn_based,
                current_player: 0,
            }),
        }
    }

    pub fn is_solo(&self) -> bool {
        matches!(self, GameMode::Solo { .. })
    }

    pub fn duel(&self) -> Option<&Duel> {
        match self {
            GameMode::Duel(duel) => Some(duel),
            GameMode::Solo { .. } => None,
        }
    }
}
