use crate::error::ValidationError;
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of words played per round
pub const ROUND_SIZE: usize = 10;

static WORDLIST_DIR: Dir = include_dir!("src/wordlists");

/// A validated theme and word list as supplied by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordList {
    pub theme: String,
    pub words: Vec<String>,
}

/// The words drawn for one round, in play order
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub theme: String,
    pub words: Vec<String>,
}

impl WordList {
    /// Parse a pasted `{ "theme": ..., "words": [...] }` payload.
    ///
    /// Duplicate words are kept as-is; only the shape is checked.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_str(raw)?;
        let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

        let theme = match object.get("theme") {
            None | Some(Value::Null) => return Err(ValidationError::MissingTheme),
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(_) => return Err(ValidationError::BlankTheme),
        };

        let entries = match object.get("words") {
            None | Some(Value::Null) => return Err(ValidationError::MissingWords),
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(ValidationError::WordsNotAList),
        };
        if entries.is_empty() {
            return Err(ValidationError::NoWords);
        }

        let words = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                entry
                    .as_str()
                    .map(str::to_string)
                    .ok_or(ValidationError::WordNotAString(idx + 1))
            })
            .collect::<Result<Vec<String>, _>>()?;

        Ok(Self { theme, words })
    }

    /// Draw a round: uniform shuffle of a copy, truncated to [`ROUND_SIZE`].
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Deck {
        let mut words = self.words.clone();
        words.shuffle(rng);
        words.truncate(ROUND_SIZE);

        Deck {
            theme: self.theme.clone(),
            words,
        }
    }

    /// Pretty JSON, as shown in the input buffer
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Parse and sample in one step
pub fn sample<R: Rng + ?Sized>(raw: &str, rng: &mut R) -> Result<Deck, ValidationError> {
    WordList::parse(raw).map(|list| list.sample(rng))
}

/// Word lists bundled with the binary, sorted by theme
pub fn presets() -> Vec<WordList> {
    let mut lists: Vec<WordList> = WORDLIST_DIR
        .files()
        .filter(|file| file.path().extension().is_some_and(|ext| ext == "json"))
        .filter_map(|file| {
            let parsed = file
                .contents_utf8()
                .ok_or_else(|| ValidationError::Json("not utf-8".to_string()))
                .and_then(WordList::parse);
            match parsed {
                Ok(list) => Some(list),
                Err(err) => {
                    tracing::warn!(path = %file.path().display(), %err, "skipping bundled word list");
                    None
                }
            }
        })
        .collect();
    lists.sort_by(|a, b| a.theme.cmp(&b.theme));
    lists
}

/// The example shown on the input screen
pub fn example() -> WordList {
    presets()
        .into_iter()
        .find(|list| list.theme == "Animals")
        .unwrap_or_else(|| WordList {
            theme: "Animals".to_string(),
            words: vec!["Dog".to_string(), "Cat".to_string(), "Elephant".to_string()],
        })
}
