use crate::error::GameError;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fantasy-themed pool used when the config file doesn't supply one
pub const DEFAULT_WORDS: &[&str] = &[
    "dragon",
    "knight",
    "castle",
    "sword",
    "shield",
    "bat",
    "goblin",
    "wizard",
    "troll",
    "orc",
    "elf",
    "dwarf",
    "phoenix",
    "griffin",
    "hydra",
    "cyclops",
    "minotaur",
    "vampire",
    "skeleton",
    "giant",
    "witch",
    "warlock",
    "necromancer",
    "cauldron",
    "armor",
    "chainmail",
    "enchanted",
    "fortress",
    "quest",
    "legend",
    "myth",
    "sorcery",
    "alchemy",
    "runestone",
];

/// A hidden word: one or more lowercase ASCII letters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word(String);

impl Word {
    /// Validates and lowercases `raw`. Surrounding whitespace is ignored.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, GameError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(GameError::InvalidWord(raw.as_ref().to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(letter)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a whole list of raw words, failing on the first invalid entry
pub fn parse_words<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Word>, GameError> {
    if raw.is_empty() {
        return Err(GameError::EmptyWordPool);
    }
    raw.iter().map(Word::new).collect()
}

/// How words are drawn from the pool
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WordPolicy {
    /// Uniform pick with replacement on every challenge, repeats possible
    #[default]
    Resample,
    /// Shuffle once, hand out each word at most once
    Shuffled,
}

/// Source of one word per challenge
pub trait WordBank {
    fn pick_word(&mut self) -> Result<Word, GameError>;
}

impl<W: WordBank + ?Sized> WordBank for Box<W> {
    fn pick_word(&mut self) -> Result<Word, GameError> {
        (**self).pick_word()
    }
}

/// Resampling policy: never runs dry
#[derive(Debug)]
pub struct RandomWordBank<R: Rng> {
    words: Vec<Word>,
    rng: R,
}

impl<R: Rng> RandomWordBank<R> {
    pub fn new(words: Vec<Word>, rng: R) -> Result<Self, GameError> {
        if words.is_empty() {
            return Err(GameError::EmptyWordPool);
        }
        Ok(Self { words, rng })
    }
}

impl RandomWordBank<StdRng> {
    pub fn from_entropy(words: Vec<Word>) -> Result<Self, GameError> {
        Self::new(words, StdRng::from_entropy())
    }
}

impl<R: Rng> WordBank for RandomWordBank<R> {
    fn pick_word(&mut self) -> Result<Word, GameError> {
        self.words
            .choose(&mut self.rng)
            .cloned()
            .ok_or(GameError::EmptyWordPool)
    }
}

/// Shuffled-consumption policy: each word handed out once, then `PoolExhausted`
#[derive(Debug)]
pub struct ShuffledWordBank {
    remaining: std::vec::IntoIter<Word>,
}

impl ShuffledWordBank {
    pub fn new<R: Rng>(mut words: Vec<Word>, rng: &mut R) -> Result<Self, GameError> {
        words.shuffle(rng);
        Self::in_order(words)
    }

    /// Consume `words` exactly in the given order
    pub fn in_order(words: Vec<Word>) -> Result<Self, GameError> {
        if words.is_empty() {
            return Err(GameError::EmptyWordPool);
        }
        Ok(Self {
            remaining: words.into_iter(),
        })
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

impl WordBank for ShuffledWordBank {
    fn pick_word(&mut self) -> Result<Word, GameError> {
        self.remaining.next().ok_or(GameError::PoolExhausted)
    }
}

/// Build the production word bank for the configured policy
pub fn build_word_bank(
    policy: WordPolicy,
    words: Vec<Word>,
) -> Result<Box<dyn WordBank>, GameError> {
    let bank: Box<dyn WordBank> = match policy {
        WordPolicy::Resample => Box::new(RandomWordBank::from_entropy(words)?),
        WordPolicy::Shuffled => Box::new(ShuffledWordBank::new(words, &mut rand::thread_rng())?),
    };
    Ok(bank)
}
