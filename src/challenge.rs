use crate::word_bank::Word;
use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt;
use std::time::Instant;

/// Result of feeding one key to a challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Not a letter; nothing changed
    InvalidInput,
    /// Letter was guessed before; nothing changed and no heart lost
    AlreadyGuessed,
    Miss { hearts_remaining: u32 },
    Hit,
    /// The guess revealed the last hidden letter
    Solved,
}

/// Why a challenge stopped accepting guesses without being solved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeEnd {
    TimedOut,
    Defeated,
}

/// The word as the player sees it: revealed letters, `None` for hidden ones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedWord {
    pub cells: Vec<Option<char>>,
}

impl fmt::Display for MaskedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.cells.iter().map(|c| c.unwrap_or('_')).join(" ");
        f.write_str(&text)
    }
}

/// One timed encounter between the player and a hidden word
#[derive(Debug, Clone)]
pub struct ChallengeSession {
    word: Word,
    guessed_letters: BTreeSet<char>,
    hearts_remaining: u32,
    started_at: Instant,
    time_limit_secs: u64,
}

impl ChallengeSession {
    pub fn start(word: Word, time_limit_secs: u64, max_hearts: u32, now: Instant) -> Self {
        Self {
            word,
            guessed_letters: BTreeSet::new(),
            hearts_remaining: max_hearts,
            started_at: now,
            time_limit_secs,
        }
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn hearts_remaining(&self) -> u32 {
        self.hearts_remaining
    }

    /// Guessed letters in sorted order
    pub fn guessed_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.guessed_letters.iter().copied()
    }

    /// Whole seconds left, truncated; negative once the limit has passed
    pub fn time_left(&self, now: Instant) -> i64 {
        let elapsed = now.saturating_duration_since(self.started_at).as_secs();
        let limit = i64::try_from(self.time_limit_secs).unwrap_or(i64::MAX);
        limit.saturating_sub(i64::try_from(elapsed).unwrap_or(i64::MAX))
    }

    pub fn render(&self) -> MaskedWord {
        MaskedWord {
            cells: self
                .word
                .chars()
                .map(|c| {
                    self.guessed_letters
                        .contains(&c.to_ascii_lowercase())
                        .then_some(c)
                })
                .collect(),
        }
    }

    pub fn is_solved(&self) -> bool {
        self.word
            .chars()
            .all(|c| self.guessed_letters.contains(&c.to_ascii_lowercase()))
    }

    /// Terminal condition, if any. Time runs out before hearts are checked.
    pub fn status(&self, now: Instant) -> Option<ChallengeEnd> {
        if self.time_left(now) <= 0 {
            Some(ChallengeEnd::TimedOut)
        } else if self.hearts_remaining == 0 {
            Some(ChallengeEnd::Defeated)
        } else {
            None
        }
    }

    /// Callers must check `status` first; guesses after the end are not meaningful.
    pub fn submit_guess(&mut self, letter: char) -> GuessOutcome {
        let letter = letter.to_ascii_lowercase();
        if !letter.is_ascii_alphabetic() {
            return GuessOutcome::InvalidInput;
        }
        if !self.guessed_letters.insert(letter) {
            return GuessOutcome::AlreadyGuessed;
        }

        if !self.word.contains(letter) {
            self.hearts_remaining = self.hearts_remaining.saturating_sub(1);
            GuessOutcome::Miss {
                hearts_remaining: self.hearts_remaining,
            }
        } else if self.is_solved() {
            GuessOutcome::Solved
        } else {
            GuessOutcome::Hit
        }
    }
}
