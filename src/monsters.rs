use crate::config::END_AFTER_LAST_MONSTER;
use crate::error::GameError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MONSTERS: &[&str] = &["Bat", "Goblin", "Ghoul", "Imp"];

/// What happens after the last monster on the roster is defeated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Progression {
    /// The game ends in victory
    StopAtEnd,
    /// Start over at the first monster, endlessly
    Wrap,
}

impl Default for Progression {
    fn default() -> Self {
        if END_AFTER_LAST_MONSTER {
            Progression::StopAtEnd
        } else {
            Progression::Wrap
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceResult {
    Continue,
    SequenceComplete,
}

/// Ordered roster of opponents and the player's position in it
#[derive(Debug, Clone)]
pub struct MonsterSequence {
    names: Vec<String>,
    index: usize,
    progression: Progression,
    complete: bool,
}

impl MonsterSequence {
    pub fn new(names: Vec<String>, progression: Progression) -> Result<Self, GameError> {
        if names.is_empty() {
            return Err(GameError::EmptyRoster);
        }
        Ok(Self {
            names,
            index: 0,
            progression,
            complete: false,
        })
    }

    pub fn current(&self) -> &str {
        &self.names[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// In stop-at-end mode the index stays on the last monster once the roster is cleared
    pub fn advance(&mut self) -> AdvanceResult {
        match self.progression {
            Progression::StopAtEnd => {
                if self.complete || self.index + 1 >= self.names.len() {
                    self.complete = true;
                    AdvanceResult::SequenceComplete
                } else {
                    self.index += 1;
                    AdvanceResult::Continue
                }
            }
            Progression::Wrap => {
                self.index = (self.index + 1) % self.names.len();
                AdvanceResult::Continue
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_default_progression_follows_constant() {
        let expected = if END_AFTER_LAST_MONSTER {
            Progression::StopAtEnd
        } else {
            Progression::Wrap
        };
        assert_eq!(Progression::default(), expected);
    }

    #[test]
    fn test_stop_at_end_completes_after_last() {
        let mut seq =
            MonsterSequence::new(roster(&["Bat", "Goblin"]), Progression::StopAtEnd).unwrap();
        assert_eq!(seq.current(), "Bat");

        assert_eq!(seq.advance(), AdvanceResult::Continue);
        assert_eq!(seq.current(), "Goblin");

        assert_eq!(seq.advance(), AdvanceResult::SequenceComplete);
        assert_eq!(seq.current(), "Goblin");
        assert_eq!(seq.index(), 1);

        // Stays complete and never regresses
        assert_eq!(seq.advance(), AdvanceResult::SequenceComplete);
        assert_eq!(seq.index(), 1);
    }

    #[test]
    fn test_wrap_loops_forever() {
        let mut seq =
            MonsterSequence::new(roster(&["Bat", "Goblin", "Imp"]), Progression::Wrap).unwrap();
        let mut visited = Vec::new();
        for _ in 0..7 {
            assert_eq!(seq.advance(), AdvanceResult::Continue);
            visited.push(seq.current().to_string());
        }
        assert_eq!(
            visited,
            roster(&["Goblin", "Imp", "Bat", "Goblin", "Imp", "Bat", "Goblin"])
        );
    }

    #[test]
    fn test_single_monster_roster() {
        let mut stop = MonsterSequence::new(roster(&["Imp"]), Progression::StopAtEnd).unwrap();
        assert_eq!(stop.advance(), AdvanceResult::SequenceComplete);

        let mut wrap = MonsterSequence::new(roster(&["Imp"]), Progression::Wrap).unwrap();
        assert_eq!(wrap.advance(), AdvanceResult::Continue);
        assert_eq!(wrap.current(), "Imp");
    }

    #[test]
    fn test_empty_roster_rejected() {
        assert_matches!(
            MonsterSequence::new(Vec::new(), Progression::Wrap),
            Err(GameError::EmptyRoster)
        );
    }

    #[test]
    fn test_progression_display() {
        assert_eq!(Progression::StopAtEnd.to_string(), "stop-at-end");
        assert_eq!(Progression::Wrap.to_string(), "wrap");
    }
}
