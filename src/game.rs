use std::time::Instant;

use tracing::{debug, info};

use crate::challenge::{ChallengeEnd, ChallengeSession, GuessOutcome, MaskedWord};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::monsters::{AdvanceResult, MonsterSequence};
use crate::runtime::{Clock, Display, InputSource};
use crate::scoring::award;
use crate::word_bank::WordBank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GameOverReason {
    TimedOut,
    Defeated,
    /// Every monster on the roster was defeated
    Victory,
    /// The shuffled word pool ran dry
    PoolExhausted,
}

impl From<ChallengeEnd> for GameOverReason {
    fn from(end: ChallengeEnd) -> Self {
        match end {
            ChallengeEnd::TimedOut => GameOverReason::TimedOut,
            ChallengeEnd::Defeated => GameOverReason::Defeated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Title,
    Playing,
    GameOver(GameOverReason),
}

/// Which screen a snapshot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Screen {
    Title,
    Playing,
    GameOver,
}

impl From<GameState> for Screen {
    fn from(state: GameState) -> Self {
        match state {
            GameState::Title => Screen::Title,
            GameState::Playing => Screen::Playing,
            GameState::GameOver(_) => Screen::GameOver,
        }
    }
}

/// Feedback about what happened since the previous render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Guess(GuessOutcome),
    MonsterDefeated {
        monster: String,
        word: String,
        /// `None` when the roster is cleared
        next: Option<String>,
    },
}

/// Everything the display needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub screen: Screen,
    pub game_over: Option<GameOverReason>,
    pub monster: Option<String>,
    pub hearts: u32,
    pub max_hearts: u32,
    /// Whole seconds, never below zero
    pub time_left: i64,
    pub time_limit_secs: u64,
    pub score: u32,
    pub masked_word: Option<MaskedWord>,
    pub guessed_letters: Vec<char>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// State of one game, from pressing Play until returning to the title
#[derive(Debug, Clone)]
pub struct GameSession {
    challenge: ChallengeSession,
    monsters: MonsterSequence,
    score: u32,
}

impl GameSession {
    pub fn challenge(&self) -> &ChallengeSession {
        &self.challenge
    }

    pub fn monsters(&self) -> &MonsterSequence {
        &self.monsters
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

/// Top-level Title -> Playing -> GameOver state machine
pub struct GameController<W: WordBank, I: InputSource, D: Display, C: Clock> {
    config: GameConfig,
    roster: Vec<String>,
    words: W,
    input: I,
    display: D,
    clock: C,
    state: GameState,
    session: Option<GameSession>,
    notice: Option<Notice>,
}

impl<W: WordBank, I: InputSource, D: Display, C: Clock> GameController<W, I, D, C> {
    pub fn new(
        config: GameConfig,
        words: W,
        input: I,
        display: D,
        clock: C,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let roster = config.roster()?;
        Ok(Self {
            config,
            roster,
            words,
            input,
            display,
            clock,
            state: GameState::Title,
            session: None,
            notice: None,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Score of the current (or just finished) game
    pub fn score(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.score)
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Loop until the player quits. `InputClosed` is returned as an error.
    pub fn run(&mut self) -> Result<(), GameError> {
        loop {
            if self.step()? == Flow::Quit {
                info!(score = self.score(), "player quit");
                return Ok(());
            }
        }
    }

    /// One iteration: render, then block for at most one key
    pub fn step(&mut self) -> Result<Flow, GameError> {
        match self.state {
            GameState::Title => self.step_title(),
            GameState::Playing => self.step_playing(),
            GameState::GameOver(_) => self.step_game_over(),
        }
    }

    pub fn view(&self) -> ViewModel {
        self.view_at(self.clock.now())
    }

    fn view_at(&self, now: Instant) -> ViewModel {
        let mut view = ViewModel {
            screen: self.state.into(),
            game_over: match self.state {
                GameState::GameOver(reason) => Some(reason),
                _ => None,
            },
            monster: None,
            hearts: self.config.max_hearts,
            max_hearts: self.config.max_hearts,
            time_left: i64::try_from(self.config.time_limit_secs).unwrap_or(i64::MAX),
            time_limit_secs: self.config.time_limit_secs,
            score: self.score(),
            masked_word: None,
            guessed_letters: Vec::new(),
            notice: self.notice.clone(),
        };

        if self.state != GameState::Title {
            if let Some(session) = &self.session {
                view.monster = Some(session.monsters.current().to_string());
                view.hearts = session.challenge.hearts_remaining();
                view.time_left = session.challenge.time_left(now).max(0);
                view.masked_word = Some(session.challenge.render());
                view.guessed_letters = session.challenge.guessed_letters().collect();
            }
        }
        view
    }

    fn step_title(&mut self) -> Result<Flow, GameError> {
        self.display.render(&self.view())?;
        match self.input.read_choice_key()?.to_ascii_lowercase() {
            'p' => self.start_game()?,
            'q' => return Ok(Flow::Quit),
            key => debug!(?key, "ignored key on title screen"),
        }
        Ok(Flow::Continue)
    }

    fn step_game_over(&mut self) -> Result<Flow, GameError> {
        self.display.render(&self.view())?;
        match self.input.read_choice_key()?.to_ascii_lowercase() {
            'r' => {
                self.state = GameState::Title;
                self.session = None;
                self.notice = None;
            }
            'q' => return Ok(Flow::Quit),
            key => debug!(?key, "ignored key on game over screen"),
        }
        Ok(Flow::Continue)
    }

    fn start_game(&mut self) -> Result<(), GameError> {
        self.notice = None;
        let monsters = MonsterSequence::new(self.roster.clone(), self.config.progression)?;
        match self.words.pick_word() {
            Ok(word) => {
                let challenge = ChallengeSession::start(
                    word,
                    self.config.time_limit_secs,
                    self.config.max_hearts,
                    self.clock.now(),
                );
                info!(monster = monsters.current(), "new game");
                self.session = Some(GameSession {
                    challenge,
                    monsters,
                    score: 0,
                });
                self.state = GameState::Playing;
            }
            Err(GameError::PoolExhausted) => {
                self.session = None;
                self.end_game(GameOverReason::PoolExhausted);
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    fn end_game(&mut self, reason: GameOverReason) {
        info!(%reason, score = self.score(), "game over");
        self.state = GameState::GameOver(reason);
    }

    fn step_playing(&mut self) -> Result<Flow, GameError> {
        // One clock read per pass: the terminal check, the countdown on screen
        // and the award all use the same value.
        let now = self.clock.now();
        let (status, time_left) = match &self.session {
            Some(session) => (
                session.challenge.status(now),
                session.challenge.time_left(now),
            ),
            None => {
                self.state = GameState::Title;
                return Ok(Flow::Continue);
            }
        };

        if let Some(end) = status {
            self.notice = None;
            self.end_game(end.into());
            return Ok(Flow::Continue);
        }

        self.display.render(&self.view_at(now))?;
        let letter = self.input.read_guess_letter()?;

        let Some(session) = self.session.as_mut() else {
            return Ok(Flow::Continue);
        };
        let outcome = session.challenge.submit_guess(letter);
        debug!(?letter, ?outcome, "guess");

        if outcome != GuessOutcome::Solved {
            self.notice = Some(Notice::Guess(outcome));
            return Ok(Flow::Continue);
        }

        let points = award(session.challenge.hearts_remaining(), time_left);
        session.score = session.score.saturating_add(points);
        let monster = session.monsters.current().to_string();
        let word = session.challenge.word().to_string();
        info!(%monster, points, score = session.score, "monster defeated");

        match session.monsters.advance() {
            AdvanceResult::SequenceComplete => {
                self.notice = Some(Notice::MonsterDefeated {
                    monster,
                    word,
                    next: None,
                });
                self.end_game(GameOverReason::Victory);
            }
            AdvanceResult::Continue => match self.words.pick_word() {
                Ok(next_word) => {
                    session.challenge = ChallengeSession::start(
                        next_word,
                        self.config.time_limit_secs,
                        self.config.max_hearts,
                        self.clock.now(),
                    );
                    self.notice = Some(Notice::MonsterDefeated {
                        monster,
                        word,
                        next: Some(session.monsters.current().to_string()),
                    });
                }
                Err(GameError::PoolExhausted) => {
                    self.notice = Some(Notice::MonsterDefeated {
                        monster,
                        word,
                        next: None,
                    });
                    self.end_game(GameOverReason::PoolExhausted);
                }
                Err(err) => return Err(err),
            },
        }
        Ok(Flow::Continue)
    }
}
