use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::GameError;
use crate::game::ViewModel;

/// Blocking source of player keystrokes
pub trait InputSource {
    /// Menu choice on the title and game-over screens
    fn read_choice_key(&mut self) -> Result<char, GameError>;
    /// A single guess while playing
    fn read_guess_letter(&mut self) -> Result<char, GameError>;
}

/// Sink for rendered snapshots; owns all text formatting
pub trait Display {
    fn render(&mut self, view: &ViewModel) -> Result<(), GameError>;
}

/// Monotonic time source
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Production input using crossterm key events (terminal must be in raw mode)
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl CrosstermInput {
    pub fn new() -> Self {
        Self
    }

    fn next_char(&mut self) -> Result<char, GameError> {
        next_char_from(event::read)
    }
}

/// Pull events until one maps to a character. Read failures surface as `Io`.
fn next_char_from<F>(mut read: F) -> Result<char, GameError>
where
    F: FnMut() -> io::Result<Event>,
{
    loop {
        match read() {
            Ok(Event::Key(key)) => {
                if let Some(c) = key_to_char(key)? {
                    return Ok(c);
                }
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(%err, "terminal input failed");
                return Err(GameError::Io(err));
            }
        }
    }
}

/// Map a key event to a character. Esc and ctrl+c close the input;
/// releases and non-character keys are skipped.
fn key_to_char(key: KeyEvent) -> Result<Option<char>, GameError> {
    if key.kind == KeyEventKind::Release {
        return Ok(None);
    }
    match key.code {
        KeyCode::Esc => Err(GameError::InputClosed),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Err(GameError::InputClosed)
        }
        KeyCode::Char(c) => Ok(Some(c)),
        _ => Ok(None),
    }
}

impl InputSource for CrosstermInput {
    fn read_choice_key(&mut self) -> Result<char, GameError> {
        self.next_char()
    }

    fn read_guess_letter(&mut self) -> Result<char, GameError> {
        self.next_char()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Test input: replays a fixed key sequence, then reports `InputClosed`
#[derive(Debug, Default)]
pub struct ScriptedInput {
    keys: VecDeque<char>,
}

impl ScriptedInput {
    pub fn new<I: IntoIterator<Item = char>>(keys: I) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl InputSource for ScriptedInput {
    fn read_choice_key(&mut self) -> Result<char, GameError> {
        self.keys.pop_front().ok_or(GameError::InputClosed)
    }

    fn read_guess_letter(&mut self) -> Result<char, GameError> {
        self.keys.pop_front().ok_or(GameError::InputClosed)
    }
}

/// Test clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Test display that keeps every rendered snapshot. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    frames: Rc<RefCell<Vec<ViewModel>>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<ViewModel> {
        self.frames.borrow().clone()
    }

    pub fn last(&self) -> Option<ViewModel> {
        self.frames.borrow().last().cloned()
    }
}

impl Display for RecordingDisplay {
    fn render(&mut self, view: &ViewModel) -> Result<(), GameError> {
        self.frames.borrow_mut().push(view.clone());
        Ok(())
    }
}
