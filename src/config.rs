use crate::app_dirs::AppDirs;
use crate::error::GameError;
use crate::monsters::{Progression, DEFAULT_MONSTERS};
use crate::word_bank::{parse_words, Word, WordPolicy, DEFAULT_WORDS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const TIME_LIMIT_SECONDS: u64 = 60;
pub const MAX_HEARTS: u32 = 7;
/// Upper bounds accepted from the CLI and the config file
pub const TIME_LIMIT_SECONDS_CEILING: u64 = 86_400;
pub const MAX_HEARTS_CEILING: u32 = 99;
/// Flip to `false` to loop Bat -> ... -> Imp -> Bat -> ... instead of ending in victory
pub const END_AFTER_LAST_MONSTER: bool = true;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub time_limit_secs: u64,
    pub max_hearts: u32,
    pub word_policy: WordPolicy,
    pub progression: Progression,
    pub words: Vec<String>,
    pub monsters: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: TIME_LIMIT_SECONDS,
            max_hearts: MAX_HEARTS,
            word_policy: WordPolicy::default(),
            progression: Progression::default(),
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
            monsters: DEFAULT_MONSTERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl GameConfig {
    /// Both limits must be at least 1 and no more than their ceilings
    pub fn validate(&self) -> Result<(), GameError> {
        check_range(
            "time_limit_secs",
            self.time_limit_secs,
            TIME_LIMIT_SECONDS_CEILING,
        )?;
        check_range(
            "max_hearts",
            u64::from(self.max_hearts),
            u64::from(MAX_HEARTS_CEILING),
        )
    }

    pub fn word_pool(&self) -> Result<Vec<Word>, GameError> {
        parse_words(&self.words)
    }

    pub fn roster(&self) -> Result<Vec<String>, GameError> {
        let names: Vec<String> = self
            .monsters
            .iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();
        if names.is_empty() {
            return Err(GameError::EmptyRoster);
        }
        Ok(names)
    }
}

fn check_range(name: &'static str, value: u64, max: u64) -> Result<(), GameError> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(GameError::OutOfRange { name, value, max })
    }
}

pub trait ConfigStore {
    fn load(&self) -> GameConfig;
    fn save(&self, cfg: &GameConfig) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> GameConfig {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<GameConfig>(&bytes) {
                Ok(cfg) => cfg,
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), %err, "ignoring malformed config");
                    GameConfig::default()
                }
            },
            Err(_) => GameConfig::default(),
        }
    }

    fn save(&self, cfg: &GameConfig) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
