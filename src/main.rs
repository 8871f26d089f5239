use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::backend::CrosstermBackend;
use std::{
    error::Error,
    io::{self, stdin, Write},
    panic,
    path::PathBuf,
};
use wordcrusader::{
    config::{
        ConfigStore, FileConfigStore, GameConfig, MAX_HEARTS_CEILING, TIME_LIMIT_SECONDS_CEILING,
    },
    error::GameError,
    game::GameController,
    logging,
    monsters::Progression,
    runtime::{CrosstermInput, SystemClock},
    ui::TerminalDisplay,
    word_bank::{build_word_bank, WordPolicy},
};

/// medieval word-guessing tui: decode hidden words to defeat monsters
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Decode each monster's hidden word one letter at a time before the timer runs out or your hearts are gone. Every wrong letter costs a heart; clear the whole roster to win."
)]
pub struct Cli {
    /// seconds allowed per monster
    #[clap(
        short = 's',
        long,
        value_parser = clap::value_parser!(u64).range(1..=TIME_LIMIT_SECONDS_CEILING)
    )]
    time_limit: Option<u64>,

    /// hearts per monster
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..=MAX_HEARTS_CEILING as i64))]
    hearts: Option<u32>,

    /// how words are drawn: resample (repeats possible) or shuffled (each word once)
    #[clap(long, value_enum)]
    words: Option<WordPolicy>,

    /// loop back to the first monster instead of ending after the last
    #[clap(long)]
    wrap: bool,

    /// config file to use instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// write the effective settings to the config file before playing
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Layer command-line flags over the loaded config
    fn apply(&self, mut cfg: GameConfig) -> GameConfig {
        if let Some(secs) = self.time_limit {
            cfg.time_limit_secs = secs;
        }
        if let Some(hearts) = self.hearts {
            cfg.max_hearts = hearts;
        }
        if let Some(policy) = self.words {
            cfg.word_policy = policy;
        }
        if self.wrap {
            cfg.progression = Progression::Wrap;
        }
        cfg
    }
}

/// Leaves raw mode and the alternate screen when dropped, including while unwinding
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.out, LeaveAlternateScreen, Show);
    }
}

/// Restore the terminal before the panic message is printed
fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        default_hook(info);
    }));
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = logging::init();

    let store = cli.config_store();
    let cfg = cli.apply(store.load());
    cfg.validate()?;
    if cli.save_config {
        store.save(&cfg)?;
        tracing::info!(path = %store.path().display(), "saved config");
    }

    let words = build_word_bank(cfg.word_policy, cfg.word_pool()?)?;
    let display = TerminalDisplay::new(CrosstermBackend::new(io::stdout()))?;
    let mut game = GameController::new(cfg, words, CrosstermInput::new(), display, SystemClock)?;

    install_panic_hook();
    let terminal = TerminalGuard::new(io::stdout());
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;

    let result = game.run();
    drop(terminal);

    match result {
        Ok(()) | Err(GameError::InputClosed) => {
            println!("Thanks for playing WordCrusader!");
            Ok(())
        }
        Err(err) => {
            tracing::error!(%err, "game aborted");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_guard_restores_screen_on_unwind() {
        let mut out = Vec::new();
        let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            let _terminal = TerminalGuard::new(&mut out);
            panic!("game loop failed");
        }));
        assert!(result.is_err());

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));
    }

    #[test]
    fn test_terminal_guard_restores_screen_on_early_return() {
        fn enter(out: &mut Vec<u8>) -> io::Result<()> {
            let _terminal = TerminalGuard::new(out);
            Err(io::Error::other("alternate screen unavailable"))
        }

        let mut out = Vec::new();
        assert!(enter(&mut out).is_err());
        assert!(String::from_utf8(out).unwrap().contains("\x1b[?1049l"));
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["wordcrusader"]);

        assert_eq!(cli.time_limit, None);
        assert_eq!(cli.hearts, None);
        assert_eq!(cli.words, None);
        assert!(!cli.wrap);
        assert_eq!(cli.config, None);
        assert!(!cli.save_config);
    }

    #[test]
    fn test_cli_time_limit() {
        let cli = Cli::parse_from(["wordcrusader", "-s", "30"]);
        assert_eq!(cli.time_limit, Some(30));

        let cli = Cli::parse_from(["wordcrusader", "--time-limit", "90"]);
        assert_eq!(cli.time_limit, Some(90));
    }

    #[test]
    fn test_cli_rejects_zero_limits() {
        assert!(Cli::try_parse_from(["wordcrusader", "-s", "0"]).is_err());
        assert!(Cli::try_parse_from(["wordcrusader", "--hearts", "0"]).is_err());
    }

    #[test]
    fn test_cli_caps_limits() {
        let cli = Cli::parse_from(["wordcrusader", "-s", "86400", "--hearts", "99"]);
        assert_eq!(cli.time_limit, Some(TIME_LIMIT_SECONDS_CEILING));
        assert_eq!(cli.hearts, Some(MAX_HEARTS_CEILING));

        assert!(Cli::try_parse_from(["wordcrusader", "-s", "86401"]).is_err());
        assert!(Cli::try_parse_from(["wordcrusader", "--hearts", "100"]).is_err());
        assert!(Cli::try_parse_from(["wordcrusader", "-s", "18446744073709551615"]).is_err());
        assert!(Cli::try_parse_from(["wordcrusader", "--hearts", "4294967295"]).is_err());
    }

    #[test]
    fn test_cli_word_policy() {
        let cli = Cli::parse_from(["wordcrusader", "--words", "shuffled"]);
        assert_eq!(cli.words, Some(WordPolicy::Shuffled));

        let cli = Cli::parse_from(["wordcrusader", "--words", "resample"]);
        assert_eq!(cli.words, Some(WordPolicy::Resample));

        assert!(Cli::try_parse_from(["wordcrusader", "--words", "sorted"]).is_err());
    }

    #[test]
    fn test_cli_config_path() {
        let cli = Cli::parse_from(["wordcrusader", "--config", "/tmp/wc.json", "--save-config"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/wc.json")));
        assert!(cli.save_config);
        assert_eq!(cli.config_store().path(), PathBuf::from("/tmp/wc.json"));
    }

    #[test]
    fn test_apply_without_flags_keeps_config() {
        let cli = Cli::parse_from(["wordcrusader"]);
        let cfg = GameConfig {
            max_hearts: 4,
            progression: Progression::Wrap,
            ..GameConfig::default()
        };
        assert_eq!(cli.apply(cfg.clone()), cfg);
    }

    #[test]
    fn test_apply_flags_override_config() {
        let cli = Cli::parse_from([
            "wordcrusader",
            "-s",
            "45",
            "--hearts",
            "3",
            "--words",
            "shuffled",
            "--wrap",
        ]);
        let cfg = cli.apply(GameConfig::default());

        assert_eq!(cfg.time_limit_secs, 45);
        assert_eq!(cfg.max_hearts, 3);
        assert_eq!(cfg.word_policy, WordPolicy::Shuffled);
        assert_eq!(cfg.progression, Progression::Wrap);
    }
}
