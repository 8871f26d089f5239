//! File-based logging.
//!
//! The terminal belongs to the game screen, so log output goes only to
//! `~/.local/state/wordcrusader/wordcrusader.log` (or the platform data dir).
//! Set `WORDCRUSADER_LOG` to an `EnvFilter` directive (e.g. `debug`) to change
//! the level; the default is `info`.

use crate::app_dirs::AppDirs;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub const LOG_ENV_VAR: &str = "WORDCRUSADER_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Initialize file logging.
///
/// Returns a `WorkerGuard` that must be held until shutdown so buffered lines
/// are flushed. Returns `None`, leaving logging disabled, when the log file
/// can't be created.
pub fn init() -> Option<WorkerGuard> {
    let log_dir = AppDirs::log_dir()?;
    if std::fs::create_dir_all(&log_dir).is_err() {
        return None;
    }

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("wordcrusader")
        .filename_suffix("log")
        .build(&log_dir)
        .ok()?;
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(filter())
        .try_init()
        .ok()?;

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");
    Some(guard)
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}
