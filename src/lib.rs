// Library surface for the binary and for headless/integration tests.
pub mod app_dirs;
pub mod challenge;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod monsters;
pub mod runtime;
pub mod scoring;
pub mod ui;
pub mod word_bank;
