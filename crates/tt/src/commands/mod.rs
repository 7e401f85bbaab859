//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod posts;
pub(crate) mod render;

use std::path::PathBuf;

use clap::Args;
use tt_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use posts::PostsArgs;
pub(crate) use render::RenderArgs;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover techtext.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Posts source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Reading speed in words per minute (overrides config).
    #[arg(long)]
    words_per_minute: Option<u32>,

    /// Disable the generated contents list.
    #[arg(long)]
    no_toc: bool,

    /// Enable verbose output (show per-post timing logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            words_per_minute: self.words_per_minute,
            toc: self.no_toc.then_some(false),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}
