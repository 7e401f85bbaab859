//! techtext CLI - blog engine.
//!
//! Provides commands for:
//! - `render`: Render one post to HTML
//! - `posts`: List published posts, newest first
//! - `check`: Validate every post and report unresolved embeds

mod commands;
mod error;
mod output;
mod pipeline;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, PostsArgs, RenderArgs};
use output::Output;

/// techtext - blog engine.
#[derive(Parser)]
#[command(name = "tt", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a post to an HTML fragment on stdout.
    Render(RenderArgs),
    /// List published posts, newest first.
    Posts(PostsArgs),
    /// Check every post for frontmatter errors and unresolved embeds.
    Check(CheckArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.common.verbose,
            Self::Posts(args) => args.common.verbose,
            Self::Check(args) => args.common.verbose,
        }
    }
}

/// Log level when `RUST_LOG` is unset.
const DEFAULT_LOG_LEVEL: &str = "warn";

/// `--verbose` enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.command.verbose()))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Posts(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_verbose_log_filter() {
        assert_eq!(log_filter(true).to_string(), "info");
    }

    #[test]
    fn test_default_log_filter_shows_warnings() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(log_filter(false).to_string(), DEFAULT_LOG_LEVEL);
        }
    }
}
